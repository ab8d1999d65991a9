pub mod building;
pub mod citizens;
pub mod permissions;
pub mod requesting;
pub mod working;
