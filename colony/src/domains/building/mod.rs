pub use capabilities::*;
pub use commands::*;
pub use domain::*;
pub use loading::*;
pub use queries::*;

mod capabilities;
mod commands;
mod domain;
mod loading;
mod queries;
