pub use commands::*;
pub use domain::*;
pub use queries::*;
pub use resolvers::*;
pub use update::*;

mod commands;
mod domain;
mod queries;
mod resolvers;
mod update;
