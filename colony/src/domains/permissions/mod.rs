pub use commands::*;
pub use domain::*;

mod commands;
mod domain;
