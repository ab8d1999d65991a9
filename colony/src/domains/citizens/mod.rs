pub use commands::*;
pub use domain::*;
pub use loading::*;
pub use names::*;
pub use queries::*;

mod commands;
mod domain;
mod loading;
mod names;
mod queries;
