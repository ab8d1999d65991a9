pub use compound::*;
pub use error::*;
pub use json::*;
pub use storage::*;

mod compound;
mod error;
mod json;
mod storage;
