pub use client::*;
pub use errors::*;
pub use metrics::*;
pub use server::*;
pub use transfer::{decode, encode};

mod client;
mod errors;
mod metrics;
mod server;
mod transfer;
