pub use get_open_requests::*;
pub use get_request::*;

mod get_open_requests;
mod get_request;
