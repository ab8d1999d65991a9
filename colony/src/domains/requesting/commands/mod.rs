pub use advance_request::*;
pub use cancel_request::*;
pub use create_request::*;
pub use mark_request_as_accepted::*;

mod advance_request;
mod cancel_request;
mod create_request;
mod mark_request_as_accepted;
