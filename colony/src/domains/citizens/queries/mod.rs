pub use get_citizen::*;

mod get_citizen;
