pub use get_building::*;

mod get_building;
