pub use change_level::*;
pub use change_residents::*;
pub use change_work_order::*;
pub use place_building::*;
pub use remove_building::*;

mod change_level;
mod change_residents;
mod change_work_order;
mod place_building;
mod remove_building;
