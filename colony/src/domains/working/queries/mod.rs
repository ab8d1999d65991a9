pub use get_work_order::*;

mod get_work_order;
