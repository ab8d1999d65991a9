pub use add_citizen::*;
pub use change_job::*;
pub use change_home::*;
pub use remove_citizen::*;

mod add_citizen;
mod change_home;
mod change_job;
mod remove_citizen;
