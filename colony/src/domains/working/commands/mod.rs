pub use claim_work_order::*;
pub use create_work_order::*;
pub use issue_notice::*;
pub use remove_work_order::*;

mod claim_work_order;
mod create_work_order;
mod issue_notice;
mod remove_work_order;
