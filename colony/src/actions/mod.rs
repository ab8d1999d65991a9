mod administration;
mod buildings;
mod citizens;
mod work_orders;
