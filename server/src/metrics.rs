use colony::api::Event;
use colony::working::Working;
use lazy_static::lazy_static;

lazy_static! {
    pub static ref METRIC_TICK_SECONDS: prometheus::Histogram =
        prometheus::register_histogram!("colony_tick_seconds", "colony_tick_seconds").unwrap();
    pub static ref METRIC_CLAIMS: prometheus::IntCounter =
        prometheus::register_int_counter!("colony_work_order_claims", "colony_work_order_claims")
            .unwrap();
    pub static ref METRIC_OBSERVERS: prometheus::IntGauge =
        prometheus::register_int_gauge!("colony_observers", "colony_observers").unwrap();
}

pub fn count_claims(events: &[Event]) -> u64 {
    let mut claims = 0;
    for event in events {
        if let Event::Working(events) = event {
            claims += events
                .iter()
                .filter(|event| matches!(event, Working::WorkOrderClaimed { .. }))
                .count() as u64;
        }
    }
    claims
}
