use prometheus::{register_int_counter_with_registry, IntCounter, Registry};

/// Byte counters of one side of the transport, e.g. `server` or `client`.
#[derive(Clone)]
pub struct TransferMetrics {
    pub sent_bytes: IntCounter,
    pub received_bytes: IntCounter,
}

impl TransferMetrics {
    pub fn new(registry: &Registry, side: &str) -> Result<Self, prometheus::Error> {
        let sent_bytes = register_int_counter_with_registry!(
            format!("{}_sent_bytes", side),
            format!("Bytes sent by {} over observer transport", side),
            registry
        )?;

        let received_bytes = register_int_counter_with_registry!(
            format!("{}_received_bytes", side),
            format!("Bytes received by {} over observer transport", side),
            registry
        )?;

        Ok(Self {
            sent_bytes,
            received_bytes,
        })
    }
}
