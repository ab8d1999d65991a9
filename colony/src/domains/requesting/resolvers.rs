use crate::requesting::{Payload, PayloadKind, RequestManager};
use log::info;

/// Provider able to satisfy requests of some payloads.
pub trait Resolver: Send + Sync {
    fn name(&self) -> &str;

    fn priority(&self) -> i32;

    fn accepts(&self, payload: &Payload) -> bool;
}

pub struct KindResolver {
    name: String,
    priority: i32,
    kinds: Vec<PayloadKind>,
}

impl KindResolver {
    pub fn new(name: &str, priority: i32, kinds: &[PayloadKind]) -> Self {
        Self {
            name: name.to_string(),
            priority,
            kinds: kinds.to_vec(),
        }
    }
}

impl Resolver for KindResolver {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn accepts(&self, payload: &Payload) -> bool {
        self.kinds.contains(&payload.kind())
    }
}

impl RequestManager {
    /// Chain stays ordered by descending priority, equal priorities keep
    /// registration order.
    pub fn register_resolver(&mut self, resolver: Box<dyn Resolver>) {
        info!(
            "Register request resolver {} with priority {}",
            resolver.name(),
            resolver.priority()
        );
        self.resolvers.push(resolver);
        self.resolvers
            .sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    pub fn resolver_names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|resolver| resolver.name()).collect()
    }

    pub(crate) fn find_resolver(&self, payload: &Payload) -> Option<&dyn Resolver> {
        self.resolvers
            .iter()
            .find(|resolver| resolver.accepts(payload))
            .map(|resolver| resolver.as_ref())
    }
}
