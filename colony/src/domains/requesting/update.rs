use crate::requesting::Requesting::RequestAssigned;
use crate::requesting::{RequestManager, RequestState, Requesting};
use crate::tokens::Token;
use log::warn;

impl RequestManager {
    /// Assigns every created request to the first accepting resolver of the chain.
    pub fn resolve_requests(&mut self) -> Vec<Requesting> {
        let mut pending: Vec<Token> = self
            .requests
            .values()
            .filter(|request| request.state == RequestState::Created)
            .map(|request| request.token)
            .collect();
        pending.sort();

        let mut events = vec![];
        for token in pending {
            let resolver = match self.requests.get(&token) {
                Some(request) => self
                    .find_resolver(&request.payload)
                    .map(|resolver| resolver.name().to_string()),
                None => continue,
            };
            let resolver = match resolver {
                Some(resolver) => resolver,
                None => {
                    warn!("Unable to resolve request {}, no resolver accepts it", token);
                    continue;
                }
            };
            if let Some(request) = self.requests.get_mut(&token) {
                request.state = RequestState::Assigned;
                request.resolver = Some(resolver.clone());
                events.push(RequestAssigned {
                    request: token,
                    resolver,
                });
            }
        }
        events
    }
}
