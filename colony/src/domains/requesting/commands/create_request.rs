use crate::citizens::CitizenId;
use crate::requesting::Requesting::RequestCreated;
use crate::requesting::{
    Payload, Request, RequestManager, RequestState, Requesting, RequestingError,
};
use crate::tokens::Token;

impl RequestManager {
    pub fn create_request(
        &mut self,
        token: Token,
        requester: Token,
        citizen: Option<CitizenId>,
        payload: Payload,
    ) -> Result<impl FnOnce() -> Vec<Requesting> + '_, RequestingError> {
        let kind = payload.kind();
        if self.find_resolver(&payload).is_none() {
            return Err(RequestingError::UnresolvableRequestKind { kind });
        }
        if self.requests.contains_key(&token) {
            return Err(RequestingError::RequestAlreadyExists { request: token });
        }
        let request = Request {
            token,
            requester,
            citizen,
            payload,
            resolver: None,
            state: RequestState::Created,
        };
        let command = move || {
            self.requests.insert(token, request);
            self.owners.entry(requester).or_default().push(token);
            vec![RequestCreated {
                request: token,
                requester,
                kind,
            }]
        };
        Ok(command)
    }
}
