use crate::citizens::CitizenId;
use crate::requesting::Requesting::RequestStateChanged;
use crate::requesting::{RequestManager, RequestState, Requesting, RequestingError};
use crate::tokens::Token;

impl RequestManager {
    pub fn cancel_request(
        &mut self,
        token: Token,
    ) -> Result<impl FnOnce() -> Vec<Requesting> + '_, RequestingError> {
        let request = self.get_request(token)?;
        if request.state.is_terminal() {
            return Err(RequestingError::InvalidArgument {
                request: token,
                reason: format!("request is already {:?}", request.state),
            });
        }
        let command = move || {
            self.detach_request(token);
            vec![RequestStateChanged {
                request: token,
                state: RequestState::Cancelled,
            }]
        };
        Ok(command)
    }

    /// Cancels every open request of requester, e.g. when building is destroyed.
    pub fn cancel_requests_of(&mut self, requester: Token) -> Vec<Requesting> {
        let tokens = self.get_open_requests(requester);
        self.cancel_all(tokens)
    }

    pub fn cancel_requests_for_citizen(&mut self, citizen: CitizenId) -> Vec<Requesting> {
        let tokens = self.requests_of_citizen(citizen);
        self.cancel_all(tokens)
    }

    fn cancel_all(&mut self, tokens: Vec<Token>) -> Vec<Requesting> {
        let mut events = vec![];
        for token in tokens {
            self.detach_request(token);
            events.push(RequestStateChanged {
                request: token,
                state: RequestState::Cancelled,
            });
        }
        events
    }
}
