use crate::requesting::Requesting::RequestStateChanged;
use crate::requesting::{RequestManager, RequestState, Requesting, RequestingError};
use crate::tokens::Token;

impl RequestManager {
    pub fn start_request(
        &mut self,
        token: Token,
    ) -> Result<impl FnOnce() -> Vec<Requesting> + '_, RequestingError> {
        self.advance_request(token, RequestState::InProgress)
    }

    pub fn complete_request(
        &mut self,
        token: Token,
    ) -> Result<impl FnOnce() -> Vec<Requesting> + '_, RequestingError> {
        self.advance_request(token, RequestState::Completed)
    }

    pub(crate) fn advance_request(
        &mut self,
        token: Token,
        state: RequestState,
    ) -> Result<impl FnOnce() -> Vec<Requesting> + '_, RequestingError> {
        let request = self.get_request_mut(token)?;
        if !request.state.can_advance_to(state) {
            return Err(RequestingError::InvalidArgument {
                request: token,
                reason: format!("illegal transition {:?} -> {:?}", request.state, state),
            });
        }
        let command = move || {
            request.state = state;
            vec![RequestStateChanged {
                request: token,
                state,
            }]
        };
        Ok(command)
    }

    /// Drops terminal request from the registry and its requester open list.
    pub(crate) fn detach_request(&mut self, token: Token) {
        if let Some(request) = self.requests.remove(&token) {
            if let Some(tokens) = self.owners.get_mut(&request.requester) {
                tokens.retain(|open| *open != token);
                if tokens.is_empty() {
                    self.owners.remove(&request.requester);
                }
            }
        }
    }
}
