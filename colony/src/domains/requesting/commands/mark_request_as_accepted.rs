use crate::requesting::Requesting::RequestStateChanged;
use crate::requesting::{RequestManager, RequestState, Requesting, RequestingError};
use crate::tokens::Token;

impl RequestManager {
    /// Requester acknowledges pickup of completed request.
    pub fn mark_request_as_accepted(
        &mut self,
        requester: Token,
        token: Token,
    ) -> Result<impl FnOnce() -> Vec<Requesting> + '_, RequestingError> {
        let request = self.get_request(token)?;
        if request.requester != requester {
            return Err(RequestingError::InvalidArgument {
                request: token,
                reason: format!("request is not owned by {}", requester),
            });
        }
        if request.state != RequestState::Completed {
            return Err(RequestingError::InvalidArgument {
                request: token,
                reason: format!("request is {:?}, not completed", request.state),
            });
        }
        let command = move || {
            self.detach_request(token);
            vec![RequestStateChanged {
                request: token,
                state: RequestState::Received,
            }]
        };
        Ok(command)
    }
}
