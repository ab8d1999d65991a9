use crate::requesting::{Request, RequestManager, RequestingError};
use crate::tokens::Token;

impl RequestManager {
    pub fn get_request(&self, token: Token) -> Result<&Request, RequestingError> {
        self.requests
            .get(&token)
            .ok_or_else(|| RequestingError::InvalidArgument {
                request: token,
                reason: "request not found".to_string(),
            })
    }

    pub(crate) fn get_request_mut(&mut self, token: Token) -> Result<&mut Request, RequestingError> {
        self.requests
            .get_mut(&token)
            .ok_or_else(|| RequestingError::InvalidArgument {
                request: token,
                reason: "request not found".to_string(),
            })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
