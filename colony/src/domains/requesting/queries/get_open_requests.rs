use crate::citizens::CitizenId;
use crate::requesting::{PayloadKind, Request, RequestManager, RequestState};
use crate::tokens::Token;

impl RequestManager {
    fn owned_requests(&self, requester: Token) -> impl Iterator<Item = &Request> {
        self.owners
            .get(&requester)
            .into_iter()
            .flatten()
            .filter_map(move |token| self.requests.get(token))
    }

    /// All non-terminal requests of requester, in creation order.
    pub fn get_open_requests(&self, requester: Token) -> Vec<Token> {
        self.owned_requests(requester)
            .map(|request| request.token)
            .collect()
    }

    pub fn get_open_requests_of_type(&self, requester: Token, kind: PayloadKind) -> Vec<Token> {
        self.owned_requests(requester)
            .filter(|request| request.payload.kind() == kind)
            .map(|request| request.token)
            .collect()
    }

    pub fn get_open_requests_for(&self, requester: Token, citizen: CitizenId) -> Vec<Token> {
        self.owned_requests(requester)
            .filter(|request| request.citizen == Some(citizen))
            .filter(|request| request.state != RequestState::Completed)
            .map(|request| request.token)
            .collect()
    }

    pub fn get_completed_requests_for(&self, requester: Token, citizen: CitizenId) -> Vec<Token> {
        self.owned_requests(requester)
            .filter(|request| request.citizen == Some(citizen))
            .filter(|request| request.state == RequestState::Completed)
            .map(|request| request.token)
            .collect()
    }

    pub fn requests_of_citizen(&self, citizen: CitizenId) -> Vec<Token> {
        let mut tokens: Vec<Token> = self
            .requests
            .values()
            .filter(|request| request.citizen == Some(citizen))
            .map(|request| request.token)
            .collect();
        tokens.sort();
        tokens
    }
}
