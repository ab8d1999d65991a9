use colony::api::LoginResult;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum NetworkError {
    Io(std::io::Error),
    InvalidAddress(String),
    Rejected(LoginResult),
    UnexpectedResponse,
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::Io(error) => write!(f, "network failure, {}", error),
            NetworkError::InvalidAddress(address) => write!(f, "invalid address {}", address),
            NetworkError::Rejected(result) => write!(f, "login rejected, {:?}", result),
            NetworkError::UnexpectedResponse => write!(f, "unexpected login response"),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<std::io::Error> for NetworkError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}
