use datamap::DataError;
use network::NetworkError;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ServerError {
    InvalidVariable { name: String, value: String },
    Network(NetworkError),
    Data(DataError),
    Io(std::io::Error),
    Metrics(prometheus::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::InvalidVariable { name, value } => {
                write!(f, "invalid value '{}' of {}", value, name)
            }
            ServerError::Network(error) => write!(f, "{}", error),
            ServerError::Data(error) => write!(f, "storage failure, {:?}", error),
            ServerError::Io(error) => write!(f, "io failure, {}", error),
            ServerError::Metrics(error) => write!(f, "metrics failure, {}", error),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<NetworkError> for ServerError {
    fn from(error: NetworkError) -> Self {
        Self::Network(error)
    }
}

impl From<DataError> for ServerError {
    fn from(error: DataError) -> Self {
        Self::Data(error)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<prometheus::Error> for ServerError {
    fn from(error: prometheus::Error) -> Self {
        Self::Metrics(error)
    }
}
