#[derive(Debug)]
pub enum DataError {
    Sqlite(rusqlite::Error),
    Json(serde_json::Error),
    TagNotFound { key: String },
    TagMismatch { key: String, message: String },
    Inconsistent { message: String },
}

impl From<rusqlite::Error> for DataError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Sqlite(error)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}
