use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("ForecastError::File: {0}")]
    File(String),
    #[error("ForecastError::Schema: {0}")]
    Schema(String),
    #[error("ForecastError::Row: line {line}: {message}")]
    Row { line: u64, message: String },
}

impl From<csv::Error> for ForecastError {
    fn from(e: csv::Error) -> Self {
        match e.position() {
            Some(pos) => ForecastError::Row { line: pos.line(), message: e.to_string() },
            None => ForecastError::File(e.to_string()),
        }
    }
}
