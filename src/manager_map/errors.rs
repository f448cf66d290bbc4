use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MapError {
    #[error("MapError::MissingCredential: map tile access token is not available")]
    MissingCredential,
    #[error("MapError::Secrets: {0}")]
    Secrets(String),
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self { MapError::Secrets(e.to_string()) }
}
impl From<toml::de::Error> for MapError {
    fn from(e: toml::de::Error) -> Self { MapError::Secrets(e.to_string()) }
}
