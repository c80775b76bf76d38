use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeodataError>;

#[derive(Error, Debug)]
pub enum GeodataError {
    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(#[from] serde_json::Error),

    #[error("Invalid contact table: {0}")]
    InvalidContacts(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),
}
