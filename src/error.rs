use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The icon table has no entry for the fallback icon, so a badge cannot
    /// be drawn at all.
    #[error("fallback icon {0:?} is missing from the icon table")]
    FallbackIconMissing(String),
    #[error("malformed icon data: {0}")]
    IconData(String),
    #[error("failed to read icon table {path}")]
    IconIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse icon data: {0}")]
    IconJson(#[from] serde_json::Error),
    #[error("invalid dataset: {0}")]
    Dataset(String),
    #[error("failed to parse dataset: {0}")]
    DatasetYaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
