use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid scan input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] fm_config::ConfigError),

    #[error("merge error: {0}")]
    Merge(#[from] fm_merge::MergeError),
}

pub type ScanResult<T> = Result<T, ScanError>;
