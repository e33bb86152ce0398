use std::path::PathBuf;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML text is malformed or does not match the schema.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("config render error: {0}")]
    Render(#[from] toml::ser::Error),

    /// A record-table component has no unique field groups.
    #[error("component '{0}' is a record table but has no unique field groups")]
    MissingUniqueFields(String),

    /// A scalar or flat-list component declares unique field groups.
    #[error("component '{component}' is {kind} and cannot declare unique field groups")]
    UnexpectedUniqueFields { component: String, kind: String },

    /// The default quality must rank above the "no trust" floor.
    #[error("default quality must be positive, got {0}")]
    InvalidDefaultQuality(i32),
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
