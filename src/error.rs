use std::path::PathBuf;

/// Failure while talking to one of the Steam store endpoints.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered with HTTP {code}")]
    Status { code: u16 },
    #[error("response is not valid JSON: {0}")]
    Parse(#[from] json::Error),
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WishlistError {
    #[error("need to provide the numeric Steam ID, not a profile name (got {0:?})")]
    InvalidInput(String),
    #[error("profile is private")]
    PrivateProfile,
    #[error("error reading wishlist page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: TransportError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("export file is not valid JSON: {0}")]
    Parse(#[from] json::Error),
    #[error("export file has no \"data\" list")]
    MissingData,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file is not valid YAML: {0}")]
    Yaml(#[from] yaml_rust2::ScanError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything `main` can report to the user.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Wishlist(#[from] WishlistError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("failed to set up HTTP client: {0}")]
    Client(#[source] TransportError),
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
