use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no profile found; pass --config, set PROFILE_TUI_CONFIG or place profile.yaml in CWD or .tui/")]
    NotFound,
    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("field at index {index} has an empty name")]
    EmptyName { index: usize },
    #[error("duplicate field name: '{name}' at index {index}")]
    DuplicateField { name: String, index: usize },
}
