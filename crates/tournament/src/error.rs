//! Errors raised while loading configs, engines and stored results.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("unknown engine `{0}` (expected mcts, mcts:SEED, random or random:SEED)")]
    UnknownEngine(String),
}

pub type TournamentResult<T> = Result<T, TournamentError>;

/// Read a file, tagging failures with its path.
pub(crate) fn read_file(path: &std::path::Path) -> TournamentResult<String> {
    std::fs::read_to_string(path).map_err(|source| TournamentError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_file(path: &std::path::Path, contents: &str) -> TournamentResult<()> {
    std::fs::write(path, contents).map_err(|source| TournamentError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
    contents: &str,
) -> TournamentResult<T> {
    serde_json::from_str(contents).map_err(|source| TournamentError::Json {
        path: path.to_path_buf(),
        source,
    })
}
