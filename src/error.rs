use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LandscapeError {
    #[error("surface already bound")]
    SurfaceAlreadyBound,

    #[error("unknown constellation: {0}")]
    UnknownConstellation(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid constellation data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to export frame: {0}")]
    Export(String),

    #[error("surface has zero size")]
    EmptySurface,
}

pub type Result<T> = std::result::Result<T, LandscapeError>;
