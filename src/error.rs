use thiserror::Error;

use crate::artifact::ArtifactError;
use crate::checkpoint::CheckpointError;
use crate::config::ConfigError;
use crate::core::CatalogError;
use crate::session::SessionError;

/// Any failure surfaced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
