//! Directory-backed artifact storage.

use super::{import, Artifact, ArtifactError, ArtifactName};
use crate::core::ResponseSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A directory of artifacts sharing one file name prefix.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// reader never observes a half-written artifact.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
    prefix: String,
}

impl ArtifactStore {
    /// Open a store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self, ArtifactError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| ArtifactError::io(&dir, e))?;
        Ok(Self {
            dir,
            prefix: prefix.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn path_of(&self, name: &ArtifactName) -> PathBuf {
        self.dir.join(name.file_name())
    }

    /// Write an artifact, returning its final path.
    ///
    /// Names have one-second resolution; an existing artifact with the same
    /// name is never replaced.
    pub fn save(&self, artifact: &Artifact) -> Result<PathBuf, ArtifactError> {
        let path = self.path_of(&artifact.name);
        if path.try_exists().map_err(|e| ArtifactError::io(&path, e))? {
            tracing::warn!(path = %path.display(), "artifact already exists, not overwriting");
            return Err(ArtifactError::AlreadyExists(path));
        }
        let temp = self.dir.join(format!(".{}.tmp", artifact.name.file_name()));

        fs::write(&temp, &artifact.bytes).map_err(|e| ArtifactError::io(&temp, e))?;
        fs::rename(&temp, &path).map_err(|e| ArtifactError::io(&path, e))?;

        tracing::info!(path = %path.display(), bytes = artifact.bytes.len(), "saved artifact");
        Ok(path)
    }

    /// Artifact names in the store, oldest first. Other files are ignored.
    pub fn list(&self) -> Result<Vec<ArtifactName>, ArtifactError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| ArtifactError::io(&self.dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ArtifactError::io(&self.dir, e))?;
            let file_name = entry.file_name();
            if let Some(name) = file_name
                .to_str()
                .and_then(|n| ArtifactName::parse(&self.prefix, n))
            {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn latest(&self) -> Result<Option<ArtifactName>, ArtifactError> {
        Ok(self.list()?.pop())
    }

    /// Read and import a stored artifact.
    pub fn load(&self, name: &ArtifactName) -> Result<ResponseSet, ArtifactError> {
        load_file(self.path_of(name))
    }

    /// Resolve a bare file name within this store.
    pub fn name_of(&self, file_name: &str) -> Result<ArtifactName, ArtifactError> {
        ArtifactName::parse(&self.prefix, file_name)
            .ok_or_else(|| ArtifactError::InvalidName(file_name.to_string()))
    }
}

/// Read and import an artifact from any path.
pub fn load_file(path: impl AsRef<Path>) -> Result<ResponseSet, ArtifactError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| ArtifactError::io(path, e))?;

    let set = import(&bytes).inspect_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "rejected artifact");
    })?;
    tracing::info!(path = %path.display(), responses = set.len(), "loaded artifact");
    Ok(set)
}
