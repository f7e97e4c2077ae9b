// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Artifact persistence.
//!
//! Generated documents and reports are handed to an [`ArtifactSink`]. The
//! pipelines decide whether a failed write aborts them; the sink only reports.

use crate::PipelineError;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Destination for generated artifacts.
pub trait ArtifactSink {
    /// Stores `content` under `name` and returns where it landed.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] when the content cannot be written.
    fn save(&self, name: &str, content: &[u8]) -> Result<PathBuf, PipelineError>;
}

/// Writes artifacts as files inside a directory.
#[derive(Debug, Clone)]
pub struct FsSink {
    dir: PathBuf,
}

impl FsSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for FsSink {
    fn save(&self, name: &str, content: &[u8]) -> Result<PathBuf, PipelineError> {
        fs::create_dir_all(&self.dir).map_err(|e| PipelineError::io(&self.dir, e))?;

        let path = self.dir.join(name);
        fs::write(&path, content).map_err(|e| PipelineError::io(&path, e))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "artifact written");
        Ok(path)
    }
}

/// Keeps artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the stored artifacts, in save order.
    pub fn names(&self) -> Vec<String> {
        self.artifacts
            .lock()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Content of the most recent artifact saved under `name`.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.artifacts
            .lock()
            .iter()
            .rev()
            .find(|(stored, _)| stored == name)
            .map(|(_, content)| content.clone())
    }

    pub fn len(&self) -> usize {
        self.artifacts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.lock().is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn save(&self, name: &str, content: &[u8]) -> Result<PathBuf, PipelineError> {
        self.artifacts
            .lock()
            .push((name.to_string(), content.to_vec()));
        Ok(PathBuf::from(name))
    }
}

impl<S: ArtifactSink + ?Sized> ArtifactSink for Arc<S> {
    fn save(&self, name: &str, content: &[u8]) -> Result<PathBuf, PipelineError> {
        (**self).save(name, content)
    }
}
