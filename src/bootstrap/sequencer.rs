//! One-shot workspace setup.

use bevy::log::{debug, error, info};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::artifacts::{ArtifactSource, RequiredArtifact, ResourceBundle, REQUIRED_ARTIFACTS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BootstrapState {
    #[default]
    NotStarted,
    Initializing,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOutcome {
    Written,
    /// Already present; left untouched
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ArtifactReport {
    pub target: PathBuf,
    pub outcome: ArtifactOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct BootstrapReport {
    pub artifacts: Vec<ArtifactReport>,
}

impl BootstrapReport {
    pub fn writes(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|a| a.outcome == ArtifactOutcome::Written)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.artifacts
            .iter()
            .filter(|a| matches!(a.outcome, ArtifactOutcome::Failed(_)))
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("bootstrap has already run")]
    AlreadyCompleted,
}

pub struct BootstrapSequencer {
    state: BootstrapState,
    artifacts: &'static [RequiredArtifact],
}

impl Default for BootstrapSequencer {
    fn default() -> Self {
        Self::with_artifacts(&REQUIRED_ARTIFACTS)
    }
}

impl BootstrapSequencer {
    pub fn with_artifacts(artifacts: &'static [RequiredArtifact]) -> Self {
        Self {
            state: BootstrapState::NotStarted,
            artifacts,
        }
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Materialize every missing artifact under `workspace`.
    ///
    /// The host must only call this while it is idle (not compiling, not
    /// playing). Existing files are never overwritten, and a failing
    /// artifact does not stop the others.
    pub fn run_once(
        &mut self,
        workspace: &Path,
        bundle: &dyn ResourceBundle,
    ) -> Result<BootstrapReport, BootstrapError> {
        if self.state != BootstrapState::NotStarted {
            return Err(BootstrapError::AlreadyCompleted);
        }

        self.state = BootstrapState::Initializing;
        info!("Bootstrapping workspace {:?}", workspace);

        let mut report = BootstrapReport::default();
        for artifact in self.artifacts {
            let target = workspace.join(artifact.target);
            let outcome = materialize(&target, artifact.source, bundle);
            report.artifacts.push(ArtifactReport { target, outcome });
        }

        self.state = BootstrapState::Ready;
        info!(
            "Workspace ready: {} written, {} failed",
            report.writes(),
            report.failures().count()
        );
        Ok(report)
    }
}

fn materialize(
    target: &Path,
    source: ArtifactSource,
    bundle: &dyn ResourceBundle,
) -> ArtifactOutcome {
    if target.exists() {
        debug!("Keeping existing {:?}", target);
        return ArtifactOutcome::Skipped;
    }

    if let Some(parent) = target.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        let reason = format!("Failed to create folder {:?}: {}", parent, e);
        error!("{}", reason);
        return ArtifactOutcome::Failed(reason);
    }

    let result = match source {
        ArtifactSource::Literal(contents) => write_file(target, contents.as_bytes()),
        ArtifactSource::Text(name) => match bundle.load_text(name) {
            Some(text) => write_file(target, text.as_bytes()),
            None => Err(format!("Failed to load {} from resources", name)),
        },
        ArtifactSource::Bytes(name) => match bundle.load_bytes(name) {
            Some(bytes) => write_file(target, &bytes),
            None => Err(format!("Failed to load {} from resources", name)),
        },
        ArtifactSource::Copy(name) => match bundle.resource_path(name) {
            Some(path) => std::fs::copy(&path, target)
                .map(|_| ())
                .map_err(|e| format!("Failed to copy {:?}: {}", path, e)),
            None => Err(format!("Failed to locate {} in resources", name)),
        },
    };

    match result {
        Ok(()) => {
            info!("Created {:?}", target);
            ArtifactOutcome::Written
        }
        Err(reason) => {
            error!("Skipping {:?}: {}", target, reason);
            ArtifactOutcome::Failed(reason)
        }
    }
}

fn write_file(target: &Path, contents: &[u8]) -> Result<(), String> {
    std::fs::write(target, contents).map_err(|e| format!("Failed to write file: {}", e))
}
