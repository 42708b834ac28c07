//! Workspace files the catalog needs, and where they come from.

use std::path::{Path, PathBuf};

/// How a missing artifact is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactSource {
    /// Fixed contents, no bundle lookup
    Literal(&'static str),
    /// Bundled resource written out as text
    Text(&'static str),
    /// Bundled resource written out byte for byte
    Bytes(&'static str),
    /// Bundled resource file copied as-is
    Copy(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredArtifact {
    /// Target path relative to the workspace
    pub target: &'static str,
    pub source: ArtifactSource,
}

pub const REQUIRED_ARTIFACTS: [RequiredArtifact; 6] = [
    RequiredArtifact {
        target: "PrefabManager.json",
        source: ArtifactSource::Literal("{}"),
    },
    RequiredArtifact {
        target: "UI/tailwind.uss",
        source: ArtifactSource::Text("UI/tailwind"),
    },
    RequiredArtifact {
        target: "UI/Noto_Sans_JP.ttf",
        source: ArtifactSource::Bytes("UI/Noto_Sans_JP"),
    },
    RequiredArtifact {
        target: "UI/Noto_Sans_JP SDF.asset",
        source: ArtifactSource::Copy("UI/Noto_Sans_JP SDF"),
    },
    RequiredArtifact {
        target: "UI/MaterialIcons-Regular.ttf",
        source: ArtifactSource::Bytes("UI/MaterialIcons-Regular"),
    },
    RequiredArtifact {
        target: "UI/MaterialIcons-Regular SDF.asset",
        source: ArtifactSource::Copy("UI/MaterialIcons-Regular SDF"),
    },
];

/// Named resources shipped with the application.
///
/// Names are slash-separated and carry no extension (`UI/tailwind`).
pub trait ResourceBundle {
    /// On-disk location of a resource, if it exists.
    fn resource_path(&self, name: &str) -> Option<PathBuf>;

    fn load_text(&self, name: &str) -> Option<String> {
        std::fs::read_to_string(self.resource_path(name)?).ok()
    }

    fn load_bytes(&self, name: &str) -> Option<Vec<u8>> {
        std::fs::read(self.resource_path(name)?).ok()
    }
}

/// Resources stored as plain files under a directory.
pub struct DirBundle {
    root: PathBuf,
}

impl DirBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceBundle for DirBundle {
    /// An exact filename wins; otherwise the first file (by name) whose stem matches.
    fn resource_path(&self, name: &str) -> Option<PathBuf> {
        let requested = self.root.join(name);
        if requested.is_file() {
            return Some(requested);
        }

        let dir = requested.parent()?;
        let stem = requested.file_name()?.to_str()?;

        let mut matches: Vec<PathBuf> = std::fs::read_dir(dir)
            .ok()?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.file_stem().and_then(|s| s.to_str()) == Some(stem)
            })
            .collect();
        matches.sort();
        matches.into_iter().next()
    }
}
