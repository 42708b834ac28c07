//! Preview image loading and egui registration.

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_egui::{egui, EguiTextureHandle, EguiUserTextures};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::constants::{MAX_THUMBNAILS_PER_FRAME, PREVIEW_SIZE};

/// Loaded preview images keyed by preview file path.
#[derive(Resource, Default)]
pub struct ThumbnailCache {
    pub thumbnails: HashMap<PathBuf, Handle<Image>>,
    pub texture_ids: HashMap<PathBuf, egui::TextureId>,
    /// Previews that could not be decoded
    pub failed: HashSet<PathBuf>,
}

impl ThumbnailCache {
    pub fn get_texture_id(&self, path: &Path) -> Option<egui::TextureId> {
        self.texture_ids.get(path).copied()
    }

    pub fn has_failed(&self, path: &Path) -> bool {
        self.failed.contains(path)
    }

    /// Drop every entry whose path is not in `keep`.
    pub fn retain_paths(&mut self, keep: &HashSet<&Path>) {
        self.thumbnails.retain(|path, _| keep.contains(path.as_path()));
        self.texture_ids.retain(|path, _| keep.contains(path.as_path()));
        self.failed.retain(|path| keep.contains(path.as_path()));
    }

    pub fn clear(&mut self) {
        self.thumbnails.clear();
        self.texture_ids.clear();
        self.failed.clear();
    }
}

/// Decode a preview file, scaled so its longer edge is at most [`PREVIEW_SIZE`].
pub fn load_preview_image(path: &Path) -> Option<Image> {
    let decoded = match image::open(path) {
        Ok(img) => img,
        Err(e) => {
            warn!("Failed to load preview {:?}: {}", path, e);
            return None;
        }
    };

    let rgba = decoded.thumbnail(PREVIEW_SIZE, PREVIEW_SIZE).to_rgba8();
    let (width, height) = rgba.dimensions();

    Some(Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        rgba.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        default(),
    ))
}

/// System that loads previews for the visible entries and registers them with egui.
/// Runs in Update before the egui pass.
pub fn load_and_register_thumbnails(
    catalog: Option<Res<Catalog>>,
    mut thumbnail_cache: ResMut<ThumbnailCache>,
    mut images: ResMut<Assets<Image>>,
    mut egui_textures: ResMut<EguiUserTextures>,
) {
    let Some(catalog) = catalog else {
        return;
    };
    let projection = catalog.0.projection();

    // Forget previews of entries that left the list (renamed, deleted, filtered)
    if catalog.is_changed() {
        let visible: HashSet<&Path> = projection.iter().map(|r| r.preview.as_path()).collect();
        thumbnail_cache.retain_paths(&visible);
    }

    // Load a limited number of new previews per frame to avoid stuttering
    let to_load: Vec<PathBuf> = projection
        .iter()
        .map(|r| &r.preview)
        .filter(|path| {
            !thumbnail_cache.thumbnails.contains_key(*path) && !thumbnail_cache.has_failed(path)
        })
        .take(MAX_THUMBNAILS_PER_FRAME)
        .cloned()
        .collect();

    for path in to_load {
        if let Some(image) = load_preview_image(&path) {
            let handle = images.add(image);
            thumbnail_cache.thumbnails.insert(path, handle);
        } else {
            thumbnail_cache.failed.insert(path);
        }
    }

    let to_register: Vec<PathBuf> = thumbnail_cache
        .thumbnails
        .keys()
        .filter(|path| !thumbnail_cache.texture_ids.contains_key(*path))
        .cloned()
        .collect();

    for path in to_register {
        if let Some(handle) = thumbnail_cache.thumbnails.get(&path) {
            let texture_id = egui_textures.add_image(EguiTextureHandle::Weak(handle.id()));
            thumbnail_cache.texture_ids.insert(path, texture_id);
        }
    }
}
