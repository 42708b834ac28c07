//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Default size of the catalog window inside the main window
pub const CATALOG_WINDOW_SIZE: [f32; 2] = [560.0, 640.0];

/// Minimum size of the enlarged preview window
pub const PREVIEW_WINDOW_MIN_SIZE: f32 = 500.0;

/// Edge length of list thumbnails in the catalog
pub const THUMBNAIL_SIZE: u32 = 64;

/// Longest edge preview images are scaled down to when loaded
pub const PREVIEW_SIZE: u32 = 512;

/// Maximum number of thumbnails to load per frame.
/// Higher values load faster but may cause frame drops.
pub const MAX_THUMBNAILS_PER_FRAME: usize = 3;
