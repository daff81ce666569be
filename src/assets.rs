//! Textures used by the frame renderer, and loading errors.

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::colors;
use crate::config::AssetConfig;
use crate::texture::Texture;

/// Error loading configuration or image assets.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Image(image::ImageError),
    Config(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {e}"),
            LoadError::Image(e) => write!(f, "image error: {e}"),
            LoadError::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Image(e) => Some(e),
            LoadError::Config(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<image::ImageError> for LoadError {
    fn from(e: image::ImageError) -> Self {
        LoadError::Image(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Config(e)
    }
}

/// Images drawn each frame.
pub struct Assets {
    /// Panorama wrapped around the horizon.
    pub sky: Texture,
    pub wall: Texture,
    /// Foreground sprite drawn over the bottom-right of the view.
    pub weapon: Texture,
}

impl Assets {
    /// Loads all three images, failing on the first one that can't be read.
    pub fn load(paths: &AssetConfig) -> Result<Self, LoadError> {
        Ok(Self {
            sky: Texture::from_file(&paths.sky)?,
            wall: Texture::from_file(&paths.wall)?,
            weapon: Texture::from_file(&paths.weapon)?,
        })
    }

    /// Loads what it can and substitutes generated textures for the rest.
    pub fn load_or_placeholder(paths: &AssetConfig) -> Self {
        Self {
            sky: load_or(&paths.sky, placeholder_sky),
            wall: load_or(&paths.wall, placeholder_wall),
            weapon: load_or(&paths.weapon, placeholder_weapon),
        }
    }

    /// Generated textures only.
    pub fn placeholder() -> Self {
        Self {
            sky: placeholder_sky(),
            wall: placeholder_wall(),
            weapon: placeholder_weapon(),
        }
    }
}

fn load_or(path: &Path, fallback: fn() -> Texture) -> Texture {
    match Texture::from_file(path) {
        Ok(texture) => {
            info!(
                path = %path.display(),
                width = texture.width(),
                height = texture.height(),
                "loaded texture"
            );
            texture
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "using placeholder texture");
            fallback()
        }
    }
}

fn placeholder_sky() -> Texture {
    // Vertical gradient, wide enough to wrap like a panorama.
    let (width, height) = (512u32, 192u32);
    let data = (0..height)
        .flat_map(|y| {
            let t = y as f32 / (height - 1) as f32;
            let color = colors::blend(colors::SKY_TOP, colors::SKY_BOTTOM, t);
            std::iter::repeat(color).take(width as usize)
        })
        .collect();
    Texture::from_pixels(width, height, data)
}

fn placeholder_wall() -> Texture {
    Texture::checkerboard(64, 64, 16, colors::WALL_LIGHT, colors::WALL_DARK)
}

fn placeholder_weapon() -> Texture {
    // Opaque block in the lower-left quarter, transparent elsewhere.
    let (width, height) = (64u32, 64u32);
    let data = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if x < width / 2 && y >= height / 2 {
                    colors::WEAPON
                } else {
                    0
                }
            })
        })
        .collect();
    Texture::from_pixels(width, height, data)
}
