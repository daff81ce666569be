use std::path::Path;

/// A 2D image in ARGB8888 format, used for walls, sky and sprites.
#[derive(Debug, Clone)]
pub struct Texture {
    data: Vec<u32>, // The pixel data of the texture in ARGB format.
    width: u32,     // The width of the texture in pixels.
    height: u32,    // The height of the texture in pixels.
}

impl Texture {
    // Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        // Convert RGBA bytes to ARGB u32
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Wrap raw ARGB pixels (row-major).
    ///
    /// # Panics
    /// Panics if either dimension is zero or `data.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Self {
        assert!(width > 0 && height > 0, "texture dimensions must be non-zero");
        assert_eq!(
            data.len(),
            (width * height) as usize,
            "pixel count doesn't match dimensions"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// A single-color texture.
    pub fn solid(width: u32, height: u32, color: u32) -> Self {
        Self::from_pixels(width, height, vec![color; (width * height) as usize])
    }

    /// A two-color checkerboard with square cells of `cell` pixels.
    pub fn checkerboard(width: u32, height: u32, cell: u32, a: u32, b: u32) -> Self {
        let cell = cell.max(1);
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| if (x / cell + y / cell) % 2 == 0 { a } else { b }))
            .collect();
        Self::from_pixels(width, height, data)
    }

    /// Texel at integer coordinates, clamped to the texture edges.
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> u32 {
        let x = x.clamp(0, self.width as i64 - 1) as u32;
        let y = y.clamp(0, self.height as i64 - 1) as u32;
        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texel_clamps_to_edges() {
        let tex = Texture::from_pixels(2, 2, vec![1, 2, 3, 4]);
        assert_eq!(tex.texel(0, 0), 1);
        assert_eq!(tex.texel(1, 1), 4);
        assert_eq!(tex.texel(-5, 0), 1);
        assert_eq!(tex.texel(9, 9), 4);
    }

    #[test]
    fn checkerboard_alternates() {
        let tex = Texture::checkerboard(4, 4, 2, 0xFF000000, 0xFFFFFFFF);
        assert_eq!(tex.texel(0, 0), 0xFF000000);
        assert_eq!(tex.texel(2, 0), 0xFFFFFFFF);
        assert_eq!(tex.texel(2, 2), 0xFF000000);
    }

    #[test]
    #[should_panic]
    fn mismatched_pixel_count_panics() {
        let _ = Texture::from_pixels(3, 3, vec![0; 4]);
    }
}
