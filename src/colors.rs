// Colors in ARGB8888 format
pub const BLACK: u32 = 0xFF000000;
pub const WHITE: u32 = 0xFFFFFFFF;
pub const BACKGROUND: u32 = 0xFF1E1E1E;

// Placeholder texture colors, used when an asset can't be loaded
pub const SKY_TOP: u32 = 0xFF3A4A6B;
pub const SKY_BOTTOM: u32 = 0xFF6B5A4A;
pub const WALL_LIGHT: u32 = 0xFF8C7B6B;
pub const WALL_DARK: u32 = 0xFF5A4A3C;
pub const WEAPON: u32 = 0xFF9A9A9A;

/// Alpha-blend `src` over `dst` with the given opacity in `[0, 1]`.
///
/// The result is always opaque.
#[inline]
pub fn blend(dst: u32, src: u32, opacity: f32) -> u32 {
    if opacity >= 1.0 {
        return src | 0xFF000000;
    }
    if opacity <= 0.0 {
        return dst;
    }
    let w = (opacity * 256.0) as u32;
    let inv = 256 - w;
    // R and B together (00RR00BB), G separately (0000GG00)
    let rb = (((dst & 0x00FF00FF) * inv + (src & 0x00FF00FF) * w) >> 8) & 0x00FF00FF;
    let g = (((dst & 0x0000FF00) * inv + (src & 0x0000FF00) * w) >> 8) & 0x0000FF00;
    0xFF000000 | rb | g
}
