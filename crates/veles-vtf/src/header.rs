//! VTF header structures.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// VTF file header, minus the 4-byte magic read separately.
///
/// The on-disk layout is little-endian and tightly packed; reserved
/// padding around the reflectivity vector is kept in place.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct VtfHeader {
    /// Format version as (major, minor), e.g. (7, 2).
    pub version: [u32; 2],
    /// Total header size including the magic, per the file itself.
    pub header_size: u32,
    /// Texture width in pixels.
    pub width: u16,
    /// Texture height in pixels.
    pub height: u16,
    /// Sampling and content flags, see [`texture_flags`].
    pub flags: u32,
    /// Number of animation frames.
    pub frames: u16,
    /// First frame of the animation.
    pub first_frame: u16,
    pub padding0: [u8; 4],
    /// Average color of the texture as RGB.
    pub reflectivity: [f32; 3],
    pub padding1: [u8; 4],
    /// Bump map scale factor.
    pub bumpmap_scale: f32,
    /// Raw high-resolution image format, see [`ImageFormat::from_raw`].
    pub high_res_image_format: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u8,
    /// Raw low-resolution (thumbnail) image format.
    pub low_res_image_format: u32,
    /// Thumbnail width in pixels.
    pub low_res_image_width: u8,
    /// Thumbnail height in pixels.
    pub low_res_image_height: u8,
    /// Texture depth (volume textures).
    pub depth: u16,
}

impl VtfHeader {
    /// Decode the high-resolution image format field.
    pub fn image_format(&self) -> Option<ImageFormat> {
        ImageFormat::from_raw(self.high_res_image_format as i32)
    }

    /// Check a flag bit from [`texture_flags`].
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}

/// Pixel formats a VTF texture can store.
///
/// The on-disk "no format" sentinel (-1) maps to `Option::None` in
/// [`ImageFormat::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ImageFormat {
    Rgba8888 = 0,
    Abgr8888,
    Rgb888,
    Bgr888,
    Rgb565,
    I8,
    Ia88,
    P8,
    A8,
    Rgb888BlueScreen,
    Bgr888BlueScreen,
    Argb8888,
    Bgra8888,
    Dxt1,
    Dxt3,
    Dxt5,
    Bgrx8888,
    Bgr565,
    Bgrx5551,
    Bgra4444,
    Dxt1OneBitAlpha,
    Bgra5551,
    Uv88,
    Uvwq8888,
    Rgba16161616F,
    Rgba16161616,
    Uvlx8888,
}

impl ImageFormat {
    /// Decode a raw format value from a header field.
    pub fn from_raw(raw: i32) -> Option<Self> {
        use ImageFormat::*;
        Some(match raw {
            0 => Rgba8888,
            1 => Abgr8888,
            2 => Rgb888,
            3 => Bgr888,
            4 => Rgb565,
            5 => I8,
            6 => Ia88,
            7 => P8,
            8 => A8,
            9 => Rgb888BlueScreen,
            10 => Bgr888BlueScreen,
            11 => Argb8888,
            12 => Bgra8888,
            13 => Dxt1,
            14 => Dxt3,
            15 => Dxt5,
            16 => Bgrx8888,
            17 => Bgr565,
            18 => Bgrx5551,
            19 => Bgra4444,
            20 => Dxt1OneBitAlpha,
            21 => Bgra5551,
            22 => Uv88,
            23 => Uvwq8888,
            24 => Rgba16161616F,
            25 => Rgba16161616,
            26 => Uvlx8888,
            _ => return Option::None,
        })
    }
}

/// Texture flag bits stored in [`VtfHeader::flags`].
pub mod texture_flags {
    pub const POINT_SAMPLE: u32 = 1 << 0;
    pub const TRILINEAR: u32 = 1 << 1;
    pub const CLAMP_S: u32 = 1 << 2;
    pub const CLAMP_T: u32 = 1 << 3;
    pub const ANISOTROPIC: u32 = 1 << 4;
    pub const HINT_DXT5: u32 = 1 << 5;
    pub const PWL_CORRECTED: u32 = 1 << 6;
    pub const NORMAL: u32 = 1 << 7;
    pub const NO_MIP: u32 = 1 << 8;
    pub const PROCEDURAL: u32 = 1 << 9;
    pub const ONE_BIT_ALPHA: u32 = 1 << 10;
    pub const EIGHT_BIT_ALPHA: u32 = 1 << 11;
    pub const ENV_MAP: u32 = 1 << 12;
    pub const RENDER_TARGET: u32 = 1 << 13;
    pub const DEPTH_RENDER_TARGET: u32 = 1 << 14;
    pub const NO_DEBUG_OVERRIDE: u32 = 1 << 15;
    pub const SINGLE_COPY: u32 = 1 << 16;
    pub const PRE_SRGB: u32 = 1 << 17;
    pub const NO_DEPTH_BUFFER: u32 = 1 << 21;
    pub const CLAMP_U: u32 = 1 << 23;
    pub const VERTEX_TEXTURE: u32 = 1 << 24;
    pub const SSBUMP: u32 = 1 << 25;
    pub const BORDER: u32 = 1 << 27;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout_size() {
        // Magic (4) + header struct = the 65-byte fixed prefix.
        assert_eq!(std::mem::size_of::<VtfHeader>(), 61);
    }

    #[test]
    fn test_image_format_from_raw() {
        assert_eq!(ImageFormat::from_raw(0), Some(ImageFormat::Rgba8888));
        assert_eq!(ImageFormat::from_raw(13), Some(ImageFormat::Dxt1));
        assert_eq!(ImageFormat::from_raw(26), Some(ImageFormat::Uvlx8888));
        assert_eq!(ImageFormat::from_raw(-1), None);
        assert_eq!(ImageFormat::from_raw(27), None);
    }
}
