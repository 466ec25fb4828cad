//! VTF header decoding.

use std::io::Read;

use veles_common::BinaryReader;

use crate::header::{ImageFormat, VtfHeader};
use crate::{Error, Result, VTF_MAGIC};

/// Basic texture facts pulled out of a header.
#[derive(Debug, Clone, Copy)]
pub struct TextureInfo {
    /// Texture width in pixels.
    pub width: u16,
    /// Texture height in pixels.
    pub height: u16,
    /// High-resolution pixel format, if the header names a known one.
    pub format: Option<ImageFormat>,
}

/// Read and validate the fixed header at the start of a VTF file.
pub fn decode_header<R: Read>(r: &mut R) -> Result<VtfHeader> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if &magic != VTF_MAGIC {
        return Err(Error::NotAVtfFile(magic));
    }

    let mut buf = [0u8; std::mem::size_of::<VtfHeader>()];
    r.read_exact(&mut buf)?;
    let header = BinaryReader::new(&buf).read_struct::<VtfHeader>()?;
    Ok(header)
}

/// Decode just the texture configuration from the start of a VTF file.
pub fn decode_config<R: Read>(r: &mut R) -> Result<TextureInfo> {
    let header = decode_header(r)?;
    Ok(TextureInfo {
        width: header.width,
        height: header.height,
        format: header.image_format(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::texture_flags;

    fn header_bytes(width: u16, height: u16, format: i32, flags: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(VTF_MAGIC);
        data.extend_from_slice(&7u32.to_le_bytes()); // version major
        data.extend_from_slice(&2u32.to_le_bytes()); // version minor
        data.extend_from_slice(&80u32.to_le_bytes()); // header size
        data.extend_from_slice(&width.to_le_bytes());
        data.extend_from_slice(&height.to_le_bytes());
        data.extend_from_slice(&flags.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes()); // frames
        data.extend_from_slice(&0u16.to_le_bytes()); // first frame
        data.extend_from_slice(&[0u8; 4]); // padding
        for component in [0.2f32, 0.3, 0.4] {
            data.extend_from_slice(&component.to_le_bytes());
        }
        data.extend_from_slice(&[0u8; 4]); // padding
        data.extend_from_slice(&1.0f32.to_le_bytes()); // bumpmap scale
        data.extend_from_slice(&format.to_le_bytes());
        data.push(10); // mipmap count
        data.extend_from_slice(&(ImageFormat::Dxt1 as i32).to_le_bytes()); // low-res format
        data.push(16); // low-res width
        data.push(16); // low-res height
        data.extend_from_slice(&1u16.to_le_bytes()); // depth
        data
    }

    #[test]
    fn test_decode_header() {
        let data = header_bytes(512, 256, ImageFormat::Dxt5 as i32, texture_flags::CLAMP_S);
        let header = decode_header(&mut data.as_slice()).unwrap();

        assert_eq!({ header.version }, [7, 2]);
        assert_eq!({ header.width }, 512);
        assert_eq!({ header.height }, 256);
        assert_eq!(header.image_format(), Some(ImageFormat::Dxt5));
        assert_eq!({ header.mipmap_count }, 10);
        assert!(header.has_flag(texture_flags::CLAMP_S));
        assert!(!header.has_flag(texture_flags::NO_MIP));
    }

    #[test]
    fn test_decode_config() {
        let data = header_bytes(64, 128, ImageFormat::Bgr888 as i32, 0);
        let info = decode_config(&mut data.as_slice()).unwrap();

        assert_eq!(info.width, 64);
        assert_eq!(info.height, 128);
        assert_eq!(info.format, Some(ImageFormat::Bgr888));
    }

    #[test]
    fn test_unknown_format_is_none() {
        let data = header_bytes(4, 4, -1, 0);
        let info = decode_config(&mut data.as_slice()).unwrap();
        assert_eq!(info.format, None);
    }

    #[test]
    fn test_bad_magic() {
        let mut data = header_bytes(4, 4, 0, 0);
        data[0] = b'D';
        assert!(matches!(
            decode_config(&mut data.as_slice()),
            Err(Error::NotAVtfFile(_))
        ));
    }

    #[test]
    fn test_truncated_header() {
        let full = header_bytes(4, 4, 0, 0);
        let mut data = &full[..20];
        assert!(matches!(decode_config(&mut data), Err(Error::Io(_))));
    }
}
