//! Demo file header.

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use crate::{Error, Result, DEM_MAGIC};

/// Length of the fixed string fields in the header.
const STRING_FIELD_LEN: usize = 260;

/// Parsed demo file header.
///
/// All integers in a demo file are stored big-endian. String fields occupy
/// a fixed 260-byte buffer each, null-terminated and padded.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoHeader {
    pub demo_protocol: i32,
    pub network_protocol: i32,
    /// Name of the server the demo was recorded on.
    pub server_name: String,
    /// Name of the recording client.
    pub client_name: String,
    pub map_name: String,
    pub game_directory: String,
    /// Playback length in seconds.
    pub playback_time: f32,
    pub ticks: i32,
    pub frames: i32,
    /// Size in bytes of the sign-on data preceding the first frame payload.
    pub signon_length: i32,
}

impl DemoHeader {
    /// Read and validate a header from the start of a demo file.
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut magic = [0u8; 8];
        r.read_exact(&mut magic)?;
        if &magic != DEM_MAGIC {
            return Err(Error::NotADemoFile(magic));
        }

        let demo_protocol = r.read_i32::<BigEndian>()?;
        let network_protocol = r.read_i32::<BigEndian>()?;
        let server_name = read_string_field(r)?;
        let client_name = read_string_field(r)?;
        let map_name = read_string_field(r)?;
        let game_directory = read_string_field(r)?;
        let playback_time = r.read_f32::<BigEndian>()?;
        let ticks = r.read_i32::<BigEndian>()?;
        let frames = r.read_i32::<BigEndian>()?;
        let signon_length = r.read_i32::<BigEndian>()?;

        Ok(Self {
            demo_protocol,
            network_protocol,
            server_name,
            client_name,
            map_name,
            game_directory,
            playback_time,
            ticks,
            frames,
            signon_length,
        })
    }
}

/// Read a fixed 260-byte string buffer, trimmed at the first null.
fn read_string_field<R: Read>(r: &mut R) -> Result<String> {
    let mut buf = [0u8; STRING_FIELD_LEN];
    r.read_exact(&mut buf)?;

    let end = buf
        .iter()
        .position(|&b| b == 0)
        .ok_or(Error::BrokenFile)?;

    Ok(String::from_utf8_lossy(&buf[..end]).into_owned())
}
