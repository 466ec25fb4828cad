//! Demo frame-sequence decoding.

use std::io::{BufReader, ErrorKind, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::header::DemoHeader;
use crate::{Error, Result};

// Frame command bytes.
const CMD_SIGNON: u8 = 0;
const CMD_PACKET: u8 = 1;
const CMD_SYNC_TICK: u8 = 2;
const CMD_CONSOLE_CMD: u8 = 3;
const CMD_USER_CMD: u8 = 4;
const CMD_DATA_TABLES: u8 = 5;
const CMD_STOP: u8 = 6;
const CMD_CUSTOM_DATA: u8 = 7;
const CMD_STRING_TABLES: u8 = 8;

/// Fixed command-info block preceding packet frame data.
const PACKET_INFO_LEN: u64 = 0x54;
/// Sequence info preceding user command frame data.
const USER_CMD_INFO_LEN: u64 = 4;

/// A decoded demo: header plus the full frame sequence.
#[derive(Debug, Clone)]
pub struct Demo {
    header: DemoHeader,
    frames: Vec<Frame>,
}

/// One tick-stamped frame of the demo stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Game tick the frame was recorded at.
    pub tick: i32,
    pub payload: FramePayload,
}

/// The per-command payload of a frame.
///
/// Network data inside the byte payloads is kept opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramePayload {
    Signon(Vec<u8>),
    Packet(Vec<u8>),
    SyncTick,
    ConsoleCmd(Vec<u8>),
    UserCmd(Vec<u8>),
    DataTables(Vec<u8>),
    Stop,
    CustomData(Vec<u8>),
    StringTables(Vec<u8>),
}

impl Demo {
    /// Decode a whole demo from a reader.
    ///
    /// Frames are consumed until a Stop frame or end of input, whichever
    /// comes first.
    pub fn decode<R: Read>(reader: R) -> Result<Self> {
        let mut r = BufReader::new(reader);
        let header = DemoHeader::read_from(&mut r)?;

        let mut frames = Vec::new();
        loop {
            match read_frame(&mut r, &header)? {
                Some(frame) => {
                    let stop = frame.payload == FramePayload::Stop;
                    frames.push(frame);
                    if stop {
                        break;
                    }
                }
                None => break, // clean end of input at a frame boundary
            }
        }

        Ok(Self { header, frames })
    }

    /// Get the demo header.
    #[inline]
    pub fn header(&self) -> &DemoHeader {
        &self.header
    }

    /// Get the decoded frames in recording order.
    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

fn read_frame<R: Read>(r: &mut R, header: &DemoHeader) -> Result<Option<Frame>> {
    let command = match r.read_u8() {
        Ok(c) => c,
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let tick = r.read_i32::<BigEndian>()?;

    let payload = match command {
        CMD_SIGNON => {
            skip(r, header.signon_length.max(0) as u64)?;
            FramePayload::Signon(read_data(r)?)
        }
        CMD_PACKET => {
            skip(r, PACKET_INFO_LEN)?;
            FramePayload::Packet(read_data(r)?)
        }
        CMD_SYNC_TICK => FramePayload::SyncTick,
        CMD_CONSOLE_CMD => FramePayload::ConsoleCmd(read_data(r)?),
        CMD_USER_CMD => {
            skip(r, USER_CMD_INFO_LEN)?;
            FramePayload::UserCmd(read_data(r)?)
        }
        CMD_DATA_TABLES => FramePayload::DataTables(read_data(r)?),
        CMD_STOP => FramePayload::Stop,
        CMD_CUSTOM_DATA => FramePayload::CustomData(read_data(r)?),
        CMD_STRING_TABLES => FramePayload::StringTables(read_data(r)?),
        other => return Err(Error::UnknownCommand(other)),
    };

    Ok(Some(Frame { tick, payload }))
}

/// Read a length-prefixed data block. A negative length means empty.
fn read_data<R: Read>(r: &mut R) -> Result<Vec<u8>> {
    let size = r.read_i32::<BigEndian>()?;
    if size <= 0 {
        return Ok(Vec::new());
    }
    let mut data = vec![0u8; size as usize];
    r.read_exact(&mut data)?;
    Ok(data)
}

fn skip<R: Read>(r: &mut R, count: u64) -> Result<()> {
    let copied = std::io::copy(&mut r.take(count), &mut std::io::sink())?;
    if copied < count {
        return Err(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            "frame truncated",
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::tests::header_bytes;

    fn push_frame_head(data: &mut Vec<u8>, command: u8, tick: i32) {
        data.push(command);
        data.extend_from_slice(&tick.to_be_bytes());
    }

    fn push_data(data: &mut Vec<u8>, payload: &[u8]) {
        data.extend_from_slice(&(payload.len() as i32).to_be_bytes());
        data.extend_from_slice(payload);
    }

    #[test]
    fn test_decode_frame_sequence() {
        let mut data = header_bytes(3);

        push_frame_head(&mut data, CMD_SIGNON, 0);
        data.extend_from_slice(&[0xAB; 3]); // signon_length bytes, skipped
        push_data(&mut data, b"signon blob");

        push_frame_head(&mut data, CMD_SYNC_TICK, 0);

        push_frame_head(&mut data, CMD_CONSOLE_CMD, 10);
        push_data(&mut data, b"echo ready\0");

        push_frame_head(&mut data, CMD_USER_CMD, 11);
        data.extend_from_slice(&[0u8; 4]); // sequence info, skipped
        push_data(&mut data, &[1, 2, 3]);

        push_frame_head(&mut data, CMD_STOP, 12);

        let demo = Demo::decode(data.as_slice()).unwrap();
        assert_eq!(demo.header().map_name, "de_dust2");

        let frames = demo.frames();
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0].payload, FramePayload::Signon(b"signon blob".to_vec()));
        assert_eq!(frames[1].payload, FramePayload::SyncTick);
        assert_eq!(
            frames[2],
            Frame {
                tick: 10,
                payload: FramePayload::ConsoleCmd(b"echo ready\0".to_vec())
            }
        );
        assert_eq!(frames[3].payload, FramePayload::UserCmd(vec![1, 2, 3]));
        assert_eq!(frames[4].payload, FramePayload::Stop);
    }

    #[test]
    fn test_negative_data_length_is_empty() {
        let mut data = header_bytes(0);
        push_frame_head(&mut data, CMD_DATA_TABLES, 1);
        data.extend_from_slice(&(-1i32).to_be_bytes());
        push_frame_head(&mut data, CMD_STOP, 2);

        let demo = Demo::decode(data.as_slice()).unwrap();
        assert_eq!(demo.frames()[0].payload, FramePayload::DataTables(Vec::new()));
    }

    #[test]
    fn test_end_of_input_without_stop() {
        let mut data = header_bytes(0);
        push_frame_head(&mut data, CMD_SYNC_TICK, 1);

        let demo = Demo::decode(data.as_slice()).unwrap();
        assert_eq!(demo.frames().len(), 1);
        assert_eq!(demo.frames()[0].payload, FramePayload::SyncTick);
    }

    #[test]
    fn test_unknown_command() {
        let mut data = header_bytes(0);
        push_frame_head(&mut data, 0xAB, 1);

        assert!(matches!(
            Demo::decode(data.as_slice()),
            Err(Error::UnknownCommand(0xAB))
        ));
    }
}
