//! Protocol codec
//!
//! Framing plus bincode encoding for commands and responses.
//!
//! ## Wire Format
//!
//! ```text
//! ┌───────────┬──────────┬──────────┬─────────────────────────────┐
//! │Version (1)│ Len (4)  │ CRC (4)  │   Payload (bincode)         │
//! └───────────┴──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! `Len` and `CRC` are big-endian; the CRC32 covers the payload only.
//!
//! ## Error classes
//! - `Protocol`: the header is unusable; the stream can no longer be trusted
//! - `Serialization`: the frame was read in full but its payload is bad;
//!   the stream is still in sync and the next frame can be read

use std::io::{Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};
use super::{Command, Response};

/// Header size: 1 byte version + 4 bytes length + 4 bytes CRC
pub const HEADER_SIZE: usize = 9;

/// Current frame version
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Maximum payload size (16 MB)
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

/// Parsed frame header
#[derive(Debug, Clone, Copy)]
struct FrameHeader {
    payload_len: usize,
    crc: u32,
}

// =============================================================================
// Frame helpers
// =============================================================================

fn encode_frame<T: Serialize>(message: &T) -> Result<Bytes> {
    let payload = bincode::serialize(message)?;

    if payload.len() > MAX_PAYLOAD_SIZE as usize {
        return Err(StoreError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            payload.len(),
            MAX_PAYLOAD_SIZE
        )));
    }

    let mut frame = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    frame.put_u8(PROTOCOL_VERSION);
    frame.put_u32(payload.len() as u32);
    frame.put_u32(crc32fast::hash(&payload));
    frame.put_slice(&payload);

    Ok(frame.freeze())
}

fn parse_header(mut header: &[u8]) -> Result<FrameHeader> {
    if header.len() < HEADER_SIZE {
        return Err(StoreError::Protocol(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            header.len()
        )));
    }

    let version = header.get_u8();
    if version != PROTOCOL_VERSION {
        return Err(StoreError::Protocol(format!(
            "Unsupported protocol version: 0x{:02x}",
            version
        )));
    }

    let payload_len = header.get_u32();
    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(StoreError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    Ok(FrameHeader {
        payload_len: payload_len as usize,
        crc: header.get_u32(),
    })
}

fn decode_payload<T: DeserializeOwned>(header: FrameHeader, payload: &[u8]) -> Result<T> {
    let actual = crc32fast::hash(payload);
    if actual != header.crc {
        return Err(StoreError::Serialization(format!(
            "Checksum mismatch: expected 0x{:08x}, got 0x{:08x}",
            header.crc, actual
        )));
    }

    Ok(bincode::deserialize(payload)?)
}

fn decode_frame<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let header = parse_header(bytes)?;

    let total_len = HEADER_SIZE + header.payload_len;
    if bytes.len() < total_len {
        return Err(StoreError::Protocol(format!(
            "Incomplete payload: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    decode_payload(header, &bytes[HEADER_SIZE..total_len])
}

fn read_frame<R: Read, T: DeserializeOwned>(reader: &mut R) -> Result<T> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;
    let header = parse_header(&header)?;

    let mut payload = vec![0u8; header.payload_len];
    if header.payload_len > 0 {
        reader.read_exact(&mut payload)?;
    }

    decode_payload(header, &payload)
}

fn write_frame<W: Write, T: Serialize>(writer: &mut W, message: &T) -> Result<()> {
    let frame = encode_frame(message)?;
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command to a complete frame
pub fn encode_command(command: &Command) -> Result<Bytes> {
    encode_frame(command)
}

/// Decode a command from a complete frame
pub fn decode_command(bytes: &[u8]) -> Result<Command> {
    decode_frame(bytes)
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to a complete frame
pub fn encode_response(response: &Response) -> Result<Bytes> {
    encode_frame(response)
}

/// Decode a response from a complete frame
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    decode_frame(bytes)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete command from a stream
///
/// Blocks until a complete command is received or an error occurs
pub fn read_command<R: Read>(reader: &mut R) -> Result<Command> {
    read_frame(reader)
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    write_frame(writer, command)
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    read_frame(reader)
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    write_frame(writer, response)
}
