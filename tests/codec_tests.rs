//! Codec Tests
//!
//! Tests for command and response framing.

use std::io::Cursor;

use psstore::protocol::{
    decode_command, decode_response, encode_command, encode_response, read_command,
    read_response, write_command, write_response, Command, ErrorKind, Op, Response,
    HEADER_SIZE, MAX_PAYLOAD_SIZE, PROTOCOL_VERSION,
};
use psstore::store::{BulkRequest, InsertRequest};
use psstore::StoreError;

// =============================================================================
// Command Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_bulk_add() {
    let request: BulkRequest<i32> = vec![("a", 1), ("b", -2)].into_iter().collect();
    let cmd = Command::Int(Op::BulkAdd(request.compressed(true)));

    let encoded = encode_command(&cmd).unwrap();
    let decoded = decode_command(&encoded).unwrap();

    match decoded {
        Command::Int(Op::BulkAdd(bulk)) => {
            assert!(bulk.compressed);
            assert_eq!(bulk.entries[1], InsertRequest::new("b", -2));
        }
        other => panic!("Expected BulkAdd command, got {:?}", other),
    }
}

#[test]
fn test_header_layout() {
    let encoded = encode_command(&Command::Ping).unwrap();

    assert_eq!(encoded[0], PROTOCOL_VERSION);
    let len = u32::from_be_bytes([encoded[1], encoded[2], encoded[3], encoded[4]]) as usize;
    assert_eq!(encoded.len(), HEADER_SIZE + len);
    let crc = u32::from_be_bytes([encoded[5], encoded[6], encoded[7], encoded[8]]);
    assert_eq!(crc, crc32fast::hash(&encoded[HEADER_SIZE..]));
}

#[test]
fn test_decode_incomplete_header() {
    let result = decode_command(&[PROTOCOL_VERSION, 0, 0]);
    assert!(matches!(result, Err(StoreError::Protocol(_))));
}

#[test]
fn test_decode_incomplete_payload() {
    let encoded = encode_command(&Command::Str(Op::Get { key: "abc".into() })).unwrap();
    let result = decode_command(&encoded[..encoded.len() - 1]);
    assert!(matches!(result, Err(StoreError::Protocol(_))));
}

#[test]
fn test_decode_unknown_version() {
    let mut encoded = encode_command(&Command::Ping).unwrap().to_vec();
    encoded[0] = 0x7f;
    assert!(matches!(decode_command(&encoded), Err(StoreError::Protocol(_))));
}

#[test]
fn test_decode_payload_too_large() {
    let mut frame = vec![PROTOCOL_VERSION];
    frame.extend_from_slice(&(MAX_PAYLOAD_SIZE + 1).to_be_bytes());
    frame.extend_from_slice(&0u32.to_be_bytes());

    assert!(matches!(decode_command(&frame), Err(StoreError::Protocol(_))));
}

#[test]
fn test_decode_checksum_mismatch() {
    let mut encoded = encode_command(&int_get("key")).unwrap().to_vec();
    let last = encoded.len() - 1;
    encoded[last] ^= 0xff;

    assert!(matches!(
        decode_command(&encoded),
        Err(StoreError::Serialization(_))
    ));
}

#[test]
fn test_decode_garbage_payload() {
    let payload = [0xffu8; 4];
    let mut frame = vec![PROTOCOL_VERSION];
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(&crc32fast::hash(&payload).to_be_bytes());
    frame.extend_from_slice(&payload);

    assert!(matches!(
        decode_command(&frame),
        Err(StoreError::Serialization(_))
    ));
}

fn int_get(key: &str) -> Command {
    Command::Int(Op::Get { key: key.into() })
}

// =============================================================================
// Response Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_error_response() {
    let response = Response::error(&StoreError::exists("taken"));

    let encoded = encode_response(&response).unwrap();
    let decoded = decode_response(&encoded).unwrap();

    match decoded {
        Response::Error { kind, key, message } => {
            assert_eq!(kind, ErrorKind::KeyExists);
            assert_eq!(key.as_deref(), Some("taken"));
            assert!(message.contains("taken"));
        }
        other => panic!("Expected error response, got {:?}", other),
    }
}

#[test]
fn test_encode_decode_rejects() {
    let response = Response::StrRejects(vec![InsertRequest::new("k", "v".to_string())]);

    let decoded = decode_response(&encode_response(&response).unwrap()).unwrap();

    assert_eq!(decoded, response);
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_stream_multiple_commands() {
    let mut buffer = Vec::new();
    write_command(&mut buffer, &int_get("one")).unwrap();
    write_command(&mut buffer, &Command::Str(Op::Clear)).unwrap();
    write_command(&mut buffer, &Command::Ping).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_command(&mut cursor).unwrap(), int_get("one"));
    assert_eq!(read_command(&mut cursor).unwrap(), Command::Str(Op::Clear));
    assert_eq!(read_command(&mut cursor).unwrap(), Command::Ping);

    // Stream exhausted
    assert!(matches!(read_command(&mut cursor), Err(StoreError::Io(_))));
}

#[test]
fn test_stream_recovers_after_bad_payload() {
    let payload = [0xffu8; 3];
    let mut buffer = vec![PROTOCOL_VERSION];
    buffer.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buffer.extend_from_slice(&crc32fast::hash(&payload).to_be_bytes());
    buffer.extend_from_slice(&payload);
    write_command(&mut buffer, &Command::Ping).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert!(matches!(
        read_command(&mut cursor),
        Err(StoreError::Serialization(_))
    ));
    assert_eq!(read_command(&mut cursor).unwrap(), Command::Ping);
}

#[test]
fn test_stream_responses() {
    let mut buffer = Vec::new();
    write_response(&mut buffer, &Response::Int(-5)).unwrap();
    write_response(&mut buffer, &Response::Done).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_response(&mut cursor).unwrap(), Response::Int(-5));
    assert_eq!(read_response(&mut cursor).unwrap(), Response::Done);
}
