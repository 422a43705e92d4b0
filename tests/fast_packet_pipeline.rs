//! End-to-end fast-packet pipeline: captured sub-frames run through
//! `Decoder::process`, reassembly, and the converter.

use n2k_analyzer::core::FieldValue;
use n2k_analyzer::error::{DecodeError, ReassemblyError};
use n2k_analyzer::protocol::catalog::Registry;
use n2k_analyzer::protocol::converter::Decoder;
use n2k_analyzer::protocol::transport::frame::{RawFrame, BROADCAST};

fn frame(pgn: u32, source: u8, data: Vec<u8>) -> RawFrame {
    RawFrame {
        timestamp: 0.0,
        priority: 6,
        pgn,
        source,
        destination: BROADCAST,
        data,
    }
}

/// Split a payload into canonical fast-packet frames.
fn frames_for(payload: &[u8], sequence: u8) -> Vec<Vec<u8>> {
    let mut frames = Vec::new();

    let mut frame0 = vec![0xFFu8; 8];
    frame0[0] = sequence << 5;
    frame0[1] = payload.len() as u8;
    let first = payload.len().min(6);
    frame0[2..2 + first].copy_from_slice(&payload[..first]);
    frames.push(frame0);

    let mut offset = first;
    let mut frame_number = 1u8;
    while offset < payload.len() {
        let mut next = vec![0xFFu8; 8];
        next[0] = (sequence << 5) | frame_number;
        let take = (payload.len() - offset).min(7);
        next[1..1 + take].copy_from_slice(&payload[offset..offset + take]);
        frames.push(next);
        offset += take;
        frame_number += 1;
    }
    frames
}

/// The 134-byte Product Information payload used across these tests.
fn product_information_payload() -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&2100u16.to_le_bytes()); // NMEA 2000 version 2.100
    payload.extend_from_slice(&12345u16.to_le_bytes()); // product code

    for text in ["WindVane 3000", "1.2.3", "B", "SN-001"] {
        let mut block = [0u8; 32];
        block[..text.len()].copy_from_slice(text.as_bytes());
        payload.extend_from_slice(&block);
    }
    payload.push(1); // certification level
    payload.push(4); // load equivalency
    assert_eq!(payload.len(), 134);
    payload
}

fn assert_real(value: Option<&FieldValue>, expected: f64) {
    match value {
        Some(FieldValue::Real(v)) => {
            assert!((v - expected).abs() < 1e-9, "got {v}, expected {expected}")
        }
        other => panic!("expected Real({expected}), got {other:?}"),
    }
}

#[test]
/// Product Information (PGN 126996) submitted in reverse frame order still
/// reassembles to the byte-identical payload and decodes its fixed strings.
fn test_product_information_reversed_frames() {
    let registry = Registry::bootstrap().unwrap();
    let mut decoder = Decoder::new(&registry);

    let payload = product_information_payload();
    let frames = frames_for(&payload, 2);
    assert_eq!(frames.len(), 20); // declared 0x86 needs frames 0..=19

    let mut decoded = None;
    for data in frames.iter().rev() {
        if let Some(message) = decoder.process(&frame(126996, 0x42, data.clone())).unwrap() {
            decoded = Some(message);
        }
    }
    let message = decoded.expect("assembly completes on the last frame");

    assert_eq!(message.description, "Product Information");
    assert_real(message.fields.get("NMEA 2000 Version"), 2.1);
    assert_eq!(
        message.fields.get("Product Code"),
        Some(&FieldValue::Unsigned(12345))
    );
    assert_eq!(
        message.fields.get("Model ID"),
        Some(&FieldValue::Text("WindVane 3000".into()))
    );
    assert_eq!(
        message.fields.get("Software Version Code"),
        Some(&FieldValue::Text("1.2.3".into()))
    );
    assert_eq!(
        message.fields.get("Model Version"),
        Some(&FieldValue::Text("B".into()))
    );
    assert_eq!(
        message.fields.get("Model Serial Code"),
        Some(&FieldValue::Text("SN-001".into()))
    );
    assert_eq!(
        message.fields.get("Certification Level"),
        Some(&FieldValue::Unsigned(1))
    );
    assert_eq!(
        message.fields.get("Load Equivalency"),
        Some(&FieldValue::Unsigned(4))
    );
}

#[test]
/// Two sources interleaving the same PGN assemble independently.
fn test_interleaved_sources() {
    let registry = Registry::bootstrap().unwrap();
    let mut decoder = Decoder::new(&registry);

    let payload = product_information_payload();
    let frames = frames_for(&payload, 0);

    let mut completions = 0;
    for data in &frames {
        if let Some(message) = decoder.process(&frame(126996, 0x10, data.clone())).unwrap() {
            assert_eq!(message.source, 0x10);
            completions += 1;
        }
        if let Some(message) = decoder.process(&frame(126996, 0x20, data.clone())).unwrap() {
            assert_eq!(message.source, 0x20);
            completions += 1;
        }
    }
    assert_eq!(completions, 2);
    assert!(decoder.dump_reassembly().is_empty());
}

#[test]
/// A duplicate sub-frame restarts the assembly; a clean resend then decodes.
fn test_duplicate_frame_recovery() {
    let registry = Registry::bootstrap().unwrap();
    let mut decoder = Decoder::new(&registry);

    let payload = product_information_payload();
    let frames = frames_for(&payload, 0);

    decoder.process(&frame(126996, 9, frames[0].clone())).unwrap();
    decoder.process(&frame(126996, 9, frames[1].clone())).unwrap();
    // Duplicate of frame 1: partial assembly dropped, duplicate kept.
    decoder.process(&frame(126996, 9, frames[1].clone())).unwrap();

    let dump = decoder.dump_reassembly();
    assert_eq!(dump.len(), 1);
    assert_eq!(dump[0].pgn, 126996);
    assert_eq!(dump[0].frame_presence, 0b10);

    // The sender restarts from frame 0; the message completes.
    let mut decoded = None;
    for data in &frames {
        if data == &frames[1] {
            continue; // frame 1 is already in the buffer
        }
        if let Some(message) = decoder.process(&frame(126996, 9, data.clone())).unwrap() {
            decoded = Some(message);
        }
    }
    let message = decoded.expect("restarted assembly completes");
    assert_eq!(
        message.fields.get("Model ID"),
        Some(&FieldValue::Text("WindVane 3000".into()))
    );
}

#[test]
/// Pool exhaustion surfaces as an error instead of silent eviction.
fn test_pool_exhaustion_surfaces() {
    let registry = Registry::bootstrap().unwrap();
    let mut decoder = Decoder::new(&registry);

    let payload = product_information_payload();
    let frames = frames_for(&payload, 0);

    for source in 0..64u8 {
        assert!(decoder
            .process(&frame(126996, source, frames[0].clone()))
            .unwrap()
            .is_none());
    }
    assert!(matches!(
        decoder.process(&frame(126996, 64, frames[0].clone())),
        Err(DecodeError::Reassembly(
            ReassemblyError::OutOfReassemblyBuffers { .. }
        ))
    ));
    assert_eq!(decoder.dump_reassembly().len(), 64);
}

#[test]
/// Configuration Information carries three length-and-control-prefixed
/// strings; coalesced payloads bypass the reassembler.
fn test_configuration_information_strings() {
    let registry = Registry::bootstrap().unwrap();
    let mut decoder = Decoder::new(&registry);

    let mut payload = Vec::new();
    for text in ["Nav Station", "B&G", "Yacht Devices"] {
        payload.push(text.len() as u8 + 1); // total = control + payload
        payload.push(0x01); // ASCII
        payload.extend_from_slice(text.as_bytes());
    }

    let message = decoder
        .process(&frame(126998, 0x30, payload))
        .unwrap()
        .expect("coalesced payload decodes in one call");

    assert_eq!(message.description, "Configuration Information");
    assert_eq!(
        message.fields.get("Installation Description #1"),
        Some(&FieldValue::Text("Nav Station".into()))
    );
    assert_eq!(
        message.fields.get("Installation Description #2"),
        Some(&FieldValue::Text("B&G".into()))
    );
    assert_eq!(
        message.fields.get("Manufacturer Information"),
        Some(&FieldValue::Text("Yacht Devices".into()))
    );
}
