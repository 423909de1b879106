// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{EncodedBuffer, Encoding, bytes_to_utf8, decode_text};

#[test]
fn test_windows_1252_conversion() {
    let result = bytes_to_utf8(Encoding::Acp, b"caf\xe9");
    insta::assert_snapshot!(result, @"café");
}

#[test]
fn test_utf16_le_conversion_ignores_odd_byte() {
    let result = bytes_to_utf8(Encoding::Utf16Le, b"H\x00i\x00!");
    assert_eq!(result, "Hi");
}

#[test]
fn test_decode_text_strips_utf8_bom() {
    let text = decode_text(Encoding::Utf8, b"\xEF\xBB\xBF{\"a\":1}").unwrap();
    assert_eq!(text, "{\"a\":1}");
}

#[test]
fn test_decode_text_sniffs_utf16_bom() {
    let bytes = b"\xFF\xFE{\x00}\x00";
    assert_eq!(decode_text(Encoding::Unknown, bytes).unwrap(), "{}");
    assert_eq!(decode_text(Encoding::Utf16Le, bytes).unwrap(), "{}");
}

#[test]
fn test_decode_text_rejects_invalid_input() {
    assert!(decode_text(Encoding::Utf8, b"\xff\xfe\xfd").is_none());
    assert!(decode_text(Encoding::Utf16Le, b"{\x00}").is_none());
    assert!(decode_text(Encoding::Acp, b"\xff").is_some());
}

#[test]
fn test_encoding_names() {
    let parsed: Vec<_> = ["utf-8", "UTF_16LE", "cp1252", "oem", "auto"]
        .into_iter()
        .map(|name| name.parse::<Encoding>().map(|e| e.to_string()))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(parsed, ["utf-8", "utf-16le", "cp1252", "oem", "auto"]);
    assert!("shift-jis".parse::<Encoding>().is_err());
}

#[test]
fn test_encoded_buffer_incremental() {
    let mut buffer = EncodedBuffer::new(Encoding::Utf8);

    buffer.add(b"line1\n");
    let phase1 = buffer.take_lines(false);

    buffer.add(b"line2\r\n\r\npartial");
    let phase2 = buffer.take_lines(false);

    let phase3 = buffer.take_lines(true);

    insta::assert_debug_snapshot!((phase1, phase2, phase3), @r#"
    (
        [
            "line1",
        ],
        [
            "line2",
        ],
        [
            "partial",
        ],
    )
    "#);
    assert_eq!(buffer.utf8_string(), "line1\nline2\r\n\r\npartial");
}

#[test]
fn test_encoded_buffer_utf16_split_unit() {
    let mut buffer = EncodedBuffer::new(Encoding::Utf16Le);
    buffer.add(b"o\x00k\x00\n");
    assert!(buffer.take_lines(false).is_empty());

    buffer.add(b"\x00");
    assert_eq!(buffer.take_lines(false), vec!["ok"]);
    assert!(buffer.take_lines(true).is_empty());
}
