// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Legacy Windows encoding conversion (CP1252/OEM/UTF-16LE → UTF-8).
//!
//! ```text
//! settings.json bytes --decode_text()--> schema JSON (BOM stripped)
//! net.exe stdout      --EncodedBuffer--> lines as they arrive
//! ```
//!
//! Uses `encoding_rs`. Lossy paths replace invalid sequences with U+FFFD.

use encoding_rs::{IBM866, WINDOWS_1252};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const UTF16_LE_BOM: &[u8] = b"\xFF\xFE";

/// Encoding of a settings file or of process output.
///
/// - `Utf8`: UTF-8 (65001), BOM tolerated
/// - `Utf16Le`: UTF-16 LE (1200)
/// - `Acp`: Active Code Page, typically Windows-1252 (1252)
/// - `Oem`: OEM Code Page used by console tools such as `net.exe`
/// - `Unknown`: treated as UTF-8 passthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Unknown,
    Utf8,
    Utf16Le,
    Acp,
    Oem,
}

impl Encoding {
    /// Canonical name, as accepted by `--encoding`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "auto",
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Acp => "cp1252",
            Self::Oem => "oem",
        }
    }

    /// Width of one code unit in bytes.
    const fn unit_width(self) -> usize {
        match self {
            Self::Utf16Le => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "" | "auto" => Ok(Self::Unknown),
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-16le" | "utf16le" | "utf-16" => Ok(Self::Utf16Le),
            "cp1252" | "windows-1252" | "ansi" | "acp" => Ok(Self::Acp),
            "oem" | "cp866" | "ibm866" => Ok(Self::Oem),
            _ => Err(ConfigError::InvalidValue {
                section: "schema".to_string(),
                key: "encoding".to_string(),
                message: format!("expected 'utf-8', 'utf-16le', 'cp1252' or 'oem', got '{s}'"),
            }),
        }
    }
}

impl Serialize for Encoding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Encoding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Converts bytes from the given encoding to UTF-8, replacing invalid
/// sequences with U+FFFD.
///
/// # Example
/// ```
/// use smbcn::utility::encoding::{bytes_to_utf8, Encoding};
///
/// let cp1252_bytes = b"caf\xe9";
/// assert_eq!(bytes_to_utf8(Encoding::Acp, cp1252_bytes), "café");
/// ```
#[must_use]
pub fn bytes_to_utf8(encoding: Encoding, bytes: &[u8]) -> Cow<'_, str> {
    match encoding {
        Encoding::Utf8 | Encoding::Unknown => String::from_utf8_lossy(bytes),
        Encoding::Utf16Le => utf16_le_to_utf8(bytes),
        Encoding::Acp => WINDOWS_1252.decode_without_bom_handling(bytes).0,
        Encoding::Oem => IBM866.decode_without_bom_handling(bytes).0,
    }
}

/// Decodes a whole text file, stripping a leading byte order mark.
///
/// Returns `None` when the bytes are not valid in `encoding`. `Unknown`
/// sniffs a UTF-16LE BOM and otherwise behaves like `Utf8`.
#[must_use]
pub fn decode_text(encoding: Encoding, bytes: &[u8]) -> Option<Cow<'_, str>> {
    match encoding {
        Encoding::Unknown if bytes.starts_with(UTF16_LE_BOM) => {
            decode_text(Encoding::Utf16Le, bytes)
        }
        Encoding::Utf8 | Encoding::Unknown => {
            let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            std::str::from_utf8(bytes).ok().map(Cow::Borrowed)
        }
        Encoding::Utf16Le => {
            let bytes = bytes.strip_prefix(UTF16_LE_BOM).unwrap_or(bytes);
            if bytes.len() % 2 != 0 {
                return None;
            }
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).ok().map(Cow::Owned)
        }
        Encoding::Acp | Encoding::Oem => Some(bytes_to_utf8(encoding, bytes)),
    }
}

/// Converts UTF-16 LE bytes to UTF-8, ignoring a trailing odd byte.
fn utf16_le_to_utf8(bytes: &[u8]) -> Cow<'static, str> {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    if units.is_empty() {
        Cow::Borrowed("")
    } else {
        Cow::Owned(String::from_utf16_lossy(&units))
    }
}

/// Accumulates raw process output and hands out complete lines as UTF-8.
///
/// Line breaks are located on raw code units before decoding, so a
/// multi-byte character split across two reads is never decoded in halves.
///
/// ```
/// use smbcn::utility::encoding::{EncodedBuffer, Encoding};
///
/// let mut buffer = EncodedBuffer::new(Encoding::Oem);
/// buffer.add(b"New connections will not be remembered.\r\n\r\nStatus");
/// assert_eq!(buffer.take_lines(false), vec!["New connections will not be remembered."]);
/// assert_eq!(buffer.take_lines(true), vec!["Status"]);
/// ```
pub struct EncodedBuffer {
    encoding: Encoding,
    bytes: Vec<u8>,
    consumed: usize,
}

impl EncodedBuffer {
    #[must_use]
    pub const fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            bytes: Vec::new(),
            consumed: 0,
        }
    }

    /// Appends bytes to the buffer.
    pub fn add(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Returns the entire buffer content as UTF-8, including lines already
    /// handed out by [`Self::take_lines`].
    #[must_use]
    pub fn utf8_string(&self) -> String {
        bytes_to_utf8(self.encoding, &self.bytes).into_owned()
    }

    /// Returns the non-empty lines completed since the previous call.
    ///
    /// With `finished`, trailing bytes without a line break count as a final
    /// line; otherwise they stay buffered for the next call.
    pub fn take_lines(&mut self, finished: bool) -> Vec<String> {
        let width = self.encoding.unit_width();
        let end = self.bytes.len() - self.bytes.len() % width;
        let mut lines = Vec::new();
        let mut start = self.consumed;
        let mut pos = start;

        while pos + width <= end {
            if self.is_line_break(pos) {
                self.push_line(&mut lines, start, pos);
                start = pos + width;
            }
            pos += width;
        }

        if finished && start < end {
            self.push_line(&mut lines, start, end);
            start = end;
        }
        self.consumed = start;
        lines
    }

    fn is_line_break(&self, pos: usize) -> bool {
        let unit = match self.encoding.unit_width() {
            2 => u16::from_le_bytes([self.bytes[pos], self.bytes[pos + 1]]),
            _ => u16::from(self.bytes[pos]),
        };
        unit == u16::from(b'\n') || unit == u16::from(b'\r')
    }

    fn push_line(&self, lines: &mut Vec<String>, start: usize, end: usize) {
        if start < end {
            lines.push(bytes_to_utf8(self.encoding, &self.bytes[start..end]).into_owned());
        }
    }
}

#[cfg(test)]
mod tests;
