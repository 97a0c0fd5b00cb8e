//! Conversion utilities for the WASM/JS boundary.
//!
//! This module is stateless and centralizes:
//! - Request conversion (JSON DTOs into a catalogue, scope and config).
//! - UTF-16 ↔ byte offset bridging for editor-facing positions.
//! - Result conversion (analyzer/ide types → `dto::v1::*` views).

mod completion;
mod request;

use crate::offsets::utf16_offset_to_byte;

pub use request::ParsedRequest;

pub struct Converter;

impl Converter {
    /// Convert a UTF-16 cursor offset (CodeMirror) to a byte offset (Rust strings).
    pub fn cursor_utf16_to_byte(source: &str, cursor_utf16: usize) -> usize {
        utf16_offset_to_byte(source, cursor_utf16)
    }
}
