/// JS/editor boundary uses UTF-16 code units (CodeMirror positions).
/// Ranges are half-open `[start, end)`; `end` is exclusive.
pub fn utf16_offset_to_byte(source: &str, utf16: usize) -> usize {
    if utf16 == 0 {
        return 0;
    }

    let mut u16_count = 0usize;
    for (byte_idx, ch) in source.char_indices() {
        if u16_count >= utf16 {
            return byte_idx;
        }
        u16_count += ch.len_utf16();
    }

    source.len()
}

/// Byte offset (must be a char boundary, clamped to `source.len()`) to UTF-16 code units.
pub fn byte_offset_to_utf16_offset(source: &str, byte: usize) -> u32 {
    let byte = byte.min(source.len());
    source
        .get(..byte)
        .map_or(0, |prefix| prefix.encode_utf16().count()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_are_identical() {
        assert_eq!(utf16_offset_to_byte("abc", 2), 2);
        assert_eq!(byte_offset_to_utf16_offset("abc", 2), 2);
    }

    #[test]
    fn test_multi_unit_chars() {
        // "é" is 2 bytes / 1 unit, "😀" is 4 bytes / 2 units.
        let source = "é😀x";
        assert_eq!(utf16_offset_to_byte(source, 1), 2);
        assert_eq!(utf16_offset_to_byte(source, 3), 6);
        assert_eq!(byte_offset_to_utf16_offset(source, 6), 3);
        assert_eq!(byte_offset_to_utf16_offset(source, 7), 4);
    }

    #[test]
    fn test_offsets_clamp_to_source() {
        assert_eq!(utf16_offset_to_byte("ab", 10), 2);
        assert_eq!(byte_offset_to_utf16_offset("ab", 10), 2);
    }
}
