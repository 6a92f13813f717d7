//! Minimal tag-value extraction for the dataserver response.
//!
//! The response is XML-shaped but its structure is externally fixed
//! and narrow, so this is a deliberate single-pass substring scan
//! rather than a structural parser. It has no notion of nesting,
//! attributes, or escaping.

/// Returns the text between `tag` and the next `<`, scanning from
/// `*cursor`.
///
/// On a hit the cursor advances to the position of that `<`, so
/// consecutive calls walk the buffer in document order without
/// rescanning from the start.
///
/// Returns `None` with the cursor unchanged when the tag does not
/// occur at or after the cursor. When the tag is found but no `<`
/// follows (truncated buffer), returns `None` and resets the cursor
/// to the start of the buffer, so a later unrelated lookup is not
/// trapped at end-of-buffer.
///
/// Callers must treat an empty `Some("")` the same as absent: the
/// response encodes "no value" as an empty element.
pub fn extract_field<'a>(buffer: &'a str, tag: &str, cursor: &mut usize) -> Option<&'a str> {
    let hit = buffer.get(*cursor..)?.find(tag)?;
    let start = *cursor + hit + tag.len();
    match buffer[start..].find('<') {
        Some(end) => {
            *cursor = start + end;
            Some(&buffer[start..start + end])
        }
        None => {
            *cursor = 0;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUFFER: &str =
        "<data><raw_text>KL18 AUTO</raw_text><station_id>KL18</station_id></data>";

    #[test]
    fn test_extracts_value_and_advances_cursor() {
        let mut cursor = 0;
        let value = extract_field(BUFFER, "<raw_text>", &mut cursor);
        assert_eq!(value, Some("KL18 AUTO"));
        // Cursor now sits on the '<' of '</raw_text>'.
        assert_eq!(&BUFFER[cursor..cursor + 1], "<");
        assert!(BUFFER[cursor..].starts_with("</raw_text>"));
    }

    #[test]
    fn test_ordered_extraction_without_rescanning() {
        let mut cursor = 0;
        assert_eq!(extract_field(BUFFER, "<raw_text>", &mut cursor), Some("KL18 AUTO"));
        assert_eq!(extract_field(BUFFER, "<station_id>", &mut cursor), Some("KL18"));
    }

    #[test]
    fn test_tag_behind_cursor_is_not_found() {
        let mut cursor = 0;
        extract_field(BUFFER, "<station_id>", &mut cursor).unwrap();
        let before = cursor;
        // raw_text only occurs before the cursor position now.
        assert_eq!(extract_field(BUFFER, "<raw_text>", &mut cursor), None);
        assert_eq!(cursor, before, "missing tag must leave the cursor unchanged");
    }

    #[test]
    fn test_missing_tag_leaves_cursor_unchanged() {
        let mut cursor = 0;
        assert_eq!(extract_field(BUFFER, "<latitude>", &mut cursor), None);
        assert_eq!(cursor, 0);
    }

    #[test]
    fn test_truncated_value_resets_cursor_to_start() {
        let truncated = "<station_id>KL18</station_id><latitude>33.35";
        let mut cursor = 0;
        assert_eq!(extract_field(truncated, "<station_id>", &mut cursor), Some("KL18"));
        assert_eq!(extract_field(truncated, "<latitude>", &mut cursor), None);
        assert_eq!(cursor, 0, "truncated value must reset the cursor");
        // A later lookup for an earlier tag on the same buffer succeeds.
        assert_eq!(extract_field(truncated, "<station_id>", &mut cursor), Some("KL18"));
    }

    #[test]
    fn test_empty_element_yields_empty_text() {
        let buffer = "<station_id></station_id>";
        let mut cursor = 0;
        assert_eq!(extract_field(buffer, "<station_id>", &mut cursor), Some(""));
    }

    #[test]
    fn test_cursor_past_end_is_not_found() {
        let mut cursor = BUFFER.len() + 10;
        assert_eq!(extract_field(BUFFER, "<raw_text>", &mut cursor), None);
        assert_eq!(cursor, BUFFER.len() + 10);
    }
}
