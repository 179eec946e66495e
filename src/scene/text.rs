//! Character-offset editing on annotation text. Offsets count `char`s, not bytes.

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub fn clamp_offset(text: &str, offset: usize) -> usize {
    offset.min(char_len(text))
}

pub fn prefix(text: &str, offset: usize) -> &str {
    &text[..byte_index_for_offset(text, offset)]
}

/// Inserts `c` before the character at `offset` and returns the offset just after it.
pub fn insert_char(text: &mut String, offset: usize, c: char) -> usize {
    let offset = clamp_offset(text, offset);
    let byte_index = byte_index_for_offset(text, offset);
    text.insert(byte_index, c);
    offset.saturating_add(1)
}

/// Removes the character before `offset`. Returns the new offset, or `None` at the start.
pub fn delete_backward(text: &mut String, offset: usize) -> Option<usize> {
    let offset = clamp_offset(text, offset);
    if offset == 0 {
        return None;
    }
    let end = byte_index_for_offset(text, offset);
    let start = byte_index_for_offset(text, offset - 1);
    text.drain(start..end);
    Some(offset - 1)
}

fn byte_index_for_offset(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_char_places_character_at_offset() {
        let mut text = String::from("cat");
        let offset = insert_char(&mut text, 1, 'x');
        assert_eq!(text, "cxat");
        assert_eq!(offset, 2);
    }

    #[test]
    fn insert_then_delete_restores_text_and_offset() {
        let mut text = String::from("hello");
        let after_insert = insert_char(&mut text, 2, 'Z');
        let restored = delete_backward(&mut text, after_insert).expect("delete should succeed");
        assert_eq!(text, "hello");
        assert_eq!(restored, 2);
    }

    #[test]
    fn delete_backward_at_start_is_noop() {
        let mut text = String::from("abc");
        assert_eq!(delete_backward(&mut text, 0), None);
        assert_eq!(text, "abc");
    }

    #[test]
    fn offsets_are_counted_in_characters_for_multibyte_text() {
        let mut text = String::from("가나다");
        assert_eq!(prefix(&text, 2), "가나");
        let offset = insert_char(&mut text, 1, 'a');
        assert_eq!(text, "가a나다");
        let offset = delete_backward(&mut text, offset).expect("delete should succeed");
        assert_eq!(text, "가나다");
        assert_eq!(offset, 1);
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        let mut text = String::from("ab");
        assert_eq!(clamp_offset(&text, 9), 2);
        assert_eq!(prefix(&text, 9), "ab");
        assert_eq!(insert_char(&mut text, 9, 'c'), 3);
        assert_eq!(text, "abc");
        assert_eq!(delete_backward(&mut text, 9), Some(2));
        assert_eq!(text, "ab");
    }
}
