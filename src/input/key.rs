/// Key identity as delivered by the host: a printable character or a named key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Character(char),
    Backspace,
    Enter,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl KeyInput {
    /// Parses DOM-style key names: a single character, or `Backspace`, `Enter`,
    /// `ArrowLeft`, `ArrowRight`. Anything else is kept as `Other`.
    pub fn from_key_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Self::Character(ch);
        }
        match name {
            "Backspace" => Self::Backspace,
            "Enter" => Self::Enter,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            other => Self::Other(other.to_string()),
        }
    }
}

/// What a key means to an active text edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Insert(char),
    DeleteBackward,
    Commit,
    CursorLeft,
    CursorRight,
}

impl EditKey {
    pub fn resolve(key: &KeyInput) -> Option<Self> {
        match key {
            KeyInput::Character(ch) if !ch.is_control() => Some(Self::Insert(*ch)),
            KeyInput::Character(_) | KeyInput::Other(_) => None,
            KeyInput::Backspace => Some(Self::DeleteBackward),
            KeyInput::Enter => Some(Self::Commit),
            KeyInput::ArrowLeft => Some(Self::CursorLeft),
            KeyInput::ArrowRight => Some(Self::CursorRight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_key_name_maps_single_characters_and_named_keys() {
        assert_eq!(KeyInput::from_key_name("a"), KeyInput::Character('a'));
        assert_eq!(KeyInput::from_key_name(" "), KeyInput::Character(' '));
        assert_eq!(KeyInput::from_key_name("가"), KeyInput::Character('가'));
        assert_eq!(KeyInput::from_key_name("Backspace"), KeyInput::Backspace);
        assert_eq!(KeyInput::from_key_name("Enter"), KeyInput::Enter);
        assert_eq!(KeyInput::from_key_name("ArrowLeft"), KeyInput::ArrowLeft);
        assert_eq!(KeyInput::from_key_name("ArrowRight"), KeyInput::ArrowRight);
        assert_eq!(
            KeyInput::from_key_name("Shift"),
            KeyInput::Other("Shift".to_string())
        );
    }

    #[test]
    fn resolve_ignores_control_characters_and_unknown_keys() {
        assert_eq!(EditKey::resolve(&KeyInput::Character('\u{7}')), None);
        assert_eq!(EditKey::resolve(&KeyInput::Other("Tab".into())), None);
        assert_eq!(
            EditKey::resolve(&KeyInput::Character('x')),
            Some(EditKey::Insert('x'))
        );
        assert_eq!(EditKey::resolve(&KeyInput::Enter), Some(EditKey::Commit));
    }
}
