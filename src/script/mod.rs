//! JSON event scripts for replaying an editing session headlessly.
//!
//! ```json
//! [
//!   { "event": "add" },
//!   { "event": "pointer_down", "x": 55, "y": 40 },
//!   { "event": "pointer_move", "x": 120, "y": 90 },
//!   { "event": "pointer_up" },
//!   { "event": "type", "text": "!" },
//!   { "event": "size", "value": "large" },
//!   { "event": "key", "key": "Enter" }
//! ]
//! ```

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::editor::{Editor, EditorEvent};
use crate::geometry::Point;
use crate::input::KeyInput;
use crate::metrics::TextEngine;
use crate::style::{FamilyPreset, SizePreset, StyleChange};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptStep {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    Key { key: String },
    Type { text: String },
    Color { value: String },
    Size { value: String },
    Family { value: String },
    ToggleBold,
    ToggleItalic,
    Add,
    Delete,
    Tick { ms: u64 },
}

impl ScriptStep {
    /// Editor events for this step. `Tick` has none; it only advances the caret clock.
    pub fn events(&self) -> Vec<EditorEvent> {
        match self {
            Self::PointerDown { x, y } => vec![EditorEvent::PointerDown(Point::new(*x, *y))],
            Self::PointerMove { x, y } => vec![EditorEvent::PointerMove(Point::new(*x, *y))],
            Self::PointerUp => vec![EditorEvent::PointerUp],
            Self::Key { key } => vec![EditorEvent::Key(KeyInput::from_key_name(key))],
            Self::Type { text } => text
                .chars()
                .map(|ch| EditorEvent::Key(KeyInput::Character(ch)))
                .collect(),
            Self::Color { value } => vec![EditorEvent::Style(StyleChange::color_from_key(value))],
            Self::Size { value } => vec![EditorEvent::Style(StyleChange::Size(
                SizePreset::from_key(value),
            ))],
            Self::Family { value } => vec![EditorEvent::Style(StyleChange::Family(
                FamilyPreset::from_key(value),
            ))],
            Self::ToggleBold => vec![EditorEvent::Style(StyleChange::ToggleBold)],
            Self::ToggleItalic => vec![EditorEvent::Style(StyleChange::ToggleItalic)],
            Self::Add => vec![EditorEvent::AddRequested],
            Self::Delete => vec![EditorEvent::DeleteRequested],
            Self::Tick { .. } => Vec::new(),
        }
    }
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    Ok(serde_json::from_str(source)?)
}

pub fn load_script(path: &std::path::Path) -> Result<Vec<ScriptStep>, ScriptError> {
    let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&source)
}

/// Feeds every step to `editor` in order. Returns the number of dispatched events.
pub fn replay<E: TextEngine>(editor: &mut Editor<E>, steps: &[ScriptStep]) -> usize {
    let mut dispatched = 0_usize;
    for step in steps {
        if let ScriptStep::Tick { ms } = step {
            editor.tick(Duration::from_millis(*ms));
            continue;
        }
        for event in step.events() {
            editor.dispatch(event);
            dispatched += 1;
        }
    }
    tracing::info!(steps = steps.len(), dispatched, "script replayed");
    dispatched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorSettings;
    use crate::metrics::EstimatedText;
    use crate::style::LARGE_SIZE_PX;

    const SCRIPT: &str = r#"[
        { "event": "add" },
        { "event": "pointer_down", "x": 55, "y": 40 },
        { "event": "pointer_move", "x": 105, "y": 90 },
        { "event": "pointer_up" },
        { "event": "key", "key": "Backspace" },
        { "event": "type", "text": "xt!" },
        { "event": "size", "value": "large" },
        { "event": "toggle_bold" },
        { "event": "tick", "ms": 500 },
        { "event": "key", "key": "Enter" }
    ]"#;

    #[test]
    fn parse_script_reads_tagged_steps() {
        let steps = parse_script(SCRIPT).expect("script should parse");
        assert_eq!(steps.len(), 10);
        assert_eq!(steps[0], ScriptStep::Add);
        assert_eq!(steps[1], ScriptStep::PointerDown { x: 55.0, y: 40.0 });
        assert_eq!(steps[8], ScriptStep::Tick { ms: 500 });
    }

    #[test]
    fn parse_script_rejects_unknown_events() {
        let err = parse_script(r#"[{ "event": "explode" }]"#).expect_err("unknown event");
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn type_step_expands_to_one_key_per_character() {
        let step = ScriptStep::Type {
            text: "ab".to_string(),
        };
        assert_eq!(
            step.events(),
            vec![
                EditorEvent::Key(KeyInput::Character('a')),
                EditorEvent::Key(KeyInput::Character('b')),
            ]
        );
    }

    #[test]
    fn replay_drives_the_editor() {
        let steps = parse_script(SCRIPT).expect("script should parse");
        let mut editor = Editor::new(&EditorSettings::default(), EstimatedText);
        let dispatched = replay(&mut editor, &steps);
        assert_eq!(dispatched, 11);

        let scene = editor.state().scene();
        let annotation = scene
            .iter_front_to_back()
            .next()
            .expect("one annotation should exist");
        assert_eq!(annotation.text, "texxt!");
        assert_eq!(annotation.anchor(), Point::new(100.0, 100.0));
        assert_eq!(annotation.style.size_px(), LARGE_SIZE_PX);
        assert!(annotation.style.bold);
        assert!(editor.state().session().selected().is_none());
    }
}
