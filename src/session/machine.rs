#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Selected,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    PointerDownOnAnnotation,
    PointerDownOnEmpty,
    PointerMove,
    PointerUp,
    Edit,
    Commit,
    Delete,
    SelectionLost,
}

pub fn next_state(state: SessionState, event: SessionEvent) -> Option<SessionState> {
    use SessionEvent::*;
    use SessionState::*;
    match (state, event) {
        (_, PointerDownOnAnnotation) => Some(Dragging),
        (_, PointerDownOnEmpty) => Some(Idle),
        (Dragging, PointerMove) => Some(Dragging),
        (Dragging, PointerUp) => Some(Selected),
        (Selected | Dragging, Edit) => Some(state),
        (Selected | Dragging, Commit | Delete | SelectionLost) => Some(Idle),
        _ => None,
    }
}

pub fn can_transition(state: SessionState, event: SessionEvent) -> bool {
    next_state(state, event).is_some()
}
