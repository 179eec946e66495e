//! Editor state owning the scene, the edit session and the current style, plus the
//! render loop around it.

use std::time::Duration;

use image::RgbaImage;

use crate::export::{ExportResult, SurfaceExporter};
use crate::geometry::Point;
use crate::input::KeyInput;
use crate::metrics::{TextEngine, TextMetrics};
use crate::render::{Overlay, RenderStatus, Renderer};
use crate::scene::{AnnotationId, HitTestOptions, Scene};
use crate::session::{BlinkToken, EditSession, SessionOutcome, DEFAULT_BLINK_INTERVAL};
use crate::style::{StyleApplier, StyleChange, StyleOutcome, TextStyle};

pub const DEFAULT_CANVAS_WIDTH: u32 = 500;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 400;
pub const DEFAULT_ANNOTATION_TEXT: &str = "text";
pub const DEFAULT_ANNOTATION_ANCHOR: Point = Point::new(50.0, 50.0);

#[derive(Debug, Clone, PartialEq)]
pub struct EditorSettings {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub default_text: String,
    pub default_anchor: Point,
    pub default_style: TextStyle,
    pub caret_blink_interval: Duration,
    pub hit_options: HitTestOptions,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            default_text: DEFAULT_ANNOTATION_TEXT.to_string(),
            default_anchor: DEFAULT_ANNOTATION_ANCHOR,
            default_style: TextStyle::default(),
            caret_blink_interval: DEFAULT_BLINK_INTERVAL,
            hit_options: HitTestOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Key(KeyInput),
    Style(StyleChange),
    AddRequested,
    DeleteRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Session(SessionOutcome),
    Style(StyleOutcome),
    Added(AnnotationId),
}

impl EventOutcome {
    pub const fn needs_redraw(self) -> bool {
        match self {
            Self::Session(outcome) => outcome.needs_redraw(),
            Self::Style(outcome) => outcome.needs_redraw(),
            Self::Added(_) => true,
        }
    }
}

/// Everything the event handlers mutate. Passed explicitly; there is no ambient state.
#[derive(Debug, Clone)]
pub struct EditorState {
    scene: Scene,
    session: EditSession,
    styles: StyleApplier,
    default_text: String,
    default_anchor: Point,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&EditorSettings::default())
    }
}

impl EditorState {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            scene: Scene::new(),
            session: EditSession::new(settings.caret_blink_interval, settings.hit_options),
            styles: StyleApplier::new(settings.default_style),
            default_text: settings.default_text.clone(),
            default_anchor: settings.default_anchor,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn current_style(&self) -> TextStyle {
        self.styles.current()
    }

    /// Adds the default annotation with a copy of the current style.
    pub fn add_annotation(&mut self) -> AnnotationId {
        self.scene.add(
            self.default_text.clone(),
            self.default_anchor,
            self.styles.current(),
        )
    }

    pub fn handle<M: TextMetrics + ?Sized>(
        &mut self,
        event: &EditorEvent,
        metrics: &M,
    ) -> EventOutcome {
        match event {
            EditorEvent::PointerDown(point) => {
                EventOutcome::Session(self.session.pointer_down(&self.scene, metrics, *point))
            }
            EditorEvent::PointerMove(point) => {
                EventOutcome::Session(self.session.pointer_move(&mut self.scene, *point))
            }
            EditorEvent::PointerUp => EventOutcome::Session(self.session.pointer_up()),
            EditorEvent::Key(key) => {
                EventOutcome::Session(self.session.key_input(&mut self.scene, key))
            }
            EditorEvent::Style(change) => EventOutcome::Style(self.styles.apply(
                *change,
                &mut self.session,
                &mut self.scene,
            )),
            EditorEvent::AddRequested => EventOutcome::Added(self.add_annotation()),
            EditorEvent::DeleteRequested => {
                EventOutcome::Session(self.session.delete_selected(&mut self.scene))
            }
        }
    }
}

/// Editor state bound to a text engine and an off-screen render surface.
#[derive(Debug)]
pub struct Editor<E> {
    state: EditorState,
    engine: E,
    renderer: Renderer,
}

impl<E: TextEngine> Editor<E> {
    pub fn new(settings: &EditorSettings, engine: E) -> Self {
        Self {
            state: EditorState::new(settings),
            engine,
            renderer: Renderer::new(settings.canvas_width, settings.canvas_height),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Handles one event and redraws synchronously when it changed anything visible.
    pub fn dispatch(&mut self, event: EditorEvent) -> EventOutcome {
        let outcome = self.state.handle(&event, &self.engine);
        tracing::debug!(?event, ?outcome, "event handled");
        if outcome.needs_redraw() {
            self.redraw();
        }
        outcome
    }

    pub fn redraw(&mut self) -> RenderStatus {
        self.renderer.render(&self.state.scene, &self.engine)
    }

    /// Installs (or replaces) the background and redraws the surface on top of it.
    pub fn set_background(&mut self, image: &RgbaImage) -> RenderStatus {
        if self.renderer.set_background(image) {
            tracing::debug!("flushing render deferred until the background loaded");
        }
        self.redraw()
    }

    pub fn is_ready(&self) -> bool {
        self.renderer.is_ready()
    }

    pub fn blink_token(&self) -> Option<BlinkToken> {
        self.state.session.caret().token()
    }

    /// Host timer callback for the caret blink. Returns whether the overlay changed.
    pub fn on_blink_tick(&mut self, token: BlinkToken) -> bool {
        self.state.session.caret_mut().on_tick(token)
    }

    /// Frame-clock variant of [`Editor::on_blink_tick`].
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.state.session.caret_mut().advance(elapsed)
    }

    pub fn overlay(&self) -> Overlay {
        Overlay::derive(&self.state.scene, &self.state.session, &self.engine)
    }

    pub fn surface(&self) -> &RgbaImage {
        self.renderer.surface()
    }

    pub fn export<X: SurfaceExporter>(&self, exporter: &X) -> ExportResult<X::Output> {
        exporter.export(self.renderer.surface())
    }
}
