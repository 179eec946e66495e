pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod scene;
pub mod script;
pub mod session;
pub mod style;

use std::path::PathBuf;

use image::RgbaImage;

use editor::Editor;
use export::PngFileExporter;
use metrics::{EstimatedText, FontLibrary, MemoizedMetrics, TextEngine};
use script::ScriptStep;

pub use error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub background: PathBuf,
    pub script: PathBuf,
    pub output: PathBuf,
}

/// Loads the background and an event script, replays it, and exports the composed surface.
pub fn run(options: &RunOptions) -> AppResult<PathBuf> {
    logging::init();
    tracing::info!("starting annotext");

    let settings = config::load_app_config().settings();
    let background = image::open(&options.background)
        .map_err(|source| AppError::Background {
            path: options.background.clone(),
            source,
        })?
        .to_rgba8();
    let steps = script::load_script(&options.script)?;
    let exporter = PngFileExporter::new(&options.output);

    match FontLibrary::load_system() {
        Ok(fonts) => replay_and_export(
            Editor::new(&settings, MemoizedMetrics::new(fonts)),
            &background,
            &steps,
            &exporter,
        ),
        Err(err) => {
            tracing::warn!(%err, "no system font available; using estimated text metrics");
            replay_and_export(
                Editor::new(&settings, EstimatedText),
                &background,
                &steps,
                &exporter,
            )
        }
    }
}

fn replay_and_export<E: TextEngine>(
    mut editor: Editor<E>,
    background: &RgbaImage,
    steps: &[ScriptStep],
    exporter: &PngFileExporter,
) -> AppResult<PathBuf> {
    editor.set_background(background);
    script::replay(&mut editor, steps);
    Ok(editor.export(exporter)?)
}
