use std::path::PathBuf;

use crate::export::ExportError;
use crate::metrics::FontError;
use crate::script::ScriptError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load background image {path}: {source}")]
    Background {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Font(#[from] FontError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
