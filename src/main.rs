use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use annotext::export::DEFAULT_EXPORT_FILE;
use annotext::RunOptions;

const USAGE: &str = "usage: annotext <background-image> <script.json> [output.png]";

fn main() -> Result<()> {
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let (Some(background), Some(script)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let output = args
        .next()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));

    let options = RunOptions {
        background,
        script,
        output,
    };
    let path = annotext::run(&options)
        .with_context(|| format!("failed to compose {}", options.background.display()))?;
    println!("{}", path.display());
    Ok(())
}
