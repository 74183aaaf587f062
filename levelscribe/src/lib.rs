pub mod model;
pub mod normalize;
pub mod preview;
pub mod scriber;

#[cfg(test)]
#[macro_use]
extern crate is_close;

use log::info;
use std::path::Path;
use thiserror::Error;

use model::{IpePolygon, ModelError};
use normalize::NormalizeError;
pub use normalize::Level;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Read the single polygon of an ipe file and scale it into a level.
/// ```no_run
/// use levelscribe::scriber::{Scriber, WriterSink};
/// let level = levelscribe::run("level.ipe")?;
/// let mut scriber = Scriber::new(WriterSink::new(std::io::stdout()));
/// scriber.scribe(&level)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn run(file_path: impl AsRef<Path>) -> Result<Level, Error> {
    let polygon = IpePolygon::from_file(file_path)?;
    info!("read polygon with {} vertices", polygon.len());
    let level = normalize::normalize(&polygon)?;
    Ok(level)
}
