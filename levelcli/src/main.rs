//types an ipe polygon into the level list of the art gallery game
//cli accepts the ipe file (and optional timing/preview parameters)

mod cli;

use std::error::Error;
use std::io;

use clap::Parser;
use cli::Args;
use env_logger::Env;
use levelscribe::scriber::{Scriber, WriterSink};
use levelscribe::{preview, Level};
use log::{info, warn};

const DEFAULT_LOGGING_LEVEL: &str = "info";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOGGING_LEVEL)).init();

    let args = Args::parse();
    let level = levelscribe::run(&args.file)?;
    info!(
        "normalized {} vertices from {}",
        level.count,
        args.file.display()
    );

    if let Some(preview_file) = &args.preview {
        svg::save(preview_file, &preview::scribe(&level))?;
        info!("wrote preview to {}", preview_file.display());
    }

    if args.dry_run {
        warn!("dry run, nothing is typed");
        let mut scriber = Scriber::new(WriterSink::new(io::stdout().lock()));
        scriber.scribe(&level)?;
        let _stdout = scriber.into_sink().finish()?;
        return Ok(());
    }

    type_level(&level, &args)
}

#[cfg(feature = "keyboard")]
fn type_level(level: &Level, args: &Args) -> Result<(), Box<dyn Error>> {
    use levelscribe::scriber::{focus_window, EnigoSink, UNITY_WINDOW_CLASS};
    use std::thread;

    focus_window(UNITY_WINDOW_CLASS)?;
    // connect before the countdown so a missing display fails right away
    let sink = EnigoSink::new()?;
    info!(
        "select the LevelController.LevelPoints.Size field, typing starts in {:?}",
        args.delay
    );
    thread::sleep(args.delay);

    Scriber::new(sink).scribe(level)?;
    info!("done");
    Ok(())
}

#[cfg(not(feature = "keyboard"))]
fn type_level(level: &Level, _args: &Args) -> Result<(), Box<dyn Error>> {
    warn!("built without keyboard support, printing the key presses instead");
    let mut scriber = Scriber::new(WriterSink::new(io::stdout().lock()));
    scriber.scribe(level)?;
    let _stdout = scriber.into_sink().finish()?;
    Ok(())
}
