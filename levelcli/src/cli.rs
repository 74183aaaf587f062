use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CliError {
    #[error("Invalid int specification for delay")]
    InvalidDelayInt(ParseIntError),
    #[error("Invalid delay specification, please use the format: amount(ms|s|m)")]
    InvalidDelay,
}

#[derive(Parser)]
#[command(author, version, about)]
#[command(propagate_version = true)]
/// Add a level from an *.ipe file
///
/// First draw a single polygon using ipe with the vertices in a CLOCKWISE order.
/// Save this as an *.ipe or *.xml file, then run this tool with the relative path
/// to that file. Bring the unity window to the front and select the
/// LevelController.LevelPoints.Size field before the delay runs out, after which
/// the tool simulates key presses to enter the polygon.
pub struct Args {
    /// Relative path to the *.ipe or *.xml file containing the polygon
    pub file: PathBuf,

    /// Time to select the input field before typing starts. Requires the format: amount(ms|s|m)
    #[arg(short, long, default_value = "8s", value_parser = parse_delay)]
    pub delay: Duration,

    /// Print the key presses instead of sending them, tabs are shown as {TAB}
    #[arg(long)]
    pub dry_run: bool,

    /// Also write an .svg preview of the level to this file
    #[arg(short, long)]
    pub preview: Option<PathBuf>,
}

fn parse_delay(arg: &str) -> Result<Duration, CliError> {
    let re = Regex::new(r"^(\d+)(ms|s|m)$").unwrap();
    if let Some(cap) = re.captures(arg) {
        let amount = cap
            .get(1)
            .expect("Regex requires an amount")
            .as_str()
            .parse::<u64>()
            .map_err(CliError::InvalidDelayInt)?;

        // Normalize delay to milliseconds
        let factor = match cap.get(2).expect("Regex requires a unit").as_str() {
            "ms" => 1,
            "s" => 1000,
            "m" => 60 * 1000,
            _ => panic!("Regex should not have allowed any other unit string"),
        };
        let millis = amount.checked_mul(factor).ok_or(CliError::InvalidDelay)?;

        Ok(Duration::from_millis(millis))
    } else {
        Err(CliError::InvalidDelay)
    }
}
