use std::fs::File;
use std::process::ExitCode;

use fretchord_core::config::Config;
use fretchord_core::recognizer::Recognizer;
use fretchord_types::{FingerPosition, PositionError};

const USAGE: &str = "\
usage: fretchord [-v] [--offset N] [--slash] [--explain] POS...
       fretchord [-v] [--offset N] [--slash] [--explain] --json JSON

  POS         string:fret[:finger], string 0 is high e, finger defaults to 1
  --json      positions as a JSON array of {\"string\",\"fret\",\"finger\"} objects
  --offset N  fret offset added to every position (default from config)
  --slash     print inversions as slash chords (G/B)
  --explain   print every ranked candidate as JSON
  -v          debug logging";

#[derive(Debug)]
enum CliError {
    MissingValue(&'static str),
    UnknownFlag(String),
    InvalidOffset(String),
    InvalidPosition(String),
    Position(PositionError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue(flag) => write!(f, "{} needs a value", flag),
            Self::UnknownFlag(flag) => write!(f, "unknown flag: {}", flag),
            Self::InvalidOffset(s) => write!(f, "invalid fret offset: {}", s),
            Self::InvalidPosition(s) => {
                write!(f, "invalid position '{}', expected string:fret[:finger]", s)
            }
            Self::Position(e) => write!(f, "{}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Position(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PositionError> for CliError {
    fn from(e: PositionError) -> Self {
        Self::Position(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    verbose: bool,
    help: bool,
    offset: Option<u8>,
    slash: bool,
    explain: bool,
    positions: Vec<FingerPosition>,
}

fn parse_args<I>(args: I) -> Result<Args, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--verbose" => parsed.verbose = true,
            "-h" | "--help" => parsed.help = true,
            "--slash" => parsed.slash = true,
            "--explain" => parsed.explain = true,
            "--offset" => {
                let value = args.next().ok_or(CliError::MissingValue("--offset"))?;
                let offset = value
                    .parse()
                    .map_err(|_| CliError::InvalidOffset(value.clone()))?;
                parsed.offset = Some(offset);
            }
            "--json" => {
                let value = args.next().ok_or(CliError::MissingValue("--json"))?;
                parsed.positions.extend(parse_json_positions(&value)?);
            }
            flag if flag.starts_with('-') => return Err(CliError::UnknownFlag(arg)),
            _ => parsed.positions.push(parse_position(&arg)?),
        }
    }
    Ok(parsed)
}

/// `string:fret[:finger]`, e.g. `4:3` or `4:3:3`.
fn parse_position(s: &str) -> Result<FingerPosition, CliError> {
    let invalid = || CliError::InvalidPosition(s.to_string());
    let mut parts = s.split(':');
    let string = parts.next().and_then(|p| p.trim().parse().ok()).ok_or_else(invalid)?;
    let fret = parts.next().and_then(|p| p.trim().parse().ok()).ok_or_else(invalid)?;
    let finger = match parts.next() {
        Some(p) => p.trim().parse().map_err(|_| invalid())?,
        None => 1,
    };
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(FingerPosition::new(string, fret, finger)?)
}

fn parse_json_positions(json: &str) -> Result<Vec<FingerPosition>, CliError> {
    let raw: Vec<FingerPosition> = serde_json::from_str(json)?;
    raw.into_iter()
        .map(|p| FingerPosition::new(p.string, p.fret, p.finger).map_err(CliError::from))
        .collect()
}

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("fretchord")
        .join("fretchord.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path)
        .or_else(|_| File::create(std::env::temp_dir().join("fretchord.log")))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("fretchord: logging disabled: {}", e);
            return;
        }
    };

    if WriteLogger::init(log_level, simplelog::Config::default(), log_file).is_err() {
        return;
    }

    log::info!("fretchord starting (log level: {:?})", log_level);
}

fn run(args: Args) -> Result<String, CliError> {
    let config = Config::load();
    let recognizer = Recognizer::from_config(&config);
    let offset = args.offset.unwrap_or_else(|| config.fret_offset());

    if args.explain {
        let explanation = recognizer.explain(&args.positions, offset);
        return Ok(serde_json::to_string_pretty(&explanation)?);
    }

    let recognition = recognizer.recognize(&args.positions, offset);
    let slash = args.slash || config.slash_chords();
    Ok(match recognition.chord() {
        Some(chord) if slash => chord.slash_name(),
        _ => recognition.label(),
    })
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("fretchord: {}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };
    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }
    init_logging(args.verbose);

    match run(args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("fretchord: {}", e);
            ExitCode::FAILURE
        }
    }
}
