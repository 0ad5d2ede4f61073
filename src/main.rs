use std::{error::Error, io, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use log::{Level, error, info};
use ulam_spiral::{
    config::SpiralConfig,
    error::SpiralError,
    logger::{LogLevel, LoggerBuilder},
    spiral::SpiralGenerator,
    trace::TraceRecorder,
};

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Prints a square spiral numbering of a grid, counting outward from the center.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of cells to fill; clamped to the grid capacity
    #[arg(short, long)]
    length: Option<usize>,

    /// Side length of the grid; must be odd
    #[arg(short, long)]
    size: Option<usize>,

    /// JSON config file, created with defaults if missing. Flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Write every visited cell to this CSV file
    #[arg(long)]
    trace: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    log_level: LogLevel,

    /// Directory to write dated log files into
    #[arg(long)]
    log_path: Option<PathBuf>,
}

impl Args {
    fn spiral_config(&self) -> Result<SpiralConfig, io::Error> {
        let config = match &self.config {
            Some(path) => SpiralConfig::load_or_create(path)?,
            None => SpiralConfig::default(),
        };
        Ok(config.with_overrides(self.length, self.size))
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = args.spiral_config()?;
    info!("{config:?}");

    let mut spiral = SpiralGenerator::new(config)?;
    match args.trace {
        Some(path) => {
            let mut recorder = TraceRecorder::create(path)?;
            spiral.generate_with(|visit| recorder.record(visit).map_err(SpiralError::from))?;
            recorder.finish()?;
        }
        None => spiral.generate()?,
    }

    match args.format {
        OutputFormat::Text => print!("{}", spiral.render()),
        OutputFormat::Json => println!("{}", spiral.to_json()?),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = LoggerBuilder::new()
        .level(args.log_level)
        .log_dir(args.log_path.clone())
        .target_prefix("ulam_spiral")
        .install()
    {
        eprintln!("failed to install logger: {err}");
    }

    let status = match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if log::log_enabled!(Level::Error) {
                error!("{err}");
            } else {
                eprintln!("error: {err}");
            }
            ExitCode::FAILURE
        }
    };
    log::logger().flush();
    status
}
