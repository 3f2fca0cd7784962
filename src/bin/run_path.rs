use std::{error::Error, fs::File, io, path::PathBuf};

use clap::Parser;
use log::{info, warn};
use pathsim::{
    chart::{Tick, Viewport},
    config::setup::SetupConfig,
    dynamics::run,
    path::{Path, PathPoint},
    units::mps_to_mph,
};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Debug, clap::Parser)]
#[command(name = "pathsim_run", about = "Sample a vehicle path and write it out")]
pub struct RunCli {
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "csv")]
    format: Format,

    #[arg(long = "print")]
    pub print: bool,
}

#[derive(serde::Serialize)]
struct PathRecord {
    step: usize,
    time: f64,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    speed_mps: f64,
    speed_mph: f64,
    heading: f64,
}

impl From<&PathPoint> for PathRecord {
    fn from(p: &PathPoint) -> Self {
        PathRecord {
            step: p.step,
            time: p.time,
            x: p.position.x,
            y: p.position.y,
            vx: p.velocity.x,
            vy: p.velocity.y,
            speed_mps: p.speed(),
            speed_mph: mps_to_mph(p.speed()),
            heading: p.heading(),
        }
    }
}

#[derive(serde::Serialize)]
struct PathOutput<'a> {
    path: &'a Path,
    time_ticks: Vec<Tick>,
}

fn write_csv<W: io::Write>(writer: W, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_writer(writer);
    for p in path.points() {
        wtr.serialize(PathRecord::from(p))?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json<W: io::Write>(writer: W, setup: &SetupConfig, path: &Path) -> Result<(), Box<dyn Error>> {
    let output = PathOutput {
        path,
        time_ticks: setup.ticks.ticks(0.0, path.duration()),
    };
    serde_json::to_writer_pretty(writer, &output)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = RunCli::parse();

    let setup = match &args.config {
        Some(config_path) => {
            info!("Reading setup from {}", config_path.display());
            SetupConfig::parse(config_path)?
        }
        None => {
            info!("No config given, using defaults");
            SetupConfig::default()
        }
    };
    if args.print {
        setup.print();
    }

    let path = run(&setup);

    let n_outside = Viewport::from_setup(&setup).points_outside(&path);
    if n_outside > 0 {
        warn!("{} of {} points lie outside the viewport", n_outside, path.len());
    }

    let writer: Box<dyn io::Write> = match &args.output {
        Some(output_path) => Box::new(File::create(output_path)?),
        None => Box::new(io::stdout().lock()),
    };
    match args.format {
        Format::Csv => write_csv(writer, &path)?,
        Format::Json => write_json(writer, &setup, &path)?,
    }
    info!("Done!");
    Ok(())
}
