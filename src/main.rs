//! turnkit CLI - rotary turning toolpaths from a profile image

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use turnkit::{init_logging, load_profile, Config, SbpJob, TurningMachine};

#[derive(Parser)]
#[command(name = "turnkit", version)]
#[command(about = "Rotary (4th axis) turning toolpaths from a cross-section profile", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the OpenSBP program for a profile
    Toolpath {
        /// Profile image, or demo:<name> (helix, twist, square, corkscrew, disk)
        profile: String,
        /// Job config (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output program (default: the config's output directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the job description as JSON next to the program
        #[arg(long)]
        job: bool,
    },
    /// Extract the achievable contour of a profile
    Contour {
        /// Profile image, or demo:<name>
        profile: String,
        /// Job config (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output JSON file for the contour points
        #[arg(short, long, default_value = "boundary.json")]
        output: PathBuf,
        /// Write the as-cut cross section as an image
        #[arg(long)]
        render: Option<PathBuf>,
    },
    /// Write a default config file
    Config {
        /// Destination (.toml or .json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    info!("turnkit {} (built {})", turnkit::VERSION, turnkit::BUILD_DATE);

    match cli.command {
        Commands::Toolpath {
            profile,
            config,
            output,
            job,
        } => toolpath(&profile, config.as_deref(), output, job),
        Commands::Contour {
            profile,
            config,
            output,
            render,
        } => contour(&profile, config.as_deref(), &output, render.as_deref()),
        Commands::Config { output } => write_default_config(output),
    }
}

fn prepare(profile: &str, config_path: Option<&Path>) -> Result<(Config, TurningMachine)> {
    let config = Config::load_or_default(config_path).context("Failed to load config")?;
    let bitmap = load_profile(profile, config.turning.opacity_threshold)
        .with_context(|| format!("Failed to load profile '{}'", profile))?;
    let machine = TurningMachine::new(bitmap, config.turning.clone())
        .with_context(|| format!("Failed to prepare toolpath for '{}'", profile))?;
    Ok((config, machine))
}

fn toolpath(
    profile: &str,
    config_path: Option<&Path>,
    output: Option<PathBuf>,
    write_job: bool,
) -> Result<()> {
    let (config, machine) = prepare(profile, config_path)?;
    let program = machine.post_sbp()?;
    if !program.is_complete() {
        warn!("Program is incomplete; passes stop before the full revolution");
    }

    let output = output.unwrap_or_else(|| config.output.program_path());
    program
        .write_to_file(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {} lines to {}", program.len(), output.display());

    if write_job {
        let job_path = output.with_extension("json");
        let json = serde_json::to_string_pretty(&SbpJob::new(&program))?;
        std::fs::write(&job_path, json)
            .with_context(|| format!("Failed to write {}", job_path.display()))?;
        println!("Wrote job description to {}", job_path.display());
    }
    Ok(())
}

fn contour(
    profile: &str,
    config_path: Option<&Path>,
    output: &Path,
    render: Option<&Path>,
) -> Result<()> {
    let (_, machine) = prepare(profile, config_path)?;

    if let Some(render_path) = render {
        machine
            .render()?
            .image()
            .save(render_path)
            .with_context(|| format!("Failed to write {}", render_path.display()))?;
        println!("Wrote as-cut cross section to {}", render_path.display());
    }

    let boundary = machine.boundary()?;
    let json = serde_json::to_string_pretty(&boundary)?;
    std::fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Wrote {} contour points to {}",
        boundary.points.len(),
        output.display()
    );
    Ok(())
}

fn write_default_config(output: Option<PathBuf>) -> Result<()> {
    let path = match output {
        Some(path) => path,
        None => Config::default_path().context("No config directory on this platform")?,
    };
    Config::default()
        .save_to_file(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
