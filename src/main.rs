use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::info;

mod angle;
mod animation;
mod calculator;
mod config;
mod expr;
mod theme;
mod tutor;
mod ui;

use config::Config;
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "circlet")]
#[command(author, version, about = "Interactive unit circle explorer for the terminal")]
pub struct Args {
    /// Config file path
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Color theme: dark or light
    #[arg(short, long)]
    pub theme: Option<Theme>,

    /// Initial angle in degrees
    #[arg(short, long)]
    pub angle_deg: Option<f64>,

    /// Disable snapping to the 15° key-angle grid
    #[arg(long)]
    pub no_snap: bool,

    /// Snap window half-width in degrees
    #[arg(long)]
    pub snap_threshold: Option<f64>,

    /// Start with the animation running
    #[arg(short, long)]
    pub play: bool,

    /// Animation speed in radians per second
    #[arg(short, long)]
    pub speed: Option<f64>,

    /// Show the reference-angle arc on startup
    #[arg(long)]
    pub show_reference: bool,

    /// Show the symmetry points on startup
    #[arg(long)]
    pub show_symmetry: bool,

    /// Model name for the math tutor
    #[arg(long)]
    pub model: Option<String>,

    /// Write a default config file and exit
    #[arg(long)]
    pub init_config: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("circlet=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(shell) = args.completions {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "circlet", &mut std::io::stdout());
        return Ok(());
    }

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    // Load or create config, CLI flags win
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);

    info!("Starting circlet with {} theme", config.display.theme.name());

    // The tutor degrades to a disabled handle without a credential.
    let tutor = tutor::start(&config.tutor);

    ui::run(config, tutor).await
}
