use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use relm4::prelude::*;
use std::path::PathBuf;
use valentine::config;
use valentine::gui::app::{AppInit, AppModel};
use valentine::sys::runtime;

#[derive(Parser, Debug)]
#[command(name = "valentine", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Seed for confetti, fireflies and the evasive button
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding the numbered photos (overrides the config)
    #[arg(long)]
    photos: Option<PathBuf>,

    /// Path to the config file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Write the default config file and exit.
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => config::resolve_config_path(&path)?,
        None => config::get_config_path()?,
    };

    if let Some(Commands::InitConfig) = cli.command {
        let path = config::write_default_config(&config_path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = config::load_or_default(&config_path);
    if let Some(dir) = cli.photos {
        config.gallery.dir = dir;
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config_path.clone());

    // GTK must not see our own flags
    let app = RelmApp::new("org.troia.valentine").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        config_path,
        rng,
        rx,
    });
    Ok(())
}
