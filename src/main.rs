use clap::Parser;
use dual_rasterizer::app::{run_cli, run_gui};
use dual_rasterizer::io::config::Config;
use log::info;

/// Software mesh renderer with interchangeable backends.
#[derive(Parser, Debug)]
#[command(name = "dual-rasterizer", version)]
struct Cli {
    /// Path to the TOML scene configuration.
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Render without opening a window and save a PNG.
    #[arg(long)]
    headless: bool,

    /// Number of frames to simulate in headless mode.
    #[arg(long, default_value_t = 1)]
    frames: usize,

    /// Output image path for headless mode (overrides `render.output`).
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading config file: {}", path);
            Config::load(path)?
        }
        None => {
            info!("No config file given, using the default scene.");
            Config::default()
        }
    };

    if cli.headless {
        run_cli(config, cli.frames, cli.output)
    } else {
        run_gui(config)
    }
}
