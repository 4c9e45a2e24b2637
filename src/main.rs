use anyhow::Result;
use clap::Parser;
use voxpipe::cli::{Cli, Commands};
use voxpipe::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    // Apply CLI overrides
    if let Some(model) = cli.model {
        config.stt.model = model;
    }
    if let Some(language) = cli.language {
        config.stt.language = language;
    }

    match cli.command {
        None => {
            voxpipe::app::run_transcribe(config).await?;
        }
        #[cfg(feature = "fetch")]
        Some(Commands::Fetch { model_dir }) => {
            let dir = model_dir.unwrap_or(config.assets.model_dir);
            if let Err(e) = voxpipe::assets::fetch_all(&dir, !cli.quiet).await {
                eprintln!("Download failed: {e}");
                std::process::exit(1);
            }
            if !cli.quiet {
                eprintln!("All assets ready under {}", dir.display());
            }
        }
        #[cfg(not(feature = "fetch"))]
        Some(Commands::Fetch { .. }) => {
            eprintln!("This binary was built without the `fetch` feature.");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/voxpipe/config.toml)
/// 3. Built-in defaults
/// Environment variables (VOXPIPE_*) override on top.
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else {
        Config::load_or_default(&Config::default_path())?
    };

    Ok(config.with_env_overrides())
}
