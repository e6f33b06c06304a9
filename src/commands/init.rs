use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;
use std::path::{Path, PathBuf};

use crate::config::Config;

#[derive(ClapArgs)]
pub struct Args {
    /// Where to write the config (default: $REMEMBERED_CONFIG or ~/.config/terminator/commands.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Overwrite an existing config file
    #[arg(short, long)]
    pub force: bool,
}

pub async fn execute(args: Args) -> Result<()> {
    let path = args.config.unwrap_or_else(Config::default_config_path);

    write_example_config(&path, args.force)?;

    println!("Wrote example config to {}", path.display());
    println!("Edit the 'commands' array, then run 'remembered'.");
    Ok(())
}

pub fn write_example_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite it.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let mut content = Config::example().to_json_pretty()?;
    content.push('\n');
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}
