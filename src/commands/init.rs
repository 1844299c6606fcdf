use anyhow::{bail, Result};
use medrag::config::Config;
use std::path::PathBuf;

const HEADER: &str = "\
# medrag configuration
#
# Secrets may also come from the environment (or a .env file):
#   GOOGLE_API_KEY  Gemini answer generation
#   OPENAI_API_KEY  OpenAI-compatible generation and embeddings
#
# Set [embedding] backend = \"http\" with an endpoint for semantic
# embeddings; the default \"hash\" backend works offline.

";

pub fn run(path: PathBuf, force: bool) -> Result<()> {
    let config_path = path.join("config.toml");
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    std::fs::create_dir_all(&path)?;
    let content = format!("{}{}", HEADER, Config::default().to_toml()?);
    std::fs::write(&config_path, content)?;
    println!("Created configuration file: {}", config_path.display());
    Ok(())
}
