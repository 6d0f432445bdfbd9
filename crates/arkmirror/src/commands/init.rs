//! Init command - write a default arkmirror.toml

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write the configuration to (default: current)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

const HEADER: &str = "# arkmirror configuration\n# Every key is optional; missing keys take the values below.\n\n";

pub fn run(args: InitArgs, format: OutputFormat) -> Result<()> {
    fs::create_dir_all(&args.path)
        .with_context(|| format!("cannot create {}", args.path.display()))?;
    let config_path = args.path.join(CONFIG_FILE);

    let created = if config_path.exists() && !args.force {
        false
    } else {
        let body = Config::default().to_toml_string()?;
        fs::write(&config_path, format!("{}{}", HEADER, body))
            .with_context(|| format!("cannot write {}", config_path.display()))?;
        true
    };

    match format {
        OutputFormat::Text => {
            if created {
                println!("Created {}", config_path.display());
            } else {
                println!(
                    "Skipped {} (already exists, use --force to overwrite)",
                    config_path.display()
                );
            }
        }
        OutputFormat::Json => {
            let result = serde_json::json!({
                "success": true,
                "created": created,
                "path": config_path.to_string_lossy(),
            });
            println!("{}", serde_json::to_string(&result)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, OutputFormat::Json).unwrap();
        let config = Config::from_file(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_keeps_existing_file_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[pipeline]\noverload_linking = false\n").unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, OutputFormat::Json).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert!(!config.pipeline.overload_linking);
    }
}
