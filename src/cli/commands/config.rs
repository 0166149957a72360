use crate::cli::formatter::{print_success, print_tip};
use crate::core::config::{save_config, Config};
use crate::SolubenchError;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show {
        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Write the effective configuration to a new file
    Init {
        /// Destination file
        #[arg(value_name = "FILE", default_value = "solubench.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs, config: Config) -> anyhow::Result<()> {
    match args.command {
        ConfigCommands::Show { json } => {
            let rendered = if json {
                serde_json::to_string_pretty(&config)?
            } else {
                toml::to_string_pretty(&config)
                    .map_err(|e| {
                        SolubenchError::Config(format!("failed to serialize config: {}", e))
                    })?
            };
            println!("{}", rendered.trim_end());
        }
        ConfigCommands::Init { path, force } => {
            if path.exists() && !force {
                return Err(SolubenchError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ))
                .into());
            }
            save_config(&path, &config)?;
            print_success(&format!("Configuration written to {}", path.display()));
            if config.model.path.is_none() {
                print_tip("set [model] path to your trained model before running predict");
            }
        }
    }
    Ok(())
}
