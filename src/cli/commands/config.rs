use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use std::process::Command;

/// View or edit the configuration file.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        if *print_config {
            let config = Config::load()?;
            println!("📄 Current configuration:");
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(format!("serialize config: {e}")))?;
            println!("{}", yaml);
        }

        if *edit_config {
            let path = Config::config_file();

            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            let status = Command::new(&editor_to_use).arg(&path).status();
            match status {
                Ok(s) if s.success() => {
                    success(format!("Configuration edited with '{}'", editor_to_use));
                }
                Ok(_) | Err(_) => {
                    warning(format!(
                        "Editor '{}' not available, falling back to '{}'",
                        editor_to_use, default_editor
                    ));
                    match Command::new(&default_editor).arg(&path).status() {
                        Ok(s) if s.success() => {
                            success(format!("Configuration edited with '{}'", default_editor));
                        }
                        Ok(_) | Err(_) => {
                            error(format!(
                                "Failed to edit configuration file with '{}'",
                                default_editor
                            ));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
