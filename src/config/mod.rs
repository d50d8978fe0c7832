use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Wall-clock time after which today's breakfast-class fields become
    /// read-only ("HH:MM"). Supper is never subject to this lock.
    #[serde(default = "default_cutoff")]
    pub breakfast_cutoff: String,
    /// How many unconfirmed resident ids to print in `report` output before
    /// eliding with a count (the JSON output always carries the full set).
    #[serde(default = "default_unconfirmed_display")]
    pub unconfirmed_display_limit: usize,
}

fn default_cutoff() -> String {
    "08:00".to_string()
}

fn default_unconfirmed_display() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            breakfast_cutoff: default_cutoff(),
            unconfirmed_display_limit: default_unconfirmed_display(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform.
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            appdata.join("mealwarden")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".mealwarden")
        }
    }

    /// Return the full path of the config file.
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("mealwarden.conf")
    }

    /// Return the full path of the SQLite database.
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("mealwarden.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| AppError::Config(format!("failed to read {}: {e}", path.display())))?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("failed to parse {}: {e}", path.display())))
        } else {
            Ok(Config::default())
        }
    }

    /// Parsed cutoff time-of-day.
    pub fn cutoff_time(&self) -> AppResult<NaiveTime> {
        NaiveTime::parse_from_str(&self.breakfast_cutoff, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&self.breakfast_cutoff, "%H:%M:%S"))
            .map_err(|_| AppError::InvalidTime(self.breakfast_cutoff.clone()))
    }

    /// Initialize configuration and database files.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB path: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            breakfast_cutoff: default_cutoff(),
            unconfirmed_display_limit: default_unconfirmed_display(),
        };

        // Test runs point at throwaway databases; do not clobber the real
        // config file for those.
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(format!("serialize config: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if !db_path.exists() {
            if let Some(parent) = db_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cutoff_is_eight_am() {
        let cfg = Config::default();
        assert_eq!(
            cfg.cutoff_time().unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
    }

    #[test]
    fn bad_cutoff_is_a_config_error() {
        let cfg = Config {
            breakfast_cutoff: "8 o'clock".into(),
            ..Config::default()
        };
        assert!(cfg.cutoff_time().is_err());
    }

    #[test]
    fn cutoff_accepts_seconds() {
        let cfg = Config {
            breakfast_cutoff: "07:30:15".into(),
            ..Config::default()
        };
        assert_eq!(
            cfg.cutoff_time().unwrap(),
            NaiveTime::from_hms_opt(7, 30, 15).unwrap()
        );
    }
}
