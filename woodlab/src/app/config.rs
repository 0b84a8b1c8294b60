use app_core::string_error::ErrorStringExt;
use std::{io::Read, path::PathBuf};

use crate::wood::WoodType;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the simulation server.
    pub server_url: String,
    /// One sample (and one calculation row) per entry, in this order.
    pub wood_types: Vec<WoodType>,
    pub request_timeout_secs: u64,
    /// Maximum width a plot image is shown with.
    pub plot_width: f32,
}

impl Default for Config {
    fn default() -> Self {
        let server_url = "http://127.0.0.1:5005".to_string();
        let wood_types = ["Pine", "Oak", "Plywood", "MDF"]
            .into_iter()
            .map(WoodType::from)
            .collect();
        let request_timeout_secs = 10;
        let plot_width = 400.0;

        Self {
            server_url,
            wood_types,
            request_timeout_secs,
            plot_width,
        }
    }
}

impl Config {
    pub fn from_config_file() -> Result<Self, String> {
        #[allow(deprecated)]
        let Some(home) = std::env::home_dir() else {
            return Err("could not determine home directory to load config file".into());
        };
        let config_raw = {
            let path = home.join(PathBuf::from(".woodlab"));
            let mut file = std::fs::File::open(path).err_to_string("could not open config file")?;
            let mut buf = String::new();
            file.read_to_string(&mut buf)
                .err_to_string("could not load config file")?;
            buf
        };
        Ok(Self::parse(&config_raw))
    }

    /// Reads `key=value` lines; unknown keys and invalid values leave the
    /// defaults in place.
    pub fn parse(config_raw: &str) -> Self {
        let mut config = Self::default();
        for line in config_raw.lines() {
            let line = line.trim();
            // Lines starting with "#" are considered comments.
            if line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            match (key.trim(), val.trim()) {
                ("server_url", url) => {
                    if url.starts_with("http://") || url.starts_with("https://") {
                        config.server_url = url.to_string();
                    } else {
                        log::warn!("'server_url' must start with http:// or https://")
                    }
                }
                ("wood_types", list) => {
                    let wood_types: Vec<WoodType> = list
                        .split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(WoodType::from)
                        .collect();
                    if wood_types.is_empty() {
                        log::warn!("'wood_types' is empty, keeping the default list")
                    } else {
                        config.wood_types = wood_types;
                    }
                }
                ("request_timeout_secs", secs_str) => {
                    if let Ok(secs) = secs_str.parse::<u64>() {
                        config.request_timeout_secs = secs;
                    } else {
                        log::warn!("could not parse 'request_timeout_secs' as number")
                    }
                }
                ("plot_width", width_str) => match width_str.parse::<f32>() {
                    Ok(width) if width > 0.0 => config.plot_width = width,
                    _ => log::warn!("could not parse 'plot_width' as positive number"),
                },
                _ => continue,
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = Config::parse(
            "# lab setup\n\
             server_url = http://lab.local:8080\n\
             wood_types=Oak, Teak,,Birch\n\
             request_timeout_secs=3\n\
             colour=blue\n",
        );
        assert_eq!(config.server_url, "http://lab.local:8080");
        assert_eq!(
            config.wood_types,
            vec![
                WoodType::from("Oak"),
                WoodType::from("Teak"),
                WoodType::from("Birch")
            ]
        );
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.plot_width, 400.0);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = Config::parse(
            "server_url=localhost:5005\n\
             wood_types= , \n\
             request_timeout_secs=soon\n\
             plot_width=-1\n\
             #plot_width=600\n",
        );
        assert_eq!(config, Config::default());
    }
}
