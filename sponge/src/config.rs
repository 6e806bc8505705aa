use std::{
    fs::{File, OpenOptions},
    io::{self, prelude::*, SeekFrom},
    path::Path,
};

use log::*;
use serde::{Deserialize, Serialize};

use crate::world::{FlatWorldConfig, LocationConfig};

/// The default location of the launcher's config file.
pub const DEFAULT_CONFIG_PATH: &str = "./sponge.json";

/// The launcher configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The maximum log level. Defaults to debug in debug builds and info otherwise.
    pub log_level: Option<LevelFilter>,
    /// The worlds to load.
    pub worlds: Vec<FlatWorldConfig>,
    /// Locations whose block and chunk are reported on startup.
    pub probes: Vec<LocationConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: None,
            worlds: vec![FlatWorldConfig::default()],
            probes: vec![LocationConfig {
                world: "overworld".to_owned(),
                x: 0.5,
                y: -61.0,
                z: 0.5,
                pitch: 0.0,
                yaw: 0.0,
            }],
        }
    }
}

/// Attempts to parse the config at the given path. The config should be in JSON format.
///
/// If the file does not exist it is created with the default config. If it exists but is not
/// valid JSON, the error is logged and the file is overwritten with the default config.
pub fn load_config(path: &Path) -> io::Result<Config> {
    if path.exists() {
        let mut file = OpenOptions::new().read(true).write(true).open(path)?;

        let mut json = String::new();
        file.read_to_string(&mut json)?;

        match serde_json::from_str(&json) {
            Ok(config) => Ok(config),
            Err(e) => {
                error!("Invalid config JSON: {}", e);
                use_default(&mut file)
            }
        }
    } else {
        info!("Config file not found, creating file");
        use_default(&mut File::create(path)?)
    }
}

fn use_default(file: &mut File) -> io::Result<Config> {
    info!("Using default configurations");

    let default = Config::default();

    file.seek(SeekFrom::Start(0))?;

    let json = serde_json::to_string_pretty(&default)?;
    let bytes = json.as_bytes();
    file.write_all(bytes)?;

    // Trim whatever was left of a longer, invalid file
    file.set_len(bytes.len() as u64)?;

    Ok(default)
}
