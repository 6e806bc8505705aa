use log::{error, LevelFilter};
use sponge::{
    config::{load_config, DEFAULT_CONFIG_PATH},
    run,
    util::logging,
};
use std::{env, error::Error, path::Path};

const LOG_DIR: &str = "./logs";

fn main() -> Result<(), Box<dyn Error>> {
    let log_dir = Path::new(LOG_DIR);

    // Let everything through log4rs and narrow it down with the facade once the config is read
    logging::init_logger("sponge", log_dir, LevelFilter::Trace)?;
    log::set_max_level(logging::DEFAULT_LEVEL);

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_owned());
    let config = match load_config(Path::new(&config_path)) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {}", e);
            logging::cleanup(log_dir);
            return Ok(());
        }
    };

    log::set_max_level(config.log_level.unwrap_or(logging::DEFAULT_LEVEL));

    if let Err(e) = run(&config) {
        error!("Failed to load worlds: {}", e);
    }

    logging::cleanup(log_dir);

    Ok(())
}
