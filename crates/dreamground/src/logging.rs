//! Log setup. The terminal is owned by the UI, so records go to a file in
//! the data directory.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use dreamground_config::Config;
use env_logger::{Builder, Env, Target};

const LOG_FILE: &str = "dreamground.log";

/// Install the global logger. `RUST_LOG` overrides the default `info`
/// filter. Returns the log file path, or `None` when there is no data
/// directory and logging stays off.
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    let Some(dirs) = Config::project_dirs() else {
        return Ok(None);
    };
    let dir = dirs.data_dir();
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(Some(path))
}
