use std::{fs::File, path::Path};

use env_logger::{Builder, Env, Target};

use crate::error::{LandscapeError, Result};

/// Sets up `env_logger`. `RUST_LOG` overrides `default_filter`. With a log
/// file every record goes there instead of stderr, which keeps the
/// alternate screen clean.
pub fn init(log_file: Option<&Path>, default_filter: &str) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));
    builder.format_timestamp_millis();
    if let Some(path) = log_file {
        let file = File::create(path).map_err(|source| LandscapeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    // A logger installed earlier (tests) wins.
    let _ = builder.try_init();
    Ok(())
}
