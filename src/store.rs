use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;

pub fn config_file_path() -> PathBuf {
    data_dir().join("config.yaml")
}

pub fn data_dir() -> PathBuf {
    let project_dirs = directories::ProjectDirs::from("com", "cmdbot", "cmdbot")
        .expect("Cannot retrieve project dirs");
    project_dirs.data_dir().to_owned()
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_file_path())
}

/// Loads config from `path`, creating the file with defaults when absent.
pub fn load_config_from(path: &Path) -> Result<Config> {
    info!("Config file: {}", path.to_string_lossy());
    if !path.exists() {
        info!("Config file does not exist, creating.");
        store_config_to(path, &Config::default())?;
    }
    let config_file = File::open(path)
        .with_context(|| format!("Cannot open {}", path.to_string_lossy()))?;
    let config: Config = serde_yaml::from_reader(config_file)
        .with_context(|| format!("Cannot parse {}", path.to_string_lossy()))?;
    config.validate()?;
    Ok(config)
}

pub fn store_config_to(path: &Path, config: &Config) -> Result<()> {
    debug!("Storing config {:?}", config);
    ensure_dir_created(path)?;
    store_file_with_backup(path, config)
}

fn store_file_with_backup<T>(path: &Path, data: &T) -> Result<()>
where
    T: Serialize + DeserializeOwned + PartialEq,
{
    let orig = if path.is_file() {
        let orig_file = File::open(path)?;
        // An unreadable file gets backed up and replaced
        serde_yaml::from_reader::<_, T>(orig_file).ok()
    } else {
        None
    };
    if orig.as_ref() == Some(data) {
        return Ok(());
    }
    if path.is_file() {
        let orig_filename = path
            .file_name()
            .map(OsStr::to_string_lossy)
            .unwrap_or_default();
        let backup_path = path.with_file_name(format!("{}{}", orig_filename, ".bak"));
        std::fs::rename(path, backup_path)?;
    }
    let out_file = File::create(path)?;
    serde_yaml::to_writer(out_file, data)?;
    Ok(())
}

fn ensure_dir_created(path: &Path) -> Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create {}", &dir.to_string_lossy()))?;
    }
    Ok(())
}
