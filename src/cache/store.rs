use anyhow::{Context, Result};
use log::{debug, info};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// File cache for schedule feeds.
///
/// `raw/` keeps each month's feed exactly as fetched; `parsed/` keeps
/// derived data such as the combined season schedule.
pub struct Cache {
    raw_dir: PathBuf,
    parsed_dir: PathBuf,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        let raw_dir = cache_dir.join("raw");
        let parsed_dir = cache_dir.join("parsed");

        fs::create_dir_all(&raw_dir).context("Failed to create raw cache directory")?;
        fs::create_dir_all(&parsed_dir).context("Failed to create parsed cache directory")?;

        Ok(Self {
            raw_dir,
            parsed_dir,
        })
    }

    pub fn save_raw(&self, key: &str, data: &Value) -> Result<()> {
        let path = self.raw_dir.join(format!("{}.json", key));
        write_json(&path, data)?;
        debug!("Saved raw feed to cache: {}", path.display());
        Ok(())
    }

    pub fn load_raw(&self, key: &str) -> Result<Option<Value>> {
        read_json_opt(&self.raw_dir.join(format!("{}.json", key)))
    }

    pub fn save_parsed<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let path = self.parsed_dir.join(format!("{}.json", key));
        write_json(&path, data)?;
        info!("Saved parsed data to cache: {}", path.display());
        Ok(())
    }

    pub fn load_parsed<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        read_json_opt(&self.parsed_dir.join(format!("{}.json", key)))
    }
}

pub fn remove_cache_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove cache directory {}", path.display()))?;
        info!("Deleted cache directory: {}", path.display());
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize cache data")?;
    fs::write(path, json).with_context(|| format!("Failed to write cache file {}", path.display()))
}

fn read_json_opt<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cache file {}", path.display()))?;
    let data = serde_json::from_str(&json).with_context(|| {
        format!(
            "Failed to parse JSON from {:?}. First 200 chars: {}",
            path,
            json.chars().take(200).collect::<String>()
        )
    })?;

    Ok(Some(data))
}
