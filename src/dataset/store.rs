//! Whole-document load and save of the dataset file

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, WebstackError};
use crate::dataset::model::Dataset;

/// Read and parse the dataset.
///
/// A missing file is [`WebstackError::FileNotFound`]; malformed YAML is
/// [`WebstackError::Yaml`]; well-formed YAML of the wrong shape is
/// [`WebstackError::Parse`].
pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(WebstackError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let value: serde_yaml::Value = serde_yaml::from_str(&content)?;
    let dataset = Dataset::try_from(value)
        .map_err(|e| WebstackError::Parse(format!("{}: {e}", path.display())))?;

    info!(
        "Loaded {} categories, {} links from {}",
        dataset.categories.len(),
        dataset.link_count(),
        path.display()
    );
    Ok(dataset)
}

/// Serialize the whole dataset and overwrite the file.
pub fn save<P: AsRef<Path>>(path: P, dataset: &Dataset) -> Result<()> {
    let path = path.as_ref();
    let content = to_yaml(dataset)?;
    fs::write(path, content)?;
    debug!("Saved dataset to {}", path.display());
    Ok(())
}

/// Render the dataset as YAML text (non-ASCII written as-is)
pub fn to_yaml(dataset: &Dataset) -> Result<String> {
    Ok(serde_yaml::to_string(dataset)?)
}
