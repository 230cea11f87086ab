// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project and settings serialization.
//!
//! Both file kinds are YAML or JSON, chosen by file extension.

use crate::models::project::ProjectData;
use crate::models::settings::Settings;
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Supported on-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => bail!("Unsupported file extension: {:?}", extension),
        }
    }
}

fn write<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let text = match Format::from_path(path)? {
        Format::Yaml => serde_yaml::to_string(value)?,
        Format::Json => serde_json::to_string_pretty(value)?,
    };
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = match format {
        Format::Yaml => serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse YAML {}", path.display()))?,
        Format::Json => serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON {}", path.display()))?,
    };
    Ok(value)
}

/// Export project data to YAML or JSON.
pub fn export_project(data: &ProjectData, path: &Path) -> Result<()> {
    write(data, path)?;
    log::info!(
        "Exported {} source(s) and {} bookmark(s) to {}",
        data.sources.len(),
        data.bookmarks.len(),
        path.display()
    );
    Ok(())
}

/// Import project data from YAML or JSON.
pub fn import_project(path: &Path) -> Result<ProjectData> {
    let data: ProjectData = read(path)?;
    log::info!(
        "Imported {} source(s) and {} bookmark(s) from {}",
        data.sources.len(),
        data.bookmarks.len(),
        path.display()
    );
    Ok(data)
}

/// Import settings. Missing fields take their defaults.
pub fn import_settings(path: &Path) -> Result<Settings> {
    read(path)
}

pub fn export_settings(settings: &Settings, path: &Path) -> Result<()> {
    write(settings, path)
}
