use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::view::filter::FilterMode;

/// Feature toggles and defaults for a table view
///
/// Every section falls back to its defaults, so a partial TOML file (or none
/// at all) always yields a working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub pagination: PaginationOptions,
    pub filtering: FilterOptions,
    pub sorting: SortOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationOptions {
    /// When disabled, the whole filtered collection is a single page
    pub enabled: bool,

    /// Initial rows per page
    pub page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// When disabled, filter transitions are no-ops
    pub enabled: bool,

    /// How the global pattern is interpreted
    pub mode: FilterMode,

    /// Minimum fuzzy score a row must beat in fuzzy mode
    pub fuzzy_threshold: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    /// When disabled, sort transitions are no-ops
    pub enabled: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            pagination: PaginationOptions::default(),
            filtering: FilterOptions::default(),
            sorting: SortOptions::default(),
        }
    }
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            page_size: 10,
        }
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: FilterMode::Substring,
            fuzzy_threshold: 0,
        }
    }
}

impl Default for SortOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ViewOptions {
    /// Convenience constructor for a view without pagination
    pub fn unpaginated() -> Self {
        let mut options = Self::default();
        options.pagination.enabled = false;
        options
    }

    /// Convenience constructor overriding the page size
    pub fn with_page_size(page_size: usize) -> Self {
        let mut options = Self::default();
        options.pagination.page_size = page_size;
        options
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options from {}", path.display()))?;
        let options: ViewOptions = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse options from {}", path.display()))?;
        Ok(options)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self).context("Failed to serialize options")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write options to {}", path.display()))?;
        Ok(())
    }
}
