//! Pipeline settings
//!
//! Settings are stored as JSON. A missing file means defaults; a file that
//! fails to parse is logged and replaced by defaults rather than aborting
//! startup.

use crate::PipelineResult;
use detectors::MutationDetectorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level pipeline settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    /// Which detector concerns are enabled
    pub detectors: DetectorSettings,
    /// Identity the display panel registers under
    pub panel: PanelIdentity,
}

impl PipelineSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detectors(mut self, detectors: DetectorSettings) -> Self {
        self.detectors = detectors;
        self
    }

    pub fn with_panel(mut self, panel: PanelIdentity) -> Self {
        self.panel = panel;
        self
    }

    /// Mutation detector configuration derived from these settings.
    pub fn mutation_config(&self) -> MutationDetectorConfig {
        MutationDetectorConfig::new()
            .with_reflow(self.detectors.reflow)
            .with_repaint(self.detectors.repaint)
            .with_large_dom_update(self.detectors.large_dom_update)
    }
}

/// Detector toggles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DetectorSettings {
    pub reflow: bool,
    pub repaint: bool,
    pub large_dom_update: bool,
    pub layout_shift: bool,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            reflow: true,
            repaint: true,
            large_dom_update: true,
            layout_shift: true,
        }
    }
}

/// Fixed identity of the developer-tools panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PanelIdentity {
    pub title: String,
    pub icon: String,
    pub page: String,
}

impl Default for PanelIdentity {
    fn default() -> Self {
        Self {
            title: "Render Flow".to_string(),
            icon: "assets/icon.png".to_string(),
            page: "panel.html".to_string(),
        }
    }
}

/// Loads and saves [`PipelineSettings`] at a fixed path.
pub struct SettingsStore {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: PipelineSettings,
}

impl SettingsStore {
    /// Create a store for the given settings file.
    pub fn new(settings_path: impl AsRef<Path>) -> Self {
        Self {
            settings_path: settings_path.as_ref().to_path_buf(),
            current: PipelineSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or fall back to defaults.
    pub async fn load(&mut self) -> PipelineResult<&PipelineSettings> {
        if tokio::fs::try_exists(&self.settings_path).await? {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            self.current = parse_or_default(&content);
        } else {
            self.current = PipelineSettings::default();
        }
        Ok(&self.current)
    }

    /// Load settings synchronously.
    pub fn load_sync(&mut self) -> PipelineResult<&PipelineSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            self.current = parse_or_default(&content);
        } else {
            self.current = PipelineSettings::default();
        }
        Ok(&self.current)
    }

    /// Save current settings synchronously.
    pub fn save_sync(&self) -> PipelineResult<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    pub fn get(&self) -> &PipelineSettings {
        &self.current
    }

    /// Replace settings and save.
    pub fn update_sync(&mut self, settings: PipelineSettings) -> PipelineResult<()> {
        self.current = settings;
        self.save_sync()
    }
}

fn parse_or_default(content: &str) -> PipelineSettings {
    match serde_json::from_str::<PipelineSettings>(content) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to parse settings file, using defaults: {}", e);
            PipelineSettings::default()
        }
    }
}
