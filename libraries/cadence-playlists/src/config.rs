/// Registry configuration
use cadence_core::{is_blank, CadenceError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where a new playlist's list-view search filter comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPolicy {
    /// Copy the pool's search filter
    Global,
    /// Copy the first existing playlist's search filter
    Partial,
    /// Start with an empty search filter
    #[default]
    Individual,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RegistrySettings {
    #[serde(default)]
    pub search_policy: SearchPolicy,

    /// Signed-in user; playlists owned by anyone else are read-only
    #[serde(default)]
    pub current_user_id: Option<u32>,

    #[serde(default = "default_playlist_name")]
    pub default_playlist_name: String,

    /// Label of the "new playlist" entry, never accepted as a name
    #[serde(default = "default_create_new_label")]
    pub create_new_label: String,

    #[serde(default = "default_navigation")]
    pub default_navigation: String,

    #[serde(default = "default_navigation")]
    pub active_navigation: String,

    #[serde(default = "default_navigation")]
    pub selected_navigation: String,
}

impl RegistrySettings {
    /// Load settings from an optional TOML file and the environment
    ///
    /// Environment variables use the `CADENCE_` prefix, e.g.
    /// `CADENCE_SEARCH_POLICY=global`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(CadenceError::Config(format!(
                    "settings file {} does not exist",
                    path.display()
                )));
            }
            settings = settings.add_source(config::File::from(path.to_path_buf()));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CadenceError::Config(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| CadenceError::Config(e.to_string()))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.default_playlist_name) {
            return Err(CadenceError::Config(
                "default_playlist_name cannot be blank".to_string(),
            ));
        }

        if is_blank(&self.create_new_label) {
            return Err(CadenceError::Config(
                "create_new_label cannot be blank".to_string(),
            ));
        }

        if is_blank(&self.default_navigation) {
            return Err(CadenceError::Config(
                "default_navigation cannot be blank".to_string(),
            ));
        }

        if self
            .default_playlist_name
            .eq_ignore_ascii_case(&self.create_new_label)
        {
            return Err(CadenceError::Config(
                "default_playlist_name cannot be the create-new label".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether `name` is the reserved "new playlist" label
    pub fn is_reserved_name(&self, name: &str) -> bool {
        name.to_lowercase() == self.create_new_label.to_lowercase()
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            search_policy: SearchPolicy::default(),
            current_user_id: None,
            default_playlist_name: default_playlist_name(),
            create_new_label: default_create_new_label(),
            default_navigation: default_navigation(),
            active_navigation: default_navigation(),
            selected_navigation: default_navigation(),
        }
    }
}

fn default_playlist_name() -> String {
    "Playlist".to_string()
}

fn default_create_new_label() -> String {
    "Create new".to_string()
}

fn default_navigation() -> String {
    "Files".to_string()
}
