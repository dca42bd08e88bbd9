//! Configuration management
//!
//! Compatible with the Desktop App settings.json format:
//! ```json
//! {
//!   "app": {
//!     "identity": "local",
//!     "localUser": { "id": "...", "name": "...", "email": "..." }
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::{User, UserId};
use crate::ports::{BearerIdentity, IdentityResolver, LocalIdentity};

/// Identity resolution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityMode {
    /// Fixed local identity, credentials ignored
    Local,
    /// Decode the caller's bearer token
    Bearer,
}

impl Default for IdentityMode {
    fn default() -> Self {
        IdentityMode::Local
    }
}

impl IdentityMode {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Some(IdentityMode::Local),
            "bearer" => Some(IdentityMode::Bearer),
            _ => None,
        }
    }
}

/// Raw settings.json structure (matching the App format)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    identity: IdentityMode,
    #[serde(default)]
    local_user: Option<LocalUserSettings>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocalUserSettings {
    #[serde(default)]
    id: Option<UserId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Taskdeck configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub identity: IdentityMode,
    pub local_user: User,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identity: IdentityMode::Local,
            local_user: User::default(),
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the taskdeck directory
    ///
    /// The identity mode can be set via:
    /// 1. Settings file (`app.identity`)
    /// 2. Environment variable TASKDECK_IDENTITY (for CI/testing)
    pub fn load(taskdeck_dir: &Path) -> Result<Self> {
        let settings_path = taskdeck_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let identity = std::env::var("TASKDECK_IDENTITY")
            .ok()
            .as_deref()
            .and_then(IdentityMode::parse)
            .unwrap_or(raw.app.identity);

        let defaults = User::default();
        let local_user = match &raw.app.local_user {
            Some(settings) => User {
                id: settings.id.unwrap_or(defaults.id),
                name: settings.name.clone().unwrap_or(defaults.name),
                email: settings.email.clone().unwrap_or(defaults.email),
            },
            None => defaults,
        };

        Ok(Self {
            identity,
            local_user,
            _raw_settings: raw,
        })
    }

    /// Save config to the taskdeck directory.
    /// Preserves settings the CLI doesn't manage.
    pub fn save(&self, taskdeck_dir: &Path) -> Result<()> {
        let settings_path = taskdeck_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.app.identity = self.identity;
        settings.app.local_user = Some(LocalUserSettings {
            id: Some(self.local_user.id),
            name: Some(self.local_user.name.clone()),
            email: Some(self.local_user.email.clone()),
        });

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Build the identity resolver for the configured mode
    pub fn identity_resolver(&self) -> Box<dyn IdentityResolver> {
        match self.identity {
            IdentityMode::Local => Box::new(LocalIdentity::new(self.local_user.clone())),
            IdentityMode::Bearer => Box::new(BearerIdentity),
        }
    }
}
