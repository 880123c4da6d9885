use serde::{Deserialize, Serialize};

/// Configuration from .pmlite/config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub notes: NotesConfig,
    #[serde(default)]
    pub objectives: ObjectivesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Length of the cosmetic login/submit pauses. 0 disables them.
    #[serde(default = "default_delay_ms")]
    pub simulated_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            simulated_delay_ms: default_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Number of activity entries shown on the dashboard
    #[serde(default = "default_recent_activity")]
    pub recent_activity: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            recent_activity: default_recent_activity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesConfig {
    #[serde(default = "default_tag_suggestions")]
    pub tag_suggestions: usize,
}

impl Default for NotesConfig {
    fn default() -> Self {
        NotesConfig {
            tag_suggestions: default_tag_suggestions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectivesConfig {
    #[serde(default = "default_owner")]
    pub default_owner: String,
    #[serde(default = "default_due")]
    pub default_due: String,
    /// List objectives ordered by due label
    #[serde(default)]
    pub sort_by_due: bool,
}

impl Default for ObjectivesConfig {
    fn default() -> Self {
        ObjectivesConfig {
            default_owner: default_owner(),
            default_due: default_due(),
            sort_by_due: false,
        }
    }
}

fn default_delay_ms() -> u64 {
    500
}

fn default_recent_activity() -> usize {
    10
}

fn default_tag_suggestions() -> usize {
    6
}

fn default_owner() -> String {
    "You".into()
}

fn default_due() -> String {
    "July 30".into()
}
