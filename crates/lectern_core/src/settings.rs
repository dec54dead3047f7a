//! Guild naming configuration.
//!
//! Role names and the default channel set are deployment-specific; they load
//! from an optional `lectern.toml` and `LECTERN_*` environment variables,
//! falling back to the defaults below.

use lectern_error::{SettingsError, SettingsErrorKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Names of the guild-wide roles and auto-provisioned channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildNames {
    /// Name of the guild-wide administrator role.
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
    /// Name of the faculty role.
    #[serde(default = "default_faculty_role")]
    pub faculty_role: String,
    /// Suffix appended to a course name to form its instructor role name,
    /// e.g. `CS101 Instructor`.
    #[serde(default = "default_course_admin_suffix")]
    pub course_admin_suffix: String,
    /// Channel suffixes provisioned for every new course, in creation order.
    /// The first entry is the announcement channel.
    #[serde(default = "default_channels")]
    pub default_channels: Vec<String>,
    /// Name of the channel the guide document is published to.
    #[serde(default = "default_guide_channel")]
    pub guide_channel: String,
}

impl GuildNames {
    /// Load configuration from `lectern.toml` (optional) and `LECTERN_*`
    /// environment variables, with defaults for anything unset.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("lectern").required(false))
            .add_source(config::Environment::with_prefix("LECTERN"))
            .build()
            .map_err(|e| SettingsError::new(SettingsErrorKind::Read(e.to_string())))?;

        let names: GuildNames = settings
            .try_deserialize()
            .map_err(|e| SettingsError::new(SettingsErrorKind::Parse(e.to_string())))?;

        debug!(?names, "Loaded guild naming configuration");
        Ok(names)
    }

    /// The instructor role name for a course, e.g. `CS101 Instructor`.
    pub fn instructor_role(&self, course_name: &str) -> String {
        format!("{course_name} {}", self.course_admin_suffix)
    }
}

impl Default for GuildNames {
    fn default() -> Self {
        Self {
            admin_role: default_admin_role(),
            faculty_role: default_faculty_role(),
            course_admin_suffix: default_course_admin_suffix(),
            default_channels: default_channels(),
            guide_channel: default_guide_channel(),
        }
    }
}

fn default_admin_role() -> String {
    "admin".to_string()
}

fn default_faculty_role() -> String {
    "faculty".to_string()
}

fn default_course_admin_suffix() -> String {
    "Instructor".to_string()
}

fn default_channels() -> Vec<String> {
    vec!["announcement".to_string(), "general".to_string()]
}

fn default_guide_channel() -> String {
    "guide".to_string()
}
