//! Engine configuration shared by scheduled sweeps and chart windows.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use cheqbook_domain::DateWindow;

use crate::{error::CoreError, time::resolve_timezone};

/// User-configurable projection preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// IANA name of the timezone "today" and due-date midnights resolve in.
    #[serde(default = "EngineConfig::default_timezone")]
    pub timezone: String,
    /// Days of context projected before a requested chart month.
    #[serde(default = "EngineConfig::default_buffer_days")]
    pub leading_buffer_days: u32,
    /// Days of context projected after a requested chart month.
    #[serde(default = "EngineConfig::default_buffer_days")]
    pub trailing_buffer_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: Self::default_timezone(),
            leading_buffer_days: Self::default_buffer_days(),
            trailing_buffer_days: Self::default_buffer_days(),
        }
    }
}

impl EngineConfig {
    fn default_timezone() -> String {
        "UTC".into()
    }

    fn default_buffer_days() -> u32 {
        5
    }

    pub fn resolve_timezone(&self) -> Result<Tz, CoreError> {
        resolve_timezone(&self.timezone)
    }

    /// The buffered month window charted around `reference`.
    pub fn chart_window_for(&self, reference: NaiveDate) -> DateWindow {
        DateWindow::month_of(
            reference,
            self.leading_buffer_days,
            self.trailing_buffer_days,
        )
    }
}
