use deepenglish_config::Settings;

use crate::history::History;

/// Per-session mutable state owned by the controller
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub settings: Settings,
    pub history: History,
}

impl Session {
    pub fn new(settings: Settings, history: History) -> Self {
        Self { settings, history }
    }
}
