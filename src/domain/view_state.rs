// View state published by the dashboard sync
use super::dashboard::Dashboard;

/// Single source of truth for what the dashboard shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Loading,
    Error { message: String },
    Ready { dashboard: Dashboard },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            ViewState::Ready { dashboard } => Some(dashboard),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error { message } => Some(message),
            _ => None,
        }
    }
}
