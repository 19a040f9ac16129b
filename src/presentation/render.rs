// Rendering of the view state for the terminal
use crate::domain::dashboard::{format_number, Dashboard};
use crate::domain::view_state::ViewState;
use std::fmt;

pub const LOADING_TEXT: &str = "Loading Dashboard...";
pub const NO_METRICS_TEXT: &str = "No metrics available";

/// User action offered by the current view. Both run the same refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Retry,
    RefreshData,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Retry => "Retry",
            Action::RefreshData => "Refresh Data",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub key: String,
    pub name: String,
    pub value: String,
}

/// Dashboard fields with fallbacks already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub title: String,
    pub server_status: String,
    pub active_users: String,
    pub last_updated: String,
    pub metrics: Vec<MetricRow>,
}

impl DashboardView {
    pub fn from_dashboard(dashboard: &Dashboard) -> Self {
        let metrics = dashboard
            .metrics
            .iter()
            .enumerate()
            .map(|(index, metric)| MetricRow {
                key: metric.display_key(index),
                name: metric.name.clone().unwrap_or_else(|| "Metric".to_string()),
                value: metric
                    .value
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "-".to_string()),
            })
            .collect();

        Self {
            title: dashboard.title.clone().unwrap_or_else(|| "Dashboard".to_string()),
            server_status: dashboard
                .server_status
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            // Absent and zero both show 0.
            active_users: dashboard
                .active_users
                .as_ref()
                .map(format_number)
                .unwrap_or_else(|| "0".to_string()),
            last_updated: dashboard.last_updated.clone().unwrap_or_else(|| "-".to_string()),
            metrics,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedView {
    Loading,
    Error { message: String },
    Ready { view: DashboardView },
}

impl RenderedView {
    pub fn from_state(state: &ViewState) -> Self {
        match state {
            ViewState::Loading => RenderedView::Loading,
            ViewState::Error { message } => RenderedView::Error {
                message: message.clone(),
            },
            ViewState::Ready { dashboard } => RenderedView::Ready {
                view: DashboardView::from_dashboard(dashboard),
            },
        }
    }

    /// Action the user can trigger from this view, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            RenderedView::Loading => None,
            RenderedView::Error { .. } => Some(Action::Retry),
            RenderedView::Ready { .. } => Some(Action::RefreshData),
        }
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedView::Loading => writeln!(f, "{}", LOADING_TEXT)?,
            RenderedView::Error { message } => writeln!(f, "Error: {}", message)?,
            RenderedView::Ready { view } => {
                writeln!(f, "{}", view.title)?;
                writeln!(f, "{}", "=".repeat(view.title.chars().count().max(1)))?;
                writeln!(f, "Status: {}", view.server_status)?;
                writeln!(f, "Active Users: {}", view.active_users)?;
                writeln!(f)?;
                writeln!(f, "Live Metrics")?;
                if view.metrics.is_empty() {
                    writeln!(f, "  {}", NO_METRICS_TEXT)?;
                }
                for row in &view.metrics {
                    writeln!(f, "  {}: {}", row.name, row.value)?;
                }
                writeln!(f)?;
                writeln!(f, "Last Updated: {}", view.last_updated)?;
            }
        }

        if let Some(action) = self.action() {
            writeln!(f)?;
            writeln!(f, "[r] {}  [q] Quit", action.label())?;
        }
        Ok(())
    }
}
