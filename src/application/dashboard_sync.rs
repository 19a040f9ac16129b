// Dashboard sync - Fetch, validate and publish the dashboard view state
use crate::application::error::SyncError;
use crate::application::stats_source::StatsSource;
use crate::domain::dashboard::Dashboard;
use crate::domain::view_state::ViewState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// How a single `refresh` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A dashboard was published.
    Ready,
    /// An error state was published.
    Failed,
    /// A later refresh started before this one finished; its result was dropped.
    Superseded,
}

/// Owns the dashboard view state and runs refresh cycles against a stats source.
///
/// Overlapping refreshes are allowed. Each one takes a request id when it
/// publishes `Loading`, and only the most recently started refresh may publish
/// its terminal state.
#[derive(Clone)]
pub struct DashboardSync {
    source: Arc<dyn StatsSource>,
    state: Arc<watch::Sender<ViewState>>,
    latest_request: Arc<AtomicU64>,
}

impl DashboardSync {
    pub fn new(source: Arc<dyn StatsSource>) -> Self {
        let (state, _) = watch::channel(ViewState::Loading);
        Self {
            source,
            state: Arc::new(state),
            latest_request: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Latest published view state.
    pub fn current_state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published view state.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Run one refresh cycle. Never fails: errors end up in the view state.
    pub async fn refresh(&self) -> RefreshOutcome {
        let mut request_id = 0;
        self.state.send_modify(|state| {
            request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
            *state = ViewState::Loading;
        });
        tracing::debug!(request_id, "Refreshing dashboard");

        let (next, outcome) = match self.fetch_dashboard().await {
            Ok(dashboard) => (ViewState::Ready { dashboard }, RefreshOutcome::Ready),
            Err(err) => {
                tracing::warn!(request_id, error = %err, "Error fetching dashboard");
                let message = err.user_message();
                (ViewState::Error { message }, RefreshOutcome::Failed)
            }
        };
        let metrics = next.dashboard().map(|d| d.metrics.len());

        let published = self.state.send_if_modified(|state| {
            if self.latest_request.load(Ordering::SeqCst) != request_id {
                return false;
            }
            *state = next;
            true
        });

        if !published {
            tracing::debug!(request_id, "Dropping result of superseded refresh");
            return RefreshOutcome::Superseded;
        }
        if let Some(metrics) = metrics {
            tracing::info!(request_id, metrics, "Dashboard updated");
        }
        outcome
    }

    async fn fetch_dashboard(&self) -> Result<Dashboard, SyncError> {
        let payload = self.source.fetch_stats().await?;
        Ok(Dashboard::from_payload(payload)?)
    }
}
