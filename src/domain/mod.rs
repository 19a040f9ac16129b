// Domain layer - Dashboard model and view state
pub mod dashboard;
pub mod view_state;
