pub mod candidates;
pub mod dashboard;
pub mod load_state;
pub mod payments;
pub mod workspace;
