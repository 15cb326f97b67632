pub mod candidate;
pub mod payment;
pub mod session;
