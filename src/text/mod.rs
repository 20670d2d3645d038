pub mod layout;
pub mod metrics;
