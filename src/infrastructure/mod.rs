pub mod backends;
pub mod log_sinks;
