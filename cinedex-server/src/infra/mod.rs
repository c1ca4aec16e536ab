pub mod app_state;
pub mod cors;
pub mod envelope;
pub mod shutdown;
pub mod telemetry;
