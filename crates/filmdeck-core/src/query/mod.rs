pub mod aggregate;
pub mod controls;
pub mod engine;
pub mod filter;
pub mod guards;
pub mod metrics;
