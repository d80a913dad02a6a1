//! Topic compilation and the contract bridge to the external decision engine.

pub mod bridge;
pub mod catalog;
pub mod config;
pub mod contract;
pub mod diff;
pub mod error;
pub mod render;
pub mod telemetry;
pub mod topics;
pub mod verify;

pub use bridge::DecisionBridge;
pub use error::AppError;
