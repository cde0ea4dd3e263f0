//! Core error types

use thiserror::Error;

/// Errors raised by the game core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("could not place {feature} after {attempts} attempts")]
    PlacementExhausted { feature: &'static str, attempts: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
