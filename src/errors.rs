//! Error taxonomy for grammar construction, expansion and rendering.
use thiserror::Error;

/// A malformed grammar or render setup. Detected eagerly, before any
/// expansion or drawing happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("rule set for symbol '{0}' has no alternatives")]
    EmptyRuleSet(char),

    #[error("rule for symbol '{symbol}' has invalid odds {odds}")]
    InvalidOdds { symbol: char, odds: f64 },

    #[error("odds for symbol '{0}' add up to more than f64 can hold")]
    OddsOverflow(char),

    #[error("all odds for symbol '{0}' are zero")]
    ZeroOdds(char),

    #[error("color symbol '{symbol}' used in {location} is missing from the color table")]
    UnresolvedColor { symbol: char, location: String },

    #[error("symbol '{0}' cannot be a forward symbol, it already has a structural meaning")]
    SymbolCollision(char),

    #[error("reduction factor must be finite and > 0, got {0}")]
    InvalidReduction(f64),

    #[error("segment length must be finite, got {0}")]
    InvalidLength(f64),

    #[error("starting position ({x}, {y}) and heading {heading} must be finite")]
    InvalidPose { x: f64, y: f64, heading: f64 },
}

/// An imbalance found while interpreting an expanded string. Never fatal,
/// the renderer records it and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("unbalanced branch close at index {index}")]
    UnbalancedClose { index: usize },

    #[error("branch open at index {index} exceeds max depth {limit}")]
    DepthLimit { index: usize, limit: usize },
}

/// Expansion grew past the configured ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expansion reached length {length} in generation {generation}, limit is {limit}")]
pub struct ResourceLimitError {
    pub generation: u32,
    pub length: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LSystemError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    ResourceLimit(#[from] ResourceLimitError),
}
