use thiserror::Error;

use crate::level::{Level, StylePickRule};

/// Everything the engine can refuse to do.
///
/// The engine has no IO, so every variant is a caller-side precondition
/// violation: a bad style selection, a manifest that cannot produce a
/// comparison, or an operation called out of order.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TasteError {
    // ── Invalid configuration ───────────────────────────────────────────
    #[error("no styles selected")]
    EmptySelection,

    #[error("unknown style \"{0}\"")]
    UnknownStyle(String),

    #[error("style \"{0}\" listed more than once")]
    DuplicateStyle(String),

    #[error("image \"{path}\" in style \"{style}\" has invalid quiz weight {weight}")]
    InvalidWeight {
        style: String,
        path: String,
        weight: f64,
    },

    #[error("raw score for style \"{0}\" is not finite")]
    NonFiniteScore(String),

    #[error("{level} requires {rule}, got {got}")]
    SelectionRule {
        level: Level,
        rule: StylePickRule,
        got: usize,
    },

    // ── Sampling impossibility ──────────────────────────────────────────
    #[error("style \"{0}\" has no images")]
    NoImages(String),

    // ── Out-of-order operation ──────────────────────────────────────────
    #[error("no pair has been sampled")]
    NoActivePair,

    #[error("session is already complete")]
    SessionComplete,

    #[error("session still in progress ({answered}/{target} answered)")]
    SessionInProgress { answered: usize, target: usize },

    #[error("{level} cannot finish early after {answered} answers")]
    EarlyFinishUnavailable { level: Level, answered: usize },
}
