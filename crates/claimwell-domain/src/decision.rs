//! The terminal claim decision

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutually exclusive, exhaustive claim outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    /// All required documents present and consistent
    Approved,
    /// Documentation missing or incomplete
    Rejected,
    /// Discrepancies require a human adjuster
    PendingReview,
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            DecisionStatus::Approved => "approved",
            DecisionStatus::Rejected => "rejected",
            DecisionStatus::PendingReview => "pending_review",
        };
        f.write_str(tag)
    }
}

/// Final claim decision. Created once, terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDecision {
    /// The outcome
    pub status: DecisionStatus,

    /// Human-readable reason for the outcome
    pub reason: String,

    /// Advisory confidence in [0, 1]; not used in further logic
    #[serde(default)]
    pub confidence_score: Option<f64>,
}
