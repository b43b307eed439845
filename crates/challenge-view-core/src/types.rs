//! Display types shared between the deriver and rendering clients

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Coarse challenge status driving display policy.
///
/// The raw status field is an open set; anything that is not active or
/// completed is handled generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Active,
    Completed,
    Other,
}

impl StatusKind {
    /// Case-insensitive read of the raw status string.
    pub fn from_raw(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "active" => StatusKind::Active,
            "completed" => StatusKind::Completed,
            _ => StatusKind::Other,
        }
    }
}

/// Supplementary prize classification. At most one bonus is ever shown and
/// a checkpoint pool always beats the reliability bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Bonus {
    None,
    Checkpoint { amount: f64, count: usize },
    Reliability { amount: f64 },
}

/// Status-driven headline shown above the countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeadlineMessage {
    /// "Next Deadline: {phase}", with a dash when no phase qualifies.
    NextDeadline { phase: String },
    /// The challenge is finished.
    Finished,
    /// "Status: {label}" for any other status, human-cased.
    Status { label: String },
}

/// The selected next deadline and its rendered countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextDeadline {
    pub phase_name: Option<String>,
    /// Countdown label, unit pair picked by magnitude ("3d 7h", "5h 42min",
    /// "12min 30s").
    pub time_left_label: String,
    pub message: DeadlineMessage,
}

/// One row of the expandable deadlines panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Phase id; -1 marks the synthetic results milestone.
    pub id: i64,
    pub phase_type: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub scheduled_end_date: Option<OffsetDateTime>,
}

impl TimelineEntry {
    /// Synthetic "Winners" milestone injected by the timeline builder. Not
    /// present in raw data.
    pub fn winners(scheduled_end_date: OffsetDateTime) -> Self {
        Self {
            id: -1,
            phase_type: "Winners".to_string(),
            scheduled_end_date: Some(scheduled_end_date),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.id == -1
    }
}

/// Registration/submission gating derived for the viewing user.
///
/// The `can_*` flags are surfaced for the caller to gate its actions; the
/// core only evaluates them, it never performs the actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub registration_closed: bool,
    pub submission_closed: bool,
    pub is_legacy_match: bool,
    pub has_existing_submissions: bool,
    pub can_register: bool,
    pub can_unregister: bool,
    pub can_submit: bool,
    pub can_view_submissions: bool,
}

/// Caller-owned view state threaded into each derivation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewFlags {
    pub has_registered: bool,
    /// A register request is in flight.
    pub registering: bool,
    /// An unregister request is in flight.
    pub unregistering: bool,
    pub submission_ended: bool,
    /// The deadlines panel is expanded; the relevant-phase timeline is only
    /// computed while this is set.
    pub show_deadline_detail: bool,
    /// Injected clock, read once per derivation so every relative
    /// computation agrees on the same instant.
    #[serde(with = "time::serde::rfc3339")]
    pub now: OffsetDateTime,
}

/// Everything the header renderer needs, recomputed from scratch on every
/// call. Never persisted, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeView {
    pub track_label: String,
    pub normalized_tags: Vec<String>,
    /// Uppercased event names for the tag strip.
    pub event_names: Vec<String>,
    /// Ordered prize values of the first prize pool.
    pub prizes: Vec<f64>,
    /// Digital-run points, when the challenge awards them.
    pub dr_points: Option<f64>,
    pub bonus: Bonus,
    pub next_deadline: NextDeadline,
    /// Filtered, ordered phases for the deadlines panel; empty while the
    /// panel is collapsed.
    pub relevant_phases: Vec<TimelineEntry>,
    pub eligibility: Eligibility,
}
