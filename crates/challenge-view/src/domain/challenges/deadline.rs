//! Next-deadline selection and countdown formatting.

use challenge_view_core::{DeadlineMessage, NextDeadline, StatusKind, ViewFlags};
use log::debug;
use time::{Duration, OffsetDateTime};

use super::{Challenge, Phase, REGISTRATION_PHASE};

const HOUR: Duration = Duration::hours(1);
const DAY: Duration = Duration::hours(24);

/// Pick the next deadline phase and render its countdown.
///
/// The message is driven by the raw status string alone; the countdown is
/// driven by the selected phase alone. The two never feed each other.
pub fn select_next_deadline(challenge: &Challenge, flags: &ViewFlags) -> NextDeadline {
    let next = next_phase(&challenge.phases, flags.has_registered);
    debug!(
        "challenge {} next deadline phase: {:?}",
        challenge.id,
        next.map(|phase| phase.name.as_str())
    );

    let time_left = next
        .and_then(|phase| phase.scheduled_end_date)
        .map(|end| (end - flags.now).max(Duration::ZERO))
        .unwrap_or(Duration::ZERO);

    let phase_name = next.map(|phase| phase.name.clone());

    let message = match challenge.status_kind() {
        StatusKind::Active => DeadlineMessage::NextDeadline {
            phase: phase_name.clone().unwrap_or_else(|| "-".to_string()),
        },
        StatusKind::Completed => DeadlineMessage::Finished,
        StatusKind::Other => DeadlineMessage::Status {
            label: human_case(&challenge.status),
        },
    };

    NextDeadline {
        phase_name,
        time_left_label: format_time_left(time_left),
        message,
    }
}

/// The earliest-ending open phase other than registration.
///
/// Legacy-compatibility rule kept verbatim from the original display code:
/// when the user has registered and the phase at raw position 0 is the
/// registration phase, the raw phase at position 1 is selected instead —
/// a positional check that overrides the sorted pick entirely.
fn next_phase(phases: &[Phase], has_registered: bool) -> Option<&Phase> {
    let mut open: Vec<&Phase> = phases
        .iter()
        .filter(|phase| phase.name != REGISTRATION_PHASE && phase.is_open)
        .collect();
    open.sort_by_key(|phase| phase.scheduled_end_date);

    let mut next = open.first().copied();
    if has_registered && phases.first().map(|p| p.name.as_str()) == Some(REGISTRATION_PHASE) {
        next = phases.get(1);
    }
    next
}

/// Render remaining time in the unit pair for its magnitude: days and hours
/// above a day, hours and minutes above an hour, minutes and seconds below.
/// Thresholds are strict, so exactly 24h renders as "24h 0min".
pub fn format_time_left(time_left: Duration) -> String {
    let clamped = time_left.max(Duration::ZERO);
    let total_seconds = clamped.whole_seconds();
    if clamped > DAY {
        format!(
            "{}d {}h",
            total_seconds / 86_400,
            (total_seconds % 86_400) / 3_600
        )
    } else if clamped > HOUR {
        format!(
            "{}h {}min",
            total_seconds / 3_600,
            (total_seconds % 3_600) / 60
        )
    } else {
        format!("{}min {}s", total_seconds / 60, total_seconds % 60)
    }
}

/// Human-case an open status value: words split on separators, lower-cased,
/// first letter capitalized ("CANCELLED_FAILED_REVIEW" ->
/// "Cancelled failed review").
fn human_case(raw: &str) -> String {
    let mut label = raw
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(head) = label.get_mut(0..1) {
        head.make_ascii_uppercase();
    }
    label
}
