//! Assembly of the display-ready view from a raw challenge snapshot.

use challenge_view_core::{ChallengeView, ViewFlags};

use super::{
    classify_bonus, evaluate_eligibility, relevant_phases, select_next_deadline, Challenge,
    PhaseIndex,
};

/// Domain category assumed when the challenge does not carry one.
const DEFAULT_TRACK: &str = "design";
/// Tag that reclassifies any track as data science for display.
const DATA_SCIENCE_TAG: &str = "Data Science";

/// Derive everything the header renderer needs from one immutable snapshot.
///
/// Pure and synchronous: the clock arrives with the flags and is read once,
/// nothing is cached across calls, and the aggregate is only read. Calling
/// twice with identical inputs yields identical results.
pub fn derive_challenge_view(challenge: &Challenge, flags: &ViewFlags) -> ChallengeView {
    let index = PhaseIndex::build(&challenge.phases);

    let normalized_tags = challenge.normalized_tags();
    let track_label = if normalized_tags.iter().any(|tag| tag == DATA_SCIENCE_TAG) {
        "datasci".to_string()
    } else {
        challenge
            .track
            .as_deref()
            .filter(|track| !track.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| DEFAULT_TRACK.to_string())
    };

    let event_names = challenge
        .events
        .iter()
        .filter_map(|event| event.event_name.as_deref())
        .filter(|name| !name.is_empty())
        .map(str::to_uppercase)
        .collect();

    let prizes = challenge
        .prize_sets
        .first()
        .map(|set| set.prizes.iter().map(|prize| prize.value).collect())
        .unwrap_or_default();

    ChallengeView {
        track_label,
        normalized_tags,
        event_names,
        prizes,
        dr_points: challenge.dr_points,
        bonus: classify_bonus(challenge),
        next_deadline: select_next_deadline(challenge, flags),
        relevant_phases: relevant_phases(challenge, flags),
        eligibility: evaluate_eligibility(challenge, &index, flags),
    }
}
