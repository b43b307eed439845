//! Registration/submission gating for the viewing user.

use challenge_view_core::{Eligibility, StatusKind, ViewFlags};
use log::debug;

use super::{Challenge, PhaseIndex};

/// Track whose registrants may browse their own submissions.
const DESIGN_TRACK: &str = "DESIGN";
/// Submission status meaning the entry no longer counts as submitted work.
const DELETED_SUBMISSION: &str = "Deleted";

/// Compute the gating flags for the current user.
///
/// `registration_closed` starts true and only a live registration phase on a
/// non-completed challenge reopens it: once a challenge completes, its phase
/// bookkeeping no longer matters.
pub fn evaluate_eligibility(
    challenge: &Challenge,
    index: &PhaseIndex<'_>,
    flags: &ViewFlags,
) -> Eligibility {
    let mut registration_closed = true;
    if challenge.status_kind() != StatusKind::Completed {
        if let Some(registration) = index.registration() {
            registration_closed = !registration.is_open;
        }
    }

    // The upstream aggregate keeps a has-submitted flag that is not cleared
    // when every submission is deleted, so the full list is scanned instead.
    let has_existing_submissions = challenge
        .user_details
        .as_ref()
        .map(|details| {
            details
                .submissions
                .iter()
                .any(|submission| submission.status != DELETED_SUBMISSION)
        })
        .unwrap_or(false);

    let is_legacy_match =
        challenge.is_marathon_match() && challenge.round_id.is_some_and(|round| round != 0);
    if is_legacy_match {
        debug!(
            "challenge {} is a legacy match, registration and submission stay disabled",
            challenge.id
        );
    }

    let can_unregister = !flags.unregistering
        && !registration_closed
        && !has_existing_submissions
        && !is_legacy_match;
    let can_register = !flags.registering && !registration_closed && !is_legacy_match;
    let can_submit = flags.has_registered
        && !flags.unregistering
        && !flags.submission_ended
        && !is_legacy_match;
    let can_view_submissions = challenge.track.as_deref() == Some(DESIGN_TRACK)
        && flags.has_registered
        && !flags.unregistering
        && has_existing_submissions;

    Eligibility {
        registration_closed,
        submission_closed: flags.submission_ended,
        is_legacy_match,
        has_existing_submissions,
        can_register,
        can_unregister,
        can_submit,
        can_view_submissions,
    }
}
