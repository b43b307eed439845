//! Relevant-phase timeline for the expandable deadlines panel.

use std::cmp::Ordering;

use challenge_view_core::{StatusKind, TimelineEntry, ViewFlags};
use log::debug;
use time::OffsetDateTime;

use super::{Challenge, Phase, ITERATIVE_REVIEW_PHASE};

/// Build the ordered list of phases worth showing in the deadlines panel.
///
/// This is discardable work: the caller only asks for it while the panel is
/// expanded (see [`super::derive_challenge_view`]).
pub fn build_timeline(challenge: &Challenge, now: OffsetDateTime) -> Vec<TimelineEntry> {
    let mut relevant: Vec<&Phase> = challenge
        .phases
        .iter()
        .filter(|phase| is_relevant(phase, now))
        .collect();

    relevant.sort_by(|a, b| compare_phases(a, b));

    let mut winners_at = None;

    if challenge.is_first_to_finish() && challenge.status_kind() == StatusKind::Completed {
        // The race ended when its last iterative review closed; phases
        // scheduled past that point are bookkeeping, not milestones.
        let end_phase_date = challenge
            .phases
            .iter()
            .filter(|phase| phase.name == ITERATIVE_REVIEW_PHASE && !phase.is_open)
            .filter_map(|phase| phase.scheduled_end_date)
            .max();
        relevant.retain(|phase| {
            is_registration_named(phase)
                || matches!(
                    (phase.scheduled_end_date, end_phase_date),
                    (Some(end), Some(cut)) if end < cut
                )
        });
        match end_phase_date {
            Some(cut) => winners_at = Some(cut),
            None => debug!(
                "challenge {} completed first-to-finish without a closed iterative review, \
                 skipping the winners milestone",
                challenge.id
            ),
        }
    } else if relevant.len() > 1 {
        if let Some(appeals_end) = challenge.appeals_end_date {
            let last_end = relevant.last().and_then(|phase| phase.effective_end());
            if last_end.is_some_and(|end| end < appeals_end) {
                winners_at = Some(appeals_end);
            }
        }
    }

    let mut timeline: Vec<TimelineEntry> = relevant.into_iter().map(to_entry).collect();
    if let Some(end) = winners_at {
        timeline.push(TimelineEntry::winners(end));
    }
    timeline
}

/// Inclusion policy, evaluated in order: a still-running iterative review is
/// always worth showing; screening and specification noise never is; the
/// registration/checkpoint/submission/review families are; nothing else.
fn is_relevant(phase: &Phase, now: OffsetDateTime) -> bool {
    if phase.name == ITERATIVE_REVIEW_PHASE {
        // A review with no recorded end has nothing left to show.
        return phase.effective_end().is_some_and(|end| end > now);
    }
    let name = phase.name.to_lowercase();
    if name.contains("screening") || name.contains("specification") {
        return false;
    }
    name.contains("registration")
        || name.contains("checkpoint")
        || name.contains("submission")
        || name.contains("review")
}

/// Registration phases pin to the front, stable among themselves; everything
/// else orders by when it truly ends.
fn compare_phases(a: &Phase, b: &Phase) -> Ordering {
    match (is_registration_named(a), is_registration_named(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.effective_end().cmp(&b.effective_end()),
    }
}

fn is_registration_named(phase: &Phase) -> bool {
    phase.name.to_lowercase().contains("registration")
}

fn to_entry(phase: &Phase) -> TimelineEntry {
    TimelineEntry {
        id: phase.id,
        phase_type: phase
            .phase_type
            .clone()
            .unwrap_or_else(|| phase.name.clone()),
        scheduled_end_date: phase.scheduled_end_date,
    }
}

/// Convenience wrapper honoring the panel flag.
pub fn relevant_phases(challenge: &Challenge, flags: &ViewFlags) -> Vec<TimelineEntry> {
    if flags.show_deadline_detail {
        build_timeline(challenge, flags.now)
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TagField;
    use time::macros::datetime;
    use uuid::Uuid;

    const NOW: OffsetDateTime = datetime!(2024-06-01 00:00 UTC);

    fn phase(id: i64, name: &str, is_open: bool, end: Option<OffsetDateTime>) -> Phase {
        Phase {
            id,
            name: name.to_string(),
            is_open,
            scheduled_end_date: end,
            actual_end_date: None,
            phase_type: None,
            phase_status: None,
        }
    }

    fn challenge(phases: Vec<Phase>) -> Challenge {
        Challenge {
            id: Uuid::nil(),
            name: "Test Challenge".to_string(),
            status: "ACTIVE".to_string(),
            track: None,
            sub_track: None,
            round_id: None,
            tags: TagField::default(),
            phases,
            prize_sets: Vec::new(),
            reliability_bonus: None,
            dr_points: None,
            appeals_end_date: None,
            user_details: None,
            events: Vec::new(),
            num_of_registrants: None,
            num_of_submissions: None,
        }
    }

    #[test]
    fn test_filter_keeps_the_interesting_families() {
        let subject = challenge(vec![
            phase(1, "Registration", false, Some(datetime!(2024-05-02 00:00 UTC))),
            phase(2, "Checkpoint Submission", false, Some(datetime!(2024-05-03 00:00 UTC))),
            phase(3, "Checkpoint Screening", false, Some(datetime!(2024-05-04 00:00 UTC))),
            phase(4, "Specification Review", false, Some(datetime!(2024-05-05 00:00 UTC))),
            phase(5, "Final Fix", false, Some(datetime!(2024-05-06 00:00 UTC))),
            phase(6, "Review", false, Some(datetime!(2024-05-07 00:00 UTC))),
        ]);

        let ids: Vec<i64> = build_timeline(&subject, NOW).iter().map(|e| e.id).collect();
        // Screening and specification noise is out, Final Fix matches no
        // family, registration pins first.
        assert_eq!(ids, vec![1, 2, 6]);
    }

    #[test]
    fn test_iterative_review_only_while_still_running() {
        let mut running = phase(
            1,
            "Iterative Review",
            true,
            Some(datetime!(2024-06-02 00:00 UTC)),
        );
        let ended = phase(
            2,
            "Iterative Review",
            false,
            Some(datetime!(2024-05-30 00:00 UTC)),
        );
        let unended = phase(3, "Iterative Review", true, None);

        let subject = challenge(vec![running.clone(), ended, unended]);
        let ids: Vec<i64> = build_timeline(&subject, NOW).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1]);

        // The actual end supersedes a future scheduled end.
        running.actual_end_date = Some(datetime!(2024-05-31 00:00 UTC));
        let subject = challenge(vec![running]);
        assert!(build_timeline(&subject, NOW).is_empty());
    }

    #[test]
    fn test_sort_registration_first_then_by_effective_end() {
        let mut late_review = phase(1, "Review", false, Some(datetime!(2024-05-20 00:00 UTC)));
        late_review.actual_end_date = Some(datetime!(2024-05-25 00:00 UTC));

        let subject = challenge(vec![
            late_review,
            phase(2, "Submission", false, Some(datetime!(2024-05-22 00:00 UTC))),
            phase(3, "Registration", false, Some(datetime!(2024-05-23 00:00 UTC))),
        ]);

        let ids: Vec<i64> = build_timeline(&subject, NOW).iter().map(|e| e.id).collect();
        // Registration pins first; the review's actual end (05-25) puts it
        // after the submission despite its earlier scheduled end.
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_first_to_finish_completed_injects_winners_at_last_review() {
        let mut subject = challenge(vec![
            phase(1, "Registration", false, Some(datetime!(2024-05-01 00:00 UTC))),
            phase(2, "Submission", false, Some(datetime!(2024-05-02 00:00 UTC))),
            phase(3, "Iterative Review", false, Some(datetime!(2024-05-03 00:00 UTC))),
            phase(4, "Iterative Review", false, Some(datetime!(2024-05-04 00:00 UTC))),
            phase(5, "Review", false, Some(datetime!(2024-05-04 12:00 UTC))),
        ]);
        subject.sub_track = Some("FIRST_2_FINISH".to_string());
        subject.status = "COMPLETED".to_string();

        let timeline = build_timeline(&subject, NOW);

        // Closed iterative reviews cap the timeline at the later one (05-04);
        // the review scheduled past the cut is dropped, registration stays.
        let ids: Vec<i64> = timeline.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, -1]);

        let winners = timeline.last().unwrap();
        assert!(winners.is_synthetic());
        assert_eq!(winners.phase_type, "Winners");
        assert_eq!(
            winners.scheduled_end_date,
            Some(datetime!(2024-05-04 00:00 UTC))
        );
    }

    #[test]
    fn test_first_to_finish_without_closed_review_appends_nothing() {
        let mut subject = challenge(vec![
            phase(1, "Registration", false, Some(datetime!(2024-05-01 00:00 UTC))),
            phase(2, "Submission", false, Some(datetime!(2024-05-02 00:00 UTC))),
        ]);
        subject.sub_track = Some("FIRST_2_FINISH".to_string());
        subject.status = "COMPLETED".to_string();

        let timeline = build_timeline(&subject, NOW);
        let ids: Vec<i64> = timeline.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_appeals_end_extends_the_timeline_once() {
        let mut subject = challenge(vec![
            phase(1, "Registration", false, Some(datetime!(2024-05-01 00:00 UTC))),
            phase(2, "Review", false, Some(datetime!(2024-05-05 00:00 UTC))),
        ]);
        subject.appeals_end_date = Some(datetime!(2024-05-08 00:00 UTC));

        let timeline = build_timeline(&subject, NOW);
        assert_eq!(timeline.len(), 3);
        let winners = timeline.last().unwrap();
        assert_eq!(winners.id, -1);
        assert_eq!(
            winners.scheduled_end_date,
            Some(datetime!(2024-05-08 00:00 UTC))
        );
    }

    #[test]
    fn test_appeals_end_before_last_phase_appends_nothing() {
        let mut subject = challenge(vec![
            phase(1, "Registration", false, Some(datetime!(2024-05-01 00:00 UTC))),
            phase(2, "Review", false, Some(datetime!(2024-05-05 00:00 UTC))),
        ]);
        subject.appeals_end_date = Some(datetime!(2024-05-05 00:00 UTC));

        assert_eq!(build_timeline(&subject, NOW).len(), 2);
    }

    #[test]
    fn test_appeals_needs_more_than_one_entry() {
        let mut subject = challenge(vec![phase(
            1,
            "Review",
            false,
            Some(datetime!(2024-05-05 00:00 UTC)),
        )]);
        subject.appeals_end_date = Some(datetime!(2024-05-08 00:00 UTC));

        assert_eq!(build_timeline(&subject, NOW).len(), 1);
    }

    #[test]
    fn test_empty_challenge_has_empty_timeline() {
        assert!(build_timeline(&challenge(Vec::new()), NOW).is_empty());
    }

    #[test]
    fn test_collapsed_panel_skips_the_work() {
        let subject = challenge(vec![phase(
            1,
            "Registration",
            false,
            Some(datetime!(2024-05-01 00:00 UTC)),
        )]);
        let flags = ViewFlags {
            has_registered: false,
            registering: false,
            unregistering: false,
            submission_ended: false,
            show_deadline_detail: false,
            now: NOW,
        };
        assert!(relevant_phases(&subject, &flags).is_empty());
    }
}
