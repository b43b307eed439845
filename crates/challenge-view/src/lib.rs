//! Pure derivation of a challenge's header view: next deadline and
//! countdown, the relevant-phase timeline, bonus classification and user
//! eligibility, all recomputed from an immutable challenge snapshot on
//! every call.
//!
//! The aggregate is owned by an external fetch layer; this crate only reads
//! and projects it. There is no I/O, no caching and no shared mutable
//! state, and the clock is injected through [`ViewFlags`] so deadline
//! computations stay deterministic under test.

pub mod domain;

pub use challenge_view_core::{
    Bonus, ChallengeView, CoreError, DeadlineMessage, Eligibility, NextDeadline, StatusKind,
    TimelineEntry, ViewFlags,
};
pub use domain::{
    derive_challenge_view, Challenge, Event, Phase, PhaseIndex, Prize, PrizeSet, Submission,
    TagField, UserDetails,
};
