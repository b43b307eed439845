//! Challenge aggregate as supplied by the external fetch layer.
//!
//! The deriver only reads these types. Ownership stays with the caller;
//! nothing here is mutated and nothing is cached between derivations.

mod bonus;
mod deadline;
mod eligibility;
mod phases;
mod timeline;
mod view;

pub use bonus::*;
pub use deadline::*;
pub use eligibility::*;
pub use phases::*;
pub use timeline::*;
pub use view::*;

use challenge_view_core::{CoreError, StatusKind};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Format classifier of challenges raced to the first passing submission.
pub const FIRST_TO_FINISH: &str = "FIRST_2_FINISH";
/// Format classifier of realtime marathon matches.
pub const MARATHON_MATCH: &str = "MARATHON_MATCH";

/// Exact name of the registration phase. The next-deadline selection
/// excludes it by this exact name, not by a normalized lookup.
pub(crate) const REGISTRATION_PHASE: &str = "Registration";
/// Exact name of the iterative review phase, which has end-time-sensitive
/// timeline rules of its own.
pub(crate) const ITERATIVE_REVIEW_PHASE: &str = "Iterative Review";

/// RFC 3339 dates that tolerate garbage: a missing, null or malformed value
/// decodes to `None`, so one bad date degrades the view instead of failing
/// the whole fetch decode.
pub(crate) mod lenient_rfc3339 {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(|value| value.as_str())
            .and_then(|value| OffsetDateTime::parse(value, &Rfc3339).ok()))
    }

    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        time::serde::rfc3339::option::serialize(value, serializer)
    }
}

/// A named, timed stage of the challenge lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_open: bool,
    /// Planned end of the phase. Every phase is expected to carry one, but a
    /// missing or unparseable date is tolerated so one malformed record
    /// degrades the view instead of failing it.
    #[serde(default, with = "lenient_rfc3339")]
    pub scheduled_end_date: Option<OffsetDateTime>,
    /// Recorded once the phase has truly closed; supersedes the scheduled
    /// end for "has this phase ended" queries.
    #[serde(default, with = "lenient_rfc3339")]
    pub actual_end_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub phase_type: Option<String>,
    #[serde(default)]
    pub phase_status: Option<String>,
}

impl Phase {
    /// Actual end when recorded, else the scheduled end.
    pub fn effective_end(&self) -> Option<OffsetDateTime> {
        self.actual_end_date.or(self.scheduled_end_date)
    }
}

/// Tags arrive either as a list or as a single ", "-delimited string.
/// Normalized to a canonical list at the boundary before any policy runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagField {
    List(Vec<String>),
    Delimited(String),
}

impl Default for TagField {
    fn default() -> Self {
        TagField::List(Vec::new())
    }
}

impl TagField {
    /// Canonical de-duplicated form, first occurrence wins.
    pub fn normalized(&self) -> Vec<String> {
        match self {
            TagField::List(tags) => tags
                .iter()
                .filter(|tag| !tag.is_empty())
                .cloned()
                .unique()
                .collect(),
            TagField::Delimited(raw) => raw
                .split(", ")
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .unique()
                .collect(),
        }
    }
}

/// One prize pool of the challenge (placement, checkpoint, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeSet {
    /// Pool discriminator; `"checkpoint"` feeds the bonus classifier.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub prizes: Vec<Prize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prize {
    #[serde(default)]
    pub value: f64,
}

/// Per-user slice of the aggregate for the viewing user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Lifecycle status; `"Deleted"` entries no longer count as submitted
    /// work.
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub event_name: Option<String>,
}

/// The challenge aggregate root, owned by the external fetch layer.
///
/// Every collection defaults to empty and every optional field to `None` on
/// deserialization: a sparse payload is a degraded view, never a fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    /// Raw status string; an open set, matched case-insensitively.
    #[serde(default)]
    pub status: String,
    /// Domain category (DESIGN, DEVELOP, DATA_SCIENCE, ...).
    #[serde(default)]
    pub track: Option<String>,
    /// Format classifier (FIRST_2_FINISH, MARATHON_MATCH, ...).
    #[serde(default)]
    pub sub_track: Option<String>,
    /// Round identifier kept by legacy realtime matches; new matches carry
    /// none.
    #[serde(default)]
    pub round_id: Option<u64>,
    #[serde(default)]
    pub tags: TagField,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub prize_sets: Vec<PrizeSet>,
    #[serde(default)]
    pub reliability_bonus: Option<f64>,
    #[serde(default)]
    pub dr_points: Option<f64>,
    #[serde(default, with = "lenient_rfc3339")]
    pub appeals_end_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub user_details: Option<UserDetails>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub num_of_registrants: Option<u64>,
    #[serde(default)]
    pub num_of_submissions: Option<u64>,
}

impl Challenge {
    /// Decode a fetched aggregate. The one fallible boundary of this crate.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn status_kind(&self) -> StatusKind {
        StatusKind::from_raw(&self.status)
    }

    pub fn is_first_to_finish(&self) -> bool {
        self.sub_track.as_deref() == Some(FIRST_TO_FINISH)
    }

    pub fn is_marathon_match(&self) -> bool {
        self.sub_track.as_deref() == Some(MARATHON_MATCH)
    }

    /// Tags in canonical form, whichever wire shape they arrived in.
    pub fn normalized_tags(&self) -> Vec<String> {
        self.tags.normalized()
    }
}
