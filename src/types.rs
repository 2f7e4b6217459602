//! Record and candidate types shared across the aggregation core.
//!
//! `Hackathon` is the persisted record; `Candidate` is the untrusted shape
//! collectors hand to the reconciliation pipeline. Field names serialize as
//! camelCase to match the JSON the collectors and renderers exchange.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a hackathon. Derived from dates by the lifecycle
/// engine; renderers must treat any other string as an error, which the
/// closed enum enforces at deserialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HackathonStatus {
    Upcoming,
    RegistrationOpen,
    Active,
    Judging,
    Completed,
}

impl HackathonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HackathonStatus::Upcoming => "upcoming",
            HackathonStatus::RegistrationOpen => "registration_open",
            HackathonStatus::Active => "active",
            HackathonStatus::Judging => "judging",
            HackathonStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for HackathonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HackathonStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(HackathonStatus::Upcoming),
            "registration_open" => Ok(HackathonStatus::RegistrationOpen),
            "active" => Ok(HackathonStatus::Active),
            "judging" => Ok(HackathonStatus::Judging),
            "completed" => Ok(HackathonStatus::Completed),
            other => Err(format!(
                "Unknown status: '{}'. Must be one of upcoming, registration_open, active, judging, completed.",
                other
            )),
        }
    }
}

/// Event format. Serializes to "virtual" / "in-person" / "hybrid".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HackathonFormat {
    #[default]
    Virtual,
    InPerson,
    Hybrid,
}

/// Total prize pool with an optional named breakdown (e.g. track prizes).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrizePool {
    pub total: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<std::collections::HashMap<String, f64>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSize {
    pub min: u32,
    pub max: u32,
}

/// Participation requirements as extracted from the listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<TeamSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
}

/// Chain/ecosystem metadata for blockchain-hosted events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainInfo {
    pub chain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecosystem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_prize: Option<bool>,
}

/// Outbound links collected alongside the canonical URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_winners: Option<String>,
}

/// A persisted hackathon record.
///
/// `id` is a slug derived from the name at creation and never reassigned.
/// Date fields are optional ISO date strings; the lifecycle engine parses
/// them leniently so a garbled date degrades to "unknown" rather than
/// poisoning the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hackathon {
    pub id: String,
    pub name: String,
    pub organizer: String,
    pub url: String,
    pub status: HackathonStatus,
    pub format: HackathonFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_open: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prize_pool: Option<PrizePool>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Requirements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<BlockchainInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<LinkSet>,
    /// Which collector produced this record (free text, e.g. "devpost").
    pub source: String,
    /// ISO date of the last mutation. Monotonically non-decreasing.
    pub last_updated: String,
    /// Extraction confidence in [0, 1]. Never decreases under merge.
    pub confidence: f64,
    /// Fields written by newer versions of the toolchain that this build
    /// does not interpret. Preserved verbatim through load/merge/store.
    #[serde(flatten, default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An untrusted candidate record from a collector. Same shape as
/// [`Hackathon`] minus identity/provenance; everything nullable except
/// `confidence`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub format: Option<HackathonFormat>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub registration_open: Option<String>,
    #[serde(default)]
    pub registration_deadline: Option<String>,
    #[serde(default)]
    pub submission_deadline: Option<String>,
    #[serde(default)]
    pub results_date: Option<String>,
    #[serde(default)]
    pub prize_pool: Option<PrizePool>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub requirements: Option<Requirements>,
    #[serde(default)]
    pub blockchain: Option<BlockchainInfo>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub links: Option<LinkSet>,
    pub confidence: f64,
}

/// Why a candidate was rejected at the collector boundary.
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("Candidate missing required field: {0}")]
    MissingField(&'static str),

    #[error("Confidence {0} outside [0, 1]")]
    ConfidenceOutOfRange(f64),
}

impl Candidate {
    /// Validate that a candidate is complete enough to reconcile.
    ///
    /// Malformed candidates are rejected here, before reconciliation —
    /// the merge engine itself is total and does not re-validate.
    pub fn validate(&self) -> Result<(), CandidateError> {
        if self.name.as_deref().map_or(true, |s| s.trim().is_empty()) {
            return Err(CandidateError::MissingField("name"));
        }
        if self.organizer.as_deref().map_or(true, |s| s.trim().is_empty()) {
            return Err(CandidateError::MissingField("organizer"));
        }
        if self.url.as_deref().map_or(true, |s| s.trim().is_empty()) {
            return Err(CandidateError::MissingField("url"));
        }
        if self.format.is_none() {
            return Err(CandidateError::MissingField("format"));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(CandidateError::ConfidenceOutOfRange(self.confidence));
        }
        Ok(())
    }
}
