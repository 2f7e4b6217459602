//! Field-level merge of a candidate into an existing record, plus the
//! creation path for candidates with no match.
//!
//! Merge policy: fill forward, never blank out. A candidate value only
//! replaces an existing one when present; categories union, links merge
//! per kind, confidence never decreases. Identity (`id`, `source`, `name`,
//! `organizer`, `url`, `format`) and `status` are untouched — status
//! belongs to the lifecycle engine.

use crate::types::{Candidate, Hackathon, HackathonStatus, LinkSet};
use crate::util::{slugify, today};

/// Merge a duplicate candidate into its matched record. Total: every
/// candidate field is either well-formed or absent by this point.
pub fn merge(existing: &Hackathon, candidate: &Candidate) -> Hackathon {
    let mut merged = existing.clone();

    if candidate.description.is_some() {
        merged.description = candidate.description.clone();
    }
    if candidate.registration_open.is_some() {
        merged.registration_open = candidate.registration_open.clone();
    }
    if candidate.registration_deadline.is_some() {
        merged.registration_deadline = candidate.registration_deadline.clone();
    }
    if candidate.submission_deadline.is_some() {
        merged.submission_deadline = candidate.submission_deadline.clone();
    }
    if candidate.results_date.is_some() {
        merged.results_date = candidate.results_date.clone();
    }
    if candidate.prize_pool.is_some() {
        merged.prize_pool = candidate.prize_pool.clone();
    }
    if candidate.requirements.is_some() {
        merged.requirements = candidate.requirements.clone();
    }
    if candidate.blockchain.is_some() {
        merged.blockchain = candidate.blockchain.clone();
    }
    if candidate.location.is_some() {
        merged.location = candidate.location.clone();
    }

    merged.categories = union_categories(&existing.categories, candidate.categories.as_deref());
    merged.links = merge_links(existing.links.as_ref(), candidate.links.as_ref());
    merged.confidence = existing.confidence.max(candidate.confidence);
    merged.last_updated = today();

    merged
}

/// Synthesize a new record from a candidate with no duplicate match.
///
/// The id is a slug of the name, stable for the record's lifetime. The
/// initial `registration_open` status is a provisional default; the next
/// lifecycle pass corrects it from the dates.
pub fn to_record(candidate: &Candidate, source: &str) -> Hackathon {
    let name = candidate.name.clone().unwrap_or_default();
    Hackathon {
        id: slugify(&name),
        name,
        organizer: candidate.organizer.clone().unwrap_or_default(),
        url: candidate.url.clone().unwrap_or_default(),
        status: HackathonStatus::RegistrationOpen,
        format: candidate.format.unwrap_or_default(),
        description: candidate.description.clone(),
        registration_open: candidate.registration_open.clone(),
        registration_deadline: candidate.registration_deadline.clone(),
        submission_deadline: candidate.submission_deadline.clone(),
        results_date: candidate.results_date.clone(),
        prize_pool: candidate.prize_pool.clone(),
        categories: candidate.categories.clone().unwrap_or_default(),
        requirements: candidate.requirements.clone(),
        blockchain: candidate.blockchain.clone(),
        location: candidate.location.clone(),
        links: candidate.links.clone(),
        source: source.to_string(),
        last_updated: today(),
        confidence: candidate.confidence,
        extra: serde_json::Map::new(),
    }
}

/// Set union, preserving existing order and appending new tags in candidate
/// order.
fn union_categories(existing: &[String], candidate: Option<&[String]>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for tag in existing.iter().chain(candidate.unwrap_or_default()) {
        if seen.insert(tag.clone()) {
            out.push(tag.clone());
        }
    }
    out
}

/// Shallow merge: candidate's present link kinds overwrite, the rest are
/// preserved.
fn merge_links(existing: Option<&LinkSet>, candidate: Option<&LinkSet>) -> Option<LinkSet> {
    match (existing, candidate) {
        (Some(e), Some(c)) => Some(LinkSet {
            apply: c.apply.clone().or_else(|| e.apply.clone()),
            discord: c.discord.clone().or_else(|| e.discord.clone()),
            twitter: c.twitter.clone().or_else(|| e.twitter.clone()),
            past_winners: c.past_winners.clone().or_else(|| e.past_winners.clone()),
        }),
        (e, c) => c.or(e).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HackathonFormat;

    fn base_candidate() -> Candidate {
        Candidate {
            name: Some("ETH London 2026".to_string()),
            organizer: Some("ETHGlobal".to_string()),
            url: Some("https://ethglobal.com/events/london".to_string()),
            format: Some(HackathonFormat::InPerson),
            description: Some("48h of building".to_string()),
            submission_deadline: Some("2026-05-15".to_string()),
            categories: Some(vec!["web3".to_string(), "defi".to_string()]),
            confidence: 0.7,
            ..Default::default()
        }
    }

    fn base_record() -> Hackathon {
        to_record(&base_candidate(), "devpost")
    }

    #[test]
    fn test_to_record_slug_and_defaults() {
        let record = base_record();
        assert_eq!(record.id, "eth-london-2026");
        assert_eq!(record.status, HackathonStatus::RegistrationOpen);
        assert_eq!(record.source, "devpost");
        assert_eq!(record.last_updated, today());
        assert_eq!(record.confidence, 0.7);
        assert_eq!(record.categories, vec!["web3", "defi"]);
    }

    #[test]
    fn test_merge_fills_forward_absent_fields() {
        let record = base_record();
        let sparse = Candidate {
            confidence: 0.4,
            ..Default::default()
        };
        let merged = merge(&record, &sparse);
        assert_eq!(merged.description.as_deref(), Some("48h of building"));
        assert_eq!(merged.submission_deadline.as_deref(), Some("2026-05-15"));
        assert_eq!(merged.name, record.name);
        assert_eq!(merged.url, record.url);
    }

    #[test]
    fn test_merge_present_fields_replace() {
        let record = base_record();
        let update = Candidate {
            description: Some("Now with AI track".to_string()),
            results_date: Some("2026-06-01".to_string()),
            location: Some("London, UK".to_string()),
            confidence: 0.5,
            ..Default::default()
        };
        let merged = merge(&record, &update);
        assert_eq!(merged.description.as_deref(), Some("Now with AI track"));
        assert_eq!(merged.results_date.as_deref(), Some("2026-06-01"));
        assert_eq!(merged.location.as_deref(), Some("London, UK"));
    }

    #[test]
    fn test_merge_confidence_never_regresses() {
        let record = base_record();
        let low = Candidate {
            confidence: 0.2,
            ..Default::default()
        };
        assert_eq!(merge(&record, &low).confidence, 0.7);

        let high = Candidate {
            confidence: 0.95,
            ..Default::default()
        };
        assert_eq!(merge(&record, &high).confidence, 0.95);
    }

    #[test]
    fn test_merge_categories_union_keeps_order() {
        let record = base_record();
        let update = Candidate {
            categories: Some(vec![
                "defi".to_string(),
                "ai".to_string(),
                "web3".to_string(),
            ]),
            confidence: 0.5,
            ..Default::default()
        };
        let merged = merge(&record, &update);
        assert_eq!(merged.categories, vec!["web3", "defi", "ai"]);
    }

    #[test]
    fn test_merge_links_per_kind() {
        let mut record = base_record();
        record.links = Some(LinkSet {
            apply: Some("https://old.example/apply".to_string()),
            discord: Some("https://discord.gg/old".to_string()),
            ..Default::default()
        });
        let update = Candidate {
            links: Some(LinkSet {
                discord: Some("https://discord.gg/new".to_string()),
                twitter: Some("https://x.com/event".to_string()),
                ..Default::default()
            }),
            confidence: 0.5,
            ..Default::default()
        };
        let merged = merge(&record, &update);
        let links = merged.links.unwrap();
        assert_eq!(links.apply.as_deref(), Some("https://old.example/apply"));
        assert_eq!(links.discord.as_deref(), Some("https://discord.gg/new"));
        assert_eq!(links.twitter.as_deref(), Some("https://x.com/event"));
    }

    #[test]
    fn test_merge_absent_links_preserved() {
        let mut record = base_record();
        record.links = Some(LinkSet {
            apply: Some("https://a/apply".to_string()),
            ..Default::default()
        });
        let merged = merge(&record, &Candidate { confidence: 0.1, ..Default::default() });
        assert_eq!(merged.links.unwrap().apply.as_deref(), Some("https://a/apply"));
    }

    #[test]
    fn test_merge_leaves_identity_and_status_alone() {
        let mut record = base_record();
        record.status = HackathonStatus::Judging;
        let update = Candidate {
            name: Some("Renamed Event".to_string()),
            confidence: 0.9,
            ..Default::default()
        };
        let merged = merge(&record, &update);
        assert_eq!(merged.id, "eth-london-2026");
        assert_eq!(merged.source, "devpost");
        assert_eq!(merged.status, HackathonStatus::Judging);
    }

    #[test]
    fn test_merge_touches_last_updated() {
        let mut record = base_record();
        record.last_updated = "2020-01-01".to_string();
        let merged = merge(&record, &Candidate { confidence: 0.1, ..Default::default() });
        assert_eq!(merged.last_updated, today());
    }

    #[test]
    fn test_merge_preserves_unknown_fields() {
        let mut record = base_record();
        record
            .extra
            .insert("sponsorTier".to_string(), serde_json::json!("gold"));
        let merged = merge(&record, &Candidate { confidence: 0.1, ..Default::default() });
        assert_eq!(merged.extra.get("sponsorTier").unwrap(), "gold");
    }
}
