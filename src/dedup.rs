//! Duplicate resolution for incoming candidates.
//!
//! Records are scanned in their given order and the first match wins. URL
//! equality is authoritative; fuzzy name matching needs either a very high
//! score or corroboration from the organizer or a shared submission
//! deadline, because titles like "AI Hackathon 2026" recur across unrelated
//! events.

use serde::Serialize;

use crate::config::MatchThresholds;
use crate::similarity::jaro_winkler;
use crate::types::{Candidate, Hackathon};
use crate::util::normalize_url;

/// Outcome of resolving one candidate against the existing record set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupResult {
    pub is_duplicate: bool,
    pub match_id: Option<String>,
    pub similarity: f64,
}

impl DedupResult {
    fn no_match() -> Self {
        Self {
            is_duplicate: false,
            match_id: None,
            similarity: 0.0,
        }
    }

    fn duplicate_of(entry: &Hackathon, similarity: f64) -> Self {
        Self {
            is_duplicate: true,
            match_id: Some(entry.id.clone()),
            similarity,
        }
    }
}

/// Resolve a candidate against existing records using the default
/// thresholds.
pub fn check_duplicate(candidate: &Candidate, existing: &[Hackathon]) -> DedupResult {
    check_duplicate_with(candidate, existing, &MatchThresholds::default())
}

/// Resolve a candidate against existing records.
///
/// Absence of a match is a normal result, not an error. Candidates with no
/// URL skip the URL pass; candidates with no name skip the fuzzy pass.
pub fn check_duplicate_with(
    candidate: &Candidate,
    existing: &[Hackathon],
    thresholds: &MatchThresholds,
) -> DedupResult {
    let candidate_url = candidate.url.as_deref().map(normalize_url);
    let candidate_name = candidate.name.as_deref().map(|n| n.to_lowercase());
    let candidate_organizer = candidate.organizer.as_deref().map(|o| o.to_lowercase());

    for entry in existing {
        // Exact URL match
        if let Some(ref url) = candidate_url {
            if *url == normalize_url(&entry.url) {
                return DedupResult::duplicate_of(entry, 1.0);
            }
        }

        let Some(ref name) = candidate_name else {
            continue;
        };
        let name_similarity = jaro_winkler(name, &entry.name.to_lowercase());

        // Fuzzy name + organizer or deadline corroboration
        let same_organizer = candidate_organizer
            .as_deref()
            .is_some_and(|o| o == entry.organizer.to_lowercase());

        let overlapping_deadline = match (
            candidate.submission_deadline.as_deref(),
            entry.submission_deadline.as_deref(),
        ) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };

        if name_similarity > thresholds.corroborated && (same_organizer || overlapping_deadline) {
            return DedupResult::duplicate_of(entry, name_similarity);
        }

        // High name similarity alone
        if name_similarity > thresholds.strong {
            return DedupResult::duplicate_of(entry, name_similarity);
        }
    }

    DedupResult::no_match()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::to_record;
    use crate::types::HackathonFormat;

    fn candidate(name: &str, organizer: &str, url: &str) -> Candidate {
        Candidate {
            name: Some(name.to_string()),
            organizer: Some(organizer.to_string()),
            url: Some(url.to_string()),
            format: Some(HackathonFormat::Virtual),
            confidence: 0.8,
            ..Default::default()
        }
    }

    fn record(name: &str, organizer: &str, url: &str) -> Hackathon {
        to_record(&candidate(name, organizer, url), "test")
    }

    #[test]
    fn test_exact_url_match_ignores_case_and_slash() {
        let existing = vec![record(
            "Some Event",
            "Someone",
            "https://example.com/event",
        )];
        let c = candidate("Totally Different Name", "Other", "https://Example.com/Event/");
        let result = check_duplicate(&c, &existing);
        assert!(result.is_duplicate);
        assert_eq!(result.similarity, 1.0);
        assert_eq!(result.match_id.as_deref(), Some("some-event"));
    }

    #[test]
    fn test_fuzzy_name_with_organizer_corroboration() {
        let existing = vec![record(
            "AI Agent Hackathon 2026",
            "Acme",
            "https://acme.dev/hack",
        )];
        let c = candidate("AI Agent Hack 2026", "acme", "https://other.site/listing");
        let result = check_duplicate(&c, &existing);
        assert!(result.is_duplicate);
        assert!(result.similarity > 0.85);
    }

    #[test]
    fn test_fuzzy_name_with_deadline_corroboration() {
        let mut existing = record("ETH London 2026", "ETHGlobal", "https://ethglobal.com/london");
        existing.submission_deadline = Some("2026-05-15".to_string());
        let mut c = candidate("ETH London  2026", "Unknown Org", "https://mirror.site/eth-london");
        c.submission_deadline = Some("2026-05-15".to_string());
        let result = check_duplicate(&c, &[existing]);
        assert!(result.is_duplicate);
    }

    #[test]
    fn test_fuzzy_name_without_corroboration_needs_strong_bar() {
        // Similar name, different organizer, no shared deadline
        let existing = vec![record(
            "AI Hackathon 2026",
            "Acme",
            "https://acme.dev/hack",
        )];
        let c = candidate("ML Hackathon 2026", "Globex", "https://globex.io/ml-hack");
        let result = check_duplicate(&c, &existing);
        assert!(!result.is_duplicate, "similarity {}", result.similarity);
        assert_eq!(result.match_id, None);
    }

    #[test]
    fn test_near_identical_name_alone_is_enough() {
        let existing = vec![record(
            "Solana Grizzlython Global",
            "Solana Foundation",
            "https://solana.com/grizzlython",
        )];
        let c = candidate(
            "Solana Grizzlython Globale",
            "Someone Else",
            "https://aggregator.xyz/grizzlython",
        );
        let result = check_duplicate(&c, &existing);
        assert!(result.is_duplicate, "similarity {}", result.similarity);
        assert!(result.similarity > 0.95);
    }

    #[test]
    fn test_first_match_wins() {
        let a = record("AI Agent Hackathon 2026", "Acme", "https://a.com/event");
        let b = record("AI Agent Hackathon", "Acme", "https://b.com/event");
        let c = candidate("AI Agent Hack 2026", "Acme", "https://c.com/event");
        let result = check_duplicate(&c, &[a, b]);
        // Both entries clear the corroborated bar; the scan stops at the first.
        assert_eq!(result.match_id.as_deref(), Some("ai-agent-hackathon-2026"));
    }

    #[test]
    fn test_empty_record_set() {
        let c = candidate("Anything", "Anyone", "https://any.where/x");
        let result = check_duplicate(&c, &[]);
        assert!(!result.is_duplicate);
        assert_eq!(result.similarity, 0.0);
    }

    #[test]
    fn test_candidate_without_url_or_name_never_matches() {
        let existing = vec![record("Named Event", "Org", "https://a.com/e")];
        let c = Candidate {
            confidence: 0.5,
            ..Default::default()
        };
        let result = check_duplicate(&c, &existing);
        assert!(!result.is_duplicate);
    }
}
