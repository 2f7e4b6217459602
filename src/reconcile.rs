//! Reconciliation pipeline: resolve → merge-or-create → classify → persist.
//!
//! `reconcile` handles a single candidate against a snapshot of the record
//! set and does not compute status — callers apply the lifecycle engine
//! afterwards, so source-specific gating can happen before paying for a
//! status computation or a write. `run_batch` is the sequential driver the
//! collectors feed: it carries the accumulated record set through the run,
//! so near-simultaneous duplicates merge instead of double-creating.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::dedup::check_duplicate_with;
use crate::lifecycle::update_status_with_window;
use crate::merge::{merge, to_record};
use crate::store::{RecordStore, StoreError};
use crate::types::{Candidate, Hackathon};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileAction {
    Created,
    Merged,
}

impl fmt::Display for ReconcileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReconcileAction::Created => "created",
            ReconcileAction::Merged => "merged",
        })
    }
}

/// Result of reconciling one candidate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileOutcome {
    pub action: ReconcileAction,
    pub record: Hackathon,
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The resolver matched an id that is not in the record set it was
    /// given — a consistency violation. Silently creating a fresh record
    /// here would manufacture the very duplicate the resolver exists to
    /// prevent, so the candidate fails instead.
    #[error("Matched duplicate '{0}' missing from the record set")]
    MatchMissing(String),
}

/// Reconcile a single candidate against the existing record set, using the
/// default matching thresholds.
pub fn reconcile(
    candidate: &Candidate,
    source: &str,
    existing: &[Hackathon],
) -> Result<ReconcileOutcome, ReconcileError> {
    reconcile_with(candidate, source, existing, &Config::default())
}

/// Reconcile a single candidate against the existing record set.
pub fn reconcile_with(
    candidate: &Candidate,
    source: &str,
    existing: &[Hackathon],
    config: &Config,
) -> Result<ReconcileOutcome, ReconcileError> {
    let dedup = check_duplicate_with(candidate, existing, &config.matching);

    if let (true, Some(match_id)) = (dedup.is_duplicate, dedup.match_id) {
        let matched = existing
            .iter()
            .find(|h| h.id == match_id)
            .ok_or(ReconcileError::MatchMissing(match_id))?;
        return Ok(ReconcileOutcome {
            action: ReconcileAction::Merged,
            record: merge(matched, candidate),
        });
    }

    Ok(ReconcileOutcome {
        action: ReconcileAction::Created,
        record: to_record(candidate, source),
    })
}

/// Counts from a batch run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub total: usize,
    pub created: usize,
    pub merged: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Reconcile a batch of candidates into the store, sequentially.
///
/// The record set is loaded once and accumulated in memory across the run;
/// each accepted record is upserted immediately. Per-candidate failures are
/// logged and counted — one bad candidate never aborts the batch.
pub fn run_batch(
    store: &dyn RecordStore,
    candidates: &[Candidate],
    source: &str,
    config: &Config,
) -> Result<BatchReport, StoreError> {
    let mut working = store.load_all()?;
    let mut report = BatchReport {
        total: candidates.len(),
        ..Default::default()
    };

    for candidate in candidates {
        if let Err(e) = candidate.validate() {
            log::warn!("Rejected candidate from {}: {}", source, e);
            report.skipped += 1;
            continue;
        }
        if candidate.confidence < config.min_confidence {
            log::info!(
                "Low confidence ({:.2}), skipping: {}",
                candidate.confidence,
                candidate.name.as_deref().unwrap_or("<unnamed>")
            );
            report.skipped += 1;
            continue;
        }

        let outcome = match reconcile_with(candidate, source, &working, config) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Reconcile failed for candidate from {}: {}", source, e);
                report.failed += 1;
                continue;
            }
        };

        let record = update_status_with_window(&outcome.record, config.judging_window_days);
        if let Err(e) = store.upsert(&record) {
            log::warn!("Failed to persist '{}': {}", record.name, e);
            report.failed += 1;
            continue;
        }

        log::info!(
            "{}: {} [confidence {:.2}]",
            outcome.action,
            record.name,
            record.confidence
        );
        match outcome.action {
            ReconcileAction::Created => report.created += 1,
            ReconcileAction::Merged => report.merged += 1,
        }

        match working.iter_mut().find(|h| h.id == record.id) {
            Some(slot) => *slot = record,
            None => working.push(record),
        }
    }

    Ok(report)
}
