//! Date-driven status classification.
//!
//! There is no persisted state machine: every pass reclassifies each record
//! from its dates and the current date, so running it twice is a no-op.
//! The one deliberate exception to "status is a function of dates" is a
//! record with no usable dates at all — its stored status is preserved,
//! since absence of dates is not evidence of completion.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::store::{RecordStore, StoreError};
use crate::types::{Hackathon, HackathonStatus};
use crate::util::{parse_date, today, today_date};

/// Days a record stays in `judging` after its submission deadline when no
/// results date is known.
pub const DEFAULT_JUDGING_WINDOW_DAYS: i64 = 14;

/// Classify a record's status as of a given date, using the default
/// judging window.
pub fn classify(record: &Hackathon, as_of: NaiveDate) -> HackathonStatus {
    classify_with_window(record, as_of, DEFAULT_JUDGING_WINDOW_DAYS)
}

/// Classify a record's status as of a given date.
///
/// Unparseable date strings are treated as absent. First matching rule
/// wins; the rule order is load-bearing.
pub fn classify_with_window(
    record: &Hackathon,
    as_of: NaiveDate,
    judging_window_days: i64,
) -> HackathonStatus {
    let reg_open = record.registration_open.as_deref().and_then(parse_date);
    let reg_close = record.registration_deadline.as_deref().and_then(parse_date);
    let submit_close = record.submission_deadline.as_deref().and_then(parse_date);
    let results = record.results_date.as_deref().and_then(parse_date);

    // Results are in: completed once the results date has passed.
    if let Some(results) = results {
        if as_of > results {
            return HackathonStatus::Completed;
        }
    }

    // Submission deadline has passed: judging until results, or for an
    // implicit window when no results date exists.
    if let Some(submit_close) = submit_close {
        if as_of > submit_close {
            if results.is_some() {
                // Known results date still ahead (the past case returned above)
                return HackathonStatus::Judging;
            }
            let judging_end = submit_close + Duration::days(judging_window_days);
            return if as_of <= judging_end {
                HackathonStatus::Judging
            } else {
                HackathonStatus::Completed
            };
        }
    }

    // Registration closed but submissions still open: building phase.
    if let Some(reg_close) = reg_close {
        if as_of > reg_close {
            return HackathonStatus::Active;
        }
    }

    if let Some(reg_open) = reg_open {
        return if as_of >= reg_open {
            HackathonStatus::RegistrationOpen
        } else {
            HackathonStatus::Upcoming
        };
    }

    // No open date, but a registration deadline still ahead.
    if let Some(reg_close) = reg_close {
        if as_of <= reg_close {
            return HackathonStatus::RegistrationOpen;
        }
    }

    if let Some(submit_close) = submit_close {
        if as_of <= submit_close {
            return HackathonStatus::Active;
        }
    }

    // No date evidence at all: keep whatever the record already says.
    // The scraper or a human set that status for a reason.
    if reg_open.is_none() && reg_close.is_none() && submit_close.is_none() && results.is_none() {
        return record.status;
    }

    HackathonStatus::Completed
}

/// Recompute a record's status against today. Returns the record unchanged
/// when the status didn't move, so callers can skip the write.
pub fn update_status(record: &Hackathon) -> Hackathon {
    update_status_with_window(record, DEFAULT_JUDGING_WINDOW_DAYS)
}

/// `update_status` with an explicit judging window.
pub fn update_status_with_window(record: &Hackathon, judging_window_days: i64) -> Hackathon {
    let new_status = classify_with_window(record, today_date(), judging_window_days);
    if new_status == record.status {
        return record.clone();
    }
    let mut updated = record.clone();
    updated.status = new_status;
    updated.last_updated = today();
    updated
}

/// Summary of a lifecycle pass over the whole store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleSummary {
    pub total: usize,
    pub updated: usize,
}

/// Reclassify every record in the store, persisting only those whose
/// status changed.
pub fn run_lifecycle_pass(
    store: &dyn RecordStore,
    judging_window_days: i64,
) -> Result<LifecycleSummary, StoreError> {
    let records = store.load_all()?;
    let total = records.len();
    let mut updated = 0usize;

    for record in records {
        let new_status = classify_with_window(&record, today_date(), judging_window_days);
        if new_status == record.status {
            continue;
        }
        let mut changed = record.clone();
        changed.status = new_status;
        changed.last_updated = today();
        if let Err(e) = store.upsert(&changed) {
            log::warn!("Failed to persist status for '{}': {}", record.name, e);
            continue;
        }
        log::info!("{}: {} -> {}", record.name, record.status, new_status);
        updated += 1;
    }

    Ok(LifecycleSummary { total, updated })
}
