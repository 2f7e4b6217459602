//! Shared helpers: slugs, URL normalization, dates, atomic file writes.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use url::Url;

/// Convert a display name to a URL-safe kebab-case slug, capped at 60 chars.
///
/// Example: "AI Agent Hackathon 2026!" → "ai-agent-hackathon-2026"
pub fn slugify(text: &str) -> String {
    let slug = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    slug.chars().take(60).collect()
}

/// Normalize a URL for equality comparison: host + path, lowercased, one
/// trailing slash stripped. Unparseable input falls back to the lowercased
/// raw string so comparison stays total.
pub fn normalize_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(u) => {
            let joined = format!("{}{}", u.host_str().unwrap_or(""), u.path()).to_lowercase();
            match joined.strip_suffix('/') {
                Some(stripped) => stripped.to_string(),
                None => joined,
            }
        }
        Err(_) => raw.to_lowercase(),
    }
}

/// Today's calendar date (UTC) as an ISO date string, e.g. "2026-08-07".
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Today's calendar date (UTC) as a `NaiveDate`.
pub fn today_date() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a stored date string leniently.
///
/// Accepts plain ISO dates and full RFC 3339 timestamps. Anything else is
/// treated as absent — unparseable dates are "no evidence", not an error.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| chrono::DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Write a file atomically: write to a sibling temp file, then rename over
/// the target. Readers never observe a half-written record.
pub fn atomic_write_str(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}
