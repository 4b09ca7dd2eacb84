//! Report version logic
//!
//! Pure functions for the version picker: ordering, labels and what to
//! select after a deletion.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::api::ReportSummary;
use crate::model::types::VersionOption;

/// Offset applied to server timestamps before display (UTC+3, Moscow)
const DISPLAY_OFFSET_HOURS: i64 = 3;

/// Parse a server timestamp; naive timestamps are taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Version label, e.g. `05.03.2025, 14:07`; unparseable input is shown as-is
pub fn format_report_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => (dt + Duration::hours(DISPLAY_OFFSET_HOURS))
            .format("%d.%m.%Y, %H:%M")
            .to_string(),
        None => raw.to_string(),
    }
}

/// Newest first; unparseable timestamps go last, keeping their order
pub fn sort_newest_first(reports: &mut [ReportSummary]) {
    reports.sort_by(|a, b| {
        let a_time = parse_timestamp(&a.created_at);
        let b_time = parse_timestamp(&b.created_at);
        b_time.cmp(&a_time)
    });
}

/// Placeholder followed by one option per report
pub fn version_options(reports: &[ReportSummary]) -> Vec<VersionOption> {
    std::iter::once(VersionOption::placeholder())
        .chain(reports.iter().map(|report| VersionOption {
            id: report.id.clone(),
            label: format_report_date(&report.created_at),
        }))
        .collect()
}

/// Option for `selected_id`, or the placeholder if it is unknown
pub fn selected_option(options: &[VersionOption], selected_id: &str) -> VersionOption {
    options
        .iter()
        .find(|option| option.id == selected_id)
        .cloned()
        .unwrap_or_else(VersionOption::placeholder)
}

/// Version to show after `deleted_id` is removed: the first remaining one
pub fn next_after_delete(reports: &[ReportSummary], deleted_id: &str) -> Option<String> {
    reports
        .iter()
        .find(|report| report.id != deleted_id)
        .map(|report| report.id.clone())
}

/// Label shown on the version picker button
pub fn picker_label(selected: &VersionOption, is_deleting: bool, is_fetching: bool) -> String {
    if is_deleting {
        "Deleting...".to_string()
    } else if is_fetching {
        "Loading...".to_string()
    } else {
        selected.label.clone()
    }
}
