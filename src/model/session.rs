//! Session Model
//!
//! The signed-in user, the versions (reports) they own, and the state of
//! the connection to the backend.

use crate::api::ReportSummary;
use crate::logic::errors::ErrorType;
use crate::logic::versions;

/// Connection state for the sentiment API
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionState {
    /// No request has completed yet
    Unknown,
    Connected,
    /// Last request failed (with error type and user-friendly message)
    Disconnected {
        error_type: ErrorType,
        message: String,
    },
}

#[derive(Clone, Debug)]
pub struct SessionModel {
    pub user_id: Option<String>,
    pub login: Option<String>,

    /// Versions owned by the user, newest first
    pub reports: Vec<ReportSummary>,

    pub connection_state: ConnectionState,
}

impl SessionModel {
    pub fn new() -> Self {
        Self {
            user_id: None,
            login: None,
            reports: Vec::new(),
            connection_state: ConnectionState::Unknown,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn set_user(&mut self, user_id: Option<String>, login: Option<String>) {
        self.user_id = user_id;
        self.login = login;
    }

    /// Replace the version list, newest first
    pub fn set_reports(&mut self, mut reports: Vec<ReportSummary>) {
        versions::sort_newest_first(&mut reports);
        self.reports = reports;
    }

    /// Replace a version in place if its id is known, otherwise prepend it
    pub fn add_report(&mut self, report: ReportSummary) {
        if let Some(existing) = self.reports.iter_mut().find(|r| r.id == report.id) {
            *existing = report;
        } else {
            self.reports.insert(0, report);
        }
    }

    pub fn remove_report(&mut self, report_id: &str) {
        self.reports.retain(|r| r.id != report_id);
    }

    pub fn newest_report_id(&self) -> Option<&str> {
        self.reports.first().map(|r| r.id.as_str())
    }

    /// Forget the user and their versions
    pub fn reset(&mut self) {
        self.user_id = None;
        self.login = None;
        self.reports.clear();
    }
}

impl Default for SessionModel {
    fn default() -> Self {
        Self::new()
    }
}
