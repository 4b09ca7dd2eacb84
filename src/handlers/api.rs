//! API Response Handler
//!
//! Handles responses from the sentiment API background service and folds
//! them into the model.

use sentui::api::ApiError;
use sentui::logic::errors::{self, ErrorType};
use sentui::logic::{metrics, tonality};
use sentui::model::forms::AuthForm;
use sentui::model::Screen;
use sentui::services::ApiResponse;

use crate::App;

/// Handle API response from background service
///
/// Upstream failures leave data untouched: they update the connection
/// state, and the user sees a toast or an inline form error. A 401 from
/// any endpoint other than login ends the session.
pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    match response {
        ApiResponse::LoginResult { login, result } => {
            app.model.ui.auth_form.is_submitting = false;
            match result {
                Ok(token) => match token.access_token.filter(|t| !t.is_empty()) {
                    Some(token) => {
                        app.record_api_success();
                        app.complete_login(login, token);
                    }
                    None => {
                        app.model.ui.auth_form.error =
                            Some("Login failed: no access token returned".to_string());
                    }
                },
                Err(ApiError::Unauthorized) => {
                    app.model.ui.auth_form.error = Some("Incorrect login or password".to_string());
                }
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    app.record_api_failure(&e);
                    app.model.ui.auth_form.error = Some(errors::api_error_toast(&e));
                }
            }
        }

        ApiResponse::RegisterResult { login, result } => {
            app.model.ui.auth_form.is_submitting = false;
            match result {
                Ok(user) => {
                    tracing::info!("Registered user {:?}", user.id);
                    app.record_api_success();
                    app.model.ui.go_to(Screen::Login);
                    app.model.ui.auth_form = AuthForm::with_login(&login);
                    app.model
                        .show_toast("Account created. Log in to continue".to_string());
                }
                Err(e) => {
                    tracing::warn!("Registration failed: {}", e);
                    app.record_api_failure(&e);
                    app.model.ui.auth_form.error = Some(errors::api_error_toast(&e));
                }
            }
        }

        ApiResponse::UserResult {
            user_id,
            select_newest,
            result,
        } => {
            // Ignore answers for a session that has since ended
            if app.model.session.user_id.as_deref() != Some(user_id.as_str()) {
                return;
            }

            match result {
                Ok(profile) => {
                    app.record_api_success();
                    if profile.login.is_some() {
                        app.model.session.login = profile.login;
                    }
                    app.model.session.set_reports(profile.sentimental_reports);

                    if select_newest {
                        let newest = app.model.session.newest_report_id().map(str::to_string);
                        match newest {
                            Some(report_id) => {
                                app.model.reports.select_version(&report_id);
                                app.fetch_report(&report_id);
                            }
                            None => app.model.reports.set_loading(false),
                        }
                    } else {
                        app.keep_selection_after_refresh();
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to load user {}: {}", user_id, e);
                    if app.record_api_failure(&e) {
                        return;
                    }
                    if select_newest {
                        // Keep the stored token so a later start can retry
                        app.client.set_token(None);
                        app.model.logout();
                    }
                    app.model.show_toast(errors::api_error_toast(&e));
                }
            }
        }

        ApiResponse::ReportResult { report_id, result } => {
            // A fetch that outlived its session must not touch model or cache
            if !app.model.session.is_authenticated() {
                tracing::debug!("Dropping report {} for an ended session", report_id);
                return;
            }
            let is_current = app.model.reports.selected_version_id == report_id;

            match result {
                Ok(report) => {
                    app.record_api_success();
                    if is_current {
                        app.show_report(report);
                    } else {
                        tracing::debug!("Ignoring report {} (no longer selected)", report_id);
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to fetch report {}: {}", report_id, e);
                    if app.record_api_failure(&e) || !is_current {
                        return;
                    }

                    app.model.reports.set_loading(false);
                    match app.cache.get_report(&report_id) {
                        Ok(Some(cached)) => {
                            app.model.reports.set_report_data(cached);
                            app.model.reports.from_cache = true;
                            app.model.ui.reset_table();
                            app.model.show_toast(format!(
                                "{} (showing cached copy)",
                                errors::api_error_toast(&e)
                            ));
                        }
                        Ok(None) => app.model.show_toast(errors::api_error_toast(&e)),
                        Err(cache_err) => {
                            tracing::warn!("Failed to read cached report: {:#}", cache_err);
                            app.model.show_toast(errors::api_error_toast(&e));
                        }
                    }
                }
            }
        }

        ApiResponse::UploadResult { result } => {
            app.model.reports.is_importing = false;
            match result {
                Ok(report) => {
                    app.record_api_success();
                    app.finish_import(report);
                }
                Err(e) => {
                    tracing::error!("Upload failed: {}", e);
                    if app.record_api_failure(&e) {
                        return;
                    }
                    if let Some(form) = app.model.ui.import_dialog.as_mut() {
                        form.is_submitting = false;
                        form.error = Some(errors::api_error_toast(&e));
                    }
                }
            }
        }

        ApiResponse::DeleteResult { report_id, result } => match result {
            Ok(()) => {
                app.record_api_success();
                app.finish_delete(&report_id);
                app.model.show_toast("Version deleted".to_string());
            }
            Err(e) => {
                tracing::error!("Failed to delete report {}: {}", report_id, e);
                app.model.reports.is_deleting = false;
                if !app.record_api_failure(&e) {
                    app.model.show_toast(errors::api_error_toast(&e));
                }
            }
        },

        ApiResponse::ExportResult { report_id, result } => {
            app.model.reports.is_exporting = false;
            match result {
                Ok(path) => {
                    tracing::info!("Exported report {} to {}", report_id, path.display());
                    app.model
                        .show_toast(format!("Exported to {}", path.display()));
                }
                Err(e) => {
                    tracing::error!("Failed to export report {}: {:#}", report_id, e);
                    if errors::classify_error(&e) == ErrorType::Unauthorized {
                        app.handle_unauthorized();
                        return;
                    }
                    app.model.show_toast(format!(
                        "Error: export failed: {}",
                        errors::format_error_message(&e)
                    ));
                }
            }
        }

        ApiResponse::PredictionResult { text, result } => match result {
            Ok(prediction) => {
                app.record_api_success();
                let tone = tonality::from_predicted_mark(&prediction.predicted_mark);
                app.model
                    .ui
                    .demo
                    .set_result(tone, prediction.text.or(Some(text)));
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                app.model.ui.demo.set_failure();
                app.record_api_failure(&e);
            }
        },

        ApiResponse::MetricsResult { result } => {
            let outcome = match result {
                Ok(value) => {
                    app.record_api_success();
                    Ok(metrics::normalize_metrics(&value))
                }
                Err(e) => {
                    tracing::error!("Metrics request failed: {}", e);
                    if app.record_api_failure(&e) {
                        return;
                    }
                    Err(errors::api_error_toast(&e))
                }
            };

            if let Some(dialog) = app.model.ui.metrics_dialog.as_mut() {
                dialog.form.is_submitting = false;
                match outcome {
                    Ok(result) => dialog.result = Some(result),
                    Err(message) => {
                        dialog.result = None;
                        dialog.form.error = Some(message);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentui::api::{ReportData, ReportPrediction, ReportSummary, UserProfile};
    use sentui::model::PLACEHOLDER_VERSION_ID;
    use sentui::services::ApiRequest;

    fn report(id: &str) -> ReportData {
        ReportData {
            id: id.to_string(),
            created_at: "2025-03-05T11:07:00Z".to_string(),
            prediction: vec![ReportPrediction {
                id: Some("1".to_string()),
                text: Some("fine".to_string()),
                src: Some("shop".to_string()),
                label: 1,
            }],
        }
    }

    fn summary(id: &str, created_at: &str) -> ReportSummary {
        ReportSummary {
            id: id.to_string(),
            created_at: created_at.to_string(),
        }
    }

    /// Signed in as `u1` with versions r2 (newest) and r1, r1 selected
    fn signed_in(app: &mut App) {
        app.model
            .session
            .set_user(Some("u1".to_string()), Some("ann".to_string()));
        app.model.session.set_reports(vec![
            summary("r1", "2025-01-01T00:00:00Z"),
            summary("r2", "2025-02-01T00:00:00Z"),
        ]);
        app.model.ui.go_to(Screen::Dashboard);
        app.model.reports.select_version("r1");
    }

    fn report_result(id: &str) -> ApiResponse {
        ApiResponse::ReportResult {
            report_id: id.to_string(),
            result: Ok(report(id)),
        }
    }

    fn refreshed(reports: Vec<ReportSummary>) -> ApiResponse {
        ApiResponse::UserResult {
            user_id: "u1".to_string(),
            select_newest: false,
            result: Ok(UserProfile {
                id: Some("u1".to_string()),
                login: None,
                sentimental_reports: reports,
            }),
        }
    }

    #[test]
    fn test_current_report_is_shown_and_cached() {
        let (mut app, _requests) = App::for_tests();
        signed_in(&mut app);

        handle_api_response(&mut app, report_result("r1"));

        assert_eq!(app.model.reports.reviews.len(), 1);
        assert_eq!(app.cache.get_report("r1").unwrap(), Some(report("r1")));
    }

    #[test]
    fn test_report_arriving_after_logout_is_dropped() {
        let (mut app, _requests) = App::for_tests();
        signed_in(&mut app);
        app.logout();

        handle_api_response(&mut app, report_result("r1"));

        assert_eq!(app.cache.get_report("r1").unwrap(), None);
        assert!(app.model.reports.report.is_none());
        assert_eq!(app.model.ui.screen, Screen::Login);
    }

    #[test]
    fn test_stale_report_is_neither_shown_nor_cached() {
        let (mut app, _requests) = App::for_tests();
        signed_in(&mut app);

        handle_api_response(&mut app, report_result("r2"));

        assert!(app.model.reports.report.is_none());
        assert_eq!(app.cache.get_report("r2").unwrap(), None);
    }

    #[test]
    fn test_reload_refreshes_list_and_selected_version() {
        let (mut app, mut requests) = App::for_tests();
        signed_in(&mut app);

        app.reload_selected();

        assert!(matches!(
            requests.try_recv(),
            Ok(ApiRequest::LoadUser { ref user_id, select_newest: false }) if user_id == "u1"
        ));
        assert!(matches!(
            requests.try_recv(),
            Ok(ApiRequest::FetchReport { ref report_id }) if report_id == "r1"
        ));
    }

    #[test]
    fn test_refresh_keeps_selection() {
        let (mut app, mut requests) = App::for_tests();
        signed_in(&mut app);
        handle_api_response(&mut app, report_result("r1"));

        handle_api_response(
            &mut app,
            refreshed(vec![
                summary("r1", "2025-01-01T00:00:00Z"),
                summary("r2", "2025-02-01T00:00:00Z"),
                summary("r3", "2025-03-01T00:00:00Z"),
            ]),
        );

        assert_eq!(app.model.reports.selected_version_id, "r1");
        assert!(app.model.reports.report.is_some());
        assert_eq!(app.model.session.newest_report_id(), Some("r3"));
        assert!(requests.try_recv().is_err());
    }

    #[test]
    fn test_refresh_drops_vanished_selection() {
        let (mut app, _requests) = App::for_tests();
        signed_in(&mut app);
        handle_api_response(&mut app, report_result("r1"));

        handle_api_response(&mut app, refreshed(vec![summary("r2", "2025-02-01T00:00:00Z")]));

        assert_eq!(app.model.reports.selected_version_id, PLACEHOLDER_VERSION_ID);
        assert!(app.model.reports.report.is_none());
        assert!(!app.model.reports.is_loading);
    }

    #[test]
    fn test_failed_refresh_keeps_session() {
        let (mut app, _requests) = App::for_tests();
        signed_in(&mut app);

        handle_api_response(
            &mut app,
            ApiResponse::UserResult {
                user_id: "u1".to_string(),
                select_newest: false,
                result: Err(ApiError::Status {
                    status: 500,
                    body: "boom".to_string(),
                }),
            },
        );

        assert!(app.model.session.is_authenticated());
        assert_eq!(app.model.ui.screen, Screen::Dashboard);
    }
}
