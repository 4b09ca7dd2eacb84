//! Session orchestration methods
//!
//! Restoring a stored session, login, registration and logout.

use sentui::api::ApiError;
use sentui::logic::errors;
use sentui::model::{ConnectionState, Screen};
use sentui::services::ApiRequest;
use sentui::session;

use crate::App;

impl App {
    /// Pick up a stored token on startup, or stay on the login screen
    pub(crate) fn restore_session(&mut self) {
        let token = match self.cache.load_token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to read stored session: {:#}", e);
                None
            }
        };

        let Some(token) = token else {
            tracing::info!("No stored session");
            return;
        };

        if !self.start_session(&token, None) {
            if let Err(e) = self.cache.clear_token() {
                tracing::warn!("Failed to clear unusable stored session: {:#}", e);
            }
        }
    }

    /// Decode `token` and load the user it belongs to
    ///
    /// Returns false (leaving the model untouched) when the token has no user id.
    fn start_session(&mut self, token: &str, login: Option<String>) -> bool {
        let user = session::decode_token(token, self.config.jwt_secret.as_deref());
        let Some(user_id) = user.id else {
            tracing::warn!("Access token carries no user id");
            return false;
        };

        self.client.set_token(Some(token.to_string()));
        self.model.session.set_user(Some(user_id.clone()), user.login.or(login));
        self.model.ui.go_to(Screen::Dashboard);
        self.model.reports.set_loading(true);

        self.send(ApiRequest::LoadUser {
            user_id,
            select_newest: true,
        });
        true
    }

    pub(crate) fn submit_login(&mut self) {
        let form = &mut self.model.ui.auth_form;
        if !form.can_submit() || !form.validate() {
            return;
        }

        form.is_submitting = true;
        form.error = None;
        let request = ApiRequest::Login {
            login: form.login.trim().to_string(),
            password: form.password.clone(),
        };
        self.send(request);
    }

    pub(crate) fn submit_register(&mut self) {
        let form = &mut self.model.ui.auth_form;
        if !form.can_submit() || !form.validate() {
            return;
        }

        form.is_submitting = true;
        form.error = None;
        let request = ApiRequest::Register {
            login: form.login.trim().to_string(),
            password: form.password.clone(),
        };
        self.send(request);
    }

    /// Store a fresh token and open the dashboard
    pub(crate) fn complete_login(&mut self, login: String, token: String) {
        if let Err(e) = self.cache.save_token(&token) {
            tracing::warn!("Failed to persist session: {:#}", e);
        }

        if !self.start_session(&token, Some(login)) {
            if let Err(e) = self.cache.clear_token() {
                tracing::warn!("Failed to clear unusable session: {:#}", e);
            }
            let form = &mut self.model.ui.auth_form;
            form.is_submitting = false;
            form.error = Some("Login failed: the server returned an unusable token".to_string());
        }
    }

    /// Reset all user state, forget the token and go back to login
    pub(crate) fn logout(&mut self) {
        tracing::info!("Logging out");
        if let Err(e) = self.cache.clear_token() {
            tracing::warn!("Failed to clear stored session: {:#}", e);
        }
        // Cached reports belong to the user that is leaving
        if let Err(e) = self.cache.clear_reports() {
            tracing::warn!("Failed to clear cached reports: {:#}", e);
        }
        self.client.set_token(None);
        self.model.logout();
    }

    /// The server rejected our token: drop the session
    pub(crate) fn handle_unauthorized(&mut self) {
        self.logout();
        self.model
            .show_toast("Error: session expired, please log in".to_string());
    }

    pub(crate) fn record_api_success(&mut self) {
        self.model.session.connection_state = ConnectionState::Connected;
    }

    /// Update connection state after a failure; true if the session was dropped
    pub(crate) fn record_api_failure(&mut self, error: &ApiError) -> bool {
        if matches!(error, ApiError::Unauthorized) {
            self.handle_unauthorized();
            return true;
        }

        self.model.session.connection_state = ConnectionState::Disconnected {
            error_type: errors::classify_api_error(error),
            message: error.to_string(),
        };
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::App;
    use sentui::model::Screen;

    #[test]
    fn test_unusable_stored_token_is_cleared() {
        let (mut app, mut requests) = App::for_tests();
        app.cache.save_token("not-a-jwt").unwrap();

        app.restore_session();

        assert_eq!(app.cache.load_token().unwrap(), None);
        assert_eq!(app.model.ui.screen, Screen::Login);
        assert!(requests.try_recv().is_err());
    }

    #[test]
    fn test_unusable_login_token_is_cleared() {
        let (mut app, _requests) = App::for_tests();

        app.complete_login("ann".to_string(), "not-a-jwt".to_string());

        assert_eq!(app.cache.load_token().unwrap(), None);
        assert!(!app.model.session.is_authenticated());
        assert!(app.model.ui.auth_form.error.is_some());
    }
}
