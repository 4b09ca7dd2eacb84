//! Form state for the auth screens and the single-text demo

use crate::logic::validation::{self, CredentialErrors};
use crate::model::types::Tonality;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthField {
    Login,
    Password,
}

/// Login / register form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthForm {
    pub login: String,
    pub password: String,
    pub focus: AuthField,
    pub errors: CredentialErrors,
    /// Server-side failure shown under the form
    pub error: Option<String>,
    pub is_submitting: bool,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            login: String::new(),
            password: String::new(),
            focus: AuthField::Login,
            errors: CredentialErrors::default(),
            error: None,
            is_submitting: false,
        }
    }

    /// Empty form with the login prefilled (after registering)
    pub fn with_login(login: &str) -> Self {
        Self {
            login: login.to_string(),
            focus: AuthField::Password,
            ..Self::new()
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Login => &mut self.login,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
        self.error = None;
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
        self.error = None;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AuthField::Login => AuthField::Password,
            AuthField::Password => AuthField::Login,
        };
    }

    /// Validate both fields; true when the form can be sent
    pub fn validate(&mut self) -> bool {
        self.errors = validation::validate_credentials(&self.login, &self.password);
        self.errors.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting
    }
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a single-text prediction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoResult {
    pub tonality: Tonality,
    /// Text the server echoed back (or the input)
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DemoState {
    pub text: String,
    pub result: Option<DemoResult>,
    pub error: Option<String>,
    pub is_submitting: bool,
}

impl DemoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to send, or an inline error when it is blank
    pub fn prepare_submit(&mut self) -> Option<String> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            self.error = Some("Enter review text".to_string());
            return None;
        }

        self.error = None;
        self.is_submitting = true;
        Some(trimmed.to_string())
    }

    pub fn set_result(&mut self, tonality: Tonality, echoed: Option<String>) {
        let text = echoed
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.text.trim().to_string());
        self.result = Some(DemoResult { tonality, text });
        self.error = None;
        self.is_submitting = false;
    }

    pub fn set_failure(&mut self) {
        self.result = None;
        self.error = Some("Could not determine tonality. Try again.".to_string());
        self.is_submitting = false;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
