//! Credential validation for the login and register forms

pub const MIN_LOGIN_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Per-field problems; `None` means the field is fine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialErrors {
    pub login: Option<String>,
    pub password: Option<String>,
}

impl CredentialErrors {
    pub fn is_empty(&self) -> bool {
        self.login.is_none() && self.password.is_none()
    }
}

pub fn validate_login(login: &str) -> Option<String> {
    if login.trim().is_empty() {
        return Some("Enter your login".to_string());
    }
    if login.chars().count() < MIN_LOGIN_LEN {
        return Some(format!("Login must be at least {} characters", MIN_LOGIN_LEN));
    }
    None
}

pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Enter your password".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    None
}

pub fn validate_credentials(login: &str, password: &str) -> CredentialErrors {
    CredentialErrors {
        login: validate_login(login),
        password: validate_password(password),
    }
}
