use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::identity::models::RegisterCommand;
use crate::identity::models::RegistrationOutcome;
use crate::inbound::http::router::AppState;

const MAX_FULL_NAME_CHARS: usize = 50;
const MAX_EMAIL_CHARS: usize = 100;
const MIN_PASSWORD_CHARS: usize = 8;
const MAX_PASSWORD_CHARS: usize = 50;
const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref outcome| ApiSuccess::new(StatusCode::CREATED, outcome.into()))
}

/// HTTP request body for self-service registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    full_name: String,
    email: String,
    password: String,
    confirm_password: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
enum ParseRegisterRequestError {
    #[error("Full name is required")]
    FullNameMissing,

    #[error("Full name must not exceed 50 characters")]
    FullNameTooLong,

    #[error("Full name can only contain letters and spaces")]
    FullNameCharacters,

    #[error("Email is required")]
    EmailMissing,

    #[error("Email must not exceed 100 characters")]
    EmailTooLong,

    #[error("Password must be between 8 and 50 characters long")]
    PasswordLength,

    #[error(
        "Password must contain at least one uppercase letter, one lowercase letter, \
         one number and one special character (@$!%*?&)"
    )]
    PasswordComplexity,

    #[error("Confirm password is required")]
    ConfirmPasswordMissing,
}

impl RegisterRequest {
    /// Request-shape checks. Semantic rules (matching passwords, email
    /// structure, name length) are left to the auth service.
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            return Err(ParseRegisterRequestError::FullNameMissing);
        }
        if full_name.chars().count() > MAX_FULL_NAME_CHARS {
            return Err(ParseRegisterRequestError::FullNameTooLong);
        }
        if !full_name
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace())
        {
            return Err(ParseRegisterRequestError::FullNameCharacters);
        }

        if self.email.trim().is_empty() {
            return Err(ParseRegisterRequestError::EmailMissing);
        }
        if self.email.chars().count() > MAX_EMAIL_CHARS {
            return Err(ParseRegisterRequestError::EmailTooLong);
        }

        validate_password(&self.password)?;

        if self.confirm_password.is_empty() {
            return Err(ParseRegisterRequestError::ConfirmPasswordMissing);
        }

        Ok(RegisterCommand {
            full_name: self.full_name,
            email: self.email,
            password: self.password,
            confirm_password: self.confirm_password,
        })
    }
}

fn validate_password(password: &str) -> Result<(), ParseRegisterRequestError> {
    let length = password.chars().count();
    if !(MIN_PASSWORD_CHARS..=MAX_PASSWORD_CHARS).contains(&length) {
        return Err(ParseRegisterRequestError::PasswordLength);
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if !(has_lower && has_upper && has_digit && has_special) {
        return Err(ParseRegisterRequestError::PasswordComplexity);
    }

    Ok(())
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub success: bool,
    pub message: String,
}

impl From<&RegistrationOutcome> for RegisterResponseData {
    fn from(outcome: &RegistrationOutcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message.clone(),
        }
    }
}
