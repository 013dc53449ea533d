use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::access::errors::AccessDenied;
use crate::domain::errors::ErrorClass;
use crate::identity::errors::IdentityError;
use crate::room::errors::RoomError;

pub mod create_admin;
pub mod create_room;
pub mod delete_room;
pub mod get_room;
pub mod identity_stats;
pub mod list_identities;
pub mod list_rooms;
pub mod login;
pub mod me;
pub mod register;
pub mod update_room;

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
const FORBIDDEN_MESSAGE: &str = "Forbidden resource";
const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    /// Map a domain error class to a response. Internal details are logged
    /// here and replaced by a generic message.
    fn from_class(class: ErrorClass, message: String) -> Self {
        match class {
            ErrorClass::Validation => ApiError::BadRequest(message),
            ErrorClass::Authentication => ApiError::Unauthorized(message),
            ErrorClass::Authorization => ApiError::Forbidden(message),
            ErrorClass::Conflict => ApiError::Conflict(message),
            ErrorClass::NotFound => ApiError::NotFound(message),
            ErrorClass::Internal => {
                tracing::error!(error = %message, "Request failed");
                ApiError::InternalServerError(INTERNAL_MESSAGE.to_string())
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::from_class(ErrorClass::Internal, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        Self::from_class(err.class(), err.to_string())
    }
}

impl From<RoomError> for ApiError {
    fn from(err: RoomError) -> Self {
        Self::from_class(err.class(), err.to_string())
    }
}

/// Guard refusals carry only a fixed message; the reason stays in the logs.
impl From<AccessDenied> for ApiError {
    fn from(err: AccessDenied) -> Self {
        let message = match err.class() {
            ErrorClass::Authentication => UNAUTHORIZED_MESSAGE.to_string(),
            ErrorClass::Authorization => FORBIDDEN_MESSAGE.to_string(),
            _ => err.to_string(),
        };
        Self::from_class(err.class(), message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use auth::Role;
    use auth::TokenRejection;

    use super::*;

    #[test]
    fn test_access_denied_messages_are_uninformative() {
        let expired = ApiError::from(AccessDenied::Unauthenticated(TokenRejection::Expired));
        let forged = ApiError::from(AccessDenied::Unauthenticated(TokenRejection::BadSignature));
        let gone = ApiError::from(AccessDenied::IdentityGone);

        assert_eq!(expired, ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()));
        assert_eq!(expired, forged);
        assert_eq!(expired, gone);

        assert_eq!(
            ApiError::from(AccessDenied::Forbidden {
                role: Role::Customer
            }),
            ApiError::Forbidden(FORBIDDEN_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = ApiError::from(IdentityError::DatabaseError(
            "password authentication failed for user postgres".to_string(),
        ));

        assert_eq!(err, ApiError::InternalServerError(INTERNAL_MESSAGE.to_string()));
    }

    #[test]
    fn test_identity_error_statuses() {
        assert_eq!(
            ApiError::from(IdentityError::EmailTaken),
            ApiError::Conflict("Email already exists".to_string())
        );
        assert_eq!(
            ApiError::from(IdentityError::InvalidCredentials),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
        assert!(matches!(
            ApiError::from(IdentityError::PasswordMismatch),
            ApiError::BadRequest(_)
        ));
    }
}
