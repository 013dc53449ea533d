use axum::extract::MatchedPath;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::access::errors::AccessDenied;
use crate::access::models::Access;
use crate::inbound::http::router::AppState;

/// Middleware that runs the access guard for the matched route and attaches
/// the verified [`Principal`](crate::access::models::Principal) to request
/// extensions.
pub async fn guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_default();

    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let access = state
        .access_guard
        .authorize(&method, &route, authorization.as_deref())
        .await
        .map_err(|denied| {
            log_denial(&method, &route, &denied);
            ApiError::from(denied)
        })?;

    if let Access::Granted(principal) = access {
        tracing::debug!(identity_id = %principal.id, role = %principal.role, "Access granted");
        req.extensions_mut().insert(principal);
    }

    Ok(next.run(req).await)
}

fn log_denial(method: &axum::http::Method, route: &str, denied: &AccessDenied) {
    match denied {
        AccessDenied::Undeclared { .. } => {
            tracing::error!(%method, route, reason = %denied, "Access denied")
        }
        AccessDenied::Store(_) => {
            tracing::error!(%method, route, reason = %denied, "Access check failed")
        }
        _ => tracing::warn!(%method, route, reason = %denied, "Access denied"),
    }
}
