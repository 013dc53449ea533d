use std::sync::Arc;
use std::time::Duration;

use auth::AccessPolicy;
use auth::Role;
use axum::body::Body;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_admin::create_admin;
use super::handlers::create_room::create_room;
use super::handlers::delete_room::delete_room;
use super::handlers::get_room::get_room;
use super::handlers::identity_stats::identity_stats;
use super::handlers::list_identities::list_identities;
use super::handlers::list_rooms::list_rooms;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::register::register;
use super::handlers::update_room::update_room;
use super::middleware::guard;
use crate::access::guard::AccessGuardPort;
use crate::access::models::AccessPolicies;
use crate::identity::ports::AuthServicePort;
use crate::room::ports::RoomServicePort;

pub const REGISTER: &str = "/api/auth/register";
pub const LOGIN: &str = "/api/auth/login";
pub const ME: &str = "/api/auth/me";
pub const ADMIN_CREATE: &str = "/api/admin/create";
pub const ADMIN_USERS: &str = "/api/admin/users";
pub const ADMIN_USER_STATS: &str = "/api/admin/users/stats";
pub const ROOMS: &str = "/api/rooms";
pub const ROOM: &str = "/api/rooms/:room_id";

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub room_service: Arc<dyn RoomServicePort>,
    pub access_guard: Arc<dyn AccessGuardPort>,
}

/// Access policy of every route served by [`create_router`].
///
/// Routes missing here are refused by the guard.
pub fn access_policies() -> AccessPolicies {
    let admin = AccessPolicy::only(Role::Admin);
    let room_editors = AccessPolicy::Roles([Role::Admin, Role::Collaborator].into());

    AccessPolicies::new()
        .declare(Method::POST, REGISTER, AccessPolicy::Public)
        .declare(Method::POST, LOGIN, AccessPolicy::Public)
        .declare(Method::GET, ME, AccessPolicy::authenticated())
        .declare(Method::POST, ADMIN_CREATE, admin.clone())
        .declare(Method::GET, ADMIN_USERS, admin.clone())
        .declare(Method::GET, ADMIN_USER_STATS, admin.clone())
        .declare(Method::GET, ROOMS, AccessPolicy::Public)
        .declare(Method::POST, ROOMS, admin.clone())
        .declare(Method::GET, ROOM, AccessPolicy::Public)
        .declare(Method::PATCH, ROOM, room_editors)
        .declare(Method::DELETE, ROOM, admin)
}

pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route(REGISTER, post(register))
        .route(LOGIN, post(login))
        .route(ME, get(me))
        .route(ADMIN_CREATE, post(create_admin))
        .route(ADMIN_USERS, get(list_identities))
        .route(ADMIN_USER_STATS, get(identity_stats))
        .route(ROOMS, get(list_rooms).post(create_room))
        .route(ROOM, get(get_room).patch(update_room).delete(delete_room))
        .route_layer(middleware::from_fn_with_state(state.clone(), guard));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_has_a_policy() {
        let policies = access_policies();
        let routes = [
            (Method::POST, REGISTER),
            (Method::POST, LOGIN),
            (Method::GET, ME),
            (Method::POST, ADMIN_CREATE),
            (Method::GET, ADMIN_USERS),
            (Method::GET, ADMIN_USER_STATS),
            (Method::GET, ROOMS),
            (Method::POST, ROOMS),
            (Method::GET, ROOM),
            (Method::PATCH, ROOM),
            (Method::DELETE, ROOM),
        ];

        for (method, route) in &routes {
            assert!(
                policies.policy_for(method, route).is_some(),
                "{} {} has no policy",
                method,
                route
            );
        }
        assert_eq!(policies.len(), routes.len());
    }

    #[test]
    fn test_admin_surface_is_admin_only() {
        let policies = access_policies();

        for (method, route) in [
            (Method::POST, ADMIN_CREATE),
            (Method::GET, ADMIN_USERS),
            (Method::GET, ADMIN_USER_STATS),
        ] {
            let policy = policies.policy_for(&method, route).unwrap();
            assert!(policy.permits(Role::Admin));
            assert!(!policy.permits(Role::Collaborator));
            assert!(!policy.permits(Role::Customer));
        }
    }
}
