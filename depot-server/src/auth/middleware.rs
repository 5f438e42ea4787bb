//! Request authentication and permission layers

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::AppError;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;

/// Paths under `/api` reachable without a token
const PUBLIC_API_PATHS: &[&str] = &["/api/auth/login", "/api/health"];

/// Applied to the whole router: validates the bearer token and injects
/// [`CurrentUser`] into request extensions.
///
/// CORS preflight, non-`/api` paths and [`PUBLIC_API_PATHS`] pass through
/// unauthenticated.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();
    let exempt = req.method() == http::Method::OPTIONS
        || !path.starts_with("/api/")
        || PUBLIC_API_PATHS.contains(&path);
    if exempt {
        return Ok(next.run(req).await);
    }

    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!(uri = %req.uri(), "Request without authorization header");
            AppError::unauthorized()
        })?;
    let token = JwtService::extract_from_header(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, uri = %req.uri(), "Token validation failed");
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;
    let user = CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {e}")))?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Per-route layer gating on one permission string.
///
/// ```ignore
/// Router::new()
///     .route("/", post(handler::create))
///     .layer(middleware::from_fn(require_permission("movements:create")))
/// ```
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !user.has_permission(permission) {
                tracing::warn!(
                    user_id = user.id,
                    username = %user.username,
                    required_permission = permission,
                    "Permission denied"
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {permission}"
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

/// Per-route layer for routes reserved to the admin role.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;

    if !user.is_admin() {
        tracing::warn!(
            user_id = user.id,
            username = %user.username,
            role = %user.role,
            "Admin-only route denied"
        );
        return Err(AppError::new(shared::ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}
