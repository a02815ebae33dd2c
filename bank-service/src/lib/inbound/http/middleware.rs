use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use auth::Payload;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the verified token payload through the request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub payload: Payload,
}

/// Middleware that verifies bearer tokens and attaches the payload to the request.
///
/// Sits in front of every protected route. It only decides whether the
/// request may proceed; it never issues or refreshes tokens. Handlers read
/// the [`AuthenticatedUser`] extension to learn who is calling.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    // Expiry is reported separately from tampering
    let payload = state.authenticator.verify_token(token).map_err(|e| {
        tracing::warn!(reason = %e, "Rejected access token");
        ApiError::Unauthorized(e.to_string()).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { payload });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("authorization header missing".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("invalid authorization header".to_string()).into_response()
    })?;

    // Expect exactly two whitespace-separated fields: <scheme> <token>
    let mut fields = auth_str.split_whitespace();
    let (scheme, token) = match (fields.next(), fields.next(), fields.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => {
            return Err(
                ApiError::Unauthorized("invalid authorization header".to_string()).into_response(),
            )
        }
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(
            ApiError::Unauthorized("unsupported authorization type".to_string()).into_response(),
        );
    }

    Ok(token)
}
