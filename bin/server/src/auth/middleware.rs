//! Gate middleware and authentication extractors for Axum.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{
        HeaderValue, Uri,
        header::CONTENT_LANGUAGE,
        request::Parts,
        uri::PathAndQuery,
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use kumiai_access::{AuthorizationError, Role, SessionId};
use kumiai_core::UserId;
use kumiai_gate::{GateDecision, Passage};
use std::sync::Arc;

use super::AppState;
use crate::config::SessionConfig;
use crate::error::ProcedureError;

fn session_cookie(jar: &CookieJar, config: &SessionConfig) -> Option<SessionId> {
    jar.get(&config.cookie_name)
        .map(|cookie| SessionId::new(cookie.value().to_string()))
        .filter(|id| !id.as_str().is_empty())
}

/// Runs the request gate in front of the router.
///
/// Must wrap the whole router so that the locale rewrite is visible to
/// routing.
pub async fn request_gate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session_id = session_cookie(&jar, &state.session_config);
    let path = request.uri().path().to_owned();

    match state.gate.evaluate(&path, session_id.as_ref()).await {
        GateDecision::Redirect(target) => Redirect::temporary(target.as_str()).into_response(),
        GateDecision::Pass(Passage::Excluded) => next.run(request).await,
        GateDecision::Pass(Passage::Localized(context)) => {
            rewrite_path(&mut request, context.downstream_path());
            let language = HeaderValue::from_str(context.locale().as_str());
            request.extensions_mut().insert(context);

            let mut response = next.run(request).await;
            if let Ok(language) = language {
                response.headers_mut().insert(CONTENT_LANGUAGE, language);
            }
            response
        }
    }
}

/// Replaces the request path, keeping the query string.
fn rewrite_path(request: &mut Request, path: &str) {
    if request.uri().path() == path {
        return;
    }

    let path_and_query = match request.uri().query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut parts = request.uri().clone().into_parts();
    let rewritten = path_and_query
        .parse::<PathAndQuery>()
        .map_err(|e| e.to_string())
        .and_then(|pq| {
            parts.path_and_query = Some(pq);
            Uri::from_parts(parts).map_err(|e| e.to_string())
        });

    match rewritten {
        Ok(uri) => *request.uri_mut() = uri,
        Err(error) => {
            tracing::warn!(%error, path, "could not rewrite request path; routing original");
        }
    }
}

/// An authenticated caller and the role stored on their user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// The caller's user ID.
    pub user_id: UserId,
    /// The raw role value, if the user record has one.
    pub role: Option<String>,
}

impl Caller {
    /// Returns the raw role value.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Fails unless the caller's role ranks at or above `required`.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` naming `required`.
    pub fn require(&self, required: Role) -> Result<(), AuthorizationError> {
        kumiai_access::require_role(self.role(), required)
    }
}

/// Extractor for requiring an authenticated caller.
pub struct RequireAuth(pub Caller);

impl<S> FromRequestParts<S> for RequireAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ProcedureError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = session_cookie(&jar, &app_state.session_config);

        let user_id = app_state
            .gate
            .authenticate(session_id.as_ref())
            .await
            .user_id()
            .ok_or(AuthorizationError::Unauthenticated)?;

        let role = match app_state.roles.get_user_role(user_id).await {
            Ok(role) => role,
            Err(report) => {
                tracing::warn!(
                    error = %report,
                    user_id = %user_id,
                    "role lookup failed; treating caller as lowest rank"
                );
                None
            }
        };

        Ok(RequireAuth(Caller { user_id, role }))
    }
}

/// Extractor for optionally getting the authenticated caller.
///
/// Returns None if the caller is not authenticated.
pub struct OptionalAuth(pub Option<Caller>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match RequireAuth::from_request_parts(parts, state).await {
            Ok(RequireAuth(caller)) => Ok(OptionalAuth(Some(caller))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

/// Extractor for requiring a caller of at least member rank.
pub struct RequireMember(pub Caller);

impl<S> FromRequestParts<S> for RequireMember
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ProcedureError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(caller) = RequireAuth::from_request_parts(parts, state).await?;
        caller.require(Role::Member)?;
        Ok(RequireMember(caller))
    }
}

/// Extractor for requiring an admin caller.
pub struct RequireAdmin(pub Caller);

impl<S> FromRequestParts<S> for RequireAdmin
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ProcedureError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(caller) = RequireAuth::from_request_parts(parts, state).await?;

        if let Err(err) = kumiai_access::require_admin(caller.role()) {
            tracing::warn!(user_id = %caller.user_id, "non-admin caller attempted admin procedure");
            return Err(err.into());
        }

        Ok(RequireAdmin(caller))
    }
}
