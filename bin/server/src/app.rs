//! Router assembly.

use axum::{Router, middleware};
use std::sync::Arc;

use crate::{auth::AppState, auth::request_gate, pages, procedures};

/// Builds the page and procedure routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(pages::routes())
        .merge(procedures::routes())
        .fallback(pages::not_found)
        .with_state(state)
}

/// Puts the request gate in front of `inner`.
///
/// Middleware added with `Router::layer` runs after routing, so the gate
/// wraps a router whose only job is to forward to `inner`. That way the
/// locale rewrite happens before `inner` picks a route.
pub fn gated(inner: Router, state: Arc<AppState>) -> Router {
    Router::new()
        .fallback_service(inner)
        .layer(middleware::from_fn_with_state(state, request_gate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{
            Request, StatusCode,
            header::{CONTENT_LANGUAGE, COOKIE, LOCATION},
        },
        response::Response,
    };
    use kumiai_access::{
        RoleLookupError, RoleSource, SessionId, SessionLookupError, SessionReader, SessionState,
    };
    use kumiai_core::UserId;
    use kumiai_gate::{Gate, GateConfig};
    use std::collections::HashMap;
    use tower::ServiceExt;

    #[derive(Default)]
    struct Directory {
        sessions: HashMap<String, UserId>,
        roles: HashMap<UserId, String>,
        store_down: bool,
    }

    impl Directory {
        fn with_user(mut self, token: &str, role: Option<&str>) -> Self {
            let user_id = UserId::new();
            self.sessions.insert(token.to_string(), user_id);
            if let Some(role) = role {
                self.roles.insert(user_id, role.to_string());
            }
            self
        }
    }

    #[async_trait]
    impl SessionReader for Directory {
        async fn resolve_session(
            &self,
            session_id: &SessionId,
        ) -> kumiai_core::Result<SessionState, SessionLookupError> {
            if self.store_down {
                return Err(SessionLookupError::Unavailable {
                    reason: "pool timed out".to_string(),
                }
                .into());
            }
            Ok(match self.sessions.get(session_id.as_str()) {
                Some(user_id) => SessionState::Authenticated { user_id: *user_id },
                None => SessionState::Anonymous,
            })
        }
    }

    #[async_trait]
    impl RoleSource for Directory {
        async fn get_user_role(
            &self,
            user_id: UserId,
        ) -> kumiai_core::Result<Option<String>, RoleLookupError> {
            Ok(self.roles.get(&user_id).cloned())
        }
    }

    fn app(directory: Directory) -> Router {
        let directory = Arc::new(directory);
        let gate = Gate::new(GateConfig::default(), directory.clone());
        let state = Arc::new(AppState::new(gate, directory, SessionConfig::default()));
        gated(router(state.clone()), state)
    }

    fn directory() -> Directory {
        Directory::default()
            .with_user("viewer-token", Some("VIEWER"))
            .with_user("member-token", Some("MEMBER"))
            .with_user("admin-token", Some("ADMIN"))
            .with_user("odd-token", Some("superuser"))
    }

    async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = token {
            request = request.header(COOKIE, format!("session={token}"));
        }
        app.clone()
            .oneshot(request.body(Body::empty()).expect("request"))
            .await
            .expect("infallible")
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf-8")
    }

    async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_str(&body_text(response).await).expect("json")
    }

    fn location(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    fn language(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(CONTENT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn anonymous_root_redirects_to_default_locale() {
        let response = get(&app(directory()), "/", None).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), Some("/en"));
    }

    #[tokio::test]
    async fn anonymous_locale_root_renders_sign_in() {
        let response = get(&app(directory()), "/ja", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(language(&response), Some("ja"));

        let html = body_text(response).await;
        assert!(html.contains("ログイン"));
        assert!(html.contains(r#"href="/api/auth/signin""#));
    }

    #[tokio::test]
    async fn anonymous_protected_page_redirects() {
        let app = app(directory());

        let response = get(&app, "/en/dashboard", None).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), Some("/en"));

        let response = get(&app, "/ja/projects/42?tab=members", Some("stale-token")).await;
        assert_eq!(location(&response), Some("/ja"));
    }

    #[tokio::test]
    async fn unsupported_locale_prefix_redirects_to_its_root() {
        let app = app(directory());

        let response = get(&app, "/fr/dashboard", None).await;
        assert_eq!(location(&response), Some("/fr"));

        // The unsupported root itself passes, renders in the default locale,
        // and matches no page.
        let response = get(&app, "/fr", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(language(&response), Some("en"));
    }

    #[tokio::test]
    async fn authenticated_request_is_routed_without_prefix() {
        let response = get(&app(directory()), "/ja/dashboard", Some("member-token")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(language(&response), Some("ja"));

        let html = body_text(response).await;
        assert!(html.contains("ダッシュボード"));
        assert!(html.contains("Member"));
    }

    #[tokio::test]
    async fn authenticated_unknown_page_is_localized_404() {
        let response = get(&app(directory()), "/ja/projects/42", Some("viewer-token")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(language(&response), Some("ja"));
    }

    #[tokio::test]
    async fn unprefixed_authenticated_path_uses_default_locale() {
        let response = get(&app(directory()), "/dashboard", Some("admin-token")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(language(&response), Some("en"));
    }

    #[tokio::test]
    async fn api_paths_bypass_the_gate() {
        let app = app(directory());

        let response = get(&app, "/api/session", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(language(&response), None);
        let json = body_json(response).await;
        assert_eq!(json["authenticated"], false);

        let response = get(&app, "/api/nothing-here", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn asset_paths_bypass_the_gate() {
        let response = get(&app(directory()), "/_next/chunk.js", None).await;
        assert_ne!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert!(location(&response).is_none());
    }

    #[tokio::test]
    async fn session_procedure_reports_caller() {
        let response = get(&app(directory()), "/api/session", Some("member-token")).await;
        let json = body_json(response).await;
        assert_eq!(json["authenticated"], true);
        assert_eq!(json["role"], "MEMBER");
    }

    #[tokio::test]
    async fn admin_procedure_enforces_rank() {
        let app = app(directory());

        let response = get(&app, "/api/admin/session", Some("viewer-token")).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = body_json(response).await;
        assert_eq!(json["code"], "FORBIDDEN");
        assert!(json["message"].as_str().unwrap_or_default().contains("Admin"));

        let response = get(&app, "/api/admin/session", Some("admin-token")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(&app, "/api/admin/session", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn member_procedure_treats_unknown_roles_as_viewer() {
        let app = app(directory());

        let response = get(&app, "/api/member/session", Some("odd-token")).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = get(&app, "/api/member/session", Some("admin-token")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn role_check_procedure() {
        let app = app(directory());

        let response = get(&app, "/api/roles/MEMBER", Some("member-token")).await;
        let json = body_json(response).await;
        assert_eq!(json["role"], "MEMBER");
        assert_eq!(json["allowed"], true);

        let response = get(&app, "/api/roles/ADMIN", Some("member-token")).await;
        assert_eq!(body_json(response).await["allowed"], false);

        let response = get(&app, "/api/roles/OWNER", Some("member-token")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn session_store_outage_keeps_locale_roots_public() {
        let mut directory = directory();
        directory.store_down = true;
        let app = app(directory);

        let response = get(&app, "/ja", Some("admin-token")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(&app, "/ja/dashboard", Some("admin-token")).await;
        assert_eq!(location(&response), Some("/ja"));

        let response = get(&app, "/api/admin/session", Some("admin-token")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
