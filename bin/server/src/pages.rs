//! Server-rendered, localized pages.
//!
//! Every request that reaches these handlers went through the gate, so the
//! [`RequestContext`] extension is present and the path has already had its
//! locale prefix removed: `/ja` arrives here as `/`, `/ja/dashboard` as
//! `/dashboard`.

pub mod messages;

use axum::{
    Extension, Router,
    extract::State,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use kumiai_access::Role;
use kumiai_gate::RequestContext;
use kumiai_locale::LocaleCode;
use leptos::prelude::*;
use std::sync::Arc;

use crate::auth::{AppState, OptionalAuth};
use crate::error::ProcedureError;
use messages::Messages;

/// Routes for the page tree.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(locale_root))
        .route("/dashboard", get(dashboard))
}

/// The locale root: sign-in for anonymous visitors, a welcome otherwise.
async fn locale_root(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<RequestContext>,
) -> Html<String> {
    render_locale_root(
        context.locale(),
        context.is_authenticated(),
        &state.session_config.sign_in_url,
    )
}

fn render_locale_root(locale: LocaleCode, authenticated: bool, sign_in_url: &str) -> Html<String> {
    let text = messages::for_locale(locale);
    if authenticated {
        document(
            locale,
            text,
            text.app_name,
            view! { <Welcome text=text dashboard_href=localized_href(locale, "/dashboard")/> },
        )
    } else {
        document(
            locale,
            text,
            text.sign_in_title,
            view! { <SignInPrompt text=text sign_in_url=sign_in_url.to_string()/> },
        )
    }
}

async fn dashboard(
    Extension(context): Extension<RequestContext>,
    OptionalAuth(caller): OptionalAuth,
) -> Response {
    let locale = context.locale();
    // The session can lapse between the gate and this handler.
    let Some(caller) = caller else {
        return Redirect::temporary(&locale.root_path()).into_response();
    };

    let text = messages::for_locale(locale);
    let role = caller.role().and_then(Role::parse).unwrap_or(Role::Viewer);
    let body = view! {
        <dl>
            <dt>{text.signed_in_as}</dt>
            <dd>{caller.user_id.to_string()}</dd>
            <dt>{text.role}</dt>
            <dd>{role.label()}</dd>
        </dl>
    };

    document(locale, text, text.dashboard_title, body).into_response()
}

/// Fallback for unmatched paths.
///
/// Gated paths get a localized page; excluded paths (`/api/...`) get the
/// JSON error procedures use.
pub async fn not_found(parts: Parts) -> Response {
    let Some(context) = parts.extensions.get::<RequestContext>() else {
        return ProcedureError::NotFound.into_response();
    };

    let locale = context.locale();
    let text = messages::for_locale(locale);
    let body = view! {
        <p>{text.not_found_body}</p>
        <a href=locale.root_path()>{text.back_home}</a>
    };

    (
        StatusCode::NOT_FOUND,
        document(locale, text, text.not_found_title, body),
    )
        .into_response()
}

/// Sign-in prompt shown on a locale root to anonymous visitors.
#[component]
fn SignInPrompt(text: &'static Messages, sign_in_url: String) -> impl IntoView {
    view! {
        <p>{text.sign_in_prompt}</p>
        <a class="button" href=sign_in_url rel="external">{text.sign_in_action}</a>
    }
}

#[component]
fn Welcome(text: &'static Messages, dashboard_href: String) -> impl IntoView {
    view! {
        <p>{text.welcome}</p>
        <a href=dashboard_href>{text.open_dashboard}</a>
    }
}

fn localized_href(locale: LocaleCode, path: &str) -> String {
    format!("{}{path}", locale.root_path())
}

/// Wraps `body` in the page shell and renders it.
fn document(
    locale: LocaleCode,
    text: &'static Messages,
    title: &'static str,
    body: impl IntoView + 'static,
) -> Html<String> {
    let html = view! {
        <!DOCTYPE html>
        <html lang=locale.to_string()>
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{format!("{title} | {}", text.app_name)}</title>
                <link rel="stylesheet" href="/_next/static/main.css"/>
            </head>
            <body>
                <main>
                    <h1>{title}</h1>
                    {body}
                </main>
            </body>
        </html>
    };
    Html(html.to_html())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_url_is_escaped_in_attribute() {
        let Html(html) = render_locale_root(LocaleCode::EN, false, r#"/signin?next="a"&x=1"#);
        assert!(html.contains("&quot;a&quot;"));
        assert!(html.contains("&amp;x=1"));
        assert!(!html.contains(r#"next="a""#));
    }

    #[test]
    fn anonymous_root_links_to_sign_in() {
        let Html(html) = render_locale_root(LocaleCode::JA, false, "/api/auth/signin");
        assert!(html.contains(r#"href="/api/auth/signin""#));
        assert!(html.contains("ログイン"));
    }

    #[test]
    fn signed_in_root_links_to_localized_dashboard() {
        let Html(html) = render_locale_root(LocaleCode::JA, true, "/api/auth/signin");
        assert!(html.contains(r#"href="/ja/dashboard""#));
        assert!(!html.contains("/api/auth/signin"));
    }

    #[test]
    fn document_sets_lang() {
        let Html(html) = document(
            LocaleCode::JA,
            messages::for_locale(LocaleCode::JA),
            "t",
            view! { <p>"b"</p> },
        );
        assert!(html.contains(r#"<html lang="ja""#));
        assert!(html.contains("<title>t | 組合</title>"));
    }

    #[test]
    fn localized_href_prefixes_locale() {
        assert_eq!(localized_href(LocaleCode::EN, "/dashboard"), "/en/dashboard");
    }
}
