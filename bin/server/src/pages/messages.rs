//! Static UI text per locale.

use kumiai_locale::LocaleCode;

/// Text shown on the server-rendered pages.
#[derive(Debug)]
pub struct Messages {
    pub app_name: &'static str,
    pub sign_in_title: &'static str,
    pub sign_in_prompt: &'static str,
    pub sign_in_action: &'static str,
    pub welcome: &'static str,
    pub open_dashboard: &'static str,
    pub dashboard_title: &'static str,
    pub signed_in_as: &'static str,
    pub role: &'static str,
    pub not_found_title: &'static str,
    pub not_found_body: &'static str,
    pub back_home: &'static str,
}

static EN: Messages = Messages {
    app_name: "Kumiai",
    sign_in_title: "Sign in",
    sign_in_prompt: "Sign in with your organization account to continue.",
    sign_in_action: "Continue to sign in",
    welcome: "Welcome back.",
    open_dashboard: "Go to dashboard",
    dashboard_title: "Dashboard",
    signed_in_as: "Signed in as",
    role: "Role",
    not_found_title: "Page not found",
    not_found_body: "The page you were looking for does not exist.",
    back_home: "Back to home",
};

static JA: Messages = Messages {
    app_name: "組合",
    sign_in_title: "ログイン",
    sign_in_prompt: "続行するには組織のアカウントでログインしてください。",
    sign_in_action: "ログインへ進む",
    welcome: "おかえりなさい。",
    open_dashboard: "ダッシュボードへ",
    dashboard_title: "ダッシュボード",
    signed_in_as: "ログイン中のユーザー",
    role: "ロール",
    not_found_title: "ページが見つかりません",
    not_found_body: "お探しのページは存在しません。",
    back_home: "ホームに戻る",
};

/// Returns the messages for `locale`, falling back to English for locales
/// without a catalogue.
#[must_use]
pub fn for_locale(locale: LocaleCode) -> &'static Messages {
    match locale {
        LocaleCode::JA => &JA,
        _ => &EN,
    }
}
