//! Pure gate classification.

use kumiai_locale::{LocaleCode, RequestPath};

use crate::config::GateConfig;

/// Everything the gate learned about a request it let through.
///
/// Built per request and attached to the request for downstream rendering;
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    raw_path: String,
    locale_segment: Option<LocaleCode>,
    locale: LocaleCode,
    authenticated: bool,
    downstream_path: String,
}

impl RequestContext {
    /// The path as it arrived.
    #[must_use]
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    /// The leading segment, if it looked like a locale code.
    #[must_use]
    pub fn locale_segment(&self) -> Option<LocaleCode> {
        self.locale_segment
    }

    /// The locale to render in. Always supported.
    #[must_use]
    pub fn locale(&self) -> LocaleCode {
        self.locale
    }

    /// Whether the request carried a valid session.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The path downstream routing should match, with any honored locale
    /// prefix removed.
    #[must_use]
    pub fn downstream_path(&self) -> &str {
        &self.downstream_path
    }
}

/// How a passing request continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Passage {
    /// The path bypasses the gate; it is forwarded untouched.
    Excluded,
    /// The path was localized; downstream sees the attached context.
    Localized(RequestContext),
}

/// Target of a gate redirect. Always a bare locale root such as `/en`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    locale: LocaleCode,
    path: String,
}

impl RedirectTarget {
    fn locale_root(locale: LocaleCode) -> Self {
        Self {
            locale,
            path: locale.root_path(),
        }
    }

    /// The locale whose root is targeted.
    #[must_use]
    pub fn locale(&self) -> LocaleCode {
        self.locale
    }

    /// The redirect location.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.path
    }
}

/// The single, terminal routing outcome for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through.
    Pass(Passage),
    /// Send the requester to a locale root.
    Redirect(RedirectTarget),
}

impl GateDecision {
    /// Returns true for [`GateDecision::Pass`].
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass(_))
    }

    /// Returns the request context of a localized pass.
    #[must_use]
    pub fn context(&self) -> Option<&RequestContext> {
        match self {
            Self::Pass(Passage::Localized(context)) => Some(context),
            _ => None,
        }
    }

    /// Returns the redirect location, if this is a redirect.
    #[must_use]
    pub fn redirect_location(&self) -> Option<&str> {
        match self {
            Self::Redirect(target) => Some(target.as_str()),
            Self::Pass(_) => None,
        }
    }
}

/// Classifies a request from its path and session presence.
///
/// In order:
/// - excluded paths pass untouched;
/// - authenticated requests and locale roots pass with locale resolution;
/// - everything else redirects to a locale root, dropping the rest of the
///   path. The root's locale comes from the leading segment when it looks
///   like a locale code, supported or not, and from the default otherwise.
#[must_use]
pub fn decide(path: &str, authenticated: bool, config: &GateConfig) -> GateDecision {
    let request_path = RequestPath::parse(path);

    if request_path.is_excluded(config.excluded_prefixes()) {
        return GateDecision::Pass(Passage::Excluded);
    }

    let locales = config.locales();
    let resolution = locales.resolve(&request_path);

    if authenticated || request_path.is_locale_root() {
        return GateDecision::Pass(Passage::Localized(RequestContext {
            raw_path: path.to_string(),
            locale_segment: resolution.prefix(),
            locale: resolution.locale(),
            authenticated,
            downstream_path: resolution.downstream_path().to_string(),
        }));
    }

    GateDecision::Redirect(RedirectTarget::locale_root(
        locales.redirect_locale(&request_path),
    ))
}
