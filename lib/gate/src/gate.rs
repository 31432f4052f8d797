//! Session-aware gate evaluation.

use std::sync::Arc;

use kumiai_access::{SessionId, SessionReader, SessionState};
use kumiai_locale::RequestPath;
use tracing::{debug, instrument, warn};

use crate::config::GateConfig;
use crate::decision::{GateDecision, Passage, decide};

/// The request gate: static configuration plus an injected session reader.
///
/// Holds no per-request state, so one instance serves every request.
#[derive(Clone)]
pub struct Gate {
    config: Arc<GateConfig>,
    sessions: Arc<dyn SessionReader>,
}

impl Gate {
    /// Creates a gate.
    #[must_use]
    pub fn new(config: GateConfig, sessions: Arc<dyn SessionReader>) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
        }
    }

    /// Returns the gate configuration.
    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Returns true if `path` bypasses the gate.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        RequestPath::parse(path).is_excluded(self.config.excluded_prefixes())
    }

    /// Reads the authentication state for a session token.
    ///
    /// A missing token is anonymous without a lookup. Lookup failures are
    /// logged and treated as anonymous so the locale roots stay reachable
    /// while the session store is down.
    pub async fn authenticate(&self, session_id: Option<&SessionId>) -> SessionState {
        let Some(session_id) = session_id else {
            return SessionState::Anonymous;
        };

        match self.sessions.resolve_session(session_id).await {
            Ok(state) => state,
            Err(report) => {
                warn!(error = %report, "session lookup failed; treating request as unauthenticated");
                SessionState::Anonymous
            }
        }
    }

    /// Produces the decision for one request.
    ///
    /// Excluded paths pass before any session lookup happens.
    #[instrument(skip(self, session_id), fields(has_session = session_id.is_some()))]
    pub async fn evaluate(&self, path: &str, session_id: Option<&SessionId>) -> GateDecision {
        if self.is_excluded(path) {
            return GateDecision::Pass(Passage::Excluded);
        }

        let state = self.authenticate(session_id).await;
        let decision = decide(path, state.is_authenticated(), &self.config);

        match &decision {
            GateDecision::Pass(Passage::Localized(context)) => debug!(
                locale = %context.locale(),
                downstream = context.downstream_path(),
                authenticated = context.is_authenticated(),
                "gate pass"
            ),
            GateDecision::Pass(Passage::Excluded) => debug!("gate pass (excluded)"),
            GateDecision::Redirect(target) => debug!(location = target.as_str(), "gate redirect"),
        }

        decision
    }
}

impl std::fmt::Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gate")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
