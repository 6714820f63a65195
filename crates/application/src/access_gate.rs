//! Role gate wrapped around protected views.

use serde::Serialize;
use servicedesk_core::{Principal, Role};

use crate::session_service::SessionState;

/// Built-in content shown when the gate does not render its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// Session resolution is still running.
    Loading,
    /// Nobody is signed in.
    LoginRequired,
    /// The principal lacks the required role.
    AccessDenied,
}

impl Placeholder {
    /// Returns the default message for this placeholder.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Loading => "Loading...",
            Self::LoginRequired => "Please log in to continue",
            Self::AccessDenied => "Access denied. Insufficient permissions.",
        }
    }
}

/// What the gate decided for one session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision<'a> {
    /// Children may render for this principal.
    Granted(&'a Principal),
    /// Children must not render.
    Blocked(Placeholder),
}

/// Output of [`AccessGate::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateView<T> {
    /// The protected children.
    Children(T),
    /// The caller-supplied fallback.
    Fallback(T),
    /// A built-in placeholder, used when no fallback was supplied or while loading.
    Placeholder(Placeholder),
}

impl<T> GateView<T> {
    /// Returns the protected children, if they were rendered.
    pub fn into_children(self) -> Option<T> {
        match self {
            Self::Children(children) => Some(children),
            Self::Fallback(_) | Self::Placeholder(_) => None,
        }
    }
}

/// Guard permitting a view only for signed-in principals, optionally of one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessGate {
    required_role: Option<Role>,
}

impl AccessGate {
    /// Gate admitting any signed-in principal.
    #[must_use]
    pub fn authenticated() -> Self {
        Self {
            required_role: None,
        }
    }

    /// Gate admitting only principals holding `role`.
    #[must_use]
    pub fn requiring(role: Role) -> Self {
        Self {
            required_role: Some(role),
        }
    }

    /// Returns the role this gate requires, if any.
    #[must_use]
    pub fn required_role(&self) -> Option<Role> {
        self.required_role
    }

    /// Decides access for a session state.
    #[must_use]
    pub fn decide<'a>(&self, session: &'a SessionState) -> GateDecision<'a> {
        let principal = match session {
            SessionState::Pending => return GateDecision::Blocked(Placeholder::Loading),
            SessionState::Anonymous => return GateDecision::Blocked(Placeholder::LoginRequired),
            SessionState::Authenticated(principal) => principal,
        };

        match self.required_role {
            None => GateDecision::Granted(principal),
            Some(required) if principal.role() == required => GateDecision::Granted(principal),
            Some(_) => GateDecision::Blocked(Placeholder::AccessDenied),
        }
    }

    /// Renders `children` when access is granted, otherwise the fallback or a placeholder.
    ///
    /// `children` runs only when access is granted. While the session is
    /// pending the loading placeholder is shown even if a fallback exists.
    pub fn render<T>(
        &self,
        session: &SessionState,
        children: impl FnOnce(&Principal) -> T,
        fallback: Option<T>,
    ) -> GateView<T> {
        match self.decide(session) {
            GateDecision::Granted(principal) => GateView::Children(children(principal)),
            GateDecision::Blocked(Placeholder::Loading) => {
                GateView::Placeholder(Placeholder::Loading)
            }
            GateDecision::Blocked(placeholder) => fallback
                .map(GateView::Fallback)
                .unwrap_or(GateView::Placeholder(placeholder)),
        }
    }
}

#[cfg(test)]
mod tests {
    use servicedesk_core::{Principal, Role, UserId};

    use super::{AccessGate, GateView, Placeholder};
    use crate::session_service::SessionState;

    fn session(role: Role) -> SessionState {
        SessionState::Authenticated(Principal::new(UserId::new(), role, "Kim", "kim@corp.test"))
    }

    #[test]
    fn pending_session_renders_loading() {
        let view = AccessGate::authenticated().render(
            &SessionState::Pending,
            |_| "children",
            Some("fallback"),
        );
        assert_eq!(view, GateView::Placeholder(Placeholder::Loading));
    }

    #[test]
    fn anonymous_session_renders_login_prompt() {
        let view = AccessGate::authenticated().render(&SessionState::Anonymous, |_| "children", None);
        assert_eq!(view, GateView::Placeholder(Placeholder::LoginRequired));
    }

    #[test]
    fn anonymous_session_on_admin_view_never_builds_children() {
        let mut built = false;
        let view = AccessGate::requiring(Role::Admin).render(
            &SessionState::Anonymous,
            |_| {
                built = true;
                "children"
            },
            Some("fallback"),
        );

        assert_eq!(view, GateView::Fallback("fallback"));
        assert!(!built);
    }

    #[test]
    fn role_mismatch_renders_access_denied() {
        let view = AccessGate::requiring(Role::Admin).render(&session(Role::EndUser), |_| "children", None);
        assert_eq!(view, GateView::Placeholder(Placeholder::AccessDenied));
    }

    #[test]
    fn matching_role_renders_children_with_principal() {
        let view = AccessGate::requiring(Role::Admin).render(
            &session(Role::Admin),
            |principal| principal.role(),
            None,
        );
        assert_eq!(view.into_children(), Some(Role::Admin));
    }

    #[test]
    fn ungated_role_admits_every_signed_in_principal() {
        let gate = AccessGate::authenticated();
        for role in Role::all() {
            assert!(matches!(
                gate.render(&session(*role), |_| (), None),
                GateView::Children(())
            ));
        }
    }
}
