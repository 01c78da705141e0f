//! Session guard for protected views.
//!
//! Three observable outcomes, driven purely by the session state: a
//! loading indicator while the bootstrap check is pending, an
//! access-denied card when it resolved unauthenticated, and the wrapped
//! children otherwise. The decision itself is a pure function so it can
//! be tested without a DOM.

use crate::components::icons::ShieldAlert;
use crate::session::{use_session, SessionState};
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Loading,
    Denied,
    Granted,
}

pub fn guard_outcome(state: &SessionState) -> GuardOutcome {
    if state.is_loading() {
        GuardOutcome::Loading
    } else if state.is_authenticated() {
        GuardOutcome::Granted
    } else {
        GuardOutcome::Denied
    }
}

/// Wraps a protected view, passed as a constructor the same way the
/// router outlet takes its matcher. Re-renders when the outcome changes;
/// a state update that keeps the same outcome leaves the page untouched.
#[component]
pub fn RouteGuard(page: fn() -> AnyView) -> impl IntoView {
    let session = use_session();
    let state = session.state;
    let outcome = Memo::new(move |_| state.with(|s| guard_outcome(s)));

    move || match outcome.get() {
        GuardOutcome::Loading => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        GuardOutcome::Denied => view! { <DeniedView /> }.into_any(),
        GuardOutcome::Granted => page(),
    }
}

#[component]
fn DeniedView() -> impl IntoView {
    let navigate = use_navigate();
    let go_login = move |_| navigate(AppRoute::Login.to_path());

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card bg-base-100 shadow-xl max-w-md w-full">
                <div class="card-body items-center text-center">
                    <div class="p-3 bg-error/10 rounded-2xl text-error">
                        <ShieldAlert attr:class="h-8 w-8" />
                    </div>
                    <h2 class="card-title">"Acceso restringido"</h2>
                    <p class="text-base-content/70">
                        "Necesitas iniciar sesión para ver esta página."
                    </p>
                    <div class="card-actions mt-4">
                        <button class="btn btn-primary" on:click=go_login>
                            "Ir a iniciar sesión"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::placeholder_profile;

    #[test]
    fn loading_wins_regardless_of_token() {
        let without = SessionState::Initializing { token: None };
        let with = SessionState::Initializing {
            token: Some("abc".to_string()),
        };
        assert_eq!(guard_outcome(&without), GuardOutcome::Loading);
        assert_eq!(guard_outcome(&with), GuardOutcome::Loading);
    }

    #[test]
    fn denied_only_after_bootstrap_resolved_unauthenticated() {
        assert_eq!(
            guard_outcome(&SessionState::Unauthenticated),
            GuardOutcome::Denied
        );
    }

    #[test]
    fn authenticated_and_degraded_are_granted() {
        let authenticated = SessionState::Authenticated {
            token: "abc".to_string(),
            user: placeholder_profile(Some("ana23")),
        };
        let degraded = SessionState::Degraded {
            token: "abc".to_string(),
            user: placeholder_profile(None),
        };
        assert_eq!(guard_outcome(&authenticated), GuardOutcome::Granted);
        assert_eq!(guard_outcome(&degraded), GuardOutcome::Granted);
    }
}
