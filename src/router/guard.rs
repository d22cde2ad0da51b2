//! Navigation guard applied to every route transition.
//!
//! SYSTEM CONTEXT
//! ==============
//! `RouteGuard` wraps the `<Routes>` tree. Whenever the location or the
//! session's token presence changes it re-evaluates `decide` and either
//! renders the routed page, a `<Redirect>`, or the not-found view.
//!
//! Paths with no entry in `ROUTES` are never rendered, so a page mounted in
//! `<Routes>` without a table row stays unreachable instead of unguarded.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use super::table::find_route;
use super::{HOME_PATH, LOGIN_PATH};
use crate::state::session::AuthState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
    NotFound,
}

/// Decide whether navigation to `path` may proceed.
///
/// Only the exact `/login` path bounces a logged-in user home.
pub fn decide(path: &str, has_token: bool) -> GuardDecision {
    let Some(route) = find_route(path) else {
        return GuardDecision::NotFound;
    };
    if route.requires_auth && !has_token {
        GuardDecision::Redirect(LOGIN_PATH)
    } else if path == LOGIN_PATH && has_token {
        GuardDecision::Redirect(HOME_PATH)
    } else {
        GuardDecision::Allow
    }
}

/// Track `decide` for the current path and session.
pub fn guard_decision(auth: RwSignal<AuthState>, pathname: Signal<String>) -> Memo<GuardDecision> {
    Memo::new(move |_| {
        let path = pathname.get();
        let verdict = decide(&path, auth.with(AuthState::is_authenticated));
        match verdict {
            GuardDecision::Redirect(target) => log::debug!("guard redirect {path} -> {target}"),
            GuardDecision::NotFound => log::debug!("no route for {path}"),
            GuardDecision::Allow => {}
        }
        verdict
    })
}

#[component]
pub fn RouteGuard(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let decision = guard_decision(auth, location.pathname.into());

    move || match decision.get() {
        GuardDecision::Allow => children().into_any(),
        GuardDecision::Redirect(target) => view! { <Redirect path=target/> }.into_any(),
        GuardDecision::NotFound => "Page not found.".into_view().into_any(),
    }
}
