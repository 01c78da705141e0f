//! Focus-Up frontend application.
//!
//! Context-driven layout:
//! - `session`: session store, bootstrap check and shared auth state
//! - `web::route` / `web::router`: route domain model and History engine
//! - `api`: typed client for the backend
//! - `components`: guard, forms and page views

mod api;
mod error;
mod session;

mod components {
    pub mod dashboard;
    mod guard;
    mod icons;
    pub mod login;
    pub mod notifications;
    pub mod profile;
    pub mod register;
    pub mod reports;

    pub use guard::RouteGuard;
}

// Browser-facing plumbing: transport, storage and the router. The HTTP and
// storage layers are traits so the session core tests run natively.
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    pub mod storage;
}

use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::notifications::NotificationsPage;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::reports::ReportsPage;
use crate::components::RouteGuard;
use crate::session::provide_session;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// Maps the current route to its view; routes that require a session
/// render behind the guard.
fn route_matcher(route: AppRoute) -> AnyView {
    let page: fn() -> AnyView = match route {
        AppRoute::Login => || view! { <LoginPage /> }.into_any(),
        AppRoute::Register => || view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => || view! { <DashboardPage /> }.into_any(),
        AppRoute::Profile => || view! { <ProfilePage /> }.into_any(),
        AppRoute::Notifications => || view! { <NotificationsPage /> }.into_any(),
        AppRoute::Reports => || view! { <ReportsPage /> }.into_any(),
        AppRoute::NotFound => || view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página no encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    };

    if route.requires_auth() {
        view! { <RouteGuard page=page /> }.into_any()
    } else {
        page()
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Session context first: the guard and every page read it, and the
    // bootstrap check starts here.
    provide_session();

    view! {
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
