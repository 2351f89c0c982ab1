use dioxus::prelude::*;

use crate::context::{AppContext, SessionRevision};

pub mod guard;

pub mod home;
pub mod login;
pub mod register;
pub mod article_new;
pub mod article_detail;
pub mod profile;
pub mod rankings;
pub mod assistant;

use home::Home;
use login::Login;
use register::Register;
use article_new::ArticleCreate;
use article_detail::ArticleDetail;
use profile::Profile;
use rankings::Rankings;
use assistant::Assistant;

use guard::Navigation;

/// App routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Guarded)]
        #[route("/")]
        Home {},

        #[route("/login")]
        Login {},

        #[route("/register")]
        Register {},

        #[route("/create")]
        ArticleCreate {},

        #[route("/article/:id")]
        ArticleDetail { id: u64 },

        #[route("/profile")]
        Profile {},

        #[route("/rankings")]
        Rankings {},

        #[route("/assistant")]
        Assistant {},
}

impl Route {
    /// Route metadata: pages that need a logged-in user
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::ArticleCreate {} | Route::Profile {} | Route::Assistant {}
        )
    }
}

/// Root layout. Applies the navigation guard before any page renders.
#[component]
fn Guarded() -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context::<SessionRevision>();
    let current_route = use_route::<Route>();

    // Re-run the guard whenever the session changes, not only on navigation
    revision.track();
    let authenticated = ctx.is_authenticated();

    if let Navigation::Redirected(target) = guard::check(&current_route, authenticated) {
        log::info!("{} requires login, redirecting to {}", current_route, target);
        return rsx! {
            Redirect { to: target }
        };
    }

    rsx! {
        div {
            class: "min-h-screen bg-background",
            NavBar { authenticated }
            main {
                class: "max-w-3xl mx-auto px-4 py-6",
                Outlet::<Route> {}
            }
        }
    }
}

/// Replaces the current history entry once mounted
#[component]
fn Redirect(to: Route) -> Element {
    let navigator = navigator();
    use_effect(move || {
        navigator.replace(to.clone());
    });
    rsx! {}
}

#[component]
fn NavBar(authenticated: bool) -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<SessionRevision>();
    let navigator = navigator();

    let username = ctx
        .session
        .user()
        .and_then(|u| u.username().map(str::to_string));

    let handle_logout = move |_| {
        ctx.logout();
        revision.bump();
        navigator.push(Route::Home {});
    };

    rsx! {
        nav {
            class: "sticky top-0 z-20 bg-background/80 backdrop-blur-sm border-b border-border",
            div {
                class: "max-w-3xl mx-auto px-4 py-3 flex items-center gap-4",
                Link { to: Route::Home {}, class: "text-xl font-bold", "CoinWave" }
                Link { to: Route::Rankings {}, "Rankings" }
                if authenticated {
                    Link { to: Route::ArticleCreate {}, "Write" }
                    Link { to: Route::Assistant {}, "Ask" }
                    div { class: "flex-1" }
                    Link {
                        to: Route::Profile {},
                        class: "font-semibold",
                        {username.unwrap_or_else(|| "Profile".to_string())}
                    }
                    button {
                        class: "px-3 py-1 rounded border border-border hover:bg-accent",
                        onclick: handle_logout,
                        "Log out"
                    }
                } else {
                    div { class: "flex-1" }
                    Link { to: Route::Login {}, "Log in" }
                    Link { to: Route::Register {}, "Sign up" }
                }
            }
        }
    }
}
