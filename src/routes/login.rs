use dioxus::prelude::*;

use crate::context::{AppContext, SessionRevision};
use crate::routes::Route;

#[component]
pub fn Login() -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<SessionRevision>();
    let navigator = navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut error_message = use_signal(|| Option::<String>::None);

    let can_submit = !username.read().trim().is_empty()
        && !password.read().is_empty()
        && !*submitting.read();

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        if !can_submit {
            return;
        }

        let ctx = ctx.clone();
        let username_val = username.read().trim().to_string();
        let password_val = password.read().clone();
        submitting.set(true);
        error_message.set(None);

        spawn(async move {
            match ctx.session.login(&username_val, &password_val).await {
                Ok(()) => {
                    submitting.set(false);
                    revision.bump();
                    navigator.push(Route::Home {});
                }
                Err(e) => {
                    error_message.set(Some(format!("Login failed: {}", e)));
                    submitting.set(false);
                }
            }
        });
    };

    rsx! {
        div {
            class: "max-w-sm mx-auto space-y-6 pt-8",
            h1 { class: "text-2xl font-bold", "Log in" }

            if let Some(err) = error_message.read().as_ref() {
                div { class: "p-3 rounded bg-red-500/10 text-red-600 text-sm", "{err}" }
            }

            form {
                class: "space-y-4",
                onsubmit: handle_submit,
                input {
                    class: "w-full px-3 py-2 rounded border border-border bg-background",
                    placeholder: "Username",
                    autocomplete: "username",
                    value: "{username}",
                    oninput: move |e| username.set(e.value()),
                }
                input {
                    class: "w-full px-3 py-2 rounded border border-border bg-background",
                    r#type: "password",
                    placeholder: "Password",
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }
                button {
                    class: "w-full px-4 py-2 rounded bg-primary text-primary-foreground disabled:opacity-50",
                    r#type: "submit",
                    disabled: !can_submit,
                    if *submitting.read() { "Logging in..." } else { "Log in" }
                }
            }

            p {
                class: "text-sm text-muted-foreground",
                "No account yet? "
                Link { to: Route::Register {}, class: "text-primary", "Sign up" }
            }
        }
    }
}
