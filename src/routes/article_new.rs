use dioxus::prelude::*;

use crate::context::{AppContext, SessionRevision};
use crate::models::NewArticle;
use crate::routes::Route;
use crate::stores::wallet::parse_amount;

#[component]
pub fn ArticleCreate() -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<SessionRevision>();
    let navigator = navigator();
    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut tags = use_signal(String::new);
    let mut is_paid = use_signal(|| false);
    let mut price = use_signal(String::new);
    let mut is_publishing = use_signal(|| false);
    let mut error_message = use_signal(|| Option::<String>::None);

    let handle_publish = move |e: FormEvent| {
        e.prevent_default();
        if *is_publishing.read() {
            return;
        }

        let paid = *is_paid.read();
        let price_val = if paid {
            match parse_amount(&price.read()) {
                Ok(value) => value,
                Err(e) => {
                    error_message.set(Some(e.to_string()));
                    return;
                }
            }
        } else {
            0.0
        };

        let article = NewArticle {
            title: title.read().trim().to_string(),
            content: content.read().clone(),
            tags: tags.read().trim().to_string(),
            is_paid: paid,
            price: price_val,
        };
        if let Err(e) = article.validate() {
            error_message.set(Some(e.to_string()));
            return;
        }

        let ctx = ctx.clone();
        is_publishing.set(true);
        error_message.set(None);

        spawn(async move {
            match ctx.articles.create_article(&article).await {
                Ok(()) => {
                    is_publishing.set(false);
                    navigator.push(Route::Profile {});
                }
                Err(e) => {
                    if ctx.expire_session_on(&e) {
                        revision.bump();
                        return;
                    }
                    error_message.set(Some(format!("Failed to publish: {}", e)));
                    is_publishing.set(false);
                }
            }
        });
    };

    rsx! {
        div {
            class: "space-y-6",
            h1 { class: "text-2xl font-bold", "Write an article" }

            if let Some(err) = error_message.read().as_ref() {
                div { class: "p-3 rounded bg-red-500/10 text-red-600 text-sm", "{err}" }
            }

            form {
                class: "space-y-4",
                onsubmit: handle_publish,

                input {
                    class: "w-full px-3 py-2 rounded border border-border bg-background text-lg",
                    placeholder: "Title",
                    value: "{title}",
                    oninput: move |e| title.set(e.value()),
                }
                textarea {
                    class: "w-full min-h-[300px] px-3 py-2 rounded border border-border bg-background font-mono text-sm",
                    placeholder: "Write in markdown...",
                    value: "{content}",
                    oninput: move |e| content.set(e.value()),
                }
                input {
                    class: "w-full px-3 py-2 rounded border border-border bg-background",
                    placeholder: "Tags, comma separated",
                    value: "{tags}",
                    oninput: move |e| tags.set(e.value()),
                }

                div {
                    class: "flex items-center gap-4",
                    label {
                        class: "flex items-center gap-2 text-sm",
                        input {
                            r#type: "checkbox",
                            checked: *is_paid.read(),
                            onchange: move |e| is_paid.set(e.checked()),
                        }
                        "Paid article"
                    }
                    if *is_paid.read() {
                        input {
                            class: "w-32 px-3 py-1 rounded border border-border bg-background",
                            placeholder: "Price",
                            inputmode: "decimal",
                            value: "{price}",
                            oninput: move |e| price.set(e.value()),
                        }
                    }
                }

                div {
                    class: "flex justify-end gap-2",
                    button {
                        class: "px-4 py-2 rounded border border-border",
                        r#type: "button",
                        onclick: move |_| navigator.go_back(),
                        "Cancel"
                    }
                    button {
                        class: "px-4 py-2 rounded bg-primary text-primary-foreground disabled:opacity-50",
                        r#type: "submit",
                        disabled: *is_publishing.read(),
                        if *is_publishing.read() { "Publishing..." } else { "Publish" }
                    }
                }
            }
        }
    }
}
