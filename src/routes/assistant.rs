use dioxus::prelude::*;

use crate::context::{AppContext, SessionRevision};
use crate::models::AssistantAnswer;

#[component]
pub fn Assistant() -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<SessionRevision>();
    let mut question = use_signal(String::new);
    let mut asking = use_signal(|| false);
    let mut error_message = use_signal(|| Option::<String>::None);
    // Seeded from the store so the last answer survives navigation
    let mut answer = use_signal({
        let ctx = ctx.clone();
        move || ctx.assistant.last_answer()
    });

    let handle_ask = move |e: FormEvent| {
        e.prevent_default();
        if *asking.read() {
            return;
        }
        let ctx = ctx.clone();
        let text = question.read().clone();
        asking.set(true);
        error_message.set(None);

        spawn(async move {
            match ctx.assistant.ask(&text).await {
                Ok(result) => answer.set(Some(result)),
                Err(e) => {
                    if ctx.expire_session_on(&e) {
                        revision.bump();
                        return;
                    }
                    error_message.set(Some(e.to_string()));
                }
            }
            asking.set(false);
        });
    };

    rsx! {
        div {
            class: "space-y-6",
            h1 { class: "text-2xl font-bold", "Ask the archive" }

            form {
                class: "space-y-2",
                onsubmit: handle_ask,
                textarea {
                    class: "w-full min-h-[100px] px-3 py-2 rounded border border-border bg-background",
                    placeholder: "What would you like to know?",
                    value: "{question}",
                    oninput: move |e| question.set(e.value()),
                }
                button {
                    class: "px-4 py-2 rounded bg-primary text-primary-foreground disabled:opacity-50",
                    r#type: "submit",
                    disabled: *asking.read(),
                    if *asking.read() { "Thinking..." } else { "Ask" }
                }
            }

            if let Some(err) = error_message.read().as_ref() {
                div { class: "p-3 rounded bg-red-500/10 text-red-600 text-sm", "{err}" }
            }

            if let Some(result) = answer.read().clone() {
                AnswerPanel { answer: result }
            }
        }
    }
}

#[component]
fn AnswerPanel(answer: AssistantAnswer) -> Element {
    let total = answer.total_seconds().map(|secs| format!("{:.1}s", secs));

    rsx! {
        section {
            class: "p-4 rounded-lg border border-border space-y-3",
            p { class: "whitespace-pre-wrap leading-relaxed", "{answer.answer}" }
            if !answer.sources.is_empty() {
                div {
                    class: "text-sm",
                    h3 { class: "font-semibold", "Sources" }
                    ul {
                        class: "list-disc pl-5 text-muted-foreground",
                        for source in answer.sources.iter() {
                            li { "{source}" }
                        }
                    }
                }
            }
            if let Some(total) = total {
                p { class: "text-xs text-muted-foreground", "Answered in {total}" }
            }
        }
    }
}
