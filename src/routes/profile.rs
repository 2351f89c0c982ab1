use dioxus::prelude::*;

use crate::components::ArticleCard;
use crate::context::{AppContext, SessionRevision};
use crate::error::ClientError;
use crate::models::{Article, Rates};
use crate::utils::format::format_amount;

#[derive(Clone, Copy, PartialEq)]
enum ProfileTab {
    Articles,
    Bookmarks,
}

#[component]
pub fn Profile() -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<SessionRevision>();
    let mut active_tab = use_signal(|| ProfileTab::Articles);
    let mut own_articles = use_signal(|| Option::<Result<Vec<Article>, ClientError>>::None);
    let mut bookmarks = use_signal(|| Option::<Result<Vec<Article>, ClientError>>::None);
    let mut balance = use_signal(|| 0.0_f64);
    let mut rates = use_signal(Rates::new);
    let mut deposit_input = use_signal(String::new);
    let mut depositing = use_signal(|| false);
    let mut deposit_message = use_signal(|| Option::<String>::None);

    let load_ctx = ctx.clone();
    use_effect(move || {
        let ctx = load_ctx.clone();
        spawn(async move {
            let (articles_res, bookmarks_res, _, _) = futures::join!(
                ctx.articles.fetch_user_articles(),
                ctx.articles.fetch_user_bookmarks(),
                ctx.wallet.fetch_balance(),
                ctx.common.fetch_rates(),
            );
            let expired = [&articles_res, &bookmarks_res]
                .into_iter()
                .filter_map(|res| res.as_ref().err())
                .any(|e| ctx.expire_session_on(e));
            if expired {
                revision.bump();
                return;
            }
            own_articles.set(Some(articles_res));
            bookmarks.set(Some(bookmarks_res));
            balance.set(ctx.wallet.balance());
            rates.set(ctx.common.rates());
        });
    });

    let deposit_ctx = ctx.clone();
    let handle_deposit = move |e: FormEvent| {
        e.prevent_default();
        if *depositing.read() {
            return;
        }
        let ctx = deposit_ctx.clone();
        let amount = deposit_input.read().clone();
        depositing.set(true);
        deposit_message.set(None);

        spawn(async move {
            match ctx.wallet.deposit(&amount).await {
                Ok(()) => {
                    deposit_input.set(String::new());
                    deposit_message.set(Some("Deposit complete".to_string()));
                }
                Err(e) => {
                    if ctx.expire_session_on(&e) {
                        revision.bump();
                        return;
                    }
                    deposit_message.set(Some(format!("Deposit failed: {}", e)));
                }
            }
            balance.set(ctx.wallet.balance());
            depositing.set(false);
        });
    };

    let username = ctx
        .session
        .user()
        .and_then(|u| u.username().map(str::to_string))
        .unwrap_or_default();
    let current_balance = *balance.read();
    let conversions: Vec<(String, String)> = rates
        .read()
        .keys()
        .filter_map(|currency| {
            ctx.common
                .convert(current_balance, currency)
                .map(|amount| (currency.clone(), format_amount(amount)))
        })
        .collect();

    let shown = match *active_tab.read() {
        ProfileTab::Articles => own_articles.read().clone(),
        ProfileTab::Bookmarks => bookmarks.read().clone(),
    };

    rsx! {
        div {
            class: "space-y-6",

            h1 { class: "text-2xl font-bold", "{username}" }

            // Wallet
            section {
                class: "p-4 rounded-lg border border-border space-y-3",
                div {
                    class: "flex items-baseline justify-between",
                    h2 { class: "font-semibold", "Balance" }
                    span { class: "text-2xl font-bold", {format_amount(current_balance)} }
                }
                if !conversions.is_empty() {
                    div {
                        class: "flex flex-wrap gap-3 text-xs text-muted-foreground",
                        for (currency, amount) in conversions {
                            span { key: "{currency}", "{amount} {currency}" }
                        }
                    }
                }
                form {
                    class: "flex gap-2",
                    onsubmit: handle_deposit,
                    input {
                        class: "flex-1 px-3 py-2 rounded border border-border bg-background",
                        placeholder: "Amount",
                        inputmode: "decimal",
                        value: "{deposit_input}",
                        oninput: move |e| deposit_input.set(e.value()),
                    }
                    button {
                        class: "px-4 py-2 rounded bg-primary text-primary-foreground disabled:opacity-50",
                        r#type: "submit",
                        disabled: *depositing.read(),
                        if *depositing.read() { "Depositing..." } else { "Deposit" }
                    }
                }
                if let Some(message) = deposit_message.read().as_ref() {
                    p { class: "text-sm", "{message}" }
                }
            }

            div {
                class: "flex gap-2 border-b border-border",
                button {
                    class: if *active_tab.read() == ProfileTab::Articles { "px-4 py-2 border-b-2 border-primary font-semibold" } else { "px-4 py-2 text-muted-foreground" },
                    onclick: move |_| active_tab.set(ProfileTab::Articles),
                    "My articles"
                }
                button {
                    class: if *active_tab.read() == ProfileTab::Bookmarks { "px-4 py-2 border-b-2 border-primary font-semibold" } else { "px-4 py-2 text-muted-foreground" },
                    onclick: move |_| active_tab.set(ProfileTab::Bookmarks),
                    "Bookmarks"
                }
            }

            match shown {
                None => rsx! {
                    div { class: "text-center text-muted-foreground py-8", "Loading..." }
                },
                Some(Err(e)) => rsx! {
                    div { class: "text-center text-red-600 py-8", "Could not load: {e}" }
                },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    div { class: "text-center text-muted-foreground py-8", "Nothing here yet" }
                },
                Some(Ok(list)) => rsx! {
                    div {
                        class: "grid gap-4",
                        for article in list {
                            ArticleCard { key: "{article.id}", article }
                        }
                    }
                },
            }
        }
    }
}
