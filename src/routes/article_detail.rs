use dioxus::prelude::*;

use crate::context::{AppContext, SessionRevision};
use crate::error::ClientError;
use crate::models::{Article, BookmarkToggle};
use crate::routes::Route;
use crate::utils::format::{format_amount, format_count_compact, split_tags};

#[component]
pub fn ArticleDetail(id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<SessionRevision>();
    let navigator = navigator();
    let mut notice = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let fetch_ctx = ctx.clone();
    let mut detail = use_resource(use_reactive(&id, move |id| {
        let ctx = fetch_ctx.clone();
        async move { ctx.articles.fetch_article(id).await }
    }));

    // A rejected token ends the session and sends the user to log in again
    let mut on_error = move |ctx: &AppContext, e: &ClientError, action: &str| {
        if ctx.expire_session_on(e) {
            revision.bump();
            navigator.push(Route::Login {});
        } else {
            notice.set(Some(format!("{} failed: {}", action, e)));
        }
    };

    let authenticated = ctx.is_authenticated();
    let viewer_id = ctx.session.user().and_then(|u| u.id());

    let purchase_ctx = ctx.clone();
    let handle_purchase = move |_| {
        if *busy.read() {
            return;
        }
        let ctx = purchase_ctx.clone();
        busy.set(true);
        spawn(async move {
            match ctx.wallet.purchase_article(id).await {
                Ok(()) => {
                    notice.set(Some(format!(
                        "Purchased. Balance: {}",
                        format_amount(ctx.wallet.balance())
                    )));
                    detail.restart();
                }
                Err(e) => on_error(&ctx, &e, "Purchase"),
            }
            busy.set(false);
        });
    };

    let bookmark_ctx = ctx.clone();
    let handle_bookmark = move |_| {
        let ctx = bookmark_ctx.clone();
        spawn(async move {
            match ctx.articles.bookmark_article(id).await {
                Ok(payload) => {
                    let message = BookmarkToggle::from_payload(&payload)
                        .map(|toggle| {
                            if toggle.message.is_empty() {
                                if toggle.bookmarked { "Bookmarked".to_string() } else { "Bookmark removed".to_string() }
                            } else {
                                toggle.message
                            }
                        })
                        .unwrap_or_else(|| "Bookmark updated".to_string());
                    notice.set(Some(message));
                }
                Err(e) => on_error(&ctx, &e, "Bookmark"),
            }
        });
    };

    let delete_ctx = ctx.clone();
    let handle_delete = move |_| {
        let ctx = delete_ctx.clone();
        busy.set(true);
        spawn(async move {
            match ctx.articles.delete_article(id).await {
                Ok(()) => {
                    busy.set(false);
                    navigator.push(Route::Home {});
                }
                Err(e) => {
                    busy.set(false);
                    on_error(&ctx, &e, "Delete");
                }
            }
        });
    };

    let reindex_ctx = ctx.clone();
    let handle_reindex = move |_| {
        let ctx = reindex_ctx.clone();
        spawn(async move {
            match ctx.articles.reindex_article(id).await {
                Ok(()) => notice.set(Some("Re-indexing started".to_string())),
                Err(e) => on_error(&ctx, &e, "Re-index"),
            }
        });
    };

    // While (re)loading, show the cached copy of this article if there is one
    let state = detail.read().clone().or_else(|| {
        ctx.articles
            .current_article()
            .filter(|cached| cached.article.id == id)
            .map(Ok)
    });

    rsx! {
        div {
            class: "space-y-6",

            if let Some(message) = notice.read().as_ref() {
                div { class: "p-3 rounded bg-accent text-sm", "{message}" }
            }

            match state {
                None => rsx! {
                    div { class: "text-center text-muted-foreground py-12", "Loading article..." }
                },
                Some(Err(e)) => rsx! {
                    div {
                        class: "text-center py-12 space-y-2",
                        p { class: "text-red-600", "Could not load article: {e}" }
                        Link { to: Route::Home {}, class: "text-primary", "Back to articles" }
                    }
                },
                Some(Ok(loaded)) => {
                    let is_owner = viewer_id.is_some_and(|uid| uid == loaded.article.author_id);
                    let locked = loaded.article.is_paid && !loaded.has_access;
                    let price = format_amount(loaded.article.price);
                    rsx! {
                        article {
                            class: "space-y-4",
                            ArticleHeader { article: loaded.article.clone() }

                            if locked {
                                div {
                                    class: "p-6 rounded-lg border border-border text-center space-y-3",
                                    p { "This article costs {price}." }
                                    if authenticated {
                                        button {
                                            class: "px-4 py-2 rounded bg-primary text-primary-foreground disabled:opacity-50",
                                            disabled: *busy.read(),
                                            onclick: handle_purchase,
                                            "Buy access"
                                        }
                                    } else {
                                        Link { to: Route::Login {}, class: "text-primary", "Log in to buy access" }
                                    }
                                }
                            } else {
                                div {
                                    class: "whitespace-pre-wrap leading-relaxed",
                                    "{loaded.article.content}"
                                }
                            }

                            if authenticated {
                                div {
                                    class: "flex flex-wrap gap-2 pt-4 border-t border-border",
                                    button {
                                        class: "px-3 py-1 rounded border border-border hover:bg-accent",
                                        onclick: handle_bookmark,
                                        "Bookmark"
                                    }
                                    if is_owner {
                                        button {
                                            class: "px-3 py-1 rounded border border-border hover:bg-accent",
                                            onclick: handle_reindex,
                                            "Re-index"
                                        }
                                        button {
                                            class: "px-3 py-1 rounded border border-red-500 text-red-600 hover:bg-red-500/10 disabled:opacity-50",
                                            disabled: *busy.read(),
                                            onclick: handle_delete,
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ArticleHeader(article: Article) -> Element {
    let tags: Vec<String> = split_tags(&article.tags).into_iter().map(str::to_string).collect();
    let published = article
        .created_at
        .as_deref()
        .and_then(|ts| ts.get(..10))
        .unwrap_or_default()
        .to_string();
    let views = format_count_compact(article.view_count);
    let bookmarks = format_count_compact(article.bookmark_count);

    rsx! {
        header {
            class: "space-y-2",
            h1 { class: "text-3xl font-bold", "{article.title}" }
            div {
                class: "flex flex-wrap items-center gap-3 text-sm text-muted-foreground",
                span { class: "font-medium", "{article.author.username}" }
                if !published.is_empty() {
                    span { "{published}" }
                }
                span { "{views} views" }
                span { "{bookmarks} bookmarks" }
                if let Some(status) = article.vector_status.as_ref() {
                    span { class: "text-xs", "index: {status} ({article.vector_progress}%)" }
                }
            }
            if !tags.is_empty() {
                div {
                    class: "flex flex-wrap gap-2",
                    for tag in tags {
                        span {
                            class: "px-2 py-1 text-xs rounded-full bg-primary/10 text-primary font-medium",
                            "#{tag}"
                        }
                    }
                }
            }
        }
    }
}
