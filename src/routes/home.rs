use dioxus::prelude::*;

use crate::components::ArticleCard;
use crate::context::AppContext;
use crate::models::{Article, ArticleFilter, ArticleKind, ArticleSort};
use crate::stores::Refresh;

#[component]
pub fn Home() -> Element {
    let ctx = use_context::<AppContext>();
    let mut search_input = use_signal(String::new);
    let mut search = use_signal(String::new);
    let mut kind = use_signal(|| Option::<ArticleKind>::None);
    let mut sort = use_signal(ArticleSort::default);
    let mut articles = use_signal(Vec::<Article>::new);
    let mut loading = use_signal(|| true);
    let mut stale = use_signal(|| false);

    // Refetch whenever a filter changes
    use_effect(move || {
        let mut filter = ArticleFilter::new()
            .search(search.read().clone())
            .sort(*sort.read());
        if let Some(kind) = *kind.read() {
            filter = filter.kind(kind);
        }

        let ctx = ctx.clone();
        loading.set(true);
        spawn(async move {
            match ctx.articles.fetch_articles(&filter).await {
                Refresh::Updated => {
                    articles.set(ctx.articles.articles());
                    stale.set(false);
                }
                Refresh::Kept => stale.set(true),
                // A newer filter owns the list
                Refresh::Superseded => {}
            }
            // Whichever fetch settles last clears the flag
            loading.set(ctx.articles.is_loading());
        });
    });

    let handle_search = move |e: FormEvent| {
        e.prevent_default();
        search.set(search_input.read().trim().to_string());
    };

    let list = articles.read().clone();

    rsx! {
        div {
            class: "space-y-6",

            form {
                class: "flex gap-2",
                onsubmit: handle_search,
                input {
                    class: "flex-1 px-3 py-2 rounded border border-border bg-background",
                    r#type: "search",
                    placeholder: "Search articles",
                    value: "{search_input}",
                    oninput: move |e| search_input.set(e.value()),
                }
                button {
                    class: "px-4 py-2 rounded bg-primary text-primary-foreground",
                    r#type: "submit",
                    "Search"
                }
            }

            div {
                class: "flex flex-wrap items-center gap-2 text-sm",
                for (label, value) in [("All", None), ("Free", Some(ArticleKind::Free)), ("Paid", Some(ArticleKind::Paid))] {
                    button {
                        key: "{label}",
                        class: if *kind.read() == value { "px-3 py-1 rounded-full bg-primary text-primary-foreground" } else { "px-3 py-1 rounded-full border border-border" },
                        onclick: move |_| kind.set(value),
                        "{label}"
                    }
                }
                div { class: "flex-1" }
                select {
                    class: "px-2 py-1 rounded border border-border bg-background",
                    onchange: move |e| {
                        let value = if e.value() == "rank" { ArticleSort::Rank } else { ArticleSort::Latest };
                        sort.set(value);
                    },
                    option { value: "latest", selected: *sort.read() == ArticleSort::Latest, "Latest" }
                    option { value: "rank", selected: *sort.read() == ArticleSort::Rank, "Most bookmarked" }
                }
            }

            if *stale.read() {
                div {
                    class: "p-3 rounded bg-amber-500/10 text-amber-700 text-sm",
                    "Could not refresh articles. Showing the last loaded list."
                }
            }

            if *loading.read() && list.is_empty() {
                div { class: "text-center text-muted-foreground py-12", "Loading articles..." }
            } else if list.is_empty() {
                div { class: "text-center text-muted-foreground py-12", "No articles found" }
            } else {
                div {
                    class: "grid gap-4",
                    for article in list {
                        ArticleCard { key: "{article.id}", article }
                    }
                }
            }
        }
    }
}
