use dioxus::prelude::*;

use crate::components::ArticleCard;
use crate::context::AppContext;
use crate::models::{Article, RankingPeriod};
use crate::stores::Refresh;

#[component]
pub fn Rankings() -> Element {
    let ctx = use_context::<AppContext>();
    let mut period = use_signal(RankingPeriod::default);
    let mut rankings = use_signal(Vec::<Article>::new);
    let mut loading = use_signal(|| true);
    let mut failed = use_signal(|| false);

    use_effect(move || {
        let selected = *period.read();
        let ctx = ctx.clone();
        loading.set(true);
        spawn(async move {
            let outcome = ctx.common.fetch_rankings(selected).await;
            // The request for the newer period settles loading and the list
            if outcome == Refresh::Superseded {
                return;
            }
            failed.set(!outcome.is_updated());
            rankings.set(ctx.common.rankings());
            loading.set(false);
        });
    });

    let list = rankings.read().clone();

    rsx! {
        div {
            class: "space-y-6",
            h1 { class: "text-2xl font-bold", "Top articles" }

            div {
                class: "flex gap-2",
                for choice in RankingPeriod::ALL {
                    button {
                        key: "{choice}",
                        class: if *period.read() == choice { "px-3 py-1 rounded-full bg-primary text-primary-foreground" } else { "px-3 py-1 rounded-full border border-border" },
                        onclick: move |_| period.set(choice),
                        {choice.label()}
                    }
                }
            }

            if *failed.read() {
                div {
                    class: "p-3 rounded bg-amber-500/10 text-amber-700 text-sm",
                    "Could not load rankings for this period."
                }
            }

            if *loading.read() {
                div { class: "text-center text-muted-foreground py-12", "Loading..." }
            } else if list.is_empty() {
                div { class: "text-center text-muted-foreground py-12", "No rankings yet" }
            } else {
                ol {
                    class: "space-y-4",
                    for (position, article) in list.into_iter().enumerate() {
                        li {
                            key: "{article.id}",
                            class: "flex gap-3 items-start",
                            span { class: "w-8 text-2xl font-bold text-muted-foreground", {(position + 1).to_string()} }
                            div { class: "flex-1", ArticleCard { article } }
                        }
                    }
                }
            }
        }
    }
}
