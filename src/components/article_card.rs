use dioxus::prelude::*;

use crate::models::Article;
use crate::routes::Route;
use crate::utils::format::{format_amount, format_count_compact, split_tags};

/// Characters of body text shown on a card
const PREVIEW_CHARS: usize = 150;

#[component]
pub fn ArticleCard(article: Article) -> Element {
    let tags: Vec<String> = split_tags(&article.tags)
        .into_iter()
        .take(3)
        .map(str::to_string)
        .collect();
    let preview = preview_text(&article.content);
    let author = if article.author.username.is_empty() {
        "anonymous".to_string()
    } else {
        article.author.username.clone()
    };
    let views = format_count_compact(article.view_count);
    let bookmarks = format_count_compact(article.bookmark_count);

    rsx! {
        div {
            class: "group bg-card rounded-lg border border-border hover:border-primary/50 transition-all",
            Link {
                to: Route::ArticleDetail { id: article.id },
                class: "block p-4 space-y-3",

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

                div {
                    class: "flex items-start justify-between gap-3",
                    h3 {
                        class: "text-xl font-bold line-clamp-2 group-hover:text-primary",
                        "{article.title}"
                    }
                    if article.is_paid {
                        span {
                            class: "shrink-0 px-2 py-1 text-xs rounded bg-amber-500/10 text-amber-600 font-semibold",
                            {format_amount(article.price)}
                        }
                    }
                }

                p {
                    class: "text-sm text-muted-foreground line-clamp-3",
                    "{preview}"
                }

                div {
                    class: "flex items-center justify-between pt-2 text-xs text-muted-foreground",
                    span { class: "font-medium", "{author}" }
                    span { "{views} views · {bookmarks} bookmarks" }
                }
            }
        }
    }
}

/// Cut body text at a word boundary
fn preview_text(content: &str) -> String {
    if content.chars().count() <= PREVIEW_CHARS {
        return content.to_string();
    }
    let truncated: String = content.chars().take(PREVIEW_CHARS).collect();
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &truncated[..last_space]),
        None => format!("{}...", truncated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_content_untouched() {
        assert_eq!(preview_text("short body"), "short body");
    }

    #[test]
    fn test_preview_cuts_at_word_boundary() {
        let content = "word ".repeat(50);
        let preview = preview_text(&content);
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= PREVIEW_CHARS + 3);
        assert!(!preview.trim_end_matches("...").ends_with(' '));
    }
}
