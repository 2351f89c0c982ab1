pub mod article_card;

pub use article_card::ArticleCard;
