pub mod error;
pub mod filter;
pub mod types;
pub mod week;

pub use error::{Error, Result};
pub use filter::{compute_visible, sort_articles, visible_sorted, FilterCriteria, SortKey, SourceFilter};
pub use types::{Article, ArticleKey, IndexDocument, SourceDocument, SourceMetadata};
pub use week::{effective_date, format_long_date, format_week_label, in_week, monday_of, sunday_of, Locale, Week};

pub mod prelude {
    pub use crate::{Article, Error, Result, SourceMetadata, Week};
}
