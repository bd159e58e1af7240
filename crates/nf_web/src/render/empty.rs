use nf_core::{Locale, SourceFilter, Week};

use super::article::logo_img;
use super::{esc, labels};
use crate::selection::Selection;

/// Which message to show when nothing survives filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// A specific source is selected and has nothing to show.
    Source(String),
    /// All sources, but the active week window is empty.
    Week(Week),
    /// No week window; the search or filter simply matched nothing.
    NoResults,
}

impl EmptyState {
    pub fn for_selection(selection: &Selection) -> Self {
        match (&selection.source, selection.week) {
            (SourceFilter::Named(name), _) => Self::Source(name.clone()),
            (SourceFilter::All, Some(week)) => Self::Week(week),
            (SourceFilter::All, None) => Self::NoResults,
        }
    }

    pub fn render(&self, locale: Locale) -> String {
        let text = labels::labels(locale);
        match self {
            Self::Source(name) => format!(
                r#"<div class="no-results empty-source">{}<h2>{}</h2><p>{}</p><p class="hint">{}</p></div>"#,
                logo_img(name),
                esc(name),
                text.source_empty,
                text.source_empty_hint
            ),
            Self::Week(week) => format!(
                r#"<div class="no-results empty-week"><h2>{}</h2><p>{}</p><p><button class="week-today-btn" data-week="-1">{}</button></p></div>"#,
                text.week_empty,
                esc(&labels::week_empty_detail(locale, &week.label(locale))),
                text.week_empty_action
            ),
            Self::NoResults => format!(
                r#"<div class="no-results"><h2>{}</h2><p>{}</p></div>"#,
                text.no_results, text.no_results_hint
            ),
        }
    }
}
