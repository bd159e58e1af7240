//! HTML rendering of the feed page. Every string that came from a feed
//! document goes through [`esc`] before it is written out.

use nf_core::{Article, Locale, SortKey, SourceFilter, SourceMetadata, Week};
use std::borrow::Cow;
use std::fmt::Write;

pub mod article;
pub mod empty;
pub mod labels;
pub mod logos;

pub use article::{format_date, render_article, safe_href};
pub use empty::EmptyState;

use crate::selection::{Selection, ViewMode};

pub(crate) fn esc(text: &str) -> Cow<'_, str> {
    html_escape::encode_safe(text)
}

/// Everything needed to paint one page.
pub struct PageView<'a> {
    pub locale: Locale,
    pub updated_at: Option<&'a str>,
    pub sources: &'a [SourceMetadata],
    pub selection: &'a Selection,
    /// Monday of the real current week, for the navigator's bounds.
    pub this_week: Week,
    pub articles: &'a [&'a Article],
}

pub fn render_articles(view: &PageView<'_>) -> String {
    let class = match view.selection.view {
        ViewMode::List => "articles-container",
        ViewMode::Card => "articles-container card-view",
    };

    let body = if view.articles.is_empty() {
        EmptyState::for_selection(view.selection).render(view.locale)
    } else {
        view.articles
            .iter()
            .map(|a| render_article(a, view.locale))
            .collect()
    };

    format!(r#"<main id="articlesContainer" class="{}">{}</main>"#, class, body)
}

fn render_controls(html: &mut String, view: &PageView<'_>) {
    let text = labels::labels(view.locale);
    let selection = view.selection;

    html.push_str(r#"<section class="controls">"#);
    let _ = write!(
        html,
        r#"<input type="search" id="searchInput" value="{}" placeholder="{}">"#,
        esc(&selection.query),
        text.search_placeholder
    );

    html.push_str(r#"<select id="sortSelect">"#);
    for key in SortKey::ALL {
        let _ = write!(
            html,
            r#"<option value="{}"{}>{}</option>"#,
            key,
            if key == selection.sort { " selected" } else { "" },
            labels::sort_option(view.locale, key)
        );
    }
    html.push_str("</select>");

    html.push_str(r#"<div class="view-toggle">"#);
    for (id, mode) in [("listViewBtn", ViewMode::List), ("cardViewBtn", ViewMode::Card)] {
        let _ = write!(
            html,
            r#"<button id="{}" class="view-btn{}" data-view="{}">{}</button>"#,
            id,
            if mode == selection.view { " active" } else { "" },
            mode,
            labels::view_option(view.locale, mode)
        );
    }
    html.push_str("</div></section>");
}

fn render_source_filters(html: &mut String, view: &PageView<'_>) {
    let text = labels::labels(view.locale);
    let active = |filter: &SourceFilter| {
        if *filter == view.selection.source {
            " active"
        } else {
            ""
        }
    };

    let _ = write!(
        html,
        r#"<nav id="sourceFilters" class="source-filters"><button class="filter-btn{}" data-source="all">{}</button>"#,
        active(&SourceFilter::All),
        text.all_sources
    );
    for source in view.sources {
        let filter = SourceFilter::Named(source.name.clone());
        let _ = write!(
            html,
            r#"<button class="filter-btn {}{}" data-source="{}">{}{}<span class="article-count-badge">{}</span></button>"#,
            esc(&logos::source_class(&source.name)),
            active(&filter),
            esc(&source.name),
            article::logo_img(&source.name),
            esc(&source.name),
            source.total_articles
        );
    }
    html.push_str("</nav>");
}

fn render_week_nav(html: &mut String, view: &PageView<'_>, week: Week) {
    let text = labels::labels(view.locale);
    let is_current = week >= view.this_week;

    let _ = write!(
        html,
        r#"<div class="week-nav"><button id="prevWeekBtn" class="week-btn" data-week="-1">{}</button><span id="weekLabel" class="week-label">{}</span><button id="nextWeekBtn" class="week-btn" data-week="1"{}>{}</button><button id="todayWeekBtn" class="week-today-btn"{}>{}</button></div>"#,
        text.previous_week,
        esc(&week.label(view.locale)),
        if is_current { " disabled" } else { "" },
        text.next_week,
        if is_current { " hidden" } else { "" },
        text.this_week
    );
}

pub fn render_page(view: &PageView<'_>) -> String {
    let text = labels::labels(view.locale);
    let mut html = String::with_capacity(16 * 1024);

    let _ = write!(
        html,
        r#"<!DOCTYPE html><html lang="{}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{}</title><link rel="stylesheet" href="style.css"></head><body>"#,
        view.locale, text.title
    );
    let _ = write!(
        html,
        r#"<header class="header"><h1>{}</h1><p id="lastUpdated" class="last-updated">{}</p></header>"#,
        text.title,
        esc(&labels::last_updated(
            view.locale,
            view.updated_at.unwrap_or(text.unknown)
        ))
    );

    render_controls(&mut html, view);
    render_source_filters(&mut html, view);
    if let Some(week) = view.selection.week {
        render_week_nav(&mut html, view, week);
    }

    let _ = write!(
        html,
        r#"<p class="stats"><span id="articleCount">{}</span></p>"#,
        labels::article_count(view.locale, view.articles.len())
    );
    html.push_str(&render_articles(view));
    html.push_str("</body></html>");
    html
}

/// Full-page replacement shown when the index could not be loaded.
pub fn render_unavailable(locale: Locale, reason: &str) -> String {
    let text = labels::labels(locale);
    format!(
        r#"<!DOCTYPE html><html lang="{}"><head><meta charset="utf-8"><title>{}</title><link rel="stylesheet" href="style.css"></head><body><main id="articlesContainer" class="articles-container"><div class="no-results"><h2>{}</h2><p>{}</p><p class="error-detail">{}</p></div></main></body></html>"#,
        locale,
        text.title,
        text.unavailable,
        text.unavailable_hint,
        esc(reason)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use scraper::{Html, Selector};

    fn week() -> Week {
        Week::containing(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap())
    }

    fn count(html: &str, selector: &str) -> usize {
        Html::parse_document(html)
            .select(&Selector::parse(selector).unwrap())
            .count()
    }

    #[test]
    fn test_page_structure() {
        let sources = vec![
            SourceMetadata::new("OpenAI", "sources/openai.json", 12),
            SourceMetadata::new("Some Lab", "sources/some-lab.json", 0),
        ];
        let mut selection = Selection::new(Some(week()));
        selection.source = SourceFilter::from("OpenAI");
        selection.view = ViewMode::Card;
        selection.sort = SortKey::Source;
        selection.query = r#""><script>"#.to_string();

        let article = Article::new("OpenAI", "Hello", "https://openai.com").with_date("2025-01-07");
        let articles = vec![&article];
        let view = PageView {
            locale: Locale::En,
            updated_at: Some("2025-01-08 09:00:00"),
            sources: &sources,
            selection: &selection,
            this_week: week(),
            articles: &articles,
        };
        let html = render_page(&view);

        assert_eq!(count(&html, ".filter-btn"), 3);
        assert_eq!(count(&html, ".filter-btn.active"), 1);
        assert_eq!(count(&html, r#".filter-btn.active[data-source="OpenAI"]"#), 1);
        assert_eq!(count(&html, ".source-some-lab .article-count-badge"), 1);
        assert_eq!(count(&html, "#articlesContainer.card-view .article-card"), 1);
        assert_eq!(count(&html, r#"option[value="source"][selected]"#), 1);
        assert_eq!(count(&html, "#cardViewBtn.active"), 1);
        assert_eq!(count(&html, "#nextWeekBtn[disabled]"), 1);
        assert_eq!(count(&html, "#todayWeekBtn[hidden]"), 1);
        assert_eq!(count(&html, "script"), 0);
        assert!(html.contains("Last updated: 2025-01-08 09:00:00"));
        assert!(html.contains("1 article"));
        assert!(html.contains("Jan 6 – 12, 2025"));
    }

    #[test]
    fn test_past_week_nav_enabled() {
        let sources = vec![];
        let mut selection = Selection::new(week().shift(-2));
        selection.view = ViewMode::List;
        let articles = vec![];
        let view = PageView {
            locale: Locale::Ko,
            updated_at: None,
            sources: &sources,
            selection: &selection,
            this_week: week(),
            articles: &articles,
        };
        let html = render_page(&view);

        assert_eq!(count(&html, "#nextWeekBtn[disabled]"), 0);
        assert_eq!(count(&html, "#todayWeekBtn[hidden]"), 0);
        assert_eq!(count(&html, "#articlesContainer.card-view"), 0);
        assert_eq!(count(&html, ".empty-week"), 1);
        assert!(html.contains("마지막 업데이트: 알 수 없음"));
        assert!(html.contains("0개의 기사"));
    }

    #[test]
    fn test_no_week_nav_without_window() {
        let sources = vec![];
        let selection = Selection::new(None);
        let articles = vec![];
        let view = PageView {
            locale: Locale::En,
            updated_at: None,
            sources: &sources,
            selection: &selection,
            this_week: week(),
            articles: &articles,
        };
        let html = render_page(&view);
        assert_eq!(count(&html, ".week-nav"), 0);
        assert!(html.contains("No articles found"));
    }

    #[test]
    fn test_unavailable_page() {
        let html = render_unavailable(Locale::Ko, "Index unavailable: <b>404</b>");
        assert!(html.contains("데이터를 불러올 수 없습니다"));
        assert!(!html.contains("<b>"));
        assert_eq!(count(&html, ".no-results"), 1);
    }
}
