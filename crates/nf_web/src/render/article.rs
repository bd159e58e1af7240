use chrono::{DateTime, NaiveDate, NaiveDateTime};
use nf_core::{format_long_date, Article, Locale};
use std::fmt::Write;

use super::{esc, labels, logos};

/// Localized long date for a feed date string; anything that does not parse
/// is returned unchanged.
pub fn format_date(raw: &str, locale: Locale) -> String {
    let trimmed = raw.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|d| d.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|d| d.date())
        });

    match date {
        Some(date) => format_long_date(date, locale),
        None => raw.to_string(),
    }
}

/// Link target for an article. Script-capable schemes are replaced by `#`.
pub fn safe_href(url: &str) -> &str {
    let lowered = url.trim_start().to_ascii_lowercase();
    if ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        "#"
    } else {
        url
    }
}

pub(crate) fn logo_img(source: &str) -> String {
    logos::logo_for(source)
        .map(|file| format!(r#"<img src="assets/{}" alt="{} logo">"#, file, esc(source)))
        .unwrap_or_default()
}

pub fn render_article(article: &Article, locale: Locale) -> String {
    let mut html = String::new();
    let source = esc(&article.source);

    let _ = write!(
        html,
        r#"<div class="article-card"><div class="article-header"><span class="article-source {}">{}{}</span></div>"#,
        esc(&logos::source_class(&article.source)),
        logo_img(&article.source),
        source
    );
    let _ = write!(
        html,
        r#"<h2 class="article-title"><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></h2>"#,
        esc(safe_href(&article.url)),
        esc(&article.title)
    );

    html.push_str(r#"<div class="article-meta">"#);
    if let Some(date) = article.date_str() {
        let _ = write!(
            html,
            r#"<span class="article-date">{}</span>"#,
            esc(&format_date(date, locale))
        );
    }
    if let Some(author) = article.author.as_deref().filter(|a| !a.is_empty()) {
        let _ = write!(
            html,
            r#"<span class="article-author">{}</span>"#,
            esc(&labels::author(locale, author))
        );
    }
    html.push_str("</div>");

    if let Some(summary) = article.summary.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(html, r#"<p class="article-summary">{}</p>"#, esc(summary));
    }

    let categories: String = article
        .categories
        .iter()
        .filter(|c| !c.trim().is_empty())
        .map(|c| format!(r#"<span class="category-tag">{}</span>"#, esc(c)))
        .collect();
    if !categories.is_empty() {
        let _ = write!(html, r#"<div class="article-categories">{}</div>"#, categories);
    }

    html.push_str("</div>");
    html
}
