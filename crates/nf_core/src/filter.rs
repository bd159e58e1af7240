use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{Article, Error, Week};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SourceFilter {
    #[default]
    All,
    Named(String),
}

impl SourceFilter {
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => article.source == *name,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl From<&str> for SourceFilter {
    fn from(s: &str) -> Self {
        if s == "all" {
            Self::All
        } else {
            Self::Named(s.to_string())
        }
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "date-desc")]
    DateDesc,
    #[serde(rename = "date-asc")]
    DateAsc,
    #[serde(rename = "source")]
    Source,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::DateDesc, SortKey::DateAsc, SortKey::Source];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::Source => "source",
        }
    }

    fn compare(&self, a: &Article, b: &Article) -> Ordering {
        match self {
            Self::DateDesc => b.sort_date().cmp(a.sort_date()),
            Self::DateAsc => a.sort_date().cmp(b.sort_date()),
            Self::Source => a
                .source
                .cmp(&b.source)
                .then_with(|| b.sort_date().cmp(a.sort_date())),
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date-desc" => Ok(Self::DateDesc),
            "date-asc" => Ok(Self::DateAsc),
            "source" => Ok(Self::Source),
            other => Err(Error::InvalidArgument(format!("unknown sort key: {}", other))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that narrows the article set. Sorting is applied separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub source: SourceFilter,
    pub query: String,
    pub week: Option<Week>,
}

impl FilterCriteria {
    pub fn matches(&self, article: &Article) -> bool {
        if let Some(week) = &self.week {
            if !week.contains_article(article) {
                return false;
            }
        }

        if !self.source.matches(article) {
            return false;
        }

        if !self.query.is_empty() {
            let needle = self.query.to_lowercase();
            if !article.searchable_text().contains(&needle) {
                return false;
            }
        }

        true
    }
}

/// Week window, then source, then free-text query. Input order is preserved.
pub fn compute_visible<'a>(all: &'a [Article], criteria: &FilterCriteria) -> Vec<&'a Article> {
    all.iter().filter(|a| criteria.matches(a)).collect()
}

/// Stable sort: equal keys keep their relative order.
pub fn sort_articles(articles: &mut [&Article], key: SortKey) {
    articles.sort_by(|a, b| key.compare(a, b));
}

pub fn visible_sorted<'a>(all: &'a [Article], criteria: &FilterCriteria, key: SortKey) -> Vec<&'a Article> {
    let mut visible = compute_visible(all, criteria);
    sort_articles(&mut visible, key);
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Vec<Article> {
        vec![
            Article::new("OpenAI", "GPT update", "https://openai.com/1")
                .with_date("2024-01-01")
                .with_summary("A new model"),
            Article::new("Anthropic", "Claude notes", "https://anthropic.com/1")
                .with_date("2024-03-01")
                .with_categories(["Safety"]),
            Article::new("OpenAI", "Sora", "https://openai.com/2").with_date("2024-02-01"),
            Article::new("Meta AI", "Llama", "https://meta.com/1")
                .with_collected_at("2024-03-01 08:00:00"),
        ]
    }

    fn dates(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.sort_date().to_string()).collect()
    }

    #[test]
    fn test_sort_date_desc() {
        let all = vec![
            Article::new("A", "1", "u1").with_date("2024-01-01"),
            Article::new("A", "2", "u2").with_date("2024-03-01"),
            Article::new("A", "3", "u3").with_date("2024-02-01"),
        ];
        let sorted = visible_sorted(&all, &FilterCriteria::default(), SortKey::DateDesc);
        assert_eq!(dates(&sorted), vec!["2024-03-01", "2024-02-01", "2024-01-01"]);

        let sorted = visible_sorted(&all, &FilterCriteria::default(), SortKey::DateAsc);
        assert_eq!(dates(&sorted), vec!["2024-01-01", "2024-02-01", "2024-03-01"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let all = vec![
            Article::new("B", "first", "u1").with_date("2024-01-01"),
            Article::new("A", "second", "u2").with_date("2024-01-01"),
            Article::new("B", "third", "u3").with_date("2024-01-01"),
        ];
        let sorted = visible_sorted(&all, &FilterCriteria::default(), SortKey::DateDesc);
        let titles: Vec<_> = sorted.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);

        let sorted = visible_sorted(&all, &FilterCriteria::default(), SortKey::Source);
        let titles: Vec<_> = sorted.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first", "third"]);
    }

    #[test]
    fn test_sort_by_source_then_date_desc() {
        let all = sample();
        let sorted = visible_sorted(&all, &FilterCriteria::default(), SortKey::Source);
        let titles: Vec<_> = sorted.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Claude notes", "Llama", "Sora", "GPT update"]);
    }

    #[test]
    fn test_source_filter() {
        let all = sample();
        let criteria = FilterCriteria {
            source: SourceFilter::from("OpenAI"),
            ..Default::default()
        };
        let visible = compute_visible(&all, &criteria);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|a| a.source == "OpenAI"));
    }

    #[test]
    fn test_query_is_case_insensitive_and_covers_fields() {
        let all = sample();
        let search = |q: &str| {
            let criteria = FilterCriteria {
                query: q.to_string(),
                ..Default::default()
            };
            compute_visible(&all, &criteria)
                .iter()
                .map(|a| a.title.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(search("SORA"), vec!["Sora"]);
        assert_eq!(search("new model"), vec!["GPT update"]);
        assert_eq!(search("safety"), vec!["Claude notes"]);
        assert_eq!(search("meta ai"), vec!["Llama"]);
        assert!(search("nothing matches this").is_empty());
        assert_eq!(search("").len(), 4);
    }

    #[test]
    fn test_week_filter_uses_collected_at() {
        let all = sample();
        let criteria = FilterCriteria {
            week: Some(Week::containing(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())),
            ..Default::default()
        };
        let titles: Vec<_> = compute_visible(&all, &criteria)
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Claude notes", "Llama"]);
    }

    #[test]
    fn test_compute_visible_is_pure_subset() {
        let all = sample();
        let criteria = FilterCriteria {
            source: SourceFilter::from("OpenAI"),
            query: "o".to_string(),
            week: None,
        };
        let first = compute_visible(&all, &criteria);
        let second = compute_visible(&all, &criteria);
        assert_eq!(first, second);
        assert!(first.iter().all(|a| all.contains(a)));
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("date-asc".parse::<SortKey>().unwrap(), SortKey::DateAsc);
        assert!("newest".parse::<SortKey>().is_err());
        assert_eq!(SourceFilter::from("all"), SourceFilter::All);
        assert_eq!(SourceFilter::from("xAI").name(), Some("xAI"));
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
    }
}
