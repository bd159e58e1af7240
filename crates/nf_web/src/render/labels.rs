use nf_core::{Locale, SortKey};

use crate::selection::ViewMode;

/// Fixed UI strings for one locale.
pub struct Labels {
    pub title: &'static str,
    pub unknown: &'static str,
    pub search_placeholder: &'static str,
    pub all_sources: &'static str,
    pub previous_week: &'static str,
    pub next_week: &'static str,
    pub this_week: &'static str,
    pub source_empty: &'static str,
    pub source_empty_hint: &'static str,
    pub week_empty: &'static str,
    pub week_empty_action: &'static str,
    pub no_results: &'static str,
    pub no_results_hint: &'static str,
    pub unavailable: &'static str,
    pub unavailable_hint: &'static str,
}

const KO: Labels = Labels {
    title: "BigTech AI News",
    unknown: "알 수 없음",
    search_placeholder: "기사 검색...",
    all_sources: "전체",
    previous_week: "이전 주",
    next_week: "다음 주",
    this_week: "이번 주",
    source_empty: "현재 수집된 콘텐츠가 없습니다.",
    source_empty_hint: "이 소스는 아직 기사를 수집하지 못했거나, 접근이 제한되어 있을 수 있습니다.",
    week_empty: "이 주에는 수집된 기사가 없습니다",
    week_empty_action: "이전 주 보기",
    no_results: "검색 결과가 없습니다",
    no_results_hint: "다른 검색어나 필터를 사용해 보세요.",
    unavailable: "데이터를 불러올 수 없습니다",
    unavailable_hint: "data/index.json 파일이 없습니다. 수집 작업을 실행하여 데이터를 생성하세요.",
};

const EN: Labels = Labels {
    title: "BigTech AI News",
    unknown: "Unknown",
    search_placeholder: "Search articles...",
    all_sources: "All",
    previous_week: "Previous week",
    next_week: "Next week",
    this_week: "This week",
    source_empty: "No content has been collected yet.",
    source_empty_hint: "This source may not have been collected yet, or access to it may be restricted.",
    week_empty: "No articles were collected this week",
    week_empty_action: "View previous week",
    no_results: "No articles found",
    no_results_hint: "Try a different search term or filter.",
    unavailable: "Data could not be loaded",
    unavailable_hint: "data/index.json is missing. Run the collection job to generate it.",
};

pub fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::Ko => &KO,
        Locale::En => &EN,
    }
}

pub fn last_updated(locale: Locale, updated_at: &str) -> String {
    match locale {
        Locale::Ko => format!("마지막 업데이트: {}", updated_at),
        Locale::En => format!("Last updated: {}", updated_at),
    }
}

pub fn article_count(locale: Locale, count: usize) -> String {
    match (locale, count) {
        (Locale::Ko, n) => format!("{}개의 기사", n),
        (Locale::En, 1) => "1 article".to_string(),
        (Locale::En, n) => format!("{} articles", n),
    }
}

pub fn author(locale: Locale, name: &str) -> String {
    match locale {
        Locale::Ko => format!("작성자: {}", name),
        Locale::En => format!("By {}", name),
    }
}

pub fn week_empty_detail(locale: Locale, week_label: &str) -> String {
    match locale {
        Locale::Ko => format!("{} 기간에 해당하는 기사가 없습니다.", week_label),
        Locale::En => format!("There are no articles for {}.", week_label),
    }
}

pub fn sort_option(locale: Locale, key: SortKey) -> &'static str {
    match (locale, key) {
        (Locale::Ko, SortKey::DateDesc) => "최신순",
        (Locale::Ko, SortKey::DateAsc) => "오래된순",
        (Locale::Ko, SortKey::Source) => "소스별",
        (Locale::En, SortKey::DateDesc) => "Newest first",
        (Locale::En, SortKey::DateAsc) => "Oldest first",
        (Locale::En, SortKey::Source) => "By source",
    }
}

pub fn view_option(locale: Locale, mode: ViewMode) -> &'static str {
    match (locale, mode) {
        (Locale::Ko, ViewMode::List) => "리스트",
        (Locale::Ko, ViewMode::Card) => "카드",
        (Locale::En, ViewMode::List) => "List",
        (Locale::En, ViewMode::Card) => "Cards",
    }
}
