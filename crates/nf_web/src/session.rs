use chrono::{Local, NaiveDate};
use nf_core::{visible_sorted, Article, Error, Locale, Result, SortKey, SourceFilter, Week};
use nf_loader::DataLoader;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::render::{self, PageView};
use crate::selection::{Selection, ViewMode};

/// A user interaction with the page controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Search(String),
    Sort(SortKey),
    SelectSource(SourceFilter),
    SetView(ViewMode),
    /// Move the week window by this many weeks (negative = back in time).
    NavigateWeek(i64),
    CurrentWeek,
}

impl FromStr for UiEvent {
    type Err = Error;

    /// Parses one shell command, e.g. `search llama`, `source OpenAI`, `prev`.
    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "search" => Ok(Self::Search(arg.to_string())),
            "sort" => Ok(Self::Sort(arg.parse()?)),
            "source" if !arg.is_empty() => Ok(Self::SelectSource(SourceFilter::from(arg))),
            "view" => Ok(Self::SetView(arg.parse()?)),
            "prev" => Ok(Self::NavigateWeek(-1)),
            "next" => Ok(Self::NavigateWeek(1)),
            "today" => Ok(Self::CurrentWeek),
            _ => Err(Error::InvalidArgument(format!("unknown command: {}", line))),
        }
    }
}

/// Generation number handed out per user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Fetch work an action needs before the page can be recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPlan {
    Nothing,
    Source(String),
    AllSources,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub ticket: Ticket,
    pub plan: LoadPlan,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub today: NaiveDate,
    pub locale: Locale,
    /// Start with the week window on the current week. When off, every date is shown.
    pub week_filter: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            today: Local::now().date_naive(),
            locale: Locale::default(),
            week_filter: true,
        }
    }
}

/// One viewer session: the loaded data, what the user selected, and the
/// ticket counter that orders fetch completions against later actions.
pub struct Session {
    loader: DataLoader,
    selection: Selection,
    options: SessionOptions,
    generation: u64,
    unavailable: Option<String>,
}

impl Session {
    /// Loads the index. A failed load does not abort: the session renders the
    /// unavailable page instead.
    pub async fn open(mut loader: DataLoader, options: SessionOptions) -> Self {
        let unavailable = loader.load_index().await.err().map(|e| e.to_string());

        let week = options.week_filter.then(|| Week::containing(options.today));
        Self {
            loader,
            selection: Selection::new(week),
            options,
            generation: 0,
            unavailable,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }

    pub fn locale(&self) -> Locale {
        self.options.locale
    }

    pub fn is_available(&self) -> bool {
        self.unavailable.is_none()
    }

    pub fn this_week(&self) -> Week {
        Week::containing(self.options.today)
    }

    pub fn current_ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    /// Applies the selection change for `event` and reports what has to be
    /// fetched before rendering. Every call invalidates earlier tickets.
    pub fn begin(&mut self, event: UiEvent) -> Pending {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        let plan = if self.is_available() {
            self.apply(event)
        } else {
            LoadPlan::Nothing
        };
        debug!("🎫 {:?} -> {:?}", ticket, plan);
        Pending { ticket, plan }
    }

    fn apply(&mut self, event: UiEvent) -> LoadPlan {
        match event {
            UiEvent::Search(query) => {
                self.selection.query = query;
                LoadPlan::Nothing
            }
            UiEvent::Sort(key) => {
                self.selection.sort = key;
                LoadPlan::Nothing
            }
            UiEvent::SetView(mode) => {
                self.selection.view = mode;
                LoadPlan::Nothing
            }
            UiEvent::SelectSource(filter) => {
                self.selection.source = filter.clone();
                match filter {
                    SourceFilter::All => LoadPlan::Nothing,
                    SourceFilter::Named(name) if self.loader.is_loaded(&name) => LoadPlan::Nothing,
                    SourceFilter::Named(name) => LoadPlan::Source(name),
                }
            }
            UiEvent::NavigateWeek(step) => {
                let this_week = self.this_week();
                let Some(target) = self.selection.week.unwrap_or(this_week).shift(step) else {
                    warn!("Week step {} is out of range, ignoring", step);
                    return LoadPlan::Nothing;
                };
                if target > this_week {
                    debug!("Not moving past the current week");
                    return LoadPlan::Nothing;
                }

                self.selection.week = Some(target);
                if step < 0 && !self.loader.all_sources_loaded() {
                    LoadPlan::AllSources
                } else {
                    LoadPlan::Nothing
                }
            }
            UiEvent::CurrentWeek => {
                self.selection.week = Some(self.this_week());
                LoadPlan::Nothing
            }
        }
    }

    /// Runs the fetches a pending action asked for. Results are merged into
    /// the working set even if the action has been superseded.
    pub async fn fulfil(&mut self, pending: &Pending) {
        match &pending.plan {
            LoadPlan::Nothing => {}
            LoadPlan::Source(name) => {
                self.loader.load_source(name).await;
            }
            LoadPlan::AllSources => {
                let outcomes = self.loader.load_all_sources().await;
                info!("📚 Loaded all sources ({} fetched)", outcomes.len());
            }
        }
    }

    /// Renders the page for a completed action, or `None` when a newer
    /// action has been started since.
    pub fn finish(&self, pending: Pending) -> Option<String> {
        if pending.ticket != self.current_ticket() {
            debug!("Discarding stale completion {:?}", pending.ticket);
            return None;
        }
        Some(self.render())
    }

    /// Fetch, recompute and render one action, in that order. Holding
    /// `&mut self` throughout means the action is never superseded.
    pub async fn dispatch(&mut self, event: UiEvent) -> String {
        let pending = self.begin(event);
        self.fulfil(&pending).await;
        self.render()
    }

    pub fn visible(&self) -> Vec<&Article> {
        visible_sorted(
            self.loader.articles(),
            &self.selection.criteria(),
            self.selection.sort,
        )
    }

    pub fn render(&self) -> String {
        if let Some(reason) = &self.unavailable {
            return render::render_unavailable(self.options.locale, reason);
        }

        let articles = self.visible();
        render::render_page(&PageView {
            locale: self.options.locale,
            updated_at: self.loader.updated_at(),
            sources: self.loader.sources(),
            selection: &self.selection,
            this_week: self.this_week(),
            articles: &articles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_loader::MemorySource;
    use serde_json::json;
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()
    }

    fn memory() -> Arc<MemorySource> {
        let index = json!({
            "updated_at": "2025-01-08 09:00:00",
            "preview_articles": [
                {"source": "OpenAI", "title": "This week", "url": "https://openai.com/1", "date": "2025-01-07"},
                {"source": "Anthropic", "title": "Claude", "url": "https://anthropic.com/1", "date": "2025-01-06",
                 "categories": ["Safety"]}
            ],
            "sources": [
                {"name": "Anthropic", "file": "sources/anthropic.json", "total_articles": 2},
                {"name": "OpenAI", "file": "sources/openai.json", "total_articles": 2},
                {"name": "xAI", "file": "sources/xai.json", "total_articles": 0}
            ]
        });
        let openai = json!({"articles": [
            {"source": "OpenAI", "title": "This week", "url": "https://openai.com/1", "date": "2025-01-07"},
            {"source": "OpenAI", "title": "Last week", "url": "https://openai.com/0", "date": "2024-12-31"}
        ]});
        let anthropic = json!({"articles": [
            {"source": "Anthropic", "title": "Claude", "url": "https://anthropic.com/1", "date": "2025-01-06"},
            {"source": "Anthropic", "title": "Older Claude", "url": "https://anthropic.com/0", "date": "2024-12-30"}
        ]});
        let xai = json!({"articles": []});

        Arc::new(
            MemorySource::new()
                .with_json("data/index.json", &index)
                .unwrap()
                .with_json("data/sources/openai.json", &openai)
                .unwrap()
                .with_json("data/sources/anthropic.json", &anthropic)
                .unwrap()
                .with_json("data/sources/xai.json", &xai)
                .unwrap(),
        )
    }

    async fn session(source: Arc<MemorySource>) -> Session {
        let options = SessionOptions {
            today: today(),
            locale: Locale::En,
            week_filter: true,
        };
        Session::open(DataLoader::new(source), options).await
    }

    fn titles(session: &Session) -> Vec<String> {
        session.visible().iter().map(|a| a.title.clone()).collect()
    }

    #[tokio::test]
    async fn test_default_view_is_current_week() {
        let session = session(memory()).await;
        assert!(session.is_available());
        assert_eq!(session.selection().week, Some(Week::containing(today())));
        assert_eq!(titles(&session), vec!["This week", "Claude"]);
    }

    #[tokio::test]
    async fn test_select_source_loads_once() {
        let source = memory();
        let mut session = session(source.clone()).await;

        let pending = session.begin(UiEvent::SelectSource(SourceFilter::from("OpenAI")));
        assert_eq!(pending.plan, LoadPlan::Source("OpenAI".to_string()));
        session.fulfil(&pending).await;
        assert!(session.finish(pending).is_some());
        assert_eq!(titles(&session), vec!["This week"]);

        session.dispatch(UiEvent::SelectSource(SourceFilter::All)).await;
        let pending = session.begin(UiEvent::SelectSource(SourceFilter::from("OpenAI")));
        assert_eq!(pending.plan, LoadPlan::Nothing);
        assert_eq!(source.fetch_count("data/sources/openai.json").await, 1);
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let mut session = session(memory()).await;

        let first = session.begin(UiEvent::SelectSource(SourceFilter::from("OpenAI")));
        let second = session.begin(UiEvent::SelectSource(SourceFilter::All));

        session.fulfil(&first).await;
        assert!(session.finish(first).is_none());
        assert!(session.loader().is_loaded("OpenAI"));

        session.fulfil(&second).await;
        assert!(session.finish(second).is_some());
    }

    #[tokio::test]
    async fn test_week_navigation_clamps_and_loads_all() {
        let source = memory();
        let mut session = session(source.clone()).await;

        let pending = session.begin(UiEvent::NavigateWeek(1));
        assert_eq!(pending.plan, LoadPlan::Nothing);
        assert_eq!(session.selection().week, Some(session.this_week()));

        let html = session.dispatch(UiEvent::NavigateWeek(-1)).await;
        assert!(session.loader().all_sources_loaded());
        assert_eq!(titles(&session), vec!["Last week", "Older Claude"]);
        assert!(html.contains("Dec 30, 2024 – Jan 5, 2025"));

        let before = source.requests().await.len();
        let pending = session.begin(UiEvent::NavigateWeek(-1));
        assert_eq!(pending.plan, LoadPlan::Nothing);
        session.fulfil(&pending).await;
        assert_eq!(source.requests().await.len(), before);

        session.dispatch(UiEvent::CurrentWeek).await;
        assert_eq!(session.selection().week, Some(session.this_week()));
    }

    #[tokio::test]
    async fn test_huge_week_step_is_ignored() {
        let source = memory();
        let mut session = session(source.clone()).await;

        let html = session.dispatch(UiEvent::NavigateWeek(-4_000_000_000)).await;
        assert_eq!(session.selection().week, Some(session.this_week()));
        assert!(html.contains("Jan 6 – 12, 2025"));

        let pending = session.begin(UiEvent::NavigateWeek(i64::MIN));
        assert_eq!(pending.plan, LoadPlan::Nothing);
        assert_eq!(source.requests().await, vec!["data/index.json"]);
    }

    #[tokio::test]
    async fn test_empty_source_message() {
        let mut session = session(memory()).await;
        let html = session.dispatch(UiEvent::SelectSource(SourceFilter::from("xAI"))).await;
        assert!(session.visible().is_empty());
        assert!(html.contains("empty-source"));
        assert!(html.contains("No content has been collected yet."));
        assert!(!html.contains("No articles were collected this week"));
    }

    #[tokio::test]
    async fn test_search_and_sort_do_not_fetch() {
        let source = memory();
        let mut session = session(source.clone()).await;

        session.dispatch(UiEvent::Search("SAFETY".to_string())).await;
        assert_eq!(titles(&session), vec!["Claude"]);

        session.dispatch(UiEvent::Search(String::new())).await;
        session.dispatch(UiEvent::Sort(SortKey::DateAsc)).await;
        assert_eq!(titles(&session), vec!["Claude", "This week"]);

        let html = session.dispatch(UiEvent::SetView(ViewMode::Card)).await;
        assert!(html.contains("articles-container card-view"));
        assert_eq!(source.requests().await, vec!["data/index.json"]);
    }

    #[tokio::test]
    async fn test_unavailable_index() {
        let mut session = session(Arc::new(MemorySource::new())).await;
        assert!(!session.is_available());
        let html = session.dispatch(UiEvent::Search("x".to_string())).await;
        assert!(html.contains("Data could not be loaded"));
    }

    #[test]
    fn test_parse_events() {
        assert_eq!("search  open ai ".parse::<UiEvent>().unwrap(), UiEvent::Search("open ai".to_string()));
        assert_eq!("search".parse::<UiEvent>().unwrap(), UiEvent::Search(String::new()));
        assert_eq!(
            "source Google DeepMind".parse::<UiEvent>().unwrap(),
            UiEvent::SelectSource(SourceFilter::from("Google DeepMind"))
        );
        assert_eq!("source all".parse::<UiEvent>().unwrap(), UiEvent::SelectSource(SourceFilter::All));
        assert_eq!("sort source".parse::<UiEvent>().unwrap(), UiEvent::Sort(SortKey::Source));
        assert_eq!("view card".parse::<UiEvent>().unwrap(), UiEvent::SetView(ViewMode::Card));
        assert_eq!("prev".parse::<UiEvent>().unwrap(), UiEvent::NavigateWeek(-1));
        assert_eq!("today".parse::<UiEvent>().unwrap(), UiEvent::CurrentWeek);
        assert!("source".parse::<UiEvent>().is_err());
        assert!("jump".parse::<UiEvent>().is_err());
        assert!("sort random".parse::<UiEvent>().is_err());
    }
}
