pub mod render;
pub mod selection;
pub mod session;

pub use selection::{Selection, ViewMode};
pub use session::{LoadPlan, Pending, Session, SessionOptions, Ticket, UiEvent};

pub mod prelude {
    pub use crate::{Selection, Session, SessionOptions, UiEvent, ViewMode};
    pub use nf_core::{Article, Error, Locale, Result, SortKey, SourceFilter};
}
