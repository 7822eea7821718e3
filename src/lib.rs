//! Page behaviors for the apartment reservation front end.
//!
//! The server renders plain HTML; this crate layers the interactive
//! behaviors on top of it (validation, rent calculator, date and price
//! constraints, filter persistence, live search and friends) and runs them
//! on a deterministic page host. A [`Page`] owns the parsed DOM, the
//! listener registry, a virtual clock, client storage and dialog mocks.
//!
//! ```no_run
//! use apartment_ui::Page;
//!
//! # fn main() -> apartment_ui::Result<()> {
//! let mut page = Page::from_html(r#"
//!   <form method="post" action="/reservations/create/">
//!     <select name="apartment">
//!       <option value="1">Unit 101 - Skyline (₱15,000.00/mo)</option>
//!     </select>
//!     <div><div><input name="months" value="2"></div></div>
//!   </form>
//! "#)?;
//! page.assert_text(".reservation-preview .total-amount", "₱30,000.00")?;
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt;

mod app;
mod behaviors;
mod dom;
mod format;
mod forms;
mod html;
mod markup;
mod page;
mod platform;
mod scheduler;
mod selector;

pub(crate) use dom::{Dom, NodeId};
pub(crate) use scheduler::{ScheduledTask, SchedulerState, TimerCallback};

pub use behaviors::filters::FilterSet;
pub use page::{DEFAULT_EPOCH_MS, Page, PageConfig};
pub use platform::{
    FILTER_STORAGE_KEY, KeyModifiers, LocationNavigation, LocationNavigationKind, MemoryStorage,
    MockFile, PendingSubmission, StateStore, SubmissionOutcome,
};
pub use scheduler::PendingTimer;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    UnsupportedSelector(String),
    SelectorNotFound(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    Runtime(String),
    Storage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
            Self::Runtime(msg) => write!(f, "runtime error: {msg}"),
            Self::Storage(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl StdError for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
