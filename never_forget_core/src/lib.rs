//! Never Forget Vocab core - word list, flashcard navigation, study-list paging
//! and example-sentence generation.
//!
//! The UI stays outside this crate. It feeds [`session::Event`]s into
//! [`session::SessionState::reduce`] and renders [`view::project`].

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod pagination;
pub mod provider;
pub mod search;
pub mod session;
pub mod store;
pub mod view;

#[cfg(feature = "python")]
mod python;

pub use config::AppConfig;
pub use error::{ProviderError, VocabError, VocabResult};
pub use generator::{appears_once, validate_length, GeneratedSentence, Level, SentenceGenerator};
pub use pagination::{page_slice, total_pages, PaginationState};
pub use provider::{CompletionProvider, OpenAiProvider};
pub use search::{resolve, suggest};
pub use session::{Event, SessionState};
pub use store::{WordEntry, WordStore};
pub use view::{project, ViewModel};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Never Forget Vocab Python module
#[cfg(feature = "python")]
#[pymodule]
fn never_forget_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register(m)
}
