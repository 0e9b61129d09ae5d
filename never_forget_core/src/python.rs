//! Python bindings for the host UI

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::generator::{self, Level, SentenceGenerator};
use crate::logging::init_tracing;
use crate::session::{Event, SessionState};
use crate::store::WordStore;
use crate::view::project;

fn parse_level(level: &str) -> PyResult<Level> {
    level.parse::<Level>().map_err(PyValueError::new_err)
}

/// One user's study session. The UI calls an action method per event,
/// then `view_json()` to render.
#[pyclass]
pub struct StudySession {
    store: Arc<WordStore>,
    state: SessionState,
    generator: SentenceGenerator,
}

impl StudySession {
    fn dispatch(&mut self, event: Event) {
        let state = self.state.clone();
        self.state = state.reduce(event, &self.store, &mut self.generator);
    }
}

#[pymethods]
impl StudySession {
    #[new]
    #[pyo3(signature = (path=None))]
    fn new(path: Option<String>) -> PyResult<Self> {
        let config = AppConfig::from_env();
        init_tracing(&config.log_level);

        let path = path.map(Into::into).unwrap_or_else(|| config.word_list_path.clone());
        let store = WordStore::load_cached(&path).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        let generator = SentenceGenerator::from_config(&config).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;

        Ok(Self {
            state: SessionState::new(store.len(), config.page_size),
            store,
            generator,
        })
    }

    #[getter]
    fn demo_mode(&self) -> bool {
        self.generator.is_demo()
    }

    #[getter]
    fn word_count(&self) -> usize {
        self.store.len()
    }

    #[getter]
    fn duplicate_words(&self) -> Vec<String> {
        self.store.duplicate_words()
    }

    fn search(&mut self, query: &str) {
        self.dispatch(Event::Search(query.to_string()));
    }

    fn step_back(&mut self) {
        self.dispatch(Event::StepBack);
    }

    fn step_forward(&mut self) {
        self.dispatch(Event::StepForward);
    }

    fn go_to_index(&mut self, index: usize) {
        self.dispatch(Event::GoToIndex(index));
    }

    fn pick_word(&mut self, word: &str) {
        self.dispatch(Event::PickWord(word.to_string()));
    }

    fn set_page(&mut self, page: usize) {
        self.dispatch(Event::SetPage(page));
    }

    fn prev_page(&mut self) {
        self.dispatch(Event::PrevPage);
    }

    fn next_page(&mut self) {
        self.dispatch(Event::NextPage);
    }

    fn jump_to_page(&mut self, page_number: usize) {
        self.dispatch(Event::JumpToPage(page_number));
    }

    fn reveal_levels(&mut self) {
        self.dispatch(Event::RevealLevels);
    }

    fn generate(&mut self, level: &str) -> PyResult<()> {
        let level = parse_level(level)?;
        self.dispatch(Event::Generate(level));
        Ok(())
    }

    fn generate_again(&mut self) {
        self.dispatch(Event::GenerateAgain);
    }

    /// Current view model as JSON
    fn view_json(&self) -> PyResult<String> {
        serde_json::to_string(&project(&self.state, &self.store)).map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "StudySession(words={}, index={}, page={}, demo={})",
            self.store.len(),
            self.state.current_word_index(),
            self.state.page_index(),
            self.generator.is_demo()
        )
    }
}

// ============= Python Bindings =============

#[pyfunction]
#[pyo3(name = "appears_once")]
pub fn py_appears_once(word: &str, text: &str) -> bool {
    generator::appears_once(word, text)
}

#[pyfunction]
#[pyo3(name = "validate_length")]
pub fn py_validate_length(level: &str, text: &str) -> PyResult<bool> {
    Ok(generator::validate_length(parse_level(level)?, text))
}

#[pyfunction]
#[pyo3(name = "init_logging", signature = (level=None))]
pub fn py_init_logging(level: Option<&str>) -> bool {
    init_tracing(level.unwrap_or("info"))
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<StudySession>()?;
    m.add_function(wrap_pyfunction!(py_appears_once, m)?)?;
    m.add_function(wrap_pyfunction!(py_validate_length, m)?)?;
    m.add_function(wrap_pyfunction!(py_init_logging, m)?)?;
    m.add("LEVELS", Level::ALL.map(|l| l.as_str()).to_vec())?;
    Ok(())
}
