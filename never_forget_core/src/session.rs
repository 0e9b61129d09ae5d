//! Per-user study session: state plus the event reducer

use serde::Serialize;
use tracing::debug;

use crate::generator::{GeneratedSentence, Level, SentenceGenerator};
use crate::pagination::PaginationState;
use crate::search;
use crate::store::WordStore;

/// A user action from the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Search box value; re-sent on every render
    Search(String),
    StepBack,
    StepForward,
    GoToIndex(usize),
    /// Study-list word button
    PickWord(String),
    SetPage(usize),
    PrevPage,
    NextPage,
    /// 1-based page number from the jump box
    JumpToPage(usize),
    RevealLevels,
    Generate(Level),
    GenerateAgain,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub pagination: PaginationState,
    pub generated: Vec<GeneratedSentence>,
    pub last_level: Level,
    pub last_search: String,
    pub show_level_buttons: bool,
    /// Closest word after a search that matched nothing
    pub search_suggestion: Option<String>,
}

impl SessionState {
    pub fn new(word_count: usize, page_size: usize) -> Self {
        Self {
            pagination: PaginationState::new(word_count, page_size),
            generated: Vec::new(),
            last_level: Level::Easy,
            last_search: String::new(),
            show_level_buttons: false,
            search_suggestion: None,
        }
    }

    pub fn current_word_index(&self) -> usize {
        self.pagination.current_word_index
    }

    pub fn page_index(&self) -> usize {
        self.pagination.page_index
    }

    /// Apply one event and return the next state.
    pub fn reduce(mut self, event: Event, store: &WordStore, generator: &mut SentenceGenerator) -> Self {
        debug!(?event, "reduce");
        match event {
            Event::Search(query) => self.apply_search(&query, store),
            Event::StepBack => {
                if self.pagination.step_back() {
                    self.reset_generation();
                }
            }
            Event::StepForward => {
                if self.pagination.step_forward() {
                    self.reset_generation();
                }
            }
            Event::GoToIndex(index) => self.go_to_index(index),
            Event::PickWord(word) => match store.position_of(&word) {
                Some(index) => self.go_to_index(index),
                None => debug!(word = %word, "picked word not in store"),
            },
            Event::SetPage(page) => {
                self.pagination.set_page(page);
            }
            Event::PrevPage => {
                self.pagination.prev_page();
            }
            Event::NextPage => {
                self.pagination.next_page();
            }
            Event::JumpToPage(page_number) => {
                self.pagination.jump_to_page(page_number);
            }
            Event::RevealLevels => self.show_level_buttons = true,
            Event::Generate(level) => {
                if self.show_level_buttons {
                    self.generate(level, store, generator, false);
                }
            }
            Event::GenerateAgain => {
                if self.show_level_buttons && !self.generated.is_empty() {
                    self.generate(self.last_level, store, generator, true);
                }
            }
        }
        self
    }

    fn go_to_index(&mut self, index: usize) {
        if self.pagination.go_to_index(index) {
            self.reset_generation();
        }
    }

    fn reset_generation(&mut self) {
        self.generated.clear();
        self.show_level_buttons = false;
    }

    fn apply_search(&mut self, query: &str, store: &WordStore) {
        // A cleared box keeps the last query, so retyping it does not jump again
        if query.trim().is_empty() {
            self.search_suggestion = None;
            return;
        }
        if query == self.last_search {
            return;
        }
        self.last_search = query.to_string();

        match search::resolve(store, query) {
            Some(index) => {
                debug!(query, index, "search hit");
                self.search_suggestion = None;
                self.go_to_index(index);
            }
            None => {
                self.search_suggestion = search::suggest(store, query);
                debug!(query, suggestion = ?self.search_suggestion, "search miss");
            }
        }
    }

    fn generate(&mut self, level: Level, store: &WordStore, generator: &mut SentenceGenerator, fresh: bool) {
        let Some(entry) = store.get(self.current_word_index()) else {
            return;
        };
        self.last_level = level;
        let text = if fresh {
            generator.regenerate(&entry.word, &entry.definition, level)
        } else {
            generator.generate(&entry.word, &entry.definition, level)
        };
        self.generated.push(GeneratedSentence::new(text, level));
    }
}
