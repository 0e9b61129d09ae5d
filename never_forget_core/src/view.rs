//! Read-only projection of session state for rendering

use serde::Serialize;

use crate::generator::{GeneratedSentence, Level};
use crate::pagination::page_slice;
use crate::session::SessionState;
use crate::store::{WordEntry, WordStore};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlashcardView {
    pub index: usize,
    pub word: String,
    pub connotation: String,
    pub definition: String,
    pub synonyms: String,
    pub antonyms: String,
    pub example_sentence: String,
}

impl From<(usize, &WordEntry)> for FlashcardView {
    fn from((index, entry): (usize, &WordEntry)) -> Self {
        Self {
            index,
            word: entry.word.clone(),
            connotation: entry.connotation.clone(),
            definition: entry.definition.clone(),
            synonyms: entry.synonyms.clone(),
            antonyms: entry.antonyms.clone(),
            example_sentence: entry.example_sentence.clone(),
        }
    }
}

/// One study-list row. `row_number` is the 1-based global position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyRow {
    pub row_number: usize,
    pub word: String,
    pub meaning: String,
    pub synonyms: String,
    pub antonyms: String,
    pub example_sentence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyListView {
    pub page_index: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
    pub can_prev_page: bool,
    pub can_next_page: bool,
    pub rows: Vec<StudyRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub flashcard: Option<FlashcardView>,
    pub can_step_back: bool,
    pub can_step_forward: bool,
    pub show_level_buttons: bool,
    pub last_level: Level,
    pub generated: Vec<GeneratedSentence>,
    pub study_list: StudyListView,
    pub search_suggestion: Option<String>,
}

/// Rows for one page, numbered from `start + 1`.
pub fn study_rows(entries: &[WordEntry], start: usize) -> Vec<StudyRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| StudyRow {
            row_number: start + i + 1,
            word: e.word.clone(),
            meaning: format!("{} {}", e.connotation, e.definition),
            synonyms: e.synonyms.clone(),
            antonyms: e.antonyms.clone(),
            example_sentence: e.example_sentence.clone(),
        })
        .collect()
}

pub fn project(state: &SessionState, store: &WordStore) -> ViewModel {
    let pagination = &state.pagination;
    let index = pagination.current_word_index;
    let (entries, start, end) = page_slice(store, pagination.page_index, pagination.page_size);

    ViewModel {
        flashcard: store.get(index).map(|e| FlashcardView::from((index, e))),
        can_step_back: pagination.can_step_back(),
        can_step_forward: pagination.can_step_forward(),
        show_level_buttons: state.show_level_buttons,
        last_level: state.last_level,
        generated: state.generated.clone(),
        study_list: StudyListView {
            page_index: pagination.page_index,
            total_pages: pagination.total_pages(),
            start,
            end,
            can_prev_page: pagination.can_prev_page(),
            can_next_page: pagination.can_next_page(),
            rows: study_rows(entries, start),
        },
        search_suggestion: state.search_suggestion.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SentenceGenerator;
    use crate::session::Event;
    use crate::store::tests::sample_csv;

    #[test]
    fn rows_use_global_numbering() {
        let store = WordStore::from_csv(sample_csv(25).as_bytes()).unwrap();
        let mut gen = SentenceGenerator::demo();
        let state = SessionState::new(store.len(), 10).reduce(Event::SetPage(2), &store, &mut gen);

        let view = project(&state, &store);
        let list = &view.study_list;
        assert_eq!((list.start, list.end), (20, 25));
        assert_eq!(list.rows.len(), 5);
        assert_eq!(list.rows[0].row_number, 21);
        assert_eq!(list.rows[4].row_number, 25);
        assert_eq!(list.rows[0].meaning, "(neutral) meaning 20");
        assert!(list.can_prev_page);
        assert!(!list.can_next_page);
    }

    #[test]
    fn flashcard_follows_word_not_page() {
        let store = WordStore::from_csv(sample_csv(25).as_bytes()).unwrap();
        let mut gen = SentenceGenerator::demo();
        let state = SessionState::new(store.len(), 10)
            .reduce(Event::GoToIndex(4), &store, &mut gen)
            .reduce(Event::NextPage, &store, &mut gen);

        let view = project(&state, &store);
        let card = view.flashcard.unwrap();
        assert_eq!(card.index, 4);
        assert_eq!(card.word, "word4");
        assert_eq!(view.study_list.rows[0].word, "word10");
        assert!(view.can_step_back);
        assert!(view.can_step_forward);
    }

    #[test]
    fn serializes_to_json() {
        let store = WordStore::from_csv(sample_csv(2).as_bytes()).unwrap();
        let state = SessionState::new(store.len(), 10);
        let json = serde_json::to_value(project(&state, &store)).unwrap();
        assert_eq!(json["flashcard"]["word"], "word0");
        assert_eq!(json["last_level"], "Easy");
        assert_eq!(json["study_list"]["total_pages"], 1);
    }
}
