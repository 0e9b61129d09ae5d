//! Word list loading (CSV and Excel) and the in-memory word table

use calamine::{open_workbook_auto, Data, Reader};
use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, info, warn};

use crate::error::{VocabError, VocabResult};

/// Header names the word list must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = ["Words", "Definition", "Connotation", "Synonym", "Antonym", "Sentence"];

/// One row of the word list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    pub word: String,
    pub definition: String,
    pub connotation: String,
    pub synonyms: String,
    pub antonyms: String,
    pub example_sentence: String,
    /// Trimmed, lower-cased `word`, used for search and lookup
    #[serde(skip)]
    pub key: String,
}

impl WordEntry {
    pub fn new(word: &str, definition: &str, connotation: &str, synonyms: &str, antonyms: &str, example_sentence: &str) -> Self {
        Self {
            word: word.trim().to_string(),
            definition: definition.trim().to_string(),
            connotation: connotation.trim().to_string(),
            synonyms: synonyms.trim().to_string(),
            antonyms: antonyms.trim().to_string(),
            example_sentence: example_sentence.trim().to_string(),
            key: word_key(word),
        }
    }
}

/// Lookup key for a word: trimmed and lower-cased.
pub fn word_key(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Ordered word table. Row order defines paging and next/previous.
#[derive(Debug, Clone)]
pub struct WordStore {
    entries: Vec<WordEntry>,
}

/// Column index of each required field
#[derive(Debug, Clone, Copy)]
struct ColumnMapping {
    word: usize,
    definition: usize,
    connotation: usize,
    synonyms: usize,
    antonyms: usize,
    sentence: usize,
}

fn detect_columns(headers: &[String]) -> VocabResult<ColumnMapping> {
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);

    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|&&name| position(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(VocabError::MissingColumns(missing));
    }

    // All present, checked above
    let at = |name: &str| position(name).unwrap_or_default();
    Ok(ColumnMapping {
        word: at("Words"),
        definition: at("Definition"),
        connotation: at("Connotation"),
        synonyms: at("Synonym"),
        antonyms: at("Antonym"),
        sentence: at("Sentence"),
    })
}

impl WordStore {
    /// Build a store from already-parsed entries.
    pub fn from_entries(entries: Vec<WordEntry>) -> VocabResult<Self> {
        if entries.is_empty() {
            return Err(VocabError::EmptyWordList);
        }
        let store = Self { entries };
        for dup in store.duplicate_words() {
            warn!(word = %dup, "duplicate word in word list; navigation uses the first row");
        }
        Ok(store)
    }

    /// Build a store from a header row and data rows.
    pub fn from_rows<I>(headers: &[String], rows: I) -> VocabResult<Self>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mapping = detect_columns(headers)?;
        let mut entries = Vec::new();

        for (line, row) in rows.into_iter().enumerate() {
            let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
            if cell(mapping.word).trim().is_empty() {
                debug!(row = line + 1, "skipping row with blank word");
                continue;
            }
            entries.push(WordEntry::new(
                cell(mapping.word),
                cell(mapping.definition),
                cell(mapping.connotation),
                cell(mapping.synonyms),
                cell(mapping.antonyms),
                cell(mapping.sentence),
            ));
        }

        Self::from_entries(entries)
    }

    /// Load a word list, choosing the parser by file extension.
    pub fn load(path: impl AsRef<Path>) -> VocabResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let store = match extension.as_str() {
            "csv" => Self::load_csv(path),
            "xlsx" | "xls" => Self::load_excel(path),
            _ => Err(VocabError::UnsupportedFormat(extension)),
        }?;
        info!(path = %path.display(), words = store.len(), "word list loaded");
        Ok(store)
    }

    /// Like [`WordStore::load`], but each path is read only once per process.
    pub fn load_cached(path: impl AsRef<Path>) -> VocabResult<Arc<Self>> {
        static CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<WordStore>>>> = OnceLock::new();

        let path = path.as_ref();
        let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

        let mut cache = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(store) = cache.get(&key) {
            return Ok(Arc::clone(store));
        }
        let store = Arc::new(Self::load(path)?);
        cache.insert(key, Arc::clone(&store));
        Ok(store)
    }

    fn load_csv(path: &Path) -> VocabResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)?;
        Self::from_csv_reader(&mut reader)
    }

    /// Parse CSV text from any reader (headers on the first line).
    pub fn from_csv<R: std::io::Read>(input: R) -> VocabResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input);
        Self::from_csv_reader(&mut reader)
    }

    fn from_csv_reader<R: std::io::Read>(reader: &mut csv::Reader<R>) -> VocabResult<Self> {
        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(|s| s.to_string()).collect::<Vec<_>>()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(&headers, rows)
    }

    fn load_excel(path: &Path) -> VocabResult<Self> {
        let mut workbook = open_workbook_auto(path).map_err(|e| VocabError::Excel(e.to_string()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| VocabError::Excel("no sheets found".to_string()))?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| VocabError::Excel(e.to_string()))?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows.next().ok_or(VocabError::EmptyWordList)?.iter().map(get_cell_string).collect();
        let data = rows.map(|row| row.iter().map(get_cell_string).collect::<Vec<_>>());
        Self::from_rows(&headers, data)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Index of the first row whose key equals `word`'s key.
    pub fn position_of(&self, word: &str) -> Option<usize> {
        let key = word_key(word);
        self.entries.iter().position(|e| e.key == key)
    }

    /// Keys that occur on more than one row, in first-seen order.
    pub fn duplicate_words(&self) -> Vec<String> {
        let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for (i, entry) in self.entries.iter().enumerate() {
            counts.entry(entry.key.as_str()).or_insert((i, 0)).1 += 1;
        }
        let mut dups: Vec<(usize, &str)> = counts
            .into_iter()
            .filter(|(_, (_, n))| *n > 1)
            .map(|(key, (first, _))| (first, key))
            .collect();
        dups.sort();
        dups.into_iter().map(|(_, key)| key.to_string()).collect()
    }
}

/// Helper to extract string from Excel cell
fn get_cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}
