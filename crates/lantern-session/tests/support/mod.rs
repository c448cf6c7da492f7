//! Shared fixtures for lantern-session integration tests.

#![allow(dead_code)]

use std::{
    cell::Cell,
    sync::{Arc, Mutex},
};

use lantern_index::{Document, DocumentIndex, DocumentSet, IndexError, MatchResult};
use lantern_session::{
    ActiveFlag, Navigator, QueryBackend, ResultItem, ResultSurface, TextInput,
};

/// Everything a [`FakeHost`] has been asked to do.
#[derive(Debug, Default, Clone)]
pub struct HostLog {
    /// Current input text.
    pub input: String,
    /// Whether the input has focus.
    pub focused: bool,
    /// Items currently on the surface.
    pub items: Vec<ResultItem>,
    /// Placeholder currently shown.
    pub placeholder: Option<String>,
    /// Whether the surface is visible.
    pub visible: bool,
    /// The "search-active" flag.
    pub active: bool,
    /// Every navigation, in order.
    pub navigations: Vec<String>,
    /// Every append, in order, tagged with the input text at the time.
    pub appends: Vec<(String, String)>,
}

/// In-memory host whose state is shared with the test.
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    /// Shared state.
    pub log: Arc<Mutex<HostLog>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input text, as if the reader typed it.
    pub fn type_text(&self, text: &str) {
        self.log.lock().unwrap().input = text.to_string();
    }

    /// Gives the input focus.
    pub fn focus(&self) {
        self.log.lock().unwrap().focused = true;
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> HostLog {
        self.log.lock().unwrap().clone()
    }

    /// Ids of the items currently shown.
    pub fn shown_ids(&self) -> Vec<String> {
        self.snapshot()
            .items
            .iter()
            .map(|i| i.document_id.clone())
            .collect()
    }
}

impl TextInput for FakeHost {
    fn input_value(&self) -> String {
        self.log.lock().unwrap().input.clone()
    }

    fn clear_input(&mut self) {
        self.log.lock().unwrap().input.clear();
    }

    fn focus_input(&mut self) {
        self.log.lock().unwrap().focused = true;
    }

    fn blur_input(&mut self) {
        self.log.lock().unwrap().focused = false;
    }

    fn input_focused(&self) -> bool {
        self.log.lock().unwrap().focused
    }
}

impl ResultSurface for FakeHost {
    fn clear_results(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.items.clear();
        log.placeholder = None;
    }

    fn append_result(&mut self, item: ResultItem) {
        let mut log = self.log.lock().unwrap();
        let input = log.input.clone();
        log.appends.push((input, item.document_id.clone()));
        log.items.push(item);
    }

    fn show_placeholder(&mut self, text: &str) {
        self.log.lock().unwrap().placeholder = Some(text.to_string());
    }

    fn set_results_visible(&mut self, visible: bool) {
        self.log.lock().unwrap().visible = visible;
    }
}

impl ActiveFlag for FakeHost {
    fn set_search_active(&mut self, active: bool) {
        self.log.lock().unwrap().active = active;
    }
}

impl Navigator for FakeHost {
    fn navigate(&mut self, url: &str) {
        self.log.lock().unwrap().navigations.push(url.to_string());
    }
}

/// Backend delegating to a real index and counting queries.
pub struct CountingBackend {
    pub index: DocumentIndex,
    pub calls: Cell<usize>,
}

impl CountingBackend {
    pub fn new(index: DocumentIndex) -> Self {
        Self {
            index,
            calls: Cell::new(0),
        }
    }
}

impl QueryBackend for CountingBackend {
    fn search(&self, text: &str) -> Result<Vec<MatchResult>, IndexError> {
        self.calls.set(self.calls.get() + 1);
        self.index.search(text)
    }
}

/// `{A: "hello world", B: "goodbye"}`.
pub fn hello_goodbye() -> Vec<Document> {
    vec![
        Document::new("A", "Greeting", "hello world", "/a/"),
        Document::new("B", "Farewell", "goodbye", "/b/"),
    ]
}

/// `n` documents that all match `"rust"`, ids `doc-0..n`.
pub fn rust_pages(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| {
            Document::new(
                format!("doc-{i}"),
                format!("Rust page {i}"),
                format!("rust notes number {i}, with some filler text"),
                format!("/rust/{i}/"),
            )
        })
        .collect()
}

/// Builds an index and the shared document set it was built from.
pub fn index_of(documents: Vec<Document>) -> (DocumentIndex, Arc<DocumentSet>) {
    let index = DocumentIndex::from_documents(documents).unwrap();
    let set = index.documents();
    (index, set)
}
