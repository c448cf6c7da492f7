//! Documents and the document map they are loaded from.
//!
//! The site generator publishes a single JSON object keyed by document id:
//!
//! ```json
//! {
//!   "getting-started": {"title": "Getting started", "content": "...", "url": "/docs/start/"},
//!   "faq": {"title": "FAQ", "content": "...", "url": "/faq/"}
//! }
//! ```
//!
//! Key order is significant: it is the insertion order used to break score ties.

use std::{collections::HashMap, fmt};

use serde::{
    Deserialize, Deserializer,
    de::{self, MapAccess, Visitor},
};

/// One indexed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Unique, stable identifier (the key in the document map).
    pub id: String,
    /// Page title.
    pub title: String,
    /// Plain-text page content.
    pub content: String,
    /// Location the page is served from.
    pub url: String,
}

impl Document {
    /// Creates a document from its parts.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            url: url.into(),
        }
    }
}

/// Value side of one document map entry.
#[derive(Deserialize)]
struct DocumentEntry {
    /// Page title.
    title: String,
    /// Plain-text page content.
    content: String,
    /// Page location.
    url: String,
}

/// The frozen set of documents, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    /// Documents in insertion order.
    docs: Vec<Document>,
    /// Position of each document in `docs`, by id.
    by_id: HashMap<String, usize>,
}

impl DocumentSet {
    /// Parses a document map from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds a set from documents, keeping the first of any duplicated id.
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let mut set = Self::default();
        for doc in documents {
            set.insert(doc);
        }
        set
    }

    /// Appends a document. Returns false if its id is already present.
    fn insert(&mut self, doc: Document) -> bool {
        if self.by_id.contains_key(&doc.id) {
            return false;
        }
        self.by_id.insert(doc.id.clone(), self.docs.len());
        self.docs.push(doc);
        true
    }

    /// Looks up a document by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).map(|&ord| &self.docs[ord])
    }

    /// Returns the document at the given insertion position.
    pub fn at(&self, ord: usize) -> Option<&Document> {
        self.docs.get(ord)
    }

    /// Iterates documents in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// True when the set holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl<'de> Deserialize<'de> for DocumentSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DocumentMapVisitor)
    }
}

/// Visits the document map in key order.
struct DocumentMapVisitor;

impl<'de> Visitor<'de> for DocumentMapVisitor {
    type Value = DocumentSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of document ids to {title, content, url} objects")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut set = DocumentSet::default();
        while let Some((id, entry)) = map.next_entry::<String, DocumentEntry>()? {
            let doc = Document {
                id,
                title: entry.title,
                content: entry.content,
                url: entry.url,
            };
            let id = doc.id.clone();
            if !set.insert(doc) {
                return Err(de::Error::custom(format!("duplicate document id `{id}`")));
            }
        }
        Ok(set)
    }
}
