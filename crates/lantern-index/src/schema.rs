//! Index schema definition for the lantern document index.
//!
//! Defines the Tantivy schema:
//! - `id`: Document identifier (string, indexed)
//! - `title`: Page title (text)
//! - `content`: Page content (text)
//! - `ord`: Insertion position (u64 fast field), used to resolve hits and break
//!   score ties
//!
//! Nothing is stored; hits are resolved against the in-memory `DocumentSet`
//! through `ord`.

use tantivy::schema::{
    FAST, Field, INDEXED, IndexRecordOption, STRING, Schema, TextFieldIndexing, TextOptions,
};

use crate::analyzer::LANTERN_TOKENIZER;

/// Name of the insertion-position fast field.
pub const ORD_FIELD: &str = "ord";

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Document identifier.
    pub id: Field,
    /// Page title.
    pub title: Field,
    /// Page content.
    pub content: Field,
    /// Position of the document in the document map.
    pub ord: Field,
}

impl IndexSchema {
    /// Creates a new index schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let id = builder.add_text_field("id", STRING);

        let text_options = TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(LANTERN_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        );
        let title = builder.add_text_field("title", text_options.clone());
        let content = builder.add_text_field("content", text_options);

        let ord = builder.add_u64_field(ORD_FIELD, INDEXED | FAST);

        let schema = builder.build();

        Self {
            schema,
            id,
            title,
            content,
            ord,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The fields searched by queries.
    pub fn text_fields(&self) -> [Field; 2] {
        [self.title, self.content]
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}
