//! Incremental, generation-checked result rendering.
//!
//! A result list is materialized in batches. The first batch is rendered as
//! soon as a query commits; each later batch is scheduled after a delay and
//! carries the generation it belongs to. A batch that wakes up after its
//! generation was superseded does nothing.

use std::{ops::Range, sync::Arc};

use lantern_config::RenderSettings;
use lantern_index::{DocumentSet, MatchField, MatchResult};
use tracing::trace;

use crate::{
    host::ResultSurface,
    schedule::{Scheduler, Wakeup},
    session::Generation,
};

/// What activating a result does: navigate to its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Destination URL.
    pub url: String,
}

/// One materialized result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    /// Id of the document shown.
    pub document_id: String,
    /// Document title.
    pub title: String,
    /// Start of the content, followed by the ellipsis marker.
    pub preview: String,
    /// Byte ranges of matched terms in `title`.
    pub title_matches: Vec<Range<usize>>,
    /// Byte ranges of matched terms in `preview`, ending before the marker.
    pub preview_matches: Vec<Range<usize>>,
    /// Action run when the item is chosen.
    pub activation: Activation,
}

/// A slice of a result list scheduled for materialization.
#[derive(Debug, Clone)]
pub struct RenderBatch {
    /// The full ordered result list.
    pub results: Arc<[MatchResult]>,
    /// Index of the first result in this batch.
    pub start: usize,
    /// Generation the list was produced for.
    pub generation: Generation,
}

/// What a call to [`ResultRenderer::render_batch`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The batch's generation is no longer live; nothing was rendered.
    Stale,
    /// Rendered; a continuation starting at `next` was scheduled.
    Continued {
        /// Index of the first result of the scheduled batch.
        next: usize,
    },
    /// Rendered the last batch, or the placeholder.
    Finished,
}

/// Materializes result lists into a [`ResultSurface`].
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    /// Documents results refer to.
    documents: Arc<DocumentSet>,
    /// Batch size, delays and preview formatting.
    settings: RenderSettings,
}

impl ResultRenderer {
    /// Creates a renderer over `documents`.
    pub fn new(documents: Arc<DocumentSet>, settings: RenderSettings) -> Self {
        Self {
            documents,
            settings,
        }
    }

    /// Rendering settings in effect.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Starts rendering a freshly committed result list.
    ///
    /// Clears the surface, then shows either the placeholder or the first batch.
    pub fn begin(
        &self,
        generation: Generation,
        results: Arc<[MatchResult]>,
        surface: &mut (impl ResultSurface + ?Sized),
        scheduler: &(impl Scheduler + ?Sized),
    ) -> BatchOutcome {
        surface.clear_results();
        if results.is_empty() {
            surface.show_placeholder(&self.settings.no_results_text);
            return BatchOutcome::Finished;
        }

        let batch = RenderBatch {
            results,
            start: 0,
            generation,
        };
        self.render_batch(batch, Some(generation), surface, scheduler)
    }

    /// Renders one batch if its generation is still `live`.
    pub fn render_batch(
        &self,
        batch: RenderBatch,
        live: Option<Generation>,
        surface: &mut (impl ResultSurface + ?Sized),
        scheduler: &(impl Scheduler + ?Sized),
    ) -> BatchOutcome {
        if live != Some(batch.generation) {
            trace!(
                generation = %batch.generation,
                start = batch.start,
                "dropping stale render batch"
            );
            return BatchOutcome::Stale;
        }

        let total = batch.results.len();
        let start = batch.start.min(total);
        let end = start.saturating_add(self.settings.batch_size.max(1)).min(total);
        for result in &batch.results[start..end] {
            match self.item(result) {
                Some(item) => surface.append_result(item),
                None => trace!(document_id = %result.document_id, "result has no document"),
            }
        }

        if end >= total {
            return BatchOutcome::Finished;
        }

        scheduler.schedule_after(
            self.settings.batch_delay(),
            Wakeup::RenderBatch(RenderBatch {
                results: batch.results,
                start: end,
                generation: batch.generation,
            }),
        );
        BatchOutcome::Continued { next: end }
    }

    /// Builds the item for one result.
    fn item(&self, result: &MatchResult) -> Option<ResultItem> {
        let doc = self.documents.get(&result.document_id)?;
        let shown = prefix_len(&doc.content, self.settings.preview_chars);
        Some(ResultItem {
            document_id: doc.id.clone(),
            title: doc.title.clone(),
            preview: preview(
                &doc.content,
                self.settings.preview_chars,
                &self.settings.ellipsis,
            ),
            title_matches: result.ranges_in(MatchField::Title).cloned().collect(),
            preview_matches: result
                .ranges_in(MatchField::Content)
                .filter(|range| range.start < shown)
                .map(|range| range.start..range.end.min(shown))
                .collect(),
            activation: Activation {
                url: doc.url.clone(),
            },
        })
    }
}

/// The first `chars` characters of `content` followed by `ellipsis`.
///
/// The marker is appended even when the content is shorter than the limit.
pub fn preview(content: &str, chars: usize, ellipsis: &str) -> String {
    let end = prefix_len(content, chars);
    let mut preview = String::with_capacity(end + ellipsis.len());
    preview.push_str(&content[..end]);
    preview.push_str(ellipsis);
    preview
}

/// Byte length of the first `chars` characters of `content`.
fn prefix_len(content: &str, chars: usize) -> usize {
    content
        .char_indices()
        .nth(chars)
        .map_or(content.len(), |(i, _)| i)
}
