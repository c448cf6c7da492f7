//! Terminal styling, tables and JSON serialization for CLI output.

use std::{ops::Range, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use lantern_config::RenderSettings;
use lantern_index::{DocumentIndex, MatchField, MatchResult};
use lantern_session::preview;
use serde::Serialize;

/// ANSI escape sequences used by the CLI.
mod colors {
    /// Reset all attributes.
    pub const RESET: &str = "\x1b[0m";
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Dimmed text.
    pub const DIM: &str = "\x1b[2m";
    /// Cyan foreground.
    pub const CYAN: &str = "\x1b[36m";
    /// Yellow foreground.
    pub const YELLOW: &str = "\x1b[33m";
}

/// Formats text as a section header (bold cyan).
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Marks matched byte ranges of `text` in bold yellow.
///
/// Ranges must be ascending; overlapping or out-of-bounds ranges are skipped.
pub fn highlight(text: &str, ranges: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in ranges {
        if range.start < cursor {
            continue;
        }
        let (Some(before), Some(matched)) = (text.get(cursor..range.start), text.get(range.clone()))
        else {
            continue;
        };
        out.push_str(before);
        out.push_str(colors::BOLD);
        out.push_str(colors::YELLOW);
        out.push_str(matched);
        out.push_str(colors::RESET);
        cursor = range.end;
    }
    out.push_str(text.get(cursor..).unwrap_or_default());
    out
}

/// A matched term's location in the document.
#[derive(Serialize)]
struct JsonPosition {
    /// Field the term was found in.
    field: MatchField,
    /// Byte offset where the term starts.
    start: usize,
    /// Byte offset just past the term.
    end: usize,
}

/// One result row.
#[derive(Serialize)]
struct JsonResult {
    /// Document id.
    id: String,
    /// Document title.
    title: String,
    /// Page URL.
    url: String,
    /// Relevance score.
    score: f32,
    /// Content preview as shown in the result list.
    preview: String,
    /// Matched terms in the full title and content.
    positions: Vec<JsonPosition>,
}

/// Results for one query.
#[derive(Serialize)]
pub struct QueryReport {
    /// The query as given.
    query: String,
    /// True when the query was too short to run.
    skipped: bool,
    /// Total matches before `--limit` applied.
    total_matches: usize,
    /// Printed results, best first.
    results: Vec<JsonResult>,
}

impl QueryReport {
    /// A query shorter than the minimum length; nothing was run.
    pub fn skipped(query: &str) -> Self {
        Self {
            query: query.to_string(),
            skipped: true,
            total_matches: 0,
            results: Vec::new(),
        }
    }

    /// Collects up to `limit` results, resolving each against the index's documents.
    pub fn new(
        query: &str,
        matches: &[MatchResult],
        index: &DocumentIndex,
        render: &RenderSettings,
        limit: Option<usize>,
    ) -> Self {
        let results = matches
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .filter_map(|m| {
                let doc = index.document(&m.document_id)?;
                Some(JsonResult {
                    id: doc.id.clone(),
                    title: doc.title.clone(),
                    url: doc.url.clone(),
                    score: m.score,
                    preview: preview(&doc.content, render.preview_chars, &render.ellipsis),
                    positions: m
                        .positions
                        .iter()
                        .map(|p| JsonPosition {
                            field: p.field,
                            start: p.range.start,
                            end: p.range.end,
                        })
                        .collect(),
                })
            })
            .collect();
        Self {
            query: query.to_string(),
            skipped: false,
            total_matches: matches.len(),
            results,
        }
    }
}

/// JSON output for `lantern search`.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// Results grouped by query.
    queries: &'a [QueryReport],
}

/// Prints query reports as JSON.
pub fn print_json(reports: &[QueryReport]) -> ExitCode {
    match serde_json::to_string_pretty(&JsonSearchOutput { queries: reports }) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints one query report as a table.
pub fn print_report(report: &QueryReport, render: &RenderSettings) {
    println!("{}", header(&format!("Query: {}", report.query)));
    if report.skipped {
        println!("  {}", dim("(query too short; nothing searched)"));
        println!();
        return;
    }
    if report.results.is_empty() {
        println!("  {}", dim(&render.no_results_text));
        println!();
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Title", "URL", "Score", "Preview"]);
    for (rank, result) in report.results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&result.title),
            Cell::new(&result.url),
            Cell::new(format!("{:.2}", result.score)),
            Cell::new(&result.preview),
        ]);
    }
    println!("{table}");

    if report.total_matches > report.results.len() {
        println!(
            "{}",
            dim(&format!(
                "showing {} of {} matches",
                report.results.len(),
                report.total_matches
            ))
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use lantern_index::Document;

    use super::*;

    fn index() -> DocumentIndex {
        DocumentIndex::from_documents([
            Document::new("A", "Greeting", "hello world", "/a/"),
            Document::new("B", "Farewell", "goodbye", "/b/"),
        ])
        .unwrap()
    }

    #[test]
    fn report_resolves_documents_and_previews() {
        let index = index();
        let matches = index.search("hello").unwrap();

        let report = QueryReport::new("hello", &matches, &index, &RenderSettings::default(), None);

        assert_eq!(report.total_matches, 1);
        assert_eq!(report.results[0].id, "A");
        assert_eq!(report.results[0].url, "/a/");
        assert_eq!(report.results[0].preview, "hello world...");
    }

    #[test]
    fn limit_caps_results_but_not_total() {
        let index = DocumentIndex::from_documents(
            (0..5).map(|i| Document::new(format!("d{i}"), "Rust", "rust notes", format!("/{i}/"))),
        )
        .unwrap();
        let matches = index.search("rust").unwrap();

        let report = QueryReport::new("rust", &matches, &index, &RenderSettings::default(), Some(2));

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.total_matches, 5);
    }

    #[test]
    fn skipped_report_serializes_flag() {
        let json = serde_json::to_value(QueryReport::skipped("a")).unwrap();
        assert_eq!(json["skipped"], true);
        assert_eq!(json["total_matches"], 0);
    }

    #[test]
    fn report_carries_match_positions() {
        let index = index();
        let matches = index.search("greeting hello").unwrap();

        let report = QueryReport::new("greeting hello", &matches, &index, &RenderSettings::default(), None);
        let json = serde_json::to_value(&report).unwrap();

        let positions = &json["results"][0]["positions"];
        assert_eq!(positions[0]["field"], "title");
        assert_eq!(positions[0]["start"], 0);
        assert_eq!(positions[0]["end"], 8);
        assert_eq!(positions[1]["field"], "content");
        assert_eq!(positions[1]["end"], 5);
    }

    #[test]
    fn highlight_marks_ranges() {
        let marked = highlight("hello world", &[0..5]);
        assert_eq!(marked, "\x1b[1m\x1b[33mhello\x1b[0m world");

        assert_eq!(highlight("hello", &[]), "hello");
        assert_eq!(highlight("hello", &[3..9]), "hello");
        assert_eq!(
            highlight("a b", &[0..1, 0..1, 2..3]),
            "\x1b[1m\x1b[33ma\x1b[0m \x1b[1m\x1b[33mb\x1b[0m"
        );
    }

    #[test]
    fn styles_wrap_text() {
        assert!(dim("x").contains('x'));
        assert!(header("x").starts_with("\x1b[1m"));
        assert!(warning("x").ends_with("\x1b[0m"));
    }
}
