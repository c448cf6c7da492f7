//! Implementation of `lantern search`.

use std::process::ExitCode;

use lantern_session::{Decision, QueryPlanner};
use tracing::warn;

use crate::cli::{
    args::SearchCommand,
    context::{CommandContext, runtime},
    output::{QueryReport, print_json, print_report},
};

/// Runs each query once through the planner and the index.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    match search(ctx, cmd) {
        Ok(code) | Err(code) => code,
    }
}

/// Loads the index, runs the queries and prints the reports.
fn search(ctx: &CommandContext, cmd: &SearchCommand) -> Result<ExitCode, ExitCode> {
    ctx.require_search_enabled()?;
    let source = ctx.index_source(&cmd.index)?;
    let runtime = runtime()?;
    let index = ctx.load_index(&runtime, &source)?;
    let planner = QueryPlanner::from(&ctx.config.search);
    let render = &ctx.config.render;

    let mut reports = Vec::with_capacity(cmd.queries.len());
    for query in &cmd.queries {
        let report = match planner.plan(query, None) {
            Decision::Commit(text) => match index.search(&text) {
                Ok(matches) => QueryReport::new(query, &matches, &index, render, cmd.limit),
                Err(e) => {
                    warn!(query = %text, error = %e, "query failed");
                    QueryReport::new(query, &[], &index, render, cmd.limit)
                }
            },
            Decision::None | Decision::Pending | Decision::Idempotent => {
                QueryReport::skipped(query)
            }
        };
        reports.push(report);
    }

    if cmd.json {
        return Ok(print_json(&reports));
    }
    for report in &reports {
        print_report(report, render);
    }
    Ok(ExitCode::SUCCESS)
}
