//! Implementation of `lantern repl`.
//!
//! The terminal stands in for the page: each line read from stdin replaces the
//! search input's value, and `:`-prefixed lines deliver the other events the
//! page would (cancel key, focus loss, visibility, shortcut, activation).

use std::{
    cell::RefCell,
    fmt,
    io::{self, BufRead, Write},
    process::ExitCode,
    rc::Rc,
    sync::Arc,
    thread,
};

use lantern_config::{Config, Shortcut};
use lantern_index::DocumentIndex;
use lantern_session::{
    Activation, ActiveFlag, FocusTarget, InputEvent, Key, KeyPress, Navigator, ResultItem,
    ResultSurface, TextInput, runtime::serve,
};
use tokio::{
    sync::{mpsc, watch},
    task::yield_now,
};
use tracing::debug;

use crate::cli::{
    args::ReplCommand,
    context::{CommandContext, runtime},
    output::{dim, header, highlight, warning},
};

/// Help text for `:help`.
const HELP: &[(&str, &str)] = &[
    ("<text>", "replace the search input with <text> (empty line clears it)"),
    ("::<text>", "type text that starts with ':'"),
    (":esc", "press the cancel key"),
    (":blur", "move focus away from the page's search area"),
    (":blur-inside", "move focus into the result list"),
    (":hide / :show", "hide or show the search input"),
    (":key <shortcut>", "press a key combination, e.g. `/` or `ctrl+k`"),
    (":open <n>", "activate the n-th shown result"),
    (":quit", "exit"),
];

/// One parsed line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplLine {
    /// New value of the search input.
    Type(String),
    /// Cancel key.
    Escape,
    /// Input lost focus.
    Blur(FocusTarget),
    /// Input visibility changed.
    Visible(bool),
    /// A key press anywhere on the page.
    Key(KeyPress),
    /// Activate the n-th result (1-based).
    Open(usize),
    /// Print the command list.
    Help,
    /// Stop reading input.
    Quit,
}

/// Parses one line of input.
fn parse_line(line: &str) -> Result<ReplLine, String> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(ReplLine::Type(line.to_string()));
    };
    if command.starts_with(':') {
        return Ok(ReplLine::Type(command.to_string()));
    }

    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, arg)| (name, arg.trim()));

    match name {
        "esc" | "escape" => Ok(ReplLine::Escape),
        "blur" => Ok(ReplLine::Blur(FocusTarget::Elsewhere)),
        "blur-inside" => Ok(ReplLine::Blur(FocusTarget::ResultSurface)),
        "hide" => Ok(ReplLine::Visible(false)),
        "show" => Ok(ReplLine::Visible(true)),
        "key" => {
            let shortcut: Shortcut = arg.parse().map_err(|e| format!("{e}"))?;
            Ok(ReplLine::Key(KeyPress {
                key: Key::Char(shortcut.key),
                modifiers: shortcut.modifiers,
            }))
        }
        "open" => arg
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(ReplLine::Open)
            .ok_or_else(|| format!("usage: :open <n>, got `{arg}`")),
        "help" => Ok(ReplLine::Help),
        "quit" | "q" => Ok(ReplLine::Quit),
        other => Err(format!("unknown command `:{other}`; try :help")),
    }
}

/// Text-mode page state.
struct Page<W> {
    /// Where output goes.
    out: W,
    /// Current input value.
    input: String,
    /// Whether the input has focus.
    focused: bool,
    /// Whether the result surface is shown.
    visible: bool,
    /// The page's "search-active" flag.
    active: bool,
    /// Items currently on the surface.
    items: Vec<ResultItem>,
}

impl<W: Write> Page<W> {
    /// Writes one line.
    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{line}") {
            debug!(error = %e, "terminal write failed");
        }
    }

    /// Writes the query header before the first item or placeholder.
    fn emit_results_header(&mut self) {
        let title = header(&format!("results for \"{}\"", self.input.trim()));
        self.emit(format_args!("{title}"));
    }
}

/// A page rendered as lines of text.
///
/// Clones share the same page: one is driven by the session, the other by the
/// line reader.
pub struct TerminalHost<W> {
    /// Shared page state.
    page: Rc<RefCell<Page<W>>>,
}

impl<W> Clone for TerminalHost<W> {
    fn clone(&self) -> Self {
        Self {
            page: Rc::clone(&self.page),
        }
    }
}

impl<W: Write> TerminalHost<W> {
    /// Creates an empty, unfocused page writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            page: Rc::new(RefCell::new(Page {
                out,
                input: String::new(),
                focused: false,
                visible: false,
                active: false,
                items: Vec::new(),
            })),
        }
    }

    /// Types `text` into the input, focusing it.
    fn type_text(&self, text: &str) {
        let mut page = self.page.borrow_mut();
        page.focused = true;
        text.clone_into(&mut page.input);
    }

    /// Activation of the `n`-th shown item, 1-based.
    fn activation(&self, n: usize) -> Option<Activation> {
        let page = self.page.borrow();
        page.items
            .get(n.checked_sub(1)?)
            .map(|item| item.activation.clone())
    }

    /// Writes a note that is not part of the page.
    fn note(&self, text: &str) {
        self.page
            .borrow_mut()
            .emit(format_args!("{}", warning(text)));
    }

    /// Writes the command list.
    fn help(&self) {
        let mut page = self.page.borrow_mut();
        for (usage, description) in HELP {
            page.emit(format_args!("  {usage:<18} {}", dim(description)));
        }
    }
}

impl<W: Write> TextInput for TerminalHost<W> {
    fn input_value(&self) -> String {
        self.page.borrow().input.clone()
    }

    fn clear_input(&mut self) {
        self.page.borrow_mut().input.clear();
    }

    fn focus_input(&mut self) {
        let mut page = self.page.borrow_mut();
        if !page.focused {
            page.emit(format_args!("{}", dim("(input focused)")));
        }
        page.focused = true;
    }

    fn blur_input(&mut self) {
        self.page.borrow_mut().focused = false;
    }

    fn input_focused(&self) -> bool {
        self.page.borrow().focused
    }
}

impl<W: Write> ResultSurface for TerminalHost<W> {
    fn clear_results(&mut self) {
        self.page.borrow_mut().items.clear();
    }

    fn append_result(&mut self, item: ResultItem) {
        let mut page = self.page.borrow_mut();
        if page.items.is_empty() {
            page.emit_results_header();
        }
        let rank = page.items.len() + 1;
        page.emit(format_args!(
            "{rank:>3}. {}  {}",
            highlight(&item.title, &item.title_matches),
            dim(&item.activation.url)
        ));
        page.emit(format_args!(
            "     {}",
            highlight(&item.preview, &item.preview_matches)
        ));
        page.items.push(item);
    }

    fn show_placeholder(&mut self, text: &str) {
        let mut page = self.page.borrow_mut();
        page.emit_results_header();
        page.emit(format_args!("     {}", dim(text)));
    }

    fn set_results_visible(&mut self, visible: bool) {
        let mut page = self.page.borrow_mut();
        if page.visible && !visible {
            page.emit(format_args!("{}", dim("(results hidden)")));
        }
        page.visible = visible;
    }
}

impl<W: Write> ActiveFlag for TerminalHost<W> {
    fn set_search_active(&mut self, active: bool) {
        self.page.borrow_mut().active = active;
    }
}

impl<W: Write> Navigator for TerminalHost<W> {
    fn navigate(&mut self, url: &str) {
        self.page
            .borrow_mut()
            .emit(format_args!("navigate: {url}"));
    }
}

/// Loads the index, then feeds stdin lines to the search session until EOF or `:quit`.
pub fn run(ctx: &CommandContext, cmd: &ReplCommand) -> ExitCode {
    match repl(ctx, cmd) {
        Ok(code) | Err(code) => code,
    }
}

/// Body of [`run`].
fn repl(ctx: &CommandContext, cmd: &ReplCommand) -> Result<ExitCode, ExitCode> {
    ctx.require_search_enabled()?;
    let source = ctx.index_source(&cmd.index)?;
    let runtime = runtime()?;
    let index = ctx.load_index(&runtime, &source)?;

    println!(
        "{}",
        dim(&format!(
            "loaded {} documents from {source}; type to search, :help for commands",
            index.len()
        ))
    );

    // Lines are read only once the index is ready, so nothing typed is dropped.
    let (tx, rx) = mpsc::unbounded_channel();
    let _reader = thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let host = TerminalHost::new(io::stdout());
    runtime.block_on(session(host, Arc::new(index), &ctx.config, rx));
    Ok(ExitCode::SUCCESS)
}

/// Serves the page from `index` while `lines` are fed to it.
///
/// The session is polled before the reader on every wakeup, so each line's
/// event is handled before the next line is read. Returns once input ends and
/// scheduled work has finished.
async fn session<W: Write>(
    host: TerminalHost<W>,
    index: Arc<DocumentIndex>,
    config: &Config,
    lines: mpsc::UnboundedReceiver<String>,
) -> TerminalHost<W> {
    let (events_tx, events) = mpsc::unbounded_channel();
    let (visibility_tx, visibility) = watch::channel(true);

    let served = serve(host.clone(), index, config, events, visibility);
    let fed = feed(&host, lines, events_tx, visibility_tx);
    let (host, ()) = tokio::join!(biased; served, fed);
    host
}

/// Reads lines until EOF or `:quit`, turning each into page changes and events.
async fn feed<W: Write>(
    host: &TerminalHost<W>,
    mut lines: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<InputEvent>,
    visibility: watch::Sender<bool>,
) {
    while let Some(line) = lines.recv().await {
        match parse_line(&line) {
            Ok(ReplLine::Quit) => break,
            Ok(parsed) => {
                if let Some(event) = apply(host, parsed, &visibility)
                    && events.send(event).is_err()
                {
                    break;
                }
            }
            Err(e) => host.note(&e),
        }
        yield_now().await;
    }

    // The session drains and returns once the event channel closes.
    drop(events);
    drop(visibility);
}

/// Applies one parsed line to the page, returning the event it raises.
fn apply<W: Write>(
    host: &TerminalHost<W>,
    line: ReplLine,
    visibility: &watch::Sender<bool>,
) -> Option<InputEvent> {
    match line {
        ReplLine::Type(text) => {
            host.type_text(&text);
            Some(InputEvent::Changed)
        }
        ReplLine::Escape => Some(InputEvent::Key(KeyPress::plain(Key::Escape))),
        ReplLine::Blur(new_focus) => {
            host.page.borrow_mut().focused = false;
            Some(InputEvent::Blur { new_focus })
        }
        ReplLine::Visible(visible) => {
            visibility.send_modify(|shown| *shown = visible);
            None
        }
        ReplLine::Key(press) => Some(InputEvent::Key(press)),
        ReplLine::Open(n) => {
            let activation = host.activation(n);
            if activation.is_none() {
                host.note(&format!("no result {n} on screen"));
            }
            activation.map(InputEvent::Activate)
        }
        ReplLine::Help => {
            host.help();
            None
        }
        ReplLine::Quit => None,
    }
}
