//! Terminal output for iconsmith commands.
//!
//! Every line carries a colored `[label]` naming the command or outcome it
//! belongs to (`[generate]`, `[done]`, `[error]`, ...). While a render is
//! running, [`ProgressLine`] keeps one line of per-format counters at the
//! bottom and [`log`] prints above it.
//!
//! ```ignore
//! log!("generate"; "{} from {}", plural_count(29, "output"), "custom_icon.png");
//!
//! let progress = ProgressLine::new("generate", &[("png", 28), ("ico", 1)]);
//! progress.inc("png");
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{StdoutLock, Write, stdout},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set while a [`ProgressLine`] owns the last terminal line.
static PROGRESS_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Enable `debug!` output (`--verbose`).
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// `log!("label"; "format", args...)`
#[macro_export]
macro_rules! log {
    ($label:expr; $($arg:tt)*) => {{
        $crate::logger::log($label, &format!($($arg)*))
    }};
}

/// Like `log!`, only with `--verbose`.
#[macro_export]
macro_rules! debug {
    ($label:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($label, &format!($($arg)*))
        }
    }};
}

/// Print one labelled line, above the progress line if one is active.
pub fn log(label: &str, message: &str) {
    let prefix = Tone::of(label).paint(label);
    let mut out = stdout().lock();

    if PROGRESS_ACTIVE.load(Ordering::SeqCst) {
        rewrite_line(&mut out, &format!("{prefix} {message}"), true);
    } else {
        execute!(out, Clear(ClearType::UntilNewLine)).ok();
        writeln!(out, "{prefix} {message}").ok();
        out.flush().ok();
    }
}

/// `1 icon`, `29 icons`
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}

/// Color class of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Command,
    Success,
    Failure,
    Note,
}

impl Tone {
    fn of(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "generate" | "matte" | "place" | "pack" | "init" => Self::Command,
            "done" => Self::Success,
            "error" => Self::Failure,
            _ => Self::Note,
        }
    }

    fn paint(self, label: &str) -> String {
        let prefix = format!("[{label}]");
        match self {
            Self::Command => prefix.bright_blue().bold().to_string(),
            Self::Success => prefix.bright_green().bold().to_string(),
            Self::Failure => prefix.bright_red().bold().to_string(),
            Self::Note => prefix.bright_yellow().bold().to_string(),
        }
    }
}

/// Replace the current terminal line with `text`.
fn rewrite_line(out: &mut StdoutLock<'_>, text: &str, newline: bool) {
    execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
    if newline {
        writeln!(out, "{text}").ok();
    } else {
        write!(out, "{text}").ok();
    }
    out.flush().ok();
}

/// One line of per-format render counters: `[generate] png(12/28) ico(1/1)`.
///
/// Rayon workers call [`ProgressLine::inc`]; a redraw is skipped when another
/// worker is already drawing.
pub struct ProgressLine {
    label: &'static str,
    counters: Vec<Counter>,
    drawing: Mutex<()>,
}

struct Counter {
    kind: &'static str,
    total: usize,
    done: AtomicUsize,
}

impl ProgressLine {
    /// Formats with nothing to render get no counter.
    pub fn new(label: &'static str, kinds: &[(&'static str, usize)]) -> Self {
        let counters = kinds
            .iter()
            .filter(|(_, total)| *total > 0)
            .map(|&(kind, total)| Counter {
                kind,
                total,
                done: AtomicUsize::new(0),
            })
            .collect();

        PROGRESS_ACTIVE.store(true, Ordering::SeqCst);
        let progress = Self {
            label,
            counters,
            drawing: Mutex::new(()),
        };
        progress.draw(false);
        progress
    }

    /// Count one finished job of `kind`; unknown kinds are ignored.
    pub fn inc(&self, kind: &str) {
        let Some(counter) = self.counters.iter().find(|c| c.kind == kind) else {
            return;
        };
        counter.done.fetch_add(1, Ordering::Relaxed);
        if let Some(_guard) = self.drawing.try_lock() {
            self.draw(false);
        }
    }

    /// `png(3/28) ico(0/1)`
    fn line(&self) -> String {
        self.counters
            .iter()
            .map(|c| format!("{}({}/{})", c.kind, c.done.load(Ordering::Relaxed), c.total))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn draw(&self, newline: bool) {
        let text = format!("{} {}", Tone::of(self.label).paint(self.label), self.line());
        rewrite_line(&mut stdout().lock(), &text, newline);
    }

    /// Leave the final counts on screen.
    pub fn finish(self) {
        PROGRESS_ACTIVE.store(false, Ordering::SeqCst);
        {
            let _guard = self.drawing.lock();
            self.draw(true);
        }
        std::mem::forget(self);
    }
}

impl Drop for ProgressLine {
    // Unfinished: wipe the partial line.
    fn drop(&mut self) {
        PROGRESS_ACTIVE.store(false, Ordering::SeqCst);
        rewrite_line(&mut stdout().lock(), "", false);
    }
}
