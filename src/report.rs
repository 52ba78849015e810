/// Diagnostic rendering: one formatted block per error, written to stderr,
/// with a caret-underlined snippet of the offending source line.
use colored::Colorize;

use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::value::RuntimeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexing,
    Parsing,
    Runtime,
}

impl Stage {
    fn label(self) -> &'static str {
        match self {
            Stage::Lexing => "Lexing",
            Stage::Parsing => "Parsing",
            Stage::Runtime => "Runtime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    /// Reserved for future static checks.
    Type,
    Runtime,
}

impl ErrorKind {
    fn label(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "Syntax Error",
            ErrorKind::Type => "Type Error",
            ErrorKind::Runtime => "Runtime Error",
        }
    }
}

/// Shared by the lexer, parser, and evaluator drivers; the host sets the
/// stage before each pipeline step so blocks are labeled correctly.
pub struct Reporter {
    stage: Stage,
    filename: String,
    lines: Vec<String>,
}

impl Reporter {
    pub fn new(filename: impl Into<String>, source: &str) -> Self {
        Reporter {
            stage: Stage::Lexing,
            filename: filename.into(),
            lines: source.lines().map(str::to_string).collect(),
        }
    }

    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub fn lex_error(&self, err: &LexError) {
        self.report(ErrorKind::Syntax, err.line, err.column, err.length, &err.message);
    }

    pub fn parse_error(&self, err: &ParseError) {
        self.report(ErrorKind::Syntax, err.line, err.column, err.length, &err.message);
    }

    pub fn runtime_error(&self, err: &RuntimeError) {
        match err {
            RuntimeError::Error {
                message,
                line,
                column,
                length,
            } => self.report(ErrorKind::Runtime, *line, *column, *length, message),
            // A RETURN that escaped to the top level has no source span
            RuntimeError::Return(_) => {
                self.report(ErrorKind::Runtime, 0, 0, 0, &err.to_string())
            }
        }
    }

    /// Write the diagnostic block: stage header, locator, up to two lines of
    /// preceding context, the offending line with the span highlighted, a
    /// caret row, the kind and message, and one trailing context line.
    pub fn report(&self, kind: ErrorKind, line: usize, column: usize, length: usize, message: &str) {
        eprintln!(
            "{}",
            format!("[An error occurred during stage: '{}']", self.stage.label()).red()
        );

        let in_range = line >= 1 && line <= self.lines.len();
        if !in_range {
            eprintln!("{} {}", format!("{}:", kind.label()).red(), message);
            return;
        }

        let locator = if self.filename.is_empty() {
            format!("{}:{}", line, column + 1)
        } else {
            format!("{}:{}:{}", self.filename, line, column + 1)
        };
        eprintln!(" --> {}", locator.blue());

        let gutter = (line + 1).to_string().len().max(2);

        for context in line.saturating_sub(2)..line {
            if context >= 1 {
                eprintln!("{:>gutter$} | {}", context, self.lines[context - 1]);
            }
        }

        self.print_offending_line(line, column, length, gutter);
        self.print_caret_row(line, column, length, gutter);

        eprintln!("{} {}", format!("{}:", kind.label()).red(), message);

        if line < self.lines.len() {
            eprintln!("{:>gutter$} | {}", line + 1, self.lines[line]);
        }
    }

    fn print_offending_line(&self, line: usize, column: usize, length: usize, gutter: usize) {
        let chars: Vec<char> = self.lines[line - 1].chars().collect();
        let span_start = column.min(chars.len());
        let span_end = (column + length.max(1)).min(chars.len());

        let head: String = chars[..span_start].iter().collect();
        let span: String = chars[span_start..span_end].iter().collect();
        let tail: String = chars[span_end..].iter().collect();

        eprintln!("{:>gutter$} | {}{}{}", line, head, span.red(), tail);
    }

    /// Tabs in the prefix are reproduced as tabs so the carets line up no
    /// matter how the terminal renders them.
    fn print_caret_row(&self, line: usize, column: usize, length: usize, gutter: usize) {
        let chars: Vec<char> = self.lines[line - 1].chars().collect();
        let mut pad = String::new();
        for i in 0..column {
            if chars.get(i) == Some(&'\t') {
                pad.push('\t');
            } else {
                pad.push(' ');
            }
        }
        let carets = "^".repeat(length.max(1));
        eprintln!("{:>gutter$} | {}{}", "", pad, carets.red());
    }
}
