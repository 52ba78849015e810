use std::fs;
use std::io::{self, BufRead, Write};
use std::process;

use clap::Parser as ClapParser;
use colored::Colorize;

use scsa::ast_printer;
use scsa::interpreter::Interpreter;
use scsa::lexer::{Lexer, Token, TokenKind};
use scsa::parser::Parser;
use scsa::report::{Reporter, Stage};

#[derive(ClapParser)]
#[command(name = "scsa", about = "The SCSA Pseudocode interpreter")]
struct Cli {
    /// Script to run (must end in .scsa); omit to start the REPL
    file: Option<String>,
    /// Print a token table after lexing
    #[arg(long)]
    debug_tokens: bool,
    /// Print the AST as an indented tree after parsing
    #[arg(long)]
    debug_parse: bool,
}

fn main() {
    let cli = Cli::parse();

    let code = match &cli.file {
        Some(file) => {
            if !file.ends_with(".scsa") {
                eprintln!(
                    "{}",
                    format!("Not a pseudocode script: '{}' (expected a .scsa file)", file).red()
                );
                1
            } else {
                run_file(file, cli.debug_tokens, cli.debug_parse)
            }
        }
        None => run_repl(cli.debug_tokens, cli.debug_parse),
    };

    process::exit(code);
}

fn run_file(path: &str, debug_tokens: bool, debug_parse: bool) -> i32 {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}", format!("Cannot open file '{}': {}", path, e).red());
            return 1;
        }
    };

    let mut reporter = Reporter::new(path, &source);
    let mut interp = Interpreter::new();
    run_source(&source, &mut reporter, &mut interp, debug_tokens, debug_parse, false)
}

/// Drive the pipeline over one source string: lex, parse, evaluate, with the
/// reporter's stage advanced before each step. Returns the process exit code
/// for this run. `recover` selects the parser's error-recovery mode so the
/// REPL can report several errors from one line.
fn run_source(
    source: &str,
    reporter: &mut Reporter,
    interp: &mut Interpreter,
    debug_tokens: bool,
    debug_parse: bool,
    recover: bool,
) -> i32 {
    reporter.set_stage(Stage::Lexing);
    let tokens = match Lexer::new(source).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            reporter.lex_error(&e);
            return 1;
        }
    };
    if debug_tokens {
        print_token_table(&tokens);
    }

    reporter.set_stage(Stage::Parsing);
    let statements = if recover {
        let (statements, errors) = Parser::new(tokens).parse_with_recovery();
        for e in &errors {
            reporter.parse_error(e);
        }
        if !errors.is_empty() {
            return 1;
        }
        statements
    } else {
        match Parser::new(tokens).parse() {
            Ok(statements) => statements,
            Err(e) => {
                reporter.parse_error(&e);
                return 1;
            }
        }
    };
    if debug_parse {
        ast_printer::print(&statements);
    }

    reporter.set_stage(Stage::Runtime);
    match interp.interpret(&statements) {
        Ok(()) => 0,
        Err(e) => {
            reporter.runtime_error(&e);
            1
        }
    }
}

/// Line-at-a-time REPL against a persistent interpreter. Diagnostics resume
/// the prompt instead of terminating; the REPL always exits 0.
fn run_repl(debug_tokens: bool, debug_parse: bool) -> i32 {
    let mut interp = Interpreter::new();
    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                // EOF (Ctrl+D)
                println!();
                break;
            }
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim_end_matches('\n').trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let mut reporter = Reporter::new("", line);
        run_source(line, &mut reporter, &mut interp, debug_tokens, debug_parse, true);
    }

    0
}

fn print_token_table(tokens: &[Token]) {
    println!("{:<20}{:<25}{}", "TOKEN TYPE", "LEXEME", "LINE");
    println!("{}", "-".repeat(60));

    for token in tokens {
        if token.kind == TokenKind::Eof {
            break;
        }
        let lexeme = if token.lexeme.is_empty() {
            "N/A"
        } else {
            token.lexeme.as_str()
        };
        println!("{:<20}{:<25}{}", token.kind.to_string(), lexeme, token.line);
    }
}
