/// Spec tests for the SCSA lexer.
///
/// Each test verifies that specific source text tokenises to the expected
/// sequence of token kinds, or fails with the expected lexical error. The
/// trailing Eof token is filtered out unless a test is specifically about it.
use scsa::lexer::{LexError, Lexer, Token, TokenKind};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn lex(src: &str) -> Vec<Token> {
    Lexer::new(src).tokenize().expect("lex failed")
}

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| *k != TokenKind::Eof)
        .collect()
}

fn lex_err(src: &str) -> LexError {
    Lexer::new(src)
        .tokenize()
        .expect_err("expected a lex error")
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

#[test]
fn integer_literal() {
    let tokens = lex("42");
    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].lexeme, "42");
}

#[test]
fn float_literal() {
    let tokens = lex("3.14");
    assert_eq!(tokens[0].kind, TokenKind::Float);
    assert_eq!(tokens[0].lexeme, "3.14");
}

#[test]
fn integer_then_dot_is_two_tokens() {
    // "12." has no digit after the dot, so it is INTEGER followed by '.'
    assert_eq!(kinds("12."), vec![TokenKind::Integer, TokenKind::Dot]);
}

#[test]
fn digit_run_into_letters_is_an_error() {
    let err = lex_err("12ab");
    assert_eq!(err.message, "Identifier starts with number.");
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 0);
}

#[test]
fn string_double_quoted() {
    let tokens = lex("\"hello\"");
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].lexeme, "hello");
}

#[test]
fn string_single_quoted() {
    let tokens = lex("'hi'");
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].lexeme, "hi");
}

#[test]
fn string_lexeme_drops_quotes_but_length_keeps_them() {
    let tokens = lex("\"abc\"");
    assert_eq!(tokens[0].lexeme, "abc");
    assert_eq!(tokens[0].length, 5);
}

#[test]
fn string_other_delimiter_is_plain_content() {
    let tokens = lex("\"it's\"");
    assert_eq!(tokens[0].lexeme, "it's");
}

#[test]
fn string_empty() {
    let tokens = lex("\"\"");
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].lexeme, "");
}

#[test]
fn string_spanning_lines_advances_line_counter() {
    let tokens = lex("\"a\nb\"\nx");
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].lexeme, "a\nb");
    // the identifier after the string sits on line 3
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].line, 3);
}

#[test]
fn booleans() {
    assert_eq!(kinds("TRUE FALSE"), vec![TokenKind::True, TokenKind::False]);
}

// ---------------------------------------------------------------------------
// Identifiers vs keywords
// ---------------------------------------------------------------------------

#[test]
fn identifier_simple() {
    let tokens = lex("myVar");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].lexeme, "myVar");
}

#[test]
fn identifier_with_underscore_and_digits() {
    assert_eq!(
        kinds("_tmp x1"),
        vec![TokenKind::Identifier, TokenKind::Identifier]
    );
}

#[test]
fn keywords_upper_case() {
    assert_eq!(
        kinds("CLASS INHERITS ATTRIBUTES METHODS FUNCTION RETURN NEW END"),
        vec![
            TokenKind::Class,
            TokenKind::Inherits,
            TokenKind::Attributes,
            TokenKind::Methods,
            TokenKind::Function,
            TokenKind::Return,
            TokenKind::New,
            TokenKind::End,
        ]
    );
}

#[test]
fn keywords_control_flow() {
    assert_eq!(
        kinds("IF THEN ELSE WHILE FOR IN PRINT"),
        vec![
            TokenKind::If,
            TokenKind::Then,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::In,
            TokenKind::Print,
        ]
    );
}

#[test]
fn mixed_case_aliases() {
    assert_eq!(
        kinds("Attributes Methods True False new"),
        vec![
            TokenKind::Attributes,
            TokenKind::Methods,
            TokenKind::True,
            TokenKind::False,
            TokenKind::New,
        ]
    );
}

#[test]
fn aliases_are_a_fixed_table_not_case_insensitive() {
    // "Class" is not in the alias table, so it stays an identifier
    assert_eq!(kinds("Class"), vec![TokenKind::Identifier]);
    assert_eq!(kinds("while"), vec![TokenKind::Identifier]);
}

// ---------------------------------------------------------------------------
// Operators and punctuation
// ---------------------------------------------------------------------------

#[test]
fn single_char_operators() {
    assert_eq!(
        kinds("+ - * / = < >"),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Assign,
            TokenKind::Lt,
            TokenKind::Gt,
        ]
    );
}

#[test]
fn two_char_operators() {
    assert_eq!(
        kinds("== <= >="),
        vec![TokenKind::Eq, TokenKind::Lte, TokenKind::Gte]
    );
}

#[test]
fn equality_next_to_assignment() {
    assert_eq!(
        kinds("= == ="),
        vec![TokenKind::Assign, TokenKind::Eq, TokenKind::Assign]
    );
}

#[test]
fn punctuation() {
    assert_eq!(
        kinds(". , : ( ) [ ]"),
        vec![
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBracket,
            TokenKind::RBracket,
        ]
    );
}

// ---------------------------------------------------------------------------
// Comments and whitespace
// ---------------------------------------------------------------------------

#[test]
fn slash_slash_comment_runs_to_end_of_line() {
    assert_eq!(kinds("// nothing here\n42"), vec![TokenKind::Integer]);
}

#[test]
fn hash_comment_runs_to_end_of_line() {
    assert_eq!(kinds("# nothing here\n42"), vec![TokenKind::Integer]);
}

#[test]
fn trailing_comment_after_token() {
    assert_eq!(kinds("42 // done"), vec![TokenKind::Integer]);
}

#[test]
fn single_slash_is_division() {
    assert_eq!(
        kinds("1 / 2"),
        vec![TokenKind::Integer, TokenKind::Slash, TokenKind::Integer]
    );
}

#[test]
fn tabs_and_carriage_returns_are_whitespace() {
    let tokens = lex("\tx\r");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].column, 1);
}

#[test]
fn newline_resets_column() {
    let tokens = lex("a\nb");
    assert_eq!((tokens[0].line, tokens[0].column), (1, 0));
    assert_eq!((tokens[1].line, tokens[1].column), (2, 0));
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

#[test]
fn columns_are_zero_based_offsets() {
    let tokens = lex("x = 10");
    assert_eq!(tokens[0].column, 0);
    assert_eq!(tokens[1].column, 2);
    assert_eq!(tokens[2].column, 4);
    assert_eq!(tokens[2].length, 2);
}

#[test]
fn stream_ends_with_eof() {
    let tokens = lex("x");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn empty_source_is_just_eof() {
    let tokens = lex("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn unterminated_string_reports_at_opening_quote() {
    let err = lex_err("x = \"abc");
    assert_eq!(err.message, "Unterminated string.");
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 4);
}

#[test]
fn unterminated_string_span_stops_at_newline() {
    let err = lex_err("\"ab\ncd");
    assert_eq!(err.line, 1);
    assert_eq!(err.length, 3); // just `"ab`
}

#[test]
fn unexpected_character() {
    let err = lex_err("@");
    assert_eq!(err.message, "Unexpected character '@'.");
    assert_eq!(err.length, 1);
}

#[test]
fn error_position_after_valid_tokens() {
    let err = lex_err("x = 1\ny = ~");
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 4);
}
