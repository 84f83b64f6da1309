//! Tonel Structural Parser: extracts the class comment, class head (kind
//! + STON metadata), and the ordered list of method definitions from a
//! full Tonel file, without looking inside any method body beyond
//! locating its textual extent.

use indexmap::IndexMap;
use tonel_lex::bracket::scan_matching;
use tonel_lex::cursor::Cursor;
use tonel_util::{Diagnostic, ErrorKind, SourceFile, Span, StonKey, StonValue, TonelError, TonelResult};

use crate::ston::StonParser;

/// The four declaration kinds a Tonel file's class head may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Trait,
    Extension,
    Package,
}

impl ClassKind {
    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "Class" => Some(ClassKind::Class),
            "Trait" => Some(ClassKind::Trait),
            "Extension" => Some(ClassKind::Extension),
            "Package" => Some(ClassKind::Package),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDefinition {
    pub kind: ClassKind,
    pub metadata: IndexMap<StonKey, StonValue>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodDefinition {
    pub metadata: Option<IndexMap<StonKey, StonValue>>,
    pub class_name: String,
    pub is_class_method: bool,
    pub selector: String,
    pub body: String,
    pub body_start_line: u32,
    pub body_start_column: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TonelFile {
    pub comment: Option<String>,
    pub class_definition: ClassDefinition,
    pub methods: Vec<MethodDefinition>,
}

/// Parses a complete Tonel file. `source` is normalized (BOM stripped,
/// CRLF folded to LF) exactly the way [`SourceFile`] normalizes it, so
/// reported line numbers match the accepted file format.
pub fn parse(source: &str) -> TonelResult<TonelFile> {
    let file = SourceFile::new(source);
    let text = file.content();
    let mut cursor = Cursor::new(text);

    let comment = parse_optional_comment(text, &mut cursor)?;
    let class_definition = parse_class_head(text, &mut cursor)?;
    let methods = parse_methods(text, &mut cursor)?;

    skip_horizontal_and_vertical_ws(&mut cursor);
    if !cursor.is_at_end() {
        return Err(error(text, &cursor, ErrorKind::UnexpectedTrailingContent, "unexpected trailing content after last method"));
    }

    Ok(TonelFile { comment, class_definition, methods })
}

/// Step 1: if the first non-whitespace character is `"`, consume through
/// the matching closing `"` (honoring `""` as an escaped quote) and return
/// its inner text.
fn parse_optional_comment(text: &str, cursor: &mut Cursor<'_>) -> TonelResult<Option<String>> {
    skip_horizontal_and_vertical_ws(cursor);
    if cursor.current_char() != '"' {
        return Ok(None);
    }
    cursor.advance();
    let mut out = String::new();
    loop {
        if cursor.is_at_end() {
            return Err(error(text, cursor, ErrorKind::UnterminatedMetadata, "unterminated class comment"));
        }
        match cursor.current_char() {
            '"' => {
                if cursor.char_at(1) == '"' {
                    out.push('"');
                    cursor.advance();
                    cursor.advance();
                } else {
                    cursor.advance();
                    return Ok(Some(out));
                }
            },
            c => {
                out.push(c);
                cursor.advance();
            },
        }
    }
}

/// Step 2: `Class|Trait|Extension|Package` followed by a STON map.
fn parse_class_head(text: &str, cursor: &mut Cursor<'_>) -> TonelResult<ClassDefinition> {
    skip_horizontal_and_vertical_ws(cursor);
    if cursor.is_at_end() || !cursor.current_char().is_ascii_alphabetic() {
        return Err(error(text, cursor, ErrorKind::MissingClassDefinition, "expected Class, Trait, Extension, or Package"));
    }
    let kind_start = cursor.position();
    while cursor.current_char().is_ascii_alphabetic() {
        cursor.advance();
    }
    let kind_word = cursor.slice_from(kind_start);
    let kind = ClassKind::from_keyword(kind_word)
        .ok_or_else(|| error(text, cursor, ErrorKind::UnknownClassKind, kind_word.to_string()))?;

    skip_horizontal_and_vertical_ws(cursor);
    let metadata = parse_ston_map(text, cursor)?;
    Ok(ClassDefinition { kind, metadata })
}

/// Step 3, repeated until end of input.
fn parse_methods(text: &str, cursor: &mut Cursor<'_>) -> TonelResult<Vec<MethodDefinition>> {
    let mut methods = Vec::new();
    loop {
        skip_horizontal_and_vertical_ws(cursor);
        if cursor.is_at_end() {
            break;
        }
        if cursor.current_char() != '{' && !cursor.current_char().is_ascii_uppercase() {
            return Err(error(text, cursor, ErrorKind::UnexpectedTrailingContent, "expected a method definition or end of input"));
        }

        let metadata = if cursor.current_char() == '{' { Some(parse_ston_map(text, cursor)?) } else { None };
        skip_horizontal_and_vertical_ws(cursor);

        let (class_name, is_class_method) = parse_class_name_and_indicator(text, cursor)?;
        expect_horizontal_ws(text, cursor)?;
        expect_literal(text, cursor, ">>")?;
        expect_horizontal_ws(text, cursor)?;
        let selector = parse_selector(text, cursor)?;

        skip_horizontal_and_vertical_ws(cursor);
        if cursor.current_char() != '[' {
            return Err(error(text, cursor, ErrorKind::MalformedMethodReference, "expected '[' to open the method body"));
        }
        cursor.advance();
        let body_start_line = cursor.line();
        let body_start_column = cursor.column();
        let body_start = cursor.position();
        let body_end = scan_matching(text, body_start, '[', ']')
            .map_err(|_| error(text, cursor, ErrorKind::UnbalancedBrackets, "unbalanced '[' in method body"))?;
        let body = text[body_start..body_end].to_string();
        advance_to(cursor, body_end + 1);

        methods.push(MethodDefinition { metadata, class_name, is_class_method, selector, body, body_start_line, body_start_column });
    }
    Ok(methods)
}

/// `ClassName (" class")?`.
fn parse_class_name_and_indicator(text: &str, cursor: &mut Cursor<'_>) -> TonelResult<(String, bool)> {
    if !cursor.current_char().is_ascii_uppercase() {
        return Err(error(text, cursor, ErrorKind::MalformedMethodReference, "method reference must start with an uppercase class name"));
    }
    let start = cursor.position();
    while is_ident_continue(cursor.current_char()) {
        cursor.advance();
    }
    let class_name = cursor.slice_from(start).to_string();

    let snapshot = cursor.snapshot();
    let had_ws = skip_horizontal_ws(cursor) > 0;
    if had_ws && cursor.slice_matches("class") && !is_ident_continue(cursor.char_at(5)) {
        cursor.advance_n(5);
        return Ok((class_name, true));
    }
    cursor.restore(snapshot);
    Ok((class_name, false))
}

fn parse_selector(text: &str, cursor: &mut Cursor<'_>) -> TonelResult<String> {
    if is_ident_start(cursor.current_char()) {
        let mut selector = String::new();
        loop {
            let start = cursor.position();
            while is_ident_continue(cursor.current_char()) {
                cursor.advance();
            }
            if cursor.position() == start {
                break;
            }
            if cursor.current_char() == ':' {
                cursor.advance();
                selector.push_str(&text[start..cursor.position()]);
                if is_ident_start(cursor.current_char()) {
                    continue;
                }
                break;
            }
            selector.push_str(&text[start..cursor.position()]);
            break;
        }
        if selector.is_empty() {
            return Err(error(text, cursor, ErrorKind::MalformedMethodReference, "empty selector"));
        }
        return Ok(selector);
    }

    if is_binary_selector_char(cursor.current_char()) {
        let start = cursor.position();
        while is_binary_selector_char(cursor.current_char()) {
            cursor.advance();
        }
        return Ok(cursor.slice_from(start).to_string());
    }

    Err(error(text, cursor, ErrorKind::MalformedMethodReference, "expected a unary, keyword, or binary selector"))
}

/// Locates and parses a `{ ... }` STON map at the cursor, advancing past its
/// closing `}`. Brace balancing uses the same string/comment-aware state
/// machine as the Bracket Scanner.
fn parse_ston_map(text: &str, cursor: &mut Cursor<'_>) -> TonelResult<IndexMap<StonKey, StonValue>> {
    if cursor.current_char() != '{' {
        return Err(error(text, cursor, ErrorKind::UnterminatedMetadata, "expected a STON map starting with '{'"));
    }
    let open_line = cursor.line();
    let open_column = cursor.column();
    let open_pos = cursor.position();
    cursor.advance();
    let inner_start = cursor.position();
    let close_pos = scan_matching(text, inner_start, '{', '}')
        .map_err(|_| error(text, cursor, ErrorKind::UnterminatedMetadata, "unbalanced '{' in STON metadata"))?;
    let map_text = &text[open_pos..=close_pos];
    let map = StonParser::with_start(map_text, open_line, open_column).parse_map()?;
    advance_to(cursor, close_pos + 1);
    Ok(map)
}

fn expect_literal(text: &str, cursor: &mut Cursor<'_>, literal: &str) -> TonelResult<()> {
    if cursor.slice_matches(literal) {
        cursor.advance_n(literal.chars().count());
        Ok(())
    } else {
        Err(error(text, cursor, ErrorKind::MalformedMethodReference, format!("expected '{literal}' in method reference")))
    }
}

fn expect_horizontal_ws(text: &str, cursor: &mut Cursor<'_>) -> TonelResult<()> {
    if skip_horizontal_ws(cursor) == 0 {
        return Err(error(text, cursor, ErrorKind::MalformedMethodReference, "expected whitespace in method reference"));
    }
    Ok(())
}

/// Skips ASCII spaces/tabs only — the accepted method-reference separator
/// is `WS+` of spaces/tabs, not newlines (method references are
/// single-line). Returns the number of characters skipped.
fn skip_horizontal_ws(cursor: &mut Cursor<'_>) -> u32 {
    let mut count = 0;
    while matches!(cursor.current_char(), ' ' | '\t') {
        cursor.advance();
        count += 1;
    }
    count
}

fn skip_horizontal_and_vertical_ws(cursor: &mut Cursor<'_>) {
    while !cursor.is_at_end() && cursor.current_char().is_whitespace() {
        cursor.advance();
    }
}

fn advance_to(cursor: &mut Cursor<'_>, target_byte: usize) {
    while cursor.position() < target_byte {
        cursor.advance();
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_binary_selector_char(c: char) -> bool {
    matches!(c, '\\' | '+' | '*' | '/' | '=' | '>' | '<' | ',' | '@' | '%' | '~' | '&' | '-' | '?' | '|')
}

fn error(text: &str, cursor: &Cursor<'_>, kind: ErrorKind, detail: impl Into<String>) -> TonelError {
    let reason = format!("{}: {}", kind.name(), detail.into());
    let snippet = SourceFile::new(text).snippet_at(cursor.position());
    Diagnostic::new(kind, reason, cursor.line(), snippet)
        .with_span(Span::point(cursor.position(), cursor.line(), cursor.column()))
        .into()
}

trait CursorExt {
    fn slice_matches(&self, literal: &str) -> bool;
}

impl<'a> CursorExt for Cursor<'a> {
    fn slice_matches(&self, literal: &str) -> bool {
        self.remaining().starts_with(literal)
    }
}
