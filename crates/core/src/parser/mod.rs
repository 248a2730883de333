/// Statement- and formula-level parser.
/// Produces a [`RawDocument`] draft; names are not resolved here.
use crate::ast::{Provenance, RawDocument};
use crate::error::TranslateError;
use crate::lexer::{self, Spanned, Token};

mod formula;
mod statement;

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    filename: String,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned], filename: &str) -> Self {
        Parser {
            tokens,
            pos: 0,
            filename: filename.to_owned(),
        }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn peek_at(&self, offset: usize) -> &Token {
        &self.tokens[(self.pos + offset).min(self.tokens.len() - 1)].token
    }

    fn cur_line(&self) -> u32 {
        self.cur().line
    }

    fn advance(&mut self) -> &Spanned {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, expected: Token) -> Result<(), TranslateError> {
        if self.peek() == &expected {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!(
                "expected {}, got {}",
                expected.describe(),
                self.peek().describe()
            )))
        }
    }

    fn err(&self, msg: impl Into<String>) -> TranslateError {
        TranslateError::parsing(&self.filename, self.cur_line(), msg)
    }

    fn take_word(&mut self) -> Result<String, TranslateError> {
        if let Token::Word(w) = self.peek().clone() {
            self.advance();
            Ok(w)
        } else {
            Err(self.err(format!("expected name, got {}", self.peek().describe())))
        }
    }

    fn prov(&self) -> Provenance {
        Provenance {
            file: self.filename.clone(),
            line: self.cur_line(),
        }
    }
}

// ──────────────────────────────────────────────
// Document
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementKind {
    Gate,
    Probability,
    State,
    /// Anything else: the fault-tree name, or garbage.
    Unlabeled,
}

fn classify(text: &str) -> StatementKind {
    if text.contains(":=") {
        return StatementKind::Gate;
    }
    let mut chars = text.chars();
    let head = chars.next();
    let is_call = chars.as_str().trim_start().starts_with('(') && text.contains('=');
    match head {
        Some('p') | Some('P') if is_call => StatementKind::Probability,
        Some('s') | Some('S') if is_call => StatementKind::State,
        _ => StatementKind::Unlabeled,
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

/// Parse one fault-tree description.
///
/// The first unlabeled line is the fault-tree name. Gate definitions and
/// assignments may follow in any order.
pub fn parse_document(src: &str, filename: &str) -> Result<RawDocument, TranslateError> {
    let mut name: Option<(String, Provenance)> = None;
    let mut gates = Vec::new();
    let mut probabilities = Vec::new();
    let mut states = Vec::new();

    for (idx, raw_line) in src.lines().enumerate() {
        let line = (idx + 1) as u32;
        let text = strip_comment(raw_line).trim();
        if text.is_empty() {
            continue;
        }

        let kind = classify(text);
        if kind == StatementKind::Unlabeled {
            if name.is_none() {
                name = Some((
                    text.to_owned(),
                    Provenance {
                        file: filename.to_owned(),
                        line,
                    },
                ));
                continue;
            }
            if gates.is_empty() {
                return Err(TranslateError::format(
                    filename,
                    line,
                    format!(
                        "fault tree name is already defined as '{}'",
                        name.as_ref().map(|(n, _)| n.as_str()).unwrap_or_default()
                    ),
                ));
            }
            return Err(TranslateError::parsing(
                filename,
                line,
                format!("unrecognized statement '{}'", text),
            ));
        }

        if name.is_none() {
            return Err(TranslateError::format(
                filename,
                line,
                "missing fault tree name before the first definition",
            ));
        }

        let tokens = lexer::lex(text, filename, line)?;
        let mut p = Parser::new(&tokens, filename);
        match kind {
            StatementKind::Gate => gates.push(p.parse_gate()?),
            StatementKind::Probability => probabilities.push(p.parse_probability()?),
            StatementKind::State => states.push(p.parse_state()?),
            StatementKind::Unlabeled => {}
        }
    }

    let (name, name_prov) = name.ok_or_else(|| {
        TranslateError::format(filename, 0, "missing fault tree name: the document is empty")
    })?;

    Ok(RawDocument {
        name,
        name_prov,
        gates,
        probabilities,
        states,
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
