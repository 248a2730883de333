use crate::error::TranslateError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Event, gate, or keyword name
    Word(String),
    /// Numeric literal, kept as written
    Number(String),
    // Punctuation
    Define, // :=
    Eq,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    // Logical connectives
    Not,     // ~
    And,     // &
    Or,      // |
    Xor,     // ^
    AtLeast, // @
    /// `+`, `-`, `*` or `/`; never valid, kept so the parser can name it
    Arith(char),
    // End of statement
    Eof,
}

impl Token {
    /// Source spelling used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Token::Word(w) => format!("'{}'", w),
            Token::Number(n) => format!("'{}'", n),
            Token::Define => "':='".to_owned(),
            Token::Eq => "'='".to_owned(),
            Token::LParen => "'('".to_owned(),
            Token::RParen => "')'".to_owned(),
            Token::LBracket => "'['".to_owned(),
            Token::RBracket => "']'".to_owned(),
            Token::Comma => "','".to_owned(),
            Token::Not => "'~'".to_owned(),
            Token::And => "'&'".to_owned(),
            Token::Or => "'|'".to_owned(),
            Token::Xor => "'^'".to_owned(),
            Token::AtLeast => "'@'".to_owned(),
            Token::Arith(c) => format!("'{}'", c),
            Token::Eof => "end of line".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub line: u32,
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}

/// Tokenize one statement. Every statement lives on a single source line.
pub fn lex(src: &str, filename: &str, line: u32) -> Result<Vec<Spanned>, TranslateError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        // A numeric literal is only a number when no name character follows
        // it; `42abc` and `1e` stay names for the identifier checks.
        if c.is_ascii_digit() || c == '.' {
            if let Some(end) = scan_number(&chars, pos) {
                if end == chars.len() || !is_name_char(chars[end]) {
                    let text: String = chars[pos..end].iter().collect();
                    tokens.push(Spanned {
                        token: Token::Number(text),
                        line,
                    });
                    pos = end;
                    continue;
                }
            }
        }

        if c.is_alphanumeric() || c == '_' {
            let start = pos;
            while pos < chars.len() && is_name_char(chars[pos]) {
                pos += 1;
            }
            let text: String = chars[start..pos].iter().collect();
            tokens.push(Spanned {
                token: Token::Word(text),
                line,
            });
            continue;
        }

        let token = match c {
            ':' => {
                if pos + 1 < chars.len() && chars[pos + 1] == '=' {
                    pos += 1;
                    Token::Define
                } else {
                    return Err(TranslateError::parsing(
                        filename,
                        line,
                        "expected ':=' after ':'",
                    ));
                }
            }
            '=' => Token::Eq,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,
            '~' => Token::Not,
            '&' => Token::And,
            '|' => Token::Or,
            '^' => Token::Xor,
            '@' => Token::AtLeast,
            '+' | '-' | '*' | '/' => Token::Arith(c),
            _ => {
                return Err(TranslateError::parsing(
                    filename,
                    line,
                    format!("unexpected character '{}'", c),
                ))
            }
        };
        tokens.push(Spanned { token, line });
        pos += 1;
    }

    tokens.push(Spanned {
        token: Token::Eof,
        line,
    });
    Ok(tokens)
}

/// End of the decimal literal starting at `start`, if there is one:
/// `digits [. digits] [(e|E) [+|-] digits]` with at least one mantissa digit.
/// An exponent marker without digits is left unconsumed.
fn scan_number(chars: &[char], start: usize) -> Option<usize> {
    let digits = |from: usize| {
        let mut p = from;
        while p < chars.len() && chars[p].is_ascii_digit() {
            p += 1;
        }
        (p, p - from)
    };

    let (mut pos, int_digits) = digits(start);
    let mut frac_digits = 0;
    if pos < chars.len() && chars[pos] == '.' {
        let (p, n) = digits(pos + 1);
        pos = p;
        frac_digits = n;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if pos < chars.len() && matches!(chars[pos], 'e' | 'E') {
        let mut p = pos + 1;
        if p < chars.len() && matches!(chars[p], '+' | '-') {
            p += 1;
        }
        let (p, n) = digits(p);
        if n > 0 {
            pos = p;
        }
    }
    Some(pos)
}
