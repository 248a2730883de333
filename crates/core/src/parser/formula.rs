use super::Parser;
use crate::ast::{RawArg, RawFormula};
use crate::error::TranslateError;
use crate::lexer::Token;
use crate::model::Operator;

fn connective(token: &Token) -> Option<Operator> {
    match token {
        Token::And => Some(Operator::And),
        Token::Or => Some(Operator::Or),
        Token::Xor => Some(Operator::Xor),
        _ => None,
    }
}

fn symbol(op: Operator) -> &'static str {
    match op {
        Operator::And => "&",
        Operator::Or => "|",
        Operator::Xor => "^",
        Operator::Null => "",
        Operator::Not => "~",
        Operator::AtLeast(_) => "@",
    }
}

impl<'a> Parser<'a> {
    // -- Formula -------------------------------------------------
    //
    //   formula := '@' '(' INT ',' '[' ref (',' ref)* ']' ')'
    //            | '~' '(' ref ')'
    //            | '(' chain ')'
    //            | chain
    //   chain   := ref (OP ref)*        one OP throughout, '^' at most once
    //   ref     := '~'? NAME

    pub(super) fn parse_formula(&mut self) -> Result<RawFormula, TranslateError> {
        let formula = match self.peek().clone() {
            Token::AtLeast => self.parse_vote()?,
            Token::Not if self.peek_at(1) == &Token::LParen => self.parse_negation()?,
            Token::LParen => self.parse_group()?,
            Token::Eof => return Err(self.err("empty formula")),
            _ => self.parse_chain()?,
        };
        self.expect_formula_end()?;
        Ok(formula)
    }

    fn parse_group(&mut self) -> Result<RawFormula, TranslateError> {
        self.advance(); // consume '('
        if self.peek() == &Token::LParen {
            return Err(self.err("redundant nested parentheses"));
        }
        let chain = self.parse_chain()?;
        if self.peek() != &Token::RParen {
            return Err(self.err(format!(
                "missing ')': expected ')', got {}",
                self.peek().describe()
            )));
        }
        self.advance();
        if chain.operator == Operator::Null {
            return Err(self.err(
                "parentheses around a single argument; write '~(x)' for negation or drop them",
            ));
        }
        Ok(chain)
    }

    fn parse_negation(&mut self) -> Result<RawFormula, TranslateError> {
        self.advance(); // consume '~'
        self.advance(); // consume '('
        let arg = self.parse_arg()?;
        match self.peek().clone() {
            Token::RParen => {
                self.advance();
                Ok(RawFormula {
                    operator: Operator::Not,
                    args: vec![arg],
                })
            }
            t if connective(&t).is_some() => Err(self.err(
                "negation of a compound formula requires an intermediate gate",
            )),
            other => Err(self.err(format!(
                "missing ')': expected ')', got {}",
                other.describe()
            ))),
        }
    }

    fn parse_vote(&mut self) -> Result<RawFormula, TranslateError> {
        self.advance(); // consume '@'
        self.expect(Token::LParen)?;
        let min = match self.peek().clone() {
            Token::Number(n) => {
                let k = n.parse::<u32>().map_err(|_| {
                    self.err(format!("vote threshold must be an integer, got '{}'", n))
                })?;
                self.advance();
                k
            }
            other => {
                return Err(self.err(format!(
                    "expected vote threshold, got {}",
                    other.describe()
                )))
            }
        };
        self.expect(Token::Comma)?;
        self.expect(Token::LBracket)?;
        let mut args = vec![self.parse_arg()?];
        while self.peek() == &Token::Comma {
            self.advance();
            args.push(self.parse_arg()?);
        }
        self.expect(Token::RBracket)?;
        self.expect(Token::RParen)?;
        Ok(RawFormula {
            operator: Operator::AtLeast(min),
            args,
        })
    }

    fn parse_chain(&mut self) -> Result<RawFormula, TranslateError> {
        let mut args = vec![self.parse_arg()?];
        let mut operator: Option<Operator> = None;
        while let Some(op) = connective(self.peek()) {
            match operator {
                Some(prev) if prev != op => {
                    return Err(self.err(format!(
                        "mixing '{}' and '{}' in one formula requires an intermediate gate",
                        symbol(prev),
                        symbol(op)
                    )));
                }
                Some(Operator::Xor) => {
                    return Err(self.err(
                        "'^' takes exactly two arguments; introduce an intermediate gate",
                    ));
                }
                _ => {}
            }
            operator = Some(op);
            self.advance();
            args.push(self.parse_arg()?);
        }
        Ok(RawFormula {
            operator: operator.unwrap_or(Operator::Null),
            args,
        })
    }

    fn parse_arg(&mut self) -> Result<RawArg, TranslateError> {
        let complement = if self.peek() == &Token::Not {
            self.advance();
            true
        } else {
            false
        };
        match self.peek().clone() {
            Token::Word(name) => {
                self.advance();
                Ok(RawArg { name, complement })
            }
            Token::Not => Err(self.err("double negation requires parentheses: write '~(~x)'")),
            Token::LParen if complement => {
                Err(self.err("a negated group is only allowed as the whole formula"))
            }
            Token::LParen => Err(self.err("nested sub-formula requires an intermediate gate")),
            Token::AtLeast => Err(self.err(
                "a combination '@(...)' must be the whole formula; introduce an intermediate gate",
            )),
            Token::Arith(c) => Err(self.err(format!(
                "arithmetic operator '{}' is not allowed in a formula",
                c
            ))),
            other => Err(self.err(format!("expected event name, got {}", other.describe()))),
        }
    }

    fn expect_formula_end(&mut self) -> Result<(), TranslateError> {
        match self.peek().clone() {
            Token::Eof => Ok(()),
            Token::RParen => Err(self.err("unbalanced ')'")),
            Token::Not => Err(self.err(
                "unexpected '~': adjacent negations must be grouped with parentheses",
            )),
            Token::Arith(c) => Err(self.err(format!(
                "arithmetic operator '{}' is not allowed in a formula",
                c
            ))),
            Token::Word(w) => Err(self.err(format!("missing connective before '{}'", w))),
            t if connective(&t).is_some() => Err(self.err(format!(
                "connective {} cannot follow a grouped formula",
                t.describe()
            ))),
            other => Err(self.err(format!("unexpected {}", other.describe()))),
        }
    }
}
