use super::Parser;
use crate::ast::{RawGate, RawProbability, RawState};
use crate::error::TranslateError;
use crate::lexer::Token;

impl<'a> Parser<'a> {
    // -- name := formula -----------------------------------------

    pub(super) fn parse_gate(&mut self) -> Result<RawGate, TranslateError> {
        let prov = self.prov();
        let name = self.take_word()?;
        self.expect(Token::Define)?;
        let formula = self.parse_formula()?;
        Ok(RawGate {
            name,
            formula,
            prov,
        })
    }

    // -- p(name) = value -----------------------------------------

    pub(super) fn parse_probability(&mut self) -> Result<RawProbability, TranslateError> {
        let prov = self.prov();
        let name = self.parse_assignment_target()?;
        let value = match self.peek().clone() {
            Token::Number(n) => {
                self.advance();
                n.parse::<f64>()
                    .map_err(|_| self.err(format!("invalid probability '{}'", n)))?
            }
            other => {
                return Err(self.err(format!(
                    "expected probability value, got {}",
                    other.describe()
                )))
            }
        };
        if !(0.0..=1.0).contains(&value) {
            return Err(self.err(format!(
                "probability of '{}' must be within [0, 1], got {}",
                name, value
            )));
        }
        self.expect(Token::Eof)?;
        Ok(RawProbability { name, value, prov })
    }

    // -- s(name) = true|false ------------------------------------

    pub(super) fn parse_state(&mut self) -> Result<RawState, TranslateError> {
        let prov = self.prov();
        let name = self.parse_assignment_target()?;
        let value = match self.peek().clone() {
            Token::Word(w) if w.eq_ignore_ascii_case("true") => true,
            Token::Word(w) if w.eq_ignore_ascii_case("false") => false,
            other => {
                return Err(self.err(format!(
                    "house event state must be 'true' or 'false', got {}",
                    other.describe()
                )))
            }
        };
        self.advance();
        self.expect(Token::Eof)?;
        Ok(RawState { name, value, prov })
    }

    /// `p(name) =` / `s(name) =` prefix shared by both assignments.
    fn parse_assignment_target(&mut self) -> Result<String, TranslateError> {
        self.take_word()?;
        self.expect(Token::LParen)?;
        let name = self.take_word()?;
        self.expect(Token::RParen)?;
        self.expect(Token::Eq)?;
        Ok(name)
    }
}
