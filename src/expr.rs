//! Arithmetic evaluator for the radian input field.
//!
//! Accepts numeric literals, `+ - * /`, parentheses and a π token (`π`,
//! `pi` or `PI`), with implicit multiplication when a value directly
//! precedes `π` or an opening parenthesis, so `pi/2`, `2pi` and `3(1+1)`
//! all evaluate. Input is tokenized and parsed by recursive descent; user
//! text never reaches any code-execution facility.

use std::f64::consts::PI;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExprError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("malformed number '{0}'")]
    BadNumber(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token at position {0}")]
    UnexpectedToken(usize),
    #[error("unbalanced parenthesis")]
    UnbalancedParen,
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Pi,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// Evaluate a radian expression. Whitespace is ignored.
pub fn evaluate(input: &str) -> Result<f64, ExprError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expression()?;
    if parser.pos != parser.tokens.len() {
        return Err(ExprError::UnexpectedToken(parser.pos));
    }
    Ok(value)
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            'π' => {
                tokens.push(Token::Pi);
                i += 1;
            }
            'p' | 'P' => {
                if matches!(chars.get(i + 1), Some('i') | Some('I')) {
                    tokens.push(Token::Pi);
                    i += 2;
                } else {
                    return Err(ExprError::UnexpectedChar(c));
                }
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| ExprError::BadNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            other => return Err(ExprError::UnexpectedChar(other)),
        }
    }

    if tokens.is_empty() {
        return Err(ExprError::UnexpectedEnd);
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<f64, ExprError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ExprError> {
        let mut value = self.factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(ExprError::DivisionByZero);
                    }
                    value /= divisor;
                }
                // Implicit multiplication: `2pi`, `2(1+1)`.
                Some(Token::Pi) | Some(Token::LParen) => {
                    value *= self.factor()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, ExprError> {
        match self.advance() {
            Some(Token::Minus) => Ok(-self.factor()?),
            Some(Token::Plus) => self.factor(),
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Pi) => Ok(PI),
            Some(Token::LParen) => {
                let value = self.expression()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(ExprError::UnbalancedParen),
                }
            }
            Some(Token::RParen) | Some(Token::Star) | Some(Token::Slash) => {
                Err(ExprError::UnexpectedToken(self.pos - 1))
            }
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("1.57", 1.57)]
    #[case("pi", PI)]
    #[case("π", PI)]
    #[case("PI", PI)]
    #[case("pi/2", PI / 2.0)]
    #[case("2pi", 2.0 * PI)]
    #[case("2 * pi / 3", 2.0 * PI / 3.0)]
    #[case("pi/4 + pi/4", PI / 2.0)]
    #[case("-pi", -PI)]
    #[case("-pi/6", -PI / 6.0)]
    #[case("(1 + 2) * 3", 9.0)]
    #[case("3(1+1)", 6.0)]
    #[case("1 - 2 - 3", -4.0)]
    #[case("12/4/3", 1.0)]
    #[case("--2", 2.0)]
    fn evaluates(#[case] input: &str, #[case] expected: f64) {
        assert_relative_eq!(evaluate(input).unwrap(), expected, epsilon = 1e-12);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("foo")]
    #[case("1+")]
    #[case("1..2")]
    #[case("(1+2")]
    #[case("1)")]
    #[case("p")]
    fn rejects(#[case] input: &str) {
        assert!(evaluate(input).is_err(), "accepted {:?}", input);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(evaluate("1/0"), Err(ExprError::DivisionByZero));
        assert_eq!(evaluate("1/(2-2)"), Err(ExprError::DivisionByZero));
    }

    #[test]
    fn no_implicit_multiplication_between_plain_numbers() {
        // `1 2` is two adjacent numbers, not a product.
        assert_eq!(evaluate("1 2"), Err(ExprError::UnexpectedToken(1)));
    }
}
