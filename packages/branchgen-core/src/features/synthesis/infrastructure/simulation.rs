//! Exact-value simulation of simple arm bodies
//!
//! Accepts integer and floating literals, bound parameters, `+ - * / %`,
//! unary minus and parentheses. Anything else, a division by zero or an
//! overflow returns `None` and the caller falls back to heuristic bounds.

use crate::features::synthesis::domain::{LiteralValue, ParameterBinding};

use super::atom_shape::unquote;
use super::value_pool::TypeFamily;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Int(i64),
    Float(f64),
    Name(String),
    Op(char),
    Open,
    Close,
}

/// Value of `body` under `bindings`, typed by the function's return family
pub fn simulate(body: &str, bindings: &[ParameterBinding], returns: &TypeFamily) -> Option<LiteralValue> {
    let body = body.trim();
    match returns.non_null() {
        TypeFamily::String => return unquote(body).map(LiteralValue::str),
        TypeFamily::Boolean => {
            return match body {
                "true" => Some(LiteralValue::Bool(true)),
                "false" => Some(LiteralValue::Bool(false)),
                _ => None,
            }
        }
        _ => {}
    }

    let tokens = tokenize(body)?;
    let mode = match returns.non_null() {
        TypeFamily::Int => Mode::Int,
        TypeFamily::Long => Mode::Long,
        TypeFamily::Double | TypeFamily::Float => Mode::Float,
        _ => return None,
    };
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        bindings,
        mode,
    };
    let value = parser.expression()?;
    if parser.pos != tokens.len() {
        return None;
    }
    match (mode, value) {
        (Mode::Int, Num::Int(v)) => Some(LiteralValue::Int(v)),
        (Mode::Long, Num::Int(v)) => Some(LiteralValue::Long(v)),
        (Mode::Float, Num::Float(v)) => returns.float(v),
        _ => None,
    }
}

fn tokenize(text: &str) -> Option<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '(' => {
                tokens.push(Token::Open);
                i += 1;
            }
            ')' => {
                tokens.push(Token::Close);
                i += 1;
            }
            '+' | '-' | '*' | '/' | '%' => {
                tokens.push(Token::Op(c));
                i += 1;
            }
            '0'..='9' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '_' || chars[i] == '.') {
                    i += 1;
                }
                let digits: String = chars[start..i].iter().filter(|&&c| c != '_').collect();
                // integer suffix or float suffix
                let suffix = chars.get(i).copied();
                if matches!(suffix, Some('L') | Some('f') | Some('F')) {
                    i += 1;
                }
                if digits.contains('.') || matches!(suffix, Some('f') | Some('F')) {
                    tokens.push(Token::Float(digits.parse().ok()?));
                } else {
                    tokens.push(Token::Int(digits.parse().ok()?));
                }
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Name(chars[start..i].iter().collect()));
            }
            _ => return None,
        }
    }
    Some(tokens)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Int,
    Long,
    Float,
}

#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    bindings: &'a [ParameterBinding],
    mode: Mode,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn expression(&mut self) -> Option<Num> {
        let mut left = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek().cloned() {
            self.pos += 1;
            let right = self.term()?;
            left = self.apply(op, left, right)?;
        }
        Some(left)
    }

    fn term(&mut self) -> Option<Num> {
        let mut left = self.unary()?;
        while let Some(Token::Op(op @ ('*' | '/' | '%'))) = self.peek().cloned() {
            self.pos += 1;
            let right = self.unary()?;
            left = self.apply(op, left, right)?;
        }
        Some(left)
    }

    fn unary(&mut self) -> Option<Num> {
        if let Some(Token::Op('-')) = self.peek() {
            self.pos += 1;
            let value = self.unary()?;
            return self.apply('-', self.zero(), value);
        }
        self.primary()
    }

    fn primary(&mut self) -> Option<Num> {
        let token = self.peek()?.clone();
        self.pos += 1;
        match token {
            Token::Int(v) => self.number(v as f64, Some(v)),
            Token::Float(v) => match self.mode {
                Mode::Float => Some(Num::Float(v)),
                _ => None,
            },
            Token::Name(name) => {
                let binding = self.bindings.iter().find(|b| b.name == name)?;
                match &binding.value {
                    LiteralValue::Int(v) | LiteralValue::Long(v) => self.number(*v as f64, Some(*v)),
                    LiteralValue::Double(v) | LiteralValue::Float(v) => match self.mode {
                        Mode::Float => Some(Num::Float(*v)),
                        _ => None,
                    },
                    _ => None,
                }
            }
            Token::Open => {
                let value = self.expression()?;
                match self.peek() {
                    Some(Token::Close) => {
                        self.pos += 1;
                        Some(value)
                    }
                    _ => None,
                }
            }
            Token::Op(_) | Token::Close => None,
        }
    }

    fn zero(&self) -> Num {
        match self.mode {
            Mode::Float => Num::Float(0.0),
            _ => Num::Int(0),
        }
    }

    fn number(&self, as_float: f64, as_int: Option<i64>) -> Option<Num> {
        match self.mode {
            Mode::Float => Some(Num::Float(as_float)),
            Mode::Int => as_int.filter(|v| i32::try_from(*v).is_ok()).map(Num::Int),
            Mode::Long => as_int.map(Num::Int),
        }
    }

    fn apply(&self, op: char, left: Num, right: Num) -> Option<Num> {
        match (left, right) {
            (Num::Int(a), Num::Int(b)) => {
                let value = match op {
                    '+' => a.checked_add(b),
                    '-' => a.checked_sub(b),
                    '*' => a.checked_mul(b),
                    '/' => a.checked_div(b),
                    '%' => a.checked_rem(b),
                    _ => None,
                }?;
                match self.mode {
                    Mode::Int => i32::try_from(value).ok().map(|v| Num::Int(v as i64)),
                    _ => Some(Num::Int(value)),
                }
            }
            (Num::Float(a), Num::Float(b)) => {
                let value = match op {
                    '+' => a + b,
                    '-' => a - b,
                    '*' => a * b,
                    '/' if b != 0.0 => a / b,
                    '%' if b != 0.0 => a % b,
                    _ => return None,
                };
                value.is_finite().then_some(Num::Float(value))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind(name: &str, value: LiteralValue) -> ParameterBinding {
        ParameterBinding {
            name: name.to_string(),
            type_name: String::new(),
            value,
        }
    }

    #[test]
    fn test_arithmetic_over_bindings() {
        let bindings = vec![bind("a", LiteralValue::Int(20)), bind("b", LiteralValue::Int(3))];
        let int = TypeFamily::Int;
        assert_eq!(simulate("a + b", &bindings, &int), Some(LiteralValue::Int(23)));
        assert_eq!(simulate("a - b * 2", &bindings, &int), Some(LiteralValue::Int(14)));
        assert_eq!(simulate("(a - b) * 2", &bindings, &int), Some(LiteralValue::Int(34)));
        assert_eq!(simulate("-a % b", &bindings, &int), Some(LiteralValue::Int(-2)));
        assert_eq!(simulate("a / b", &bindings, &int), Some(LiteralValue::Int(6)));
        assert_eq!(simulate("0", &bindings, &int), Some(LiteralValue::Int(0)));
    }

    #[test]
    fn test_unrecognized_bodies() {
        let bindings = vec![bind("a", LiteralValue::Int(1)), bind("z", LiteralValue::Int(0))];
        let int = TypeFamily::Int;
        assert_eq!(simulate("a / z", &bindings, &int), None);
        assert_eq!(simulate("compute(a)", &bindings, &int), None);
        assert_eq!(simulate("a + missing", &bindings, &int), None);
        assert_eq!(simulate("a +", &bindings, &int), None);
        assert_eq!(simulate("1.5 + a", &bindings, &int), None);
    }

    #[test]
    fn test_int_overflow_is_unrecognized() {
        // EDGE CASE: Int arithmetic wraps at runtime, so no exact value
        let bindings = vec![bind("a", LiteralValue::Int(i32::MAX as i64))];
        assert_eq!(simulate("a + 1", &bindings, &TypeFamily::Int), None);
        assert_eq!(
            simulate("a + 1", &bindings, &TypeFamily::Long),
            Some(LiteralValue::Long(i32::MAX as i64 + 1))
        );
    }

    #[test]
    fn test_floating_and_literal_bodies() {
        let bindings = vec![bind("x", LiteralValue::Double(1.5))];
        assert_eq!(
            simulate("x * 2", &bindings, &TypeFamily::Double),
            Some(LiteralValue::Double(3.0))
        );
        assert_eq!(
            simulate("\"big\"", &bindings, &TypeFamily::String),
            Some(LiteralValue::str("big"))
        );
        assert_eq!(
            simulate("true", &bindings, &TypeFamily::Boolean),
            Some(LiteralValue::Bool(true))
        );
        assert_eq!(simulate("x > 1", &bindings, &TypeFamily::Boolean), None);
    }
}
