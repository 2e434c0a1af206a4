//! Recognized atom shapes
//!
//! The value and assertion tables dispatch on these. Anything outside the
//! list below is [`AtomShape::Unrecognized`]:
//!
//! - `x op k`, `k op x` (flipped), `x.size op k`, `x.length op k`
//! - `x.isEmpty()`, `x.isBlank()`, `x.isNotEmpty()`, `x.isNotBlank()`
//! - `x == null`, `x != null`
//! - bare `x`

use std::cmp::Ordering;

use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::utils::is_identifier;

lazy_static! {
    static ref SUBJECT_FIRST: Regex = Regex::new(
        r"^([A-Za-z_][A-Za-z0-9_]*)(?:\.(size|length))?\s*(>=|<=|==|!=|>|<)\s*(.+)$"
    )
    .expect("comparison pattern");
    static ref SUBJECT_LAST: Regex = Regex::new(
        r"^(.+?)\s*(>=|<=|==|!=|>|<)\s*([A-Za-z_][A-Za-z0-9_]*)(?:\.(size|length))?$"
    )
    .expect("comparison pattern");
    static ref EMPTINESS: Regex =
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\.(isEmpty|isBlank|isNotEmpty|isNotBlank)\(\)$")
            .expect("emptiness pattern");
    static ref INT_LITERAL: Regex = Regex::new(r"^-?[0-9][0-9_]*$").expect("int pattern");
    static ref LONG_LITERAL: Regex = Regex::new(r"^-?[0-9][0-9_]*[lL]$").expect("long pattern");
    static ref FLOAT_LITERAL: Regex =
        Regex::new(r"^-?[0-9]+\.[0-9]+([eE][-+]?[0-9]+)?[fFdD]?$").expect("float pattern");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl CompareOp {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Ge),
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Le),
            "==" => Some(CompareOp::Eq),
            "!=" => Some(CompareOp::Ne),
            _ => None,
        }
    }

    /// Whether `left op right` holds given `left.cmp(right)`
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
        }
    }

    /// Same relation with the operands swapped
    pub fn flipped(self) -> Self {
        match self {
            CompareOp::Gt => CompareOp::Lt,
            CompareOp::Ge => CompareOp::Le,
            CompareOp::Lt => CompareOp::Gt,
            CompareOp::Le => CompareOp::Ge,
            other => other,
        }
    }
}

/// `.size` / `.length` on the compared name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Size,
    Length,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Int(i64),
    Long(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    /// Another name, usually a parameter
    Name(String),
}

impl Operand {
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text == "null" {
            return Some(Operand::Null);
        }
        if text == "true" || text == "false" {
            return Some(Operand::Bool(text == "true"));
        }
        if INT_LITERAL.is_match(text) {
            return text.replace('_', "").parse().ok().map(Operand::Int);
        }
        if LONG_LITERAL.is_match(text) {
            let digits = text[..text.len() - 1].replace('_', "");
            return digits.parse().ok().map(Operand::Long);
        }
        if FLOAT_LITERAL.is_match(text) {
            let digits = text.trim_end_matches(['f', 'F', 'd', 'D']);
            return digits.parse().ok().map(Operand::Float);
        }
        if let Some(inner) = unquote(text) {
            return Some(Operand::Str(inner.to_string()));
        }
        if is_identifier(text) {
            return Some(Operand::Name(text.to_string()));
        }
        None
    }

    fn is_literal(&self) -> bool {
        !matches!(self, Operand::Name(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emptiness {
    Empty,
    Blank,
    NotEmpty,
    NotBlank,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AtomShape {
    Compare {
        subject: String,
        measure: Option<Measure>,
        op: CompareOp,
        operand: Operand,
    },
    Emptiness {
        subject: String,
        check: Emptiness,
    },
    NullCheck {
        subject: String,
        /// `== null` (as opposed to `!= null`)
        is_null: bool,
    },
    Bare(String),
    Unrecognized,
}

impl AtomShape {
    pub fn of(atom: &str) -> Self {
        let text = strip_parens(atom.trim());

        if is_identifier(text) && !matches!(text, "true" | "false" | "null") {
            return AtomShape::Bare(text.to_string());
        }

        if let Some(caps) = EMPTINESS.captures(text) {
            let check = match &caps[2] {
                "isEmpty" => Emptiness::Empty,
                "isBlank" => Emptiness::Blank,
                "isNotEmpty" => Emptiness::NotEmpty,
                _ => Emptiness::NotBlank,
            };
            return AtomShape::Emptiness {
                subject: caps[1].to_string(),
                check,
            };
        }

        if let Some(caps) = SUBJECT_FIRST.captures(text) {
            if let (Some(op), Some(operand)) = (CompareOp::parse(&caps[3]), Operand::parse(&caps[4])) {
                return Self::comparison(caps[1].to_string(), measure(caps.get(2)), op, operand);
            }
        }

        if let Some(caps) = SUBJECT_LAST.captures(text) {
            let left = Operand::parse(&caps[1]);
            if let (Some(op), Some(operand)) = (CompareOp::parse(&caps[2]), left) {
                if operand.is_literal() {
                    return Self::comparison(
                        caps[3].to_string(),
                        measure(caps.get(4)),
                        op.flipped(),
                        operand,
                    );
                }
            }
        }

        AtomShape::Unrecognized
    }

    fn comparison(subject: String, measure: Option<Measure>, op: CompareOp, operand: Operand) -> Self {
        match (&operand, op, measure) {
            (Operand::Null, CompareOp::Eq | CompareOp::Ne, None) => AtomShape::NullCheck {
                subject,
                is_null: op == CompareOp::Eq,
            },
            (Operand::Null, _, _) => AtomShape::Unrecognized,
            _ => AtomShape::Compare {
                subject,
                measure,
                op,
                operand,
            },
        }
    }

    /// Name the shape constrains, if any
    pub fn subject(&self) -> Option<&str> {
        match self {
            AtomShape::Compare { subject, .. }
            | AtomShape::Emptiness { subject, .. }
            | AtomShape::NullCheck { subject, .. } => Some(subject),
            AtomShape::Bare(name) => Some(name),
            AtomShape::Unrecognized => None,
        }
    }
}

fn measure(m: Option<regex::Match<'_>>) -> Option<Measure> {
    match m.map(|m| m.as_str()) {
        Some("size") => Some(Measure::Size),
        Some("length") => Some(Measure::Length),
        _ => None,
    }
}

/// Drop parentheses that wrap the whole text
fn strip_parens(mut text: &str) -> &str {
    while text.starts_with('(') && text.ends_with(')') && wraps_whole(text) {
        text = text[1..text.len() - 1].trim();
    }
    text
}

fn wraps_whole(text: &str) -> bool {
    let mut depth = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 && i != text.len() - 1 {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

/// Contents of a plain `"..."` literal
pub(crate) fn unquote(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    if inner.contains('"') && !inner.contains("\\\"") {
        return None;
    }
    Some(inner)
}
