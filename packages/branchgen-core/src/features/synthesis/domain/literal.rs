//! Language-neutral literal values
//!
//! Values are kept structured so the oracle can compute with them and the
//! renderer can spell them in the target syntax.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub enum LiteralValue {
    /// 32-bit integer stored widened
    Int(i64),
    Long(i64),
    Double(f64),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(String),
    Null,
    /// `listOf(..)`, `setOf(..)`, `arrayOf(..)`, `intArrayOf(..)`
    Collection {
        factory: String,
        elements: Vec<LiteralValue>,
    },
    Map(Vec<(LiteralValue, LiteralValue)>),
    /// Lambda ignoring its arguments; `None` body means Unit
    Lambda {
        arity: usize,
        body: Option<Box<LiteralValue>>,
    },
    /// Test double for a type nothing else can construct
    Mock(String),
    /// Source text reused as written (observed call arguments, enum constants)
    Verbatim(String),
}

impl LiteralValue {
    pub fn str(text: impl Into<String>) -> Self {
        LiteralValue::Str(text.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, LiteralValue::Null)
    }

    pub fn is_mock(&self) -> bool {
        match self {
            LiteralValue::Mock(_) => true,
            LiteralValue::Collection { elements, .. } => elements.iter().any(Self::is_mock),
            LiteralValue::Map(entries) => entries.iter().any(|(k, v)| k.is_mock() || v.is_mock()),
            _ => false,
        }
    }

    /// Integral value of Int and Long literals
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            LiteralValue::Int(v) | LiteralValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LiteralValue::Int(v) | LiteralValue::Long(v) => Some(*v as f64),
            LiteralValue::Double(v) | LiteralValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

// Floats compare by bit pattern so NaN pool values stay reproducible
impl PartialEq for LiteralValue {
    fn eq(&self, other: &Self) -> bool {
        use LiteralValue::*;
        match (self, other) {
            (Int(a), Int(b)) | (Long(a), Long(b)) => a == b,
            (Double(a), Double(b)) | (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Bool(a), Bool(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (Str(a), Str(b)) | (Mock(a), Mock(b)) | (Verbatim(a), Verbatim(b)) => a == b,
            (Null, Null) => true,
            (
                Collection {
                    factory: f1,
                    elements: e1,
                },
                Collection {
                    factory: f2,
                    elements: e2,
                },
            ) => f1 == f2 && e1 == e2,
            (Map(a), Map(b)) => a == b,
            (Lambda { arity: a1, body: b1 }, Lambda { arity: a2, body: b2 }) => {
                a1 == a2 && b1 == b2
            }
            _ => false,
        }
    }
}

impl Eq for LiteralValue {}
