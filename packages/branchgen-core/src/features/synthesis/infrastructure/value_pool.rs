//! Type families, neutral values and boundary pools
//!
//! Types are matched on their text only.

use crate::features::synthesis::domain::LiteralValue;
use crate::shared::utils::{split_top_level, SeededRandom};

/// Collections nest at most this deep in pooled values
const MAX_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFamily {
    Int,
    Long,
    Double,
    Float,
    Boolean,
    Char,
    String,
    List(Box<TypeFamily>),
    Set(Box<TypeFamily>),
    Map(Box<TypeFamily>, Box<TypeFamily>),
    /// `Array<T>`
    Array(Box<TypeFamily>),
    /// `IntArray`, `LongArray`, ... with their element family
    PrimitiveArray(&'static str, Box<TypeFamily>),
    /// `(A, B) -> R`
    Function { arity: usize, returns: Box<TypeFamily> },
    Nullable(Box<TypeFamily>),
    Unit,
    Other(String),
}

impl TypeFamily {
    pub fn of(type_name: &str) -> Self {
        let text = type_name.trim();
        if text.is_empty() {
            return TypeFamily::Other(String::new());
        }
        if let Some(inner) = text.strip_suffix('?') {
            return TypeFamily::Nullable(Box::new(Self::of(inner)));
        }
        if let Some(function) = Self::function(text) {
            return function;
        }
        if text.starts_with('(') && text.ends_with(')') {
            return Self::of(&text[1..text.len() - 1]);
        }

        let (base, args) = match text.find('<') {
            Some(open) if text.ends_with('>') => (&text[..open], type_arguments(&text[open + 1..text.len() - 1])),
            _ => (text, Vec::new()),
        };
        let base = base.rsplit('.').next().unwrap_or(base).trim();
        let arg = |i: usize| Box::new(args.get(i).map(|a| Self::of(a)).unwrap_or(TypeFamily::Other("Any".into())));

        match base {
            "Int" | "Short" | "Byte" | "UInt" => TypeFamily::Int,
            "Long" | "ULong" => TypeFamily::Long,
            "Double" | "Number" => TypeFamily::Double,
            "Float" => TypeFamily::Float,
            "Boolean" => TypeFamily::Boolean,
            "Char" => TypeFamily::Char,
            "String" | "CharSequence" => TypeFamily::String,
            "Unit" | "Nothing" => TypeFamily::Unit,
            "List" | "MutableList" | "ArrayList" | "Collection" | "Iterable" | "Sequence" => {
                TypeFamily::List(arg(0))
            }
            "Set" | "MutableSet" | "HashSet" => TypeFamily::Set(arg(0)),
            "Map" | "MutableMap" | "HashMap" => TypeFamily::Map(arg(0), arg(1)),
            "Array" => TypeFamily::Array(arg(0)),
            "IntArray" => TypeFamily::PrimitiveArray("intArrayOf", Box::new(TypeFamily::Int)),
            "LongArray" => TypeFamily::PrimitiveArray("longArrayOf", Box::new(TypeFamily::Long)),
            "DoubleArray" => TypeFamily::PrimitiveArray("doubleArrayOf", Box::new(TypeFamily::Double)),
            "FloatArray" => TypeFamily::PrimitiveArray("floatArrayOf", Box::new(TypeFamily::Float)),
            "BooleanArray" => TypeFamily::PrimitiveArray("booleanArrayOf", Box::new(TypeFamily::Boolean)),
            "CharArray" => TypeFamily::PrimitiveArray("charArrayOf", Box::new(TypeFamily::Char)),
            _ => TypeFamily::Other(text.to_string()),
        }
    }

    fn function(text: &str) -> Option<Self> {
        let arrow = top_level_arrow(text)?;
        let params = text[..arrow].trim();
        let returns = Self::of(&text[arrow + 2..]);
        let params = params.strip_prefix('(')?.strip_suffix(')')?;
        Some(TypeFamily::Function {
            arity: split_top_level(params, ',').len(),
            returns: Box::new(returns),
        })
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TypeFamily::Int | TypeFamily::Long | TypeFamily::Double | TypeFamily::Float
        )
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, TypeFamily::Int | TypeFamily::Long)
    }

    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            TypeFamily::List(_)
                | TypeFamily::Set(_)
                | TypeFamily::Map(..)
                | TypeFamily::Array(_)
                | TypeFamily::PrimitiveArray(..)
        )
    }

    /// Strip one level of nullability
    pub fn non_null(&self) -> &TypeFamily {
        match self {
            TypeFamily::Nullable(inner) => inner,
            other => other,
        }
    }

    /// Numeric literal of this family's kind
    pub fn number(&self, value: i64) -> Option<LiteralValue> {
        match self.non_null() {
            TypeFamily::Int => i32::try_from(value).ok().map(|v| LiteralValue::Int(v as i64)),
            TypeFamily::Long => Some(LiteralValue::Long(value)),
            TypeFamily::Double => Some(LiteralValue::Double(value as f64)),
            TypeFamily::Float => Some(LiteralValue::Float(value as f64)),
            _ => None,
        }
    }

    pub fn float(&self, value: f64) -> Option<LiteralValue> {
        match self.non_null() {
            TypeFamily::Double => Some(LiteralValue::Double(value)),
            TypeFamily::Float => Some(LiteralValue::Float(value)),
            _ => None,
        }
    }
}

/// Split `K, V` on commas outside nested `<>` and `()`
fn type_arguments(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' | '(' => depth += 1,
            '>' if !text[..i].ends_with('-') => depth -= 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(text[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim().to_string());
    parts.retain(|p| !p.is_empty());
    parts
}

fn top_level_arrow(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' | b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'-' => {
                if depth == 0 {
                    return Some(i - 1);
                }
            }
            b'>' | b')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Type-appropriate value with no particular meaning
///
/// Nullable types get their inner neutral value so calls stay on the
/// non-null path.
pub fn neutral(family: &TypeFamily) -> LiteralValue {
    match family {
        TypeFamily::Int => LiteralValue::Int(0),
        TypeFamily::Long => LiteralValue::Long(0),
        TypeFamily::Double => LiteralValue::Double(0.0),
        TypeFamily::Float => LiteralValue::Float(0.0),
        TypeFamily::Boolean => LiteralValue::Bool(false),
        TypeFamily::Char => LiteralValue::Char('a'),
        TypeFamily::String => LiteralValue::str(""),
        TypeFamily::List(_) => collection("listOf", Vec::new()),
        TypeFamily::Set(_) => collection("setOf", Vec::new()),
        TypeFamily::Map(..) => LiteralValue::Map(Vec::new()),
        TypeFamily::Array(_) => collection("arrayOf", Vec::new()),
        TypeFamily::PrimitiveArray(factory, _) => collection(factory, Vec::new()),
        TypeFamily::Function { arity, returns } => lambda(*arity, returns),
        TypeFamily::Nullable(inner) => neutral(inner),
        TypeFamily::Unit => LiteralValue::Verbatim("Unit".to_string()),
        TypeFamily::Other(name) => LiteralValue::Mock(name.clone()),
    }
}

/// A collection value of `family` holding `len` neutral elements
pub fn sized_collection(family: &TypeFamily, len: usize) -> Option<LiteralValue> {
    let element = |inner: &TypeFamily| neutral(inner);
    match family.non_null() {
        TypeFamily::List(inner) => Some(collection("listOf", vec![element(inner); len])),
        TypeFamily::Array(inner) => Some(collection("arrayOf", vec![element(inner); len])),
        TypeFamily::PrimitiveArray(factory, inner) => Some(collection(factory, vec![element(inner); len])),
        // distinct members so the set really has `len` elements
        TypeFamily::Set(inner) => Some(collection(
            "setOf",
            (0..len).map(|i| distinct_element(inner, i)).collect(),
        )),
        TypeFamily::Map(k, v) => Some(LiteralValue::Map(
            (0..len).map(|i| (distinct_element(k, i), neutral(v))).collect(),
        )),
        TypeFamily::String => Some(LiteralValue::str("a".repeat(len))),
        _ => None,
    }
}

fn distinct_element(family: &TypeFamily, i: usize) -> LiteralValue {
    match family.non_null() {
        TypeFamily::String => LiteralValue::str(format!("item{}", i)),
        TypeFamily::Char => LiteralValue::Char(char::from(b'a' + (i % 26) as u8)),
        other => other.number(i as i64).unwrap_or_else(|| neutral(other)),
    }
}

fn collection(factory: &str, elements: Vec<LiteralValue>) -> LiteralValue {
    LiteralValue::Collection {
        factory: factory.to_string(),
        elements,
    }
}

fn lambda(arity: usize, returns: &TypeFamily) -> LiteralValue {
    let body = match returns {
        TypeFamily::Unit => None,
        other => Some(Box::new(neutral(other))),
    };
    LiteralValue::Lambda { arity, body }
}

/// Seeded draws from per-type boundary values
pub struct ValuePool;

impl ValuePool {
    pub fn sample(family: &TypeFamily, rng: &mut SeededRandom) -> LiteralValue {
        Self::sample_at(family, rng, 0)
    }

    fn sample_at(family: &TypeFamily, rng: &mut SeededRandom, depth: usize) -> LiteralValue {
        match family {
            TypeFamily::Int => LiteralValue::Int(Self::integral(rng, i32::MIN as i64, i32::MAX as i64)),
            TypeFamily::Long => LiteralValue::Long(Self::integral(rng, i64::MIN, i64::MAX)),
            TypeFamily::Double => LiteralValue::Double(Self::floating(rng, f64::MIN, f64::MAX)),
            TypeFamily::Float => {
                LiteralValue::Float(Self::floating(rng, f32::MIN as f64, f32::MAX as f64))
            }
            TypeFamily::Boolean => LiteralValue::Bool(rng.coin()),
            TypeFamily::Char => LiteralValue::Char(if rng.coin() { 'a' } else { 'Z' }),
            TypeFamily::String => Self::string(rng),
            TypeFamily::Nullable(_) => LiteralValue::Null,
            TypeFamily::Function { arity, returns } => lambda(*arity, returns),
            TypeFamily::Unit => neutral(family),
            TypeFamily::Other(name) => LiteralValue::Mock(name.clone()),
            collection_family => {
                let len = if depth + 1 >= MAX_DEPTH || rng.coin() { 0 } else { 1 };
                Self::pooled_collection(collection_family, rng, depth, len)
            }
        }
    }

    fn pooled_collection(family: &TypeFamily, rng: &mut SeededRandom, depth: usize, len: usize) -> LiteralValue {
        let element = |inner: &TypeFamily, rng: &mut SeededRandom| -> Vec<LiteralValue> {
            (0..len).map(|_| Self::sample_at(inner, rng, depth + 1)).collect()
        };
        match family {
            TypeFamily::List(inner) => collection("listOf", element(inner, rng)),
            TypeFamily::Set(inner) => collection("setOf", element(inner, rng)),
            TypeFamily::Array(inner) => collection("arrayOf", element(inner, rng)),
            TypeFamily::PrimitiveArray(factory, inner) => collection(factory, element(inner, rng)),
            TypeFamily::Map(k, v) => {
                let keys = element(k, rng);
                let values = element(v, rng);
                LiteralValue::Map(keys.into_iter().zip(values).collect())
            }
            other => neutral(other),
        }
    }

    /// 0, 1, -1, max, min, max-1, min+1, or a draw from 1..100
    fn integral(rng: &mut SeededRandom, min: i64, max: i64) -> i64 {
        match rng.range_inclusive(0, 7) {
            0 => 0,
            1 => 1,
            2 => -1,
            3 => max,
            4 => min,
            5 => max - 1,
            6 => min + 1,
            _ => rng.range_i64(1, 100),
        }
    }

    fn floating(rng: &mut SeededRandom, min: f64, max: f64) -> f64 {
        match rng.range_inclusive(0, 8) {
            0 => 0.0,
            1 => 1.0,
            2 => -1.0,
            3 => max,
            4 => min,
            5 => f64::NAN,
            6 => f64::INFINITY,
            7 => f64::NEG_INFINITY,
            _ => rng.range_i64(1, 100) as f64 + 0.5,
        }
    }

    fn string(rng: &mut SeededRandom) -> LiteralValue {
        let text = match rng.range_inclusive(0, 8) {
            0 => String::new(),
            1 => " ".to_string(),
            2 => format!("test{}", rng.range_i64(0, 100)),
            3 => "a".to_string(),
            4 => "\n".to_string(),
            5 => "\t".to_string(),
            6 => "\"".to_string(),
            7 => "\u{0}".to_string(),
            _ => "a".repeat(1000),
        };
        LiteralValue::Str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_families() {
        assert_eq!(TypeFamily::of("Int"), TypeFamily::Int);
        assert_eq!(TypeFamily::of("kotlin.Long"), TypeFamily::Long);
        assert_eq!(TypeFamily::of("String?"), TypeFamily::Nullable(Box::new(TypeFamily::String)));
        assert_eq!(TypeFamily::of("List<Int>"), TypeFamily::List(Box::new(TypeFamily::Int)));
        assert_eq!(
            TypeFamily::of("Map<String, List<Int>>"),
            TypeFamily::Map(
                Box::new(TypeFamily::String),
                Box::new(TypeFamily::List(Box::new(TypeFamily::Int)))
            )
        );
        assert_eq!(
            TypeFamily::of("(Int, String) -> Boolean"),
            TypeFamily::Function {
                arity: 2,
                returns: Box::new(TypeFamily::Boolean)
            }
        );
        assert_eq!(
            TypeFamily::of("() -> Unit"),
            TypeFamily::Function {
                arity: 0,
                returns: Box::new(TypeFamily::Unit)
            }
        );
        assert_eq!(
            TypeFamily::of("Map<String, Map<Int, Long>>"),
            TypeFamily::Map(
                Box::new(TypeFamily::String),
                Box::new(TypeFamily::Map(Box::new(TypeFamily::Int), Box::new(TypeFamily::Long)))
            )
        );
        assert_eq!(
            TypeFamily::of("List<() -> Int>"),
            TypeFamily::List(Box::new(TypeFamily::Function {
                arity: 0,
                returns: Box::new(TypeFamily::Int)
            }))
        );
        assert_eq!(TypeFamily::of("Repository"), TypeFamily::Other("Repository".into()));
    }

    #[test]
    fn test_neutral_values() {
        assert_eq!(neutral(&TypeFamily::of("Int")), LiteralValue::Int(0));
        assert_eq!(neutral(&TypeFamily::of("String?")), LiteralValue::str(""));
        assert_eq!(
            neutral(&TypeFamily::of("() -> Int")),
            LiteralValue::Lambda {
                arity: 0,
                body: Some(Box::new(LiteralValue::Int(0)))
            }
        );
        assert_eq!(neutral(&TypeFamily::of("Clock")), LiteralValue::Mock("Clock".into()));
    }

    #[test]
    fn test_sized_collection() {
        let list = sized_collection(&TypeFamily::of("List<String>"), 2).unwrap();
        assert_eq!(
            list,
            LiteralValue::Collection {
                factory: "listOf".into(),
                elements: vec![LiteralValue::str(""), LiteralValue::str("")],
            }
        );
        assert_eq!(
            sized_collection(&TypeFamily::String, 3),
            Some(LiteralValue::str("aaa"))
        );
        assert!(sized_collection(&TypeFamily::Int, 1).is_none());
    }

    #[test]
    fn test_pool_is_seed_deterministic() {
        let family = TypeFamily::of("List<Map<String, Double>>");
        let draw = |seed| {
            let mut rng = SeededRandom::new(seed);
            (0..30)
                .map(|_| ValuePool::sample(&family, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(9), draw(9));
    }

    #[test]
    fn test_pool_values_stay_in_range() {
        let mut rng = SeededRandom::new(3);
        for _ in 0..200 {
            match ValuePool::sample(&TypeFamily::Int, &mut rng) {
                LiteralValue::Int(v) => assert!(i32::try_from(v).is_ok()),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(
            ValuePool::sample(&TypeFamily::of("Int?"), &mut rng),
            LiteralValue::Null
        );
    }

    #[test]
    fn test_collection_depth_capped() {
        // EDGE CASE: deeply nested collections bottom out empty
        let family = TypeFamily::of("List<List<List<List<Int>>>>");
        let mut rng = SeededRandom::new(5);
        fn depth(v: &LiteralValue) -> usize {
            match v {
                LiteralValue::Collection { elements, .. } => {
                    1 + elements.iter().map(depth).max().unwrap_or(0)
                }
                _ => 0,
            }
        }
        for _ in 0..50 {
            assert!(depth(&ValuePool::sample(&family, &mut rng)) <= MAX_DEPTH);
        }
    }
}
