//! Kotlin spelling of literal values

use crate::features::synthesis::domain::LiteralValue;

pub fn kotlin_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Int(v) => match *v {
            v if v == i32::MAX as i64 => "Int.MAX_VALUE".to_string(),
            // `-2147483648` would parse as a negated Long
            v if v == i32::MIN as i64 => "Int.MIN_VALUE".to_string(),
            v => v.to_string(),
        },
        LiteralValue::Long(v) => match *v {
            i64::MAX => "Long.MAX_VALUE".to_string(),
            i64::MIN => "Long.MIN_VALUE".to_string(),
            v => format!("{}L", v),
        },
        LiteralValue::Double(v) => floating(*v, "Double", f64::MAX, ""),
        LiteralValue::Float(v) => floating(*v, "Float", f32::MAX as f64, "f"),
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Char(c) => format!("'{}'", escape_char(*c, '\'')),
        LiteralValue::Str(s) => quote(s),
        LiteralValue::Null => "null".to_string(),
        LiteralValue::Collection { factory, elements } => {
            format!("{}({})", factory, join(elements.iter().map(kotlin_literal)))
        }
        LiteralValue::Map(entries) => format!(
            "mapOf({})",
            join(
                entries
                    .iter()
                    .map(|(k, v)| format!("{} to {}", kotlin_literal(k), kotlin_literal(v)))
            )
        ),
        LiteralValue::Lambda { arity, body } => {
            let body = body.as_deref().map_or_else(|| "Unit".to_string(), kotlin_literal);
            match arity {
                0 => format!("{{ {} }}", body),
                n => format!("{{ {} -> {} }}", vec!["_"; *n].join(", "), body),
            }
        }
        LiteralValue::Mock(type_name) => format!("mock({}::class.java)", erased(type_name)),
        LiteralValue::Verbatim(text) => text.clone(),
    }
}

/// Kotlin string literal with escapes
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        out.push_str(&escape_char(c, '"'));
    }
    out.push('"');
    out
}

fn escape_char(c: char, delimiter: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '$' if delimiter == '"' => "\\$".to_string(),
        c if c == delimiter => format!("\\{}", c),
        c if c.is_control() => format!("\\u{:04x}", c as u32),
        c => c.to_string(),
    }
}

fn floating(v: f64, kind: &str, max: f64, suffix: &str) -> String {
    if v.is_nan() {
        format!("{}.NaN", kind)
    } else if v == f64::INFINITY {
        format!("{}.POSITIVE_INFINITY", kind)
    } else if v == f64::NEG_INFINITY {
        format!("{}.NEGATIVE_INFINITY", kind)
    } else if v == max {
        format!("{}.MAX_VALUE", kind)
    } else if v == -max {
        format!("-{}.MAX_VALUE", kind)
    } else if suffix.is_empty() {
        format!("{:?}", v)
    } else {
        format!("{:?}{}", v as f32, suffix)
    }
}

/// Class literal target: type arguments and nullability dropped
fn erased(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.trim_end_matches('?').trim()
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_literals() {
        assert_eq!(kotlin_literal(&LiteralValue::Int(20)), "20");
        assert_eq!(kotlin_literal(&LiteralValue::Int(i32::MIN as i64)), "Int.MIN_VALUE");
        assert_eq!(kotlin_literal(&LiteralValue::Long(5)), "5L");
        assert_eq!(kotlin_literal(&LiteralValue::Double(0.5)), "0.5");
        assert_eq!(kotlin_literal(&LiteralValue::Double(20.0)), "20.0");
        assert_eq!(kotlin_literal(&LiteralValue::Double(f64::NAN)), "Double.NaN");
        assert_eq!(kotlin_literal(&LiteralValue::Float(1.5)), "1.5f");
        assert_eq!(kotlin_literal(&LiteralValue::Float(f32::MAX as f64)), "Float.MAX_VALUE");
        assert_eq!(kotlin_literal(&LiteralValue::Float(f64::NEG_INFINITY)), "Float.NEGATIVE_INFINITY");
    }

    #[test]
    fn test_text_literals() {
        assert_eq!(kotlin_literal(&LiteralValue::str("a\"b$c\n")), r#""a\"b\$c\n""#);
        assert_eq!(kotlin_literal(&LiteralValue::str("\u{0}")), r#""\u0000""#);
        assert_eq!(kotlin_literal(&LiteralValue::Char('\'')), r"'\''");
    }

    #[test]
    fn test_composite_literals() {
        let list = LiteralValue::Collection {
            factory: "listOf".into(),
            elements: vec![LiteralValue::Int(1), LiteralValue::Int(2)],
        };
        assert_eq!(kotlin_literal(&list), "listOf(1, 2)");
        let map = LiteralValue::Map(vec![(LiteralValue::str("k"), LiteralValue::Int(0))]);
        assert_eq!(kotlin_literal(&map), r#"mapOf("k" to 0)"#);
        let lambda = LiteralValue::Lambda {
            arity: 2,
            body: Some(Box::new(LiteralValue::Bool(false))),
        };
        assert_eq!(kotlin_literal(&lambda), "{ _, _ -> false }");
        assert_eq!(kotlin_literal(&LiteralValue::Lambda { arity: 0, body: None }), "{ Unit }");
        assert_eq!(
            kotlin_literal(&LiteralValue::Mock("Repo<User>?".into())),
            "mock(Repo::class.java)"
        );
    }
}
