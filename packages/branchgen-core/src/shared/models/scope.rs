//! Lexical scope identifiers
//!
//! Scope ids render as `global`, `class:<C>`, `method:<C>.<f>` and
//! `function:<f>`. The part after the colon is a dotted path; a scope encloses
//! another when its path is a strict dotted prefix of the other's.

use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScopeId {
    Global,
    /// Package-qualified class path, nested classes dotted
    Class(String),
    /// `<class path>.<function>` (nested local functions extend the path)
    Method(String),
    /// Top-level function path
    Function(String),
}

impl ScopeId {
    pub fn class(path: impl Into<String>) -> Self {
        ScopeId::Class(path.into())
    }

    pub fn method(class_path: &str, function: &str) -> Self {
        ScopeId::Method(format!("{}.{}", class_path, function))
    }

    pub fn function(name: impl Into<String>) -> Self {
        ScopeId::Function(name.into())
    }

    /// Dotted path after the kind prefix (empty for `global`)
    pub fn path(&self) -> &str {
        match self {
            ScopeId::Global => "",
            ScopeId::Class(p) | ScopeId::Method(p) | ScopeId::Function(p) => p,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            ScopeId::Global => "global",
            ScopeId::Class(_) => "class",
            ScopeId::Method(_) => "method",
            ScopeId::Function(_) => "function",
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, ScopeId::Global)
    }

    /// Scope of a function declared directly inside `self`
    pub fn nested_function(&self, name: &str) -> ScopeId {
        match self {
            ScopeId::Global => ScopeId::Function(name.to_string()),
            ScopeId::Class(path) => ScopeId::method(path, name),
            ScopeId::Method(path) => ScopeId::Method(format!("{}.{}", path, name)),
            ScopeId::Function(path) => ScopeId::Function(format!("{}.{}", path, name)),
        }
    }

    /// Scope of a class declared directly inside `self`
    ///
    /// Top-level classes are qualified with the file package instead.
    pub fn nested_class(&self, name: &str, package: Option<&str>) -> ScopeId {
        match self {
            ScopeId::Global => match package {
                Some(pkg) if !pkg.is_empty() => ScopeId::Class(format!("{}.{}", pkg, name)),
                _ => ScopeId::Class(name.to_string()),
            },
            other => ScopeId::Class(format!("{}.{}", other.path(), name)),
        }
    }

    /// Equal to or lexically encloses `other`
    pub fn encloses(&self, other: &ScopeId) -> bool {
        if self == other || self.is_global() {
            return true;
        }
        let own = self.path();
        let theirs = other.path();
        theirs.len() > own.len()
            && theirs.starts_with(own)
            && theirs.as_bytes()[own.len()] == b'.'
    }

    /// Parse the rendered form back into a scope id
    pub fn parse(text: &str) -> Option<ScopeId> {
        if text == "global" {
            return Some(ScopeId::Global);
        }
        let (kind, path) = text.split_once(':')?;
        if path.is_empty() {
            return None;
        }
        match kind {
            "class" => Some(ScopeId::Class(path.to_string())),
            "method" => Some(ScopeId::Method(path.to_string())),
            "function" => Some(ScopeId::Function(path.to_string())),
            _ => None,
        }
    }
}

impl Default for ScopeId {
    fn default() -> Self {
        ScopeId::Global
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeId::Global => write!(f, "global"),
            other => write!(f, "{}:{}", other.prefix(), other.path()),
        }
    }
}

impl Serialize for ScopeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(ScopeId::Global.to_string(), "global");
        assert_eq!(ScopeId::class("com.example.C").to_string(), "class:com.example.C");
        assert_eq!(ScopeId::method("C", "f").to_string(), "method:C.f");
        assert_eq!(ScopeId::function("f").to_string(), "function:f");
    }

    #[test]
    fn test_parse_roundtrips_display() {
        for scope in [
            ScopeId::Global,
            ScopeId::class("C"),
            ScopeId::method("C", "f"),
            ScopeId::function("f.g"),
        ] {
            assert_eq!(ScopeId::parse(&scope.to_string()), Some(scope));
        }
        assert_eq!(ScopeId::parse("class:"), None);
        assert_eq!(ScopeId::parse("module:x"), None);
    }

    #[test]
    fn test_enclosing_chain() {
        let global = ScopeId::Global;
        let class = ScopeId::class("C");
        let method = ScopeId::method("C", "f");
        let local = method.nested_function("g");

        assert!(global.encloses(&method));
        assert!(class.encloses(&method));
        assert!(method.encloses(&local));
        assert!(method.encloses(&method));
        assert!(!method.encloses(&class));
        assert!(!local.encloses(&method));
    }

    #[test]
    fn test_sibling_prefix_is_not_enclosure() {
        // EDGE CASE: `C.f` must not enclose `C.foo`
        let f = ScopeId::method("C", "f");
        let foo = ScopeId::method("C", "foo");
        assert!(!f.encloses(&foo));
        assert!(!ScopeId::class("C").encloses(&ScopeId::class("Calc")));
    }

    #[test]
    fn test_nested_class_uses_package_at_top_level() {
        let top = ScopeId::Global.nested_class("Calc", Some("com.example"));
        assert_eq!(top, ScopeId::class("com.example.Calc"));
        let inner = top.nested_class("Inner", Some("com.example"));
        assert_eq!(inner, ScopeId::class("com.example.Calc.Inner"));
    }
}
