//! Scope stack for lexical nesting
//!
//! Tracks class and function nesting during a tree walk and hands out the
//! [`ScopeId`] of the innermost frame.

use crate::shared::models::ScopeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    pub scope: ScopeId,
    /// Qualified name of the innermost enclosing class
    pub class: Option<String>,
    /// Simple name of the innermost enclosing function
    pub function: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
    package: Option<String>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack whose top-level classes are qualified with `package`
    pub fn with_package(package: Option<String>) -> Self {
        Self {
            frames: Vec::new(),
            package,
        }
    }

    /// Current scope (`global` when empty)
    pub fn current(&self) -> ScopeId {
        self.frames
            .last()
            .map(|f| f.scope.clone())
            .unwrap_or(ScopeId::Global)
    }

    pub fn current_class(&self) -> Option<&str> {
        self.frames.last().and_then(|f| f.class.as_deref())
    }

    pub fn current_function(&self) -> Option<&str> {
        self.frames.last().and_then(|f| f.function.as_deref())
    }

    /// Is the innermost frame a class body?
    pub fn in_class_body(&self) -> bool {
        matches!(self.frames.last(), Some(f) if matches!(f.scope, ScopeId::Class(_)))
    }

    /// Enter a class; returns its scope
    pub fn push_class(&mut self, name: &str) -> ScopeId {
        let scope = self.current().nested_class(name, self.package.as_deref());
        let qualified = scope.path().to_string();
        self.frames.push(ScopeFrame {
            scope: scope.clone(),
            class: Some(qualified),
            function: None,
        });
        scope
    }

    /// Enter a function; returns its scope
    pub fn push_function(&mut self, name: &str) -> ScopeId {
        let scope = self.current().nested_function(name);
        let class = self.current_class().map(str::to_string);
        self.frames.push(ScopeFrame {
            scope: scope.clone(),
            class,
            function: Some(name.to_string()),
        });
        scope
    }

    pub fn pop(&mut self) -> Option<ScopeFrame> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Execute a closure within a function frame
    pub fn with_function<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.push_function(name);
        let result = f(self);
        self.pop();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_then_method() {
        let mut stack = ScopeStack::with_package(Some("com.example".into()));
        assert_eq!(stack.current(), ScopeId::Global);

        let class = stack.push_class("Calc");
        assert_eq!(class.to_string(), "class:com.example.Calc");
        let method = stack.push_function("add");
        assert_eq!(method.to_string(), "method:com.example.Calc.add");
        assert_eq!(stack.current_class(), Some("com.example.Calc"));
        assert_eq!(stack.current_function(), Some("add"));
    }

    #[test]
    fn test_top_level_function() {
        let mut stack = ScopeStack::with_package(Some("com.demo".into()));
        let scope = stack.push_function("doWork");
        assert_eq!(scope.to_string(), "function:doWork");
        assert_eq!(stack.current_class(), None);
    }

    #[test]
    fn test_with_function_pops() {
        let mut stack = ScopeStack::new();
        stack.push_class("C");
        let inner = stack.with_function("f", |s| s.current());
        assert_eq!(inner, ScopeId::method("C", "f"));
        assert_eq!(stack.depth(), 1);
        assert!(stack.in_class_body());
    }
}
