//! Hand-built models for unit tests

use super::*;
use crate::shared::models::{LineSpan, ScopeId};

/// Builds a single-file [`ProgramModel`] line by line
pub(crate) struct ModelFixture {
    model: ProgramModel,
    file: String,
}

impl ModelFixture {
    /// One global-scope line context per source line
    pub(crate) fn new(file: &str, source: &str) -> Self {
        let mut model = ProgramModel::new();
        for (i, code) in source.lines().enumerate() {
            model.push_line(LineContext::new(file, i as u32 + 1, code));
        }
        model.files.push(SourceFile {
            path: file.to_string(),
            package: None,
            imports: Vec::new(),
            line_count: source.lines().count() as u32,
        });
        Self {
            model,
            file: file.to_string(),
        }
    }

    pub(crate) fn with_package(mut self, package: &str) -> Self {
        if let Some(file) = self.model.files.last_mut() {
            file.package = Some(package.to_string());
        }
        self
    }

    fn scope_at(&self, line: u32) -> ScopeId {
        self.model
            .line_context(&self.file, line)
            .map(|c| c.scope.clone())
            .unwrap_or(ScopeId::Global)
    }

    /// Stamp lines `from..=to` with a scope
    pub(crate) fn scope(mut self, from: u32, to: u32, scope: ScopeId) -> Self {
        for line in from..=to {
            if let Some(context) = self.model.line_context_mut(&self.file, line) {
                context.scope = scope.clone();
            }
        }
        self
    }

    pub(crate) fn class(mut self, name: &str, qualified: &str, lines: (u32, u32)) -> Self {
        self.model.classes.push(ClassDecl {
            name: name.to_string(),
            qualified_name: qualified.to_string(),
            file: self.file.clone(),
            span: LineSpan::new(lines.0, lines.1),
            kind: ClassKind::Class,
            properties: Vec::new(),
            constructor: Vec::new(),
        });
        self
    }

    /// Function spanning `lines`, scope taken from its first line
    pub(crate) fn function(
        mut self,
        name: &str,
        owner: Option<&str>,
        lines: (u32, u32),
        parameters: &[(&str, &str)],
        return_type: &str,
    ) -> Self {
        let scope = self.scope_at(lines.0);
        let qualified_name = match owner {
            Some(class) => format!("{}.{}", class, name),
            None => name.to_string(),
        };
        let parameters: Vec<Parameter> = parameters
            .iter()
            .map(|(n, t)| Parameter::new(*n, *t))
            .collect();
        self.model.push_function(FunctionDecl {
            name: name.to_string(),
            qualified_name,
            owner: owner.map(str::to_string),
            file: self.file.clone(),
            span: LineSpan::new(lines.0, lines.1),
            return_type: return_type.to_string(),
            parameters,
            scope,
            is_private: false,
            is_suspend: false,
            is_local: false,
            receiver: None,
        });
        self
    }

    /// Mark the last added parameter of the last function variadic
    pub(crate) fn variadic_last(mut self) -> Self {
        if let Some(p) = self
            .model
            .functions
            .last_mut()
            .and_then(|f| f.parameters.last_mut())
        {
            p.is_variadic = true;
        }
        self
    }

    pub(crate) fn variable(mut self, name: &str, line: u32, initializer: Option<&str>) -> Self {
        let variable = Variable {
            name: name.to_string(),
            type_name: None,
            file: self.file.clone(),
            line,
            scope: self.scope_at(line),
            initializer: initializer.map(str::to_string),
            is_parameter: false,
        };
        if let Some(context) = self.model.line_context_mut(&self.file, line) {
            context.variables.push(variable.clone());
        }
        self.model.variables.push(variable);
        self
    }

    pub(crate) fn reference(mut self, name: &str, line: u32) -> Self {
        let index = self.model.push_reference(Reference {
            name: name.to_string(),
            file: self.file.clone(),
            line,
            scope: self.scope_at(line),
        });
        if let Some(context) = self.model.line_context_mut(&self.file, line) {
            context.references.push(index);
        }
        self
    }

    pub(crate) fn call(mut self, callee: &str, caller: Option<&str>, arguments: &[&str], line: u32) -> Self {
        let caller_id = caller.and_then(|c| self.model.function_named(c).map(|(id, _)| id));
        let index = self.model.push_call(FunctionCall {
            callee: callee.to_string(),
            caller: caller.map(str::to_string),
            caller_id,
            arguments: arguments.iter().map(|a| a.to_string()).collect(),
            file: self.file.clone(),
            line,
            scope: self.scope_at(line),
        });
        if let Some(context) = self.model.line_context_mut(&self.file, line) {
            context.calls.push(index);
        }
        self
    }

    pub(crate) fn header(mut self, line: u32, header: &str) -> Self {
        if let Some(context) = self.model.line_context_mut(&self.file, line) {
            context.control_flow = Some(header.to_string());
        }
        self
    }

    /// Branch owned by the named function; entries attach to the last `when`
    pub(crate) fn branch(
        mut self,
        kind: BranchKind,
        function: &str,
        condition: &str,
        line: u32,
        body_value: Option<&str>,
    ) -> Self {
        let function_id = self.model.function_named(function).map(|(id, _)| id);
        let parent = match kind {
            BranchKind::WhenEntry => self
                .model
                .branches
                .iter()
                .rev()
                .find(|b| b.kind == BranchKind::When)
                .map(|b| b.id),
            _ => None,
        };
        self.model.push_branch(ConditionalBranch {
            id: BranchId(0),
            kind,
            condition: condition.to_string(),
            function: function.to_string(),
            function_id,
            file: self.file.clone(),
            line,
            parent,
            is_catch_all: condition == "else",
            body_value: body_value.map(str::to_string),
        });
        self
    }

    pub(crate) fn for_loop(mut self, variable: &str, iterable: &str, line: u32) -> Self {
        self.model.loops.push(Loop {
            kind: LoopKind::For,
            variable: Some(variable.to_string()),
            iterable: Some(iterable.to_string()),
            condition: None,
            file: self.file.clone(),
            line,
            scope: self.scope_at(line),
        });
        self
    }

    pub(crate) fn while_loop(mut self, condition: &str, line: u32) -> Self {
        self.model.loops.push(Loop {
            kind: LoopKind::While,
            variable: None,
            iterable: None,
            condition: Some(condition.to_string()),
            file: self.file.clone(),
            line,
            scope: self.scope_at(line),
        });
        self
    }

    pub(crate) fn build(self) -> ProgramModel {
        self.model
    }
}
