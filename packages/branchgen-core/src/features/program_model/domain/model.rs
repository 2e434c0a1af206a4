//! Program model container
//!
//! Owns every record of one run. Cross-references are plain indexes
//! ([`FunctionId`], [`BranchId`], reference/call positions), so a fragment
//! built for one file can be appended to another with [`ProgramModel::merge`].

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::control_flow::{BranchId, BranchKind, ConditionalBranch, Loop};
use super::declarations::{ClassDecl, FunctionDecl, FunctionId, SourceFile, Variable};
use super::line_context::LineContext;
use super::occurrences::{FunctionCall, Reference};
use crate::shared::models::ScopeId;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProgramModel {
    pub files: Vec<SourceFile>,
    pub classes: Vec<ClassDecl>,
    pub functions: Vec<FunctionDecl>,
    /// Declared variables; parameters live in their function's first-line context
    pub variables: Vec<Variable>,
    pub branches: Vec<ConditionalBranch>,
    pub loops: Vec<Loop>,
    pub references: Vec<Reference>,
    pub calls: Vec<FunctionCall>,
    lines: Vec<LineContext>,
    #[serde(skip)]
    line_index: FxHashMap<(String, u32), usize>,
}

/// Record counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModelStatistics {
    pub files: usize,
    pub classes: usize,
    pub functions: usize,
    pub branches: usize,
    pub variables: usize,
    pub loops: usize,
    pub references: usize,
    pub calls: usize,
}

impl ProgramModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════════

    /// Add a line context; a second context for the same (file, line) replaces
    /// the first so the one-per-line invariant holds
    pub fn push_line(&mut self, context: LineContext) {
        let key = (context.file.clone(), context.line);
        match self.line_index.get(&key) {
            Some(&existing) => self.lines[existing] = context,
            None => {
                self.line_index.insert(key, self.lines.len());
                self.lines.push(context);
            }
        }
    }

    pub fn line_context_mut(&mut self, file: &str, line: u32) -> Option<&mut LineContext> {
        let index = *self.line_index.get(&(file.to_string(), line))?;
        self.lines.get_mut(index)
    }

    pub fn push_function(&mut self, function: FunctionDecl) -> FunctionId {
        self.functions.push(function);
        FunctionId(self.functions.len() - 1)
    }

    /// Add a branch, assigning its id
    pub fn push_branch(&mut self, mut branch: ConditionalBranch) -> BranchId {
        let id = BranchId(self.branches.len());
        branch.id = id;
        self.branches.push(branch);
        id
    }

    pub fn push_reference(&mut self, reference: Reference) -> usize {
        self.references.push(reference);
        self.references.len() - 1
    }

    pub fn push_call(&mut self, call: FunctionCall) -> usize {
        self.calls.push(call);
        self.calls.len() - 1
    }

    /// Append another model, shifting its indexes past ours
    pub fn merge(&mut self, other: ProgramModel) {
        let function_offset = self.functions.len();
        let branch_offset = self.branches.len();
        let reference_offset = self.references.len();
        let call_offset = self.calls.len();

        self.files.extend(other.files);
        self.classes.extend(other.classes);
        self.functions.extend(other.functions);
        self.variables.extend(other.variables);
        self.loops.extend(other.loops);
        self.references.extend(other.references);

        let shift_function = |id: Option<FunctionId>| id.map(|f| FunctionId(f.0 + function_offset));

        self.branches
            .extend(other.branches.into_iter().map(|mut branch| {
                branch.id = BranchId(branch.id.0 + branch_offset);
                branch.parent = branch.parent.map(|p| BranchId(p.0 + branch_offset));
                branch.function_id = shift_function(branch.function_id);
                branch
            }));

        self.calls.extend(other.calls.into_iter().map(|mut call| {
            call.caller_id = shift_function(call.caller_id);
            call
        }));

        for mut context in other.lines {
            for r in context.references.iter_mut() {
                *r += reference_offset;
            }
            for c in context.calls.iter_mut() {
                *c += call_offset;
            }
            self.push_line(context);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lookups
    // ═══════════════════════════════════════════════════════════════════════

    pub fn lines(&self) -> &[LineContext] {
        &self.lines
    }

    pub fn line_context(&self, file: &str, line: u32) -> Option<&LineContext> {
        let index = *self.line_index.get(&(file.to_string(), line))?;
        self.lines.get(index)
    }

    pub fn function(&self, id: FunctionId) -> Option<&FunctionDecl> {
        self.functions.get(id.0)
    }

    pub fn branch(&self, id: BranchId) -> Option<&ConditionalBranch> {
        self.branches.get(id.0)
    }

    pub fn class_named(&self, qualified_name: &str) -> Option<&ClassDecl> {
        self.classes
            .iter()
            .find(|c| c.qualified_name == qualified_name)
    }

    /// Owning class of a function
    pub fn class_of(&self, function: &FunctionDecl) -> Option<&ClassDecl> {
        function.owner.as_deref().and_then(|q| self.class_named(q))
    }

    /// First function with this simple name
    pub fn function_named(&self, name: &str) -> Option<(FunctionId, &FunctionDecl)> {
        self.functions
            .iter()
            .enumerate()
            .find(|(_, f)| f.name == name)
            .map(|(i, f)| (FunctionId(i), f))
    }

    pub fn file(&self, path: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.path == path)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════════

    pub fn variables_in_scope(&self, scope: &ScopeId) -> Vec<&Variable> {
        self.variables.iter().filter(|v| &v.scope == scope).collect()
    }

    pub fn variables_named(&self, name: &str) -> Vec<&Variable> {
        self.variables.iter().filter(|v| v.name == name).collect()
    }

    /// Branches owned by a function, in source order
    pub fn branches_of(&self, function: FunctionId) -> Vec<&ConditionalBranch> {
        self.branches
            .iter()
            .filter(|b| b.function_id == Some(function))
            .collect()
    }

    /// Entries of a `when`, in source order
    pub fn entries_of(&self, when: BranchId) -> Vec<&ConditionalBranch> {
        self.branches
            .iter()
            .filter(|b| b.kind == BranchKind::WhenEntry && b.parent == Some(when))
            .collect()
    }

    pub fn functions_of_class(&self, qualified_name: &str) -> Vec<&FunctionDecl> {
        self.functions
            .iter()
            .filter(|f| f.owner.as_deref() == Some(qualified_name))
            .collect()
    }

    pub fn statistics(&self) -> ModelStatistics {
        ModelStatistics {
            files: self.files.len(),
            classes: self.classes.len(),
            functions: self.functions.len(),
            branches: self.branches.len(),
            variables: self.variables.len(),
            loops: self.loops.len(),
            references: self.references.len(),
            calls: self.calls.len(),
        }
    }
}
