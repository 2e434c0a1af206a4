//! Parameter values per test
//!
//! Branch tests drive every atom toward its assigned truth through the shape
//! table; parameters no atom constrains get neutral values. The basic test
//! draws everything from the boundary pool.
//!
//! After binding, every driven atom is re-evaluated against the chosen values.
//! Only bindings that provably reach the intended outcome are marked
//! [`Bindings::realized`], which is what the exact oracle requires.

use crate::features::program_model::{FunctionDecl, Parameter};
use crate::features::synthesis::domain::{
    Assignment, CallArgument, Condition, LiteralValue, ParameterBinding,
};
use crate::shared::utils::SeededRandom;

use super::atom_shape::{AtomShape, CompareOp, Emptiness, Measure, Operand};
use super::decomposer::evaluate;
use super::value_pool::{neutral, sized_collection, TypeFamily, ValuePool};
use super::vararg_index::VarargIndex;

/// Values chosen for one call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    /// Non-variadic parameters, in declaration order
    pub values: Vec<ParameterBinding>,
    /// Values spelled inline for the variadic parameter
    pub variadic: Option<Vec<LiteralValue>>,
    /// The values evaluate every driven condition to its intended outcome
    pub realized: bool,
}

impl Bindings {
    pub fn get(&self, name: &str) -> Option<&LiteralValue> {
        self.values.iter().find(|b| b.name == name).map(|b| &b.value)
    }

    pub fn call_arguments(&self, function: &FunctionDecl) -> Vec<CallArgument> {
        function
            .parameters
            .iter()
            .map(|p| match (p.is_variadic, &self.variadic) {
                (true, Some(values)) => CallArgument::Inline(values.clone()),
                (true, None) => CallArgument::Inline(Vec::new()),
                (false, _) => CallArgument::Bound(p.name.clone()),
            })
            .collect()
    }

    pub fn uses_mock(&self) -> bool {
        self.values.iter().any(|b| b.value.is_mock())
            || self.variadic.iter().flatten().any(LiteralValue::is_mock)
    }

    /// Whether every condition folds to its assignment's outcome
    ///
    /// False as soon as one atom cannot be evaluated from the parameters, e.g.
    /// when its subject is a property or a local.
    pub fn realizes(&self, function: &FunctionDecl, constraints: &[(&[Condition], &Assignment)]) -> bool {
        constraints.iter().all(|(atoms, assignment)| {
            let truths: Option<Vec<bool>> = atoms
                .iter()
                .map(|atom| self.truth(function, &AtomShape::of(&atom.text)))
                .collect();
            truths.is_some_and(|truths| evaluate(atoms, &truths) == assignment.outcome)
        })
    }

    /// Inner truth of one atom under these values
    fn truth(&self, function: &FunctionDecl, shape: &AtomShape) -> Option<bool> {
        let subject = self.argument(function, shape.subject()?)?;
        match shape {
            AtomShape::Compare {
                measure: Some(measure),
                op,
                operand,
                ..
            } => {
                let len = i64::try_from(subject.len(*measure)?).ok()?;
                let k = self.operand(function, operand)?.as_i64()?;
                Some(op.holds(len.cmp(&k)))
            }
            AtomShape::Compare {
                measure: None,
                op,
                operand,
                ..
            } => {
                let Argument::Single(value) = subject else {
                    return None;
                };
                let other = self.operand(function, operand)?;
                compare(value, *op, &other)
            }
            AtomShape::Emptiness { check, .. } => {
                let empty = match (subject, check) {
                    (Argument::Single(LiteralValue::Str(s)), Emptiness::Blank | Emptiness::NotBlank) => {
                        s.trim().is_empty()
                    }
                    (Argument::Single(LiteralValue::Str(s)), _) => s.is_empty(),
                    (_, Emptiness::Blank | Emptiness::NotBlank) => return None,
                    (subject, _) => subject.len(Measure::Size)? == 0,
                };
                Some(empty == matches!(check, Emptiness::Empty | Emptiness::Blank))
            }
            AtomShape::NullCheck { is_null, .. } => match subject {
                Argument::Single(LiteralValue::Verbatim(_)) | Argument::Spread(_) => None,
                Argument::Single(value) => Some(value.is_null() == *is_null),
            },
            AtomShape::Bare(_) => match subject {
                Argument::Single(LiteralValue::Bool(b)) => Some(*b),
                _ => None,
            },
            AtomShape::Unrecognized => None,
        }
    }

    fn argument<'b>(&'b self, function: &FunctionDecl, name: &str) -> Option<Argument<'b>> {
        let parameter = function.parameter(name)?;
        if parameter.is_variadic {
            return self.variadic.as_deref().map(Argument::Spread);
        }
        self.get(name).map(Argument::Single)
    }

    fn operand(&self, function: &FunctionDecl, operand: &Operand) -> Option<LiteralValue> {
        match operand {
            Operand::Int(v) => Some(LiteralValue::Int(*v)),
            Operand::Long(v) => Some(LiteralValue::Long(*v)),
            Operand::Float(v) => Some(LiteralValue::Double(*v)),
            Operand::Str(s) => Some(LiteralValue::Str(s.clone())),
            Operand::Bool(b) => Some(LiteralValue::Bool(*b)),
            Operand::Null => Some(LiteralValue::Null),
            Operand::Name(name) => match self.argument(function, name)? {
                Argument::Single(value) => Some(value.clone()),
                Argument::Spread(_) => None,
            },
        }
    }
}

/// A parameter as the call passes it
enum Argument<'b> {
    Single(&'b LiteralValue),
    Spread(&'b [LiteralValue]),
}

impl Argument<'_> {
    fn len(&self, measure: Measure) -> Option<usize> {
        match (self, measure) {
            (Argument::Spread(values), Measure::Size) => Some(values.len()),
            (Argument::Single(LiteralValue::Str(s)), Measure::Length) => Some(s.chars().count()),
            (Argument::Single(LiteralValue::Collection { elements, .. }), Measure::Size) => Some(elements.len()),
            (Argument::Single(LiteralValue::Map(entries)), Measure::Size) => Some(entries.len()),
            _ => None,
        }
    }
}

/// `value op other` for numbers, or equality for strings and booleans
fn compare(value: &LiteralValue, op: CompareOp, other: &LiteralValue) -> Option<bool> {
    if let (Some(a), Some(b)) = (value.as_i64(), other.as_i64()) {
        return Some(op.holds(a.cmp(&b)));
    }
    if let (Some(a), Some(b)) = (value.as_f64(), other.as_f64()) {
        return a.partial_cmp(&b).map(|ordering| op.holds(ordering));
    }
    let equal = match (value, other) {
        (LiteralValue::Str(a), LiteralValue::Str(b)) => a == b,
        (LiteralValue::Bool(a), LiteralValue::Bool(b)) => a == b,
        _ => return None,
    };
    match op {
        CompareOp::Eq => Some(equal),
        CompareOp::Ne => Some(!equal),
        _ => None,
    }
}

/// One slot per parameter, filled first-come
struct Draft<'f> {
    function: &'f FunctionDecl,
    slots: Vec<Option<LiteralValue>>,
    variadic: Option<Vec<LiteralValue>>,
}

impl<'f> Draft<'f> {
    fn new(function: &'f FunctionDecl) -> Self {
        Self {
            function,
            slots: vec![None; function.parameters.len()],
            variadic: None,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.function.parameters.iter().position(|p| p.name == name)
    }

    fn is_bound(&self, position: usize) -> bool {
        if self.function.parameters[position].is_variadic {
            self.variadic.is_some()
        } else {
            self.slots[position].is_some()
        }
    }

    fn bind(&mut self, position: usize, value: LiteralValue) {
        if self.slots[position].is_none() {
            self.slots[position] = Some(value);
        }
    }

    fn bind_variadic(&mut self, values: Vec<LiteralValue>) {
        if self.variadic.is_none() {
            self.variadic = Some(values);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ValueSynthesizer<'a> {
    varargs: &'a VarargIndex,
}

impl<'a> ValueSynthesizer<'a> {
    pub fn new(varargs: &'a VarargIndex) -> Self {
        Self { varargs }
    }

    /// Boundary-pool values for every parameter
    pub fn pooled(&self, function: &FunctionDecl, rng: &mut SeededRandom) -> Bindings {
        let mut draft = Draft::new(function);
        for (i, parameter) in function.parameters.iter().enumerate() {
            if !parameter.is_variadic {
                draft.bind(i, ValuePool::sample(&TypeFamily::of(&parameter.type_name), rng));
            }
        }
        self.finish(draft, rng)
    }

    /// Values steering each condition toward its assignment
    ///
    /// Constraints apply in order and a parameter keeps its first value.
    pub fn satisfying(
        &self,
        function: &FunctionDecl,
        constraints: &[(&[Condition], &Assignment)],
        rng: &mut SeededRandom,
    ) -> Bindings {
        let mut draft = Draft::new(function);
        for (atoms, assignment) in constraints {
            for (atom, desired) in atoms.iter().zip(&assignment.values) {
                self.constrain(&mut draft, &atom.text, *desired);
            }
        }
        let mut bindings = self.finish(draft, rng);
        bindings.realized = bindings.realizes(function, constraints);
        bindings
    }

    /// Neutral values except the named parameter, which gets `value`
    pub fn with_subject(
        &self,
        function: &FunctionDecl,
        subject: Option<&str>,
        value: LiteralValue,
        rng: &mut SeededRandom,
    ) -> Bindings {
        let mut draft = Draft::new(function);
        if let Some(position) = subject.and_then(|s| draft.position(s)) {
            if !function.parameters[position].is_variadic {
                draft.bind(position, value);
            }
        }
        self.finish(draft, rng)
    }

    fn finish(&self, mut draft: Draft<'_>, rng: &mut SeededRandom) -> Bindings {
        let function = draft.function;
        let mut values = Vec::with_capacity(function.parameters.len());
        for (i, parameter) in function.parameters.iter().enumerate() {
            if parameter.is_variadic {
                if draft.variadic.is_none() {
                    draft.variadic = Some(self.variadic_values(function, i, parameter, rng));
                }
                continue;
            }
            let value = draft.slots[i]
                .take()
                .unwrap_or_else(|| neutral(&TypeFamily::of(&parameter.type_name)));
            values.push(ParameterBinding {
                name: parameter.name.clone(),
                type_name: parameter.type_name.clone(),
                value,
            });
        }
        Bindings {
            values,
            variadic: draft.variadic,
            realized: false,
        }
    }

    /// Observed call-site tail, else one to three pooled values
    fn variadic_values(
        &self,
        function: &FunctionDecl,
        position: usize,
        parameter: &Parameter,
        rng: &mut SeededRandom,
    ) -> Vec<LiteralValue> {
        if let Some(tail) = self.varargs.tail(&function.name, position) {
            return tail.iter().map(|a| LiteralValue::Verbatim(a.clone())).collect();
        }
        let family = TypeFamily::of(&parameter.type_name);
        let count = rng.range_inclusive(1, 3);
        (0..count).map(|_| ValuePool::sample(&family, rng)).collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Shape table
    // ═══════════════════════════════════════════════════════════════════════

    fn constrain(&self, draft: &mut Draft<'_>, atom: &str, desired: bool) {
        let shape = AtomShape::of(atom);
        let Some(position) = shape.subject().and_then(|s| draft.position(s)) else {
            return;
        };
        if draft.is_bound(position) {
            return;
        }
        let function = draft.function;
        let parameter = &function.parameters[position];
        let family = TypeFamily::of(&parameter.type_name);
        let variadic = parameter.is_variadic;

        match shape {
            AtomShape::Compare {
                measure: Some(_),
                op,
                operand,
                ..
            } => {
                let Some(k) = self.resolve(draft, &operand, position).and_then(|o| integer(&o)) else {
                    return;
                };
                let Some(len) = numeric_target(op, k, desired).and_then(|n| usize::try_from(n).ok()) else {
                    return;
                };
                if variadic {
                    draft.bind_variadic(vec![neutral(&family); len]);
                } else if let Some(value) = sized_collection(&family, len) {
                    draft.bind(position, value);
                }
            }
            AtomShape::Compare {
                measure: None,
                op,
                operand,
                ..
            } if !variadic => {
                let Some(operand) = self.resolve(draft, &operand, position) else {
                    return;
                };
                if let Some(value) = compare_value(family.non_null(), op, &operand, desired) {
                    draft.bind(position, value);
                }
            }
            AtomShape::Emptiness { check, .. } => {
                let wants_empty = matches!(check, Emptiness::Empty | Emptiness::Blank) == desired;
                if variadic {
                    let values = if wants_empty { Vec::new() } else { vec![neutral(&family)] };
                    draft.bind_variadic(values);
                    return;
                }
                let value = match family.non_null() {
                    TypeFamily::String => LiteralValue::str(match (check, wants_empty) {
                        (Emptiness::Empty | Emptiness::NotEmpty, true) => "",
                        (Emptiness::Empty | Emptiness::NotEmpty, false) => "non-empty",
                        (_, true) => "   ",
                        (_, false) => "non-blank",
                    }),
                    other => match sized_collection(other, usize::from(!wants_empty)) {
                        Some(value) => value,
                        None => return,
                    },
                };
                draft.bind(position, value);
            }
            AtomShape::NullCheck { is_null, .. } if !variadic => {
                let value = if is_null == desired {
                    LiteralValue::Null
                } else {
                    neutral(family.non_null())
                };
                draft.bind(position, value);
            }
            AtomShape::Bare(_) if family.non_null() == &TypeFamily::Boolean => {
                draft.bind(position, LiteralValue::Bool(desired));
            }
            _ => {}
        }
    }

    /// Literal operand, or the value of another parameter bound on demand
    fn resolve(&self, draft: &mut Draft<'_>, operand: &Operand, subject: usize) -> Option<Operand> {
        let Operand::Name(name) = operand else {
            return Some(operand.clone());
        };
        let position = draft.position(name).filter(|&p| p != subject)?;
        let function = draft.function;
        let other = &function.parameters[position];
        if other.is_variadic {
            return None;
        }
        if draft.slots[position].is_none() {
            let value = neutral(&TypeFamily::of(&other.type_name));
            draft.bind(position, value);
        }
        draft.slots[position].as_ref().and_then(operand_of)
    }
}

fn operand_of(value: &LiteralValue) -> Option<Operand> {
    match value {
        LiteralValue::Int(v) => Some(Operand::Int(*v)),
        LiteralValue::Long(v) => Some(Operand::Long(*v)),
        LiteralValue::Double(v) | LiteralValue::Float(v) => Some(Operand::Float(*v)),
        LiteralValue::Str(s) => Some(Operand::Str(s.clone())),
        LiteralValue::Bool(b) => Some(Operand::Bool(*b)),
        LiteralValue::Null => Some(Operand::Null),
        _ => None,
    }
}

fn integer(operand: &Operand) -> Option<i64> {
    match operand {
        Operand::Int(v) | Operand::Long(v) => Some(*v),
        _ => None,
    }
}

/// Integer satisfying (or violating, at the boundary) `x op k`
fn numeric_target(op: CompareOp, k: i64, desired: bool) -> Option<i64> {
    match (op, desired) {
        (CompareOp::Gt, true) | (CompareOp::Le, false) => k.checked_add(1),
        (CompareOp::Ge, false) | (CompareOp::Lt, true) => k.checked_sub(1),
        (CompareOp::Eq, true) | (CompareOp::Ne, false) => Some(k),
        (CompareOp::Eq, false) | (CompareOp::Ne, true) => k.checked_add(1),
        (CompareOp::Gt, false) | (CompareOp::Ge, true) | (CompareOp::Lt, false) | (CompareOp::Le, true) => {
            Some(k)
        }
    }
}

fn float_target(op: CompareOp, k: f64, desired: bool) -> f64 {
    match (op, desired) {
        (CompareOp::Gt, true) | (CompareOp::Le, false) => k + 1.0,
        (CompareOp::Ge, false) | (CompareOp::Lt, true) => k - 1.0,
        (CompareOp::Eq, false) | (CompareOp::Ne, true) => k + 1.0,
        _ => k,
    }
}

fn compare_value(family: &TypeFamily, op: CompareOp, operand: &Operand, desired: bool) -> Option<LiteralValue> {
    let wants_equal = desired == (op == CompareOp::Eq);
    let equality = matches!(op, CompareOp::Eq | CompareOp::Ne);
    match (family, operand) {
        (TypeFamily::Int | TypeFamily::Long, Operand::Int(k) | Operand::Long(k)) => {
            family.number(numeric_target(op, *k, desired)?)
        }
        (TypeFamily::Double | TypeFamily::Float, Operand::Int(k) | Operand::Long(k)) => {
            family.float(float_target(op, *k as f64, desired))
        }
        (TypeFamily::Double | TypeFamily::Float, Operand::Float(k)) => family.float(float_target(op, *k, desired)),
        (TypeFamily::String, Operand::Str(s)) if equality => Some(LiteralValue::str(if wants_equal {
            s.clone()
        } else {
            format!("{}_different", s)
        })),
        (TypeFamily::Boolean, Operand::Bool(b)) if equality => Some(LiteralValue::Bool(if wants_equal { *b } else { !b })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::program_model::fixture::ModelFixture;
    use crate::features::synthesis::infrastructure::{decompose, evaluate};
    use pretty_assertions::assert_eq;

    fn function(params: &[(&str, &str)]) -> FunctionDecl {
        ModelFixture::new("F.kt", "fun f() {}")
            .function("f", None, (1, 1), params, "Int")
            .build()
            .functions
            .remove(0)
    }

    fn drive(function: &FunctionDecl, condition: &str, values: &[bool]) -> Bindings {
        let index = VarargIndex::default();
        let atoms = decompose(condition);
        let assignment = Assignment {
            values: values.to_vec(),
            outcome: evaluate(&atoms, values),
        };
        let mut rng = SeededRandom::new(42);
        ValueSynthesizer::new(&index).satisfying(function, &[(atoms.as_slice(), &assignment)], &mut rng)
    }

    #[test]
    fn test_integer_comparison_table() {
        let f = function(&[("x", "Int")]);
        let cases = [
            ("x > 19", 20, 19),
            ("x >= 5", 5, 4),
            ("x < 3", 2, 3),
            ("x <= 3", 3, 4),
            ("x == 7", 7, 8),
            ("x != 7", 8, 7),
            ("19 < x", 20, 19),
        ];
        for (condition, on_true, on_false) in cases {
            assert_eq!(drive(&f, condition, &[true]).get("x"), Some(&LiteralValue::Int(on_true)), "{}", condition);
            assert_eq!(drive(&f, condition, &[false]).get("x"), Some(&LiteralValue::Int(on_false)), "{}", condition);
        }
    }

    #[test]
    fn test_int_overflow_falls_back_to_neutral() {
        // EDGE CASE: k + 1 does not fit an Int
        let f = function(&[("x", "Int")]);
        let bindings = drive(&f, "x > 2147483647", &[true]);
        assert_eq!(bindings.get("x"), Some(&LiteralValue::Int(0)));
    }

    #[test]
    fn test_long_and_floating_families() {
        let f = function(&[("n", "Long"), ("d", "Double")]);
        let bindings = drive(&f, "n > 10 && d < 1.5", &[true, true]);
        assert_eq!(bindings.get("n"), Some(&LiteralValue::Long(11)));
        assert_eq!(bindings.get("d"), Some(&LiteralValue::Double(0.5)));
    }

    #[test]
    fn test_string_shapes() {
        let f = function(&[("s", "String")]);
        assert_eq!(drive(&f, "s == \"add\"", &[true]).get("s"), Some(&LiteralValue::str("add")));
        assert_eq!(drive(&f, "s == \"add\"", &[false]).get("s"), Some(&LiteralValue::str("add_different")));
        assert_eq!(drive(&f, "s.isEmpty()", &[true]).get("s"), Some(&LiteralValue::str("")));
        assert_eq!(drive(&f, "s.isEmpty()", &[false]).get("s"), Some(&LiteralValue::str("non-empty")));
        assert_eq!(drive(&f, "s.isBlank()", &[true]).get("s"), Some(&LiteralValue::str("   ")));
        assert_eq!(drive(&f, "s.isNotBlank()", &[true]).get("s"), Some(&LiteralValue::str("non-blank")));
        // negation is folded into evaluation, the inner truth drives the value
        assert_eq!(drive(&f, "!s.isEmpty()", &[true]).get("s"), Some(&LiteralValue::str("")));
    }

    #[test]
    fn test_null_bool_and_size_shapes() {
        let f = function(&[("name", "String?"), ("flag", "Boolean"), ("items", "List<Int>")]);
        let bindings = drive(&f, "name == null || flag || items.size > 2", &[false, true, true]);
        assert_eq!(bindings.get("name"), Some(&LiteralValue::str("")));
        assert_eq!(bindings.get("flag"), Some(&LiteralValue::Bool(true)));
        assert_eq!(
            bindings.get("items"),
            Some(&LiteralValue::Collection {
                factory: "listOf".into(),
                elements: vec![LiteralValue::Int(0); 3]
            })
        );

        let bindings = drive(&f, "name == null", &[true]);
        assert_eq!(bindings.get("name"), Some(&LiteralValue::Null));
    }

    #[test]
    fn test_comparison_against_other_parameter() {
        let f = function(&[("a", "Int"), ("b", "Int")]);
        let bindings = drive(&f, "a > b", &[true]);
        assert_eq!(bindings.get("b"), Some(&LiteralValue::Int(0)));
        assert_eq!(bindings.get("a"), Some(&LiteralValue::Int(1)));
    }

    #[test]
    fn test_first_constraint_wins_and_rest_neutral() {
        let f = function(&[("x", "Int"), ("y", "String"), ("z", "Widget")]);
        let bindings = drive(&f, "x > 0 && x > 50", &[true, true]);
        assert_eq!(bindings.get("x"), Some(&LiteralValue::Int(1)));
        assert_eq!(bindings.get("y"), Some(&LiteralValue::str("")));
        assert_eq!(bindings.get("z"), Some(&LiteralValue::Mock("Widget".into())));
        assert!(bindings.uses_mock());
    }

    #[test]
    fn test_realized_only_when_values_reach_outcome() {
        let f = function(&[("x", "Int"), ("s", "String?"), ("flag", "Boolean")]);
        assert!(drive(&f, "x > 0 && x < 50", &[true, true]).realized);
        assert!(drive(&f, "x > 19", &[false]).realized);
        assert!(drive(&f, "s == null || !flag", &[false, false]).realized);
        assert!(drive(&f, "s.isEmpty()", &[true]).realized);

        // EDGE CASE: the first atom fixes x, the second then fails
        let conflicting = drive(&f, "x > 0 && x > 50", &[true, true]);
        assert_eq!(conflicting.get("x"), Some(&LiteralValue::Int(1)));
        assert!(!conflicting.realized);
    }

    #[test]
    fn test_unbound_subject_is_not_realized() {
        let f = function(&[("x", "Int")]);
        // `value` is not a parameter, nothing binds it
        assert!(!drive(&f, "value < 0", &[true]).realized);
        assert!(!drive(&f, "x > 0 && value == 0", &[true, true]).realized);
        assert!(!drive(&f, "isReady()", &[true]).realized);
    }

    #[test]
    fn test_realized_across_constraints() {
        let f = function(&[("n", "Int")]);
        let index = VarargIndex::default();
        let mut rng = SeededRandom::new(3);
        let earlier = decompose("n > 0");
        let target = decompose("n < 10");
        let skip = Assignment {
            values: vec![false],
            outcome: false,
        };
        let hit = Assignment {
            values: vec![true],
            outcome: true,
        };
        let synth = ValueSynthesizer::new(&index);

        let guarded = synth.satisfying(&f, &[(earlier.as_slice(), &skip), (target.as_slice(), &hit)], &mut rng);
        assert_eq!(guarded.get("n"), Some(&LiteralValue::Int(0)));
        assert!(guarded.realized);

        let unguarded = synth.satisfying(&f, &[(target.as_slice(), &hit), (earlier.as_slice(), &skip)], &mut rng);
        assert_eq!(unguarded.get("n"), Some(&LiteralValue::Int(9)));
        assert!(!unguarded.realized);
    }

    #[test]
    fn test_variadic_lookahead() {
        let model = ModelFixture::new("M.kt", "fun sum() {}\nsum(1, 2, 3, 4, 5)")
            .function("sum", None, (1, 1), &[("xs", "Int")], "Int")
            .variadic_last()
            .call("sum", None, &["1", "2", "3", "4", "5"], 2)
            .build();
        let index = VarargIndex::from_model(&model);
        let mut rng = SeededRandom::new(42);
        let bindings = ValueSynthesizer::new(&index).pooled(&model.functions[0], &mut rng);

        let expected: Vec<LiteralValue> = ["1", "2", "3", "4", "5"]
            .iter()
            .map(|v| LiteralValue::Verbatim(v.to_string()))
            .collect();
        assert_eq!(bindings.variadic, Some(expected.clone()));
        assert!(bindings.values.is_empty());
        assert_eq!(
            bindings.call_arguments(&model.functions[0]),
            vec![CallArgument::Inline(expected)]
        );
    }

    #[test]
    fn test_variadic_without_observed_calls() {
        let model = ModelFixture::new("M.kt", "fun sum() {}")
            .function("sum", None, (1, 1), &[("xs", "Int")], "Int")
            .variadic_last()
            .build();
        let index = VarargIndex::default();
        let mut rng = SeededRandom::new(7);
        let bindings = ValueSynthesizer::new(&index).pooled(&model.functions[0], &mut rng);
        let count = bindings.variadic.map(|v| v.len()).unwrap_or(0);
        assert!((1..=3).contains(&count));
    }

    #[test]
    fn test_variadic_size_constraint() {
        let model = ModelFixture::new("M.kt", "fun sum() {}")
            .function("sum", None, (1, 1), &[("xs", "Int")], "Int")
            .variadic_last()
            .build();
        let f = &model.functions[0];
        assert_eq!(drive(f, "xs.size >= 2", &[true]).variadic.map(|v| v.len()), Some(2));
        assert_eq!(drive(f, "xs.isEmpty()", &[true]).variadic, Some(Vec::new()));
    }

    #[test]
    fn test_subject_binding() {
        let f = function(&[("op", "String"), ("n", "Int")]);
        let index = VarargIndex::default();
        let mut rng = SeededRandom::new(1);
        let bindings = ValueSynthesizer::new(&index).with_subject(&f, Some("op"), LiteralValue::str("add"), &mut rng);
        assert_eq!(bindings.get("op"), Some(&LiteralValue::str("add")));
        assert_eq!(bindings.get("n"), Some(&LiteralValue::Int(0)));
    }
}
