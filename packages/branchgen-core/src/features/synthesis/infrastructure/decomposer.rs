//! Boolean condition decomposition
//!
//! Splits a condition on un-nested `&&` / `||`. A leading `!` (at depth 0,
//! before any atom text) negates and swallows the whole remainder, so
//! `!a && b` is one negated atom `a && b`. Callers rely on that shape.

use crate::features::synthesis::domain::{Combinator, Condition};

pub fn decompose(expression: &str) -> Vec<Condition> {
    let mut atoms = Vec::new();
    let mut current = String::new();
    let mut pending = Combinator::None;
    let mut depth: i32 = 0;
    let mut in_string = false;

    let chars: Vec<char> = expression.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if in_string {
            current.push(c);
            if c == '\\' {
                if let Some(n) = next {
                    current.push(n);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                current.push(c);
            }
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth -= 1;
                current.push(c);
            }
            '&' | '|' if depth == 0 && next == Some(c) => {
                push_atom(&mut atoms, &current, pending, false);
                current.clear();
                pending = if c == '&' {
                    Combinator::And
                } else {
                    Combinator::Or
                };
                i += 2;
                continue;
            }
            '!' if depth == 0 && next != Some('=') && current.trim().is_empty() => {
                let remainder: String = chars[i + 1..].iter().collect();
                push_atom(&mut atoms, &remainder, pending, true);
                return atoms;
            }
            _ => current.push(c),
        }
        i += 1;
    }

    push_atom(&mut atoms, &current, pending, false);
    atoms
}

fn push_atom(atoms: &mut Vec<Condition>, text: &str, combinator: Combinator, negated: bool) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    // the first emitted atom never combines with anything
    let combinator = if atoms.is_empty() {
        Combinator::None
    } else {
        combinator
    };
    atoms.push(Condition::new(text, combinator, negated));
}

/// Fold the atoms left to right under an assignment
///
/// An empty atom list is false. Missing assignment entries count as false.
pub fn evaluate(atoms: &[Condition], assigned: &[bool]) -> bool {
    let mut effective = atoms
        .iter()
        .enumerate()
        .map(|(i, atom)| (atom.combinator, atom.effective(assigned.get(i).copied().unwrap_or(false))));

    let Some((_, mut result)) = effective.next() else {
        return false;
    };
    for (combinator, value) in effective {
        result = match combinator {
            Combinator::And => result && value,
            Combinator::Or => result || value,
            Combinator::None => value,
        };
    }
    result
}
