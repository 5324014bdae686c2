//! # Regular expressions
//! This module implements the mathematical flavor of regular expressions
//! over byte alphabets and their compilation to automata by Thompson's
//! construction.
//!
//! ## Syntax
//! Five bytes are reserved as operators and cannot appear as literals:
//!
//! * `*` — Kleene closure (postfix, binds tightest)
//! * `+` — alternation (binary; *not* Kleene plus)
//! * `#` — concatenation (binary; inserted implicitly between adjacent
//!   atoms, never written by the user)
//! * `(`, `)` — grouping
//!
//! Every other byte is a literal. So `a+b` matches `a` or `b`, `ab` matches
//! exactly `ab`, and `(a+b)*` matches every string over `{a, b}`.
//!
//! ## Compilation
//! Compilation runs in three phases: the implicit concatenation operator is
//! made explicit, the infix pattern is converted to postfix by the
//! shunting-yard algorithm, and the postfix stream is folded into an
//! [EpsilonNfa] by Thompson's construction, which produces an automaton with
//! exactly one accepting state. From there the usual pipeline applies
//! (ε-NFA → NFA → DFA); [Regex::to_dfa] chains it in one call.
//!
//! ```
//! use automata::regex::Regex;
//!
//! let regex = Regex::new("a*b*");
//! assert_eq!(regex.to_postfix().unwrap(), b"a*b*#".to_vec());
//!
//! let dfa = regex.to_dfa().unwrap();
//! assert!(dfa.accepts(""));
//! assert!(dfa.accepts("aabb"));
//! assert!(!dfa.accepts("ba"));
//! ```
//!
//! Malformed patterns — unbalanced parentheses, the empty pattern, or
//! operators that do not line up with their operands — are reported as
//! [RegexError]; there is no error recovery.

use crate::dfa::Dfa;
use crate::epsilon_nfa::{EpsilonNfa, EpsilonNfaTable};
use crate::{StateId, StateSet};
use thiserror::Error;

/// The reserved operator bytes, in precedence order (tightest first, the
/// parentheses merely group).
pub const OPERATORS: [u8; 5] = [b'*', b'#', b'+', b'(', b')'];

/// An error from compiling a regular expression. The pattern in question
/// does not denote an automaton and compilation yields no usable result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegexError {
    /// The empty pattern does not denote an automaton.
    #[error("empty pattern")]
    EmptyPattern,
    /// A `)` without a matching `(`, or a `(` still open at the end of the
    /// pattern.
    #[error("unbalanced parentheses in pattern")]
    UnbalancedParentheses,
    /// An operator found fewer operands than it needs, or the pattern left
    /// more than one fragment behind.
    #[error("operators and operands do not line up")]
    MalformedPattern,
}

/// A regular expression over a byte alphabet. The pattern is stored as
/// written; compilation is explicit and pure, so a `Regex` is just a
/// validated-on-demand wrapper around its pattern bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Regex {
    pattern: Vec<u8>,
}

/// A partially built automaton on the Thompson stack, identified by its
/// start and accept states.
#[derive(Clone, Copy, Debug)]
struct Fragment {
    start: StateId,
    accept: StateId,
}

/// Hands out fresh state ids, monotonically.
#[derive(Debug, Default)]
struct StateAllocator {
    next: StateId,
}

impl StateAllocator {
    fn fresh(&mut self) -> StateId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Regex {
    /// Wraps a pattern. No parsing happens here; errors surface when the
    /// pattern is compiled.
    pub fn new(pattern: impl AsRef<[u8]>) -> Self {
        Regex {
            pattern: pattern.as_ref().to_vec(),
        }
    }

    /// Gets the pattern as written.
    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// Converts the pattern to postfix notation: concatenation is made
    /// explicit with `#`, then the shunting-yard algorithm reorders the
    /// tokens by precedence (`*` over `#` over `+`; `#` and `+` are
    /// left-associative).
    pub fn to_postfix(&self) -> Result<Vec<u8>, RegexError> {
        if self.pattern.is_empty() {
            return Err(RegexError::EmptyPattern);
        }
        let explicit = insert_concat(&self.pattern);

        let mut output = Vec::with_capacity(explicit.len());
        let mut stack: Vec<u8> = Vec::new();

        for &token in &explicit {
            match token {
                b'(' => stack.push(token),
                b')' => {
                    while let Some(&top) = stack.last() {
                        if top == b'(' {
                            break;
                        }
                        output.push(top);
                        stack.pop();
                    }
                    if stack.pop() != Some(b'(') {
                        return Err(RegexError::UnbalancedParentheses);
                    }
                }
                b'*' => {
                    while let Some(&top) = stack.last() {
                        if top != b'*' {
                            break;
                        }
                        output.push(top);
                        stack.pop();
                    }
                    stack.push(token);
                }
                b'#' => {
                    while let Some(&top) = stack.last() {
                        if top != b'*' && top != b'#' {
                            break;
                        }
                        output.push(top);
                        stack.pop();
                    }
                    stack.push(token);
                }
                b'+' => {
                    while let Some(&top) = stack.last() {
                        if top == b'(' {
                            break;
                        }
                        output.push(top);
                        stack.pop();
                    }
                    stack.push(token);
                }
                literal => output.push(literal),
            }
        }

        while let Some(top) = stack.pop() {
            if top == b'(' {
                return Err(RegexError::UnbalancedParentheses);
            }
            output.push(top);
        }
        Ok(output)
    }

    /// Compiles the pattern to an ε-NFA by Thompson's construction. The
    /// result has exactly one accepting state.
    pub fn to_epsilon_nfa(&self) -> Result<EpsilonNfa, RegexError> {
        thompson(&self.to_postfix()?)
    }

    /// Compiles the pattern all the way down the pipeline:
    /// ε-NFA → NFA → DFA.
    pub fn to_dfa(&self) -> Result<Dfa, RegexError> {
        Ok(self.to_epsilon_nfa()?.to_nfa().to_dfa())
    }
}

fn is_operator(byte: u8) -> bool {
    OPERATORS.contains(&byte)
}

/// Inserts the explicit concatenation operator `#` between every adjacent
/// pair where the left token ends an atom (a literal, `)` or `*`) and the
/// right token starts one (a literal or `(`).
fn insert_concat(pattern: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pattern.len() * 2);
    for (index, &current) in pattern.iter().enumerate() {
        if index > 0 {
            let previous = pattern[index - 1];
            let ends_atom = !is_operator(previous) || previous == b')' || previous == b'*';
            let starts_atom = !is_operator(current) || current == b'(';
            if ends_atom && starts_atom {
                out.push(b'#');
            }
        }
        out.push(current);
    }
    out
}

/// Folds a postfix token stream into an ε-NFA, keeping a stack of
/// (start, accept) fragments:
///
/// * literal c — fresh s, f; terminal edge s —c→ f
/// * `*` — fresh hub n with ε-edges n → start and accept → n; the hub is
///   both start and accept of the closure, which handles zero iterations
/// * `#` — ε-edge from the left fragment's accept to the right's start
/// * `+` — fresh s, f with ε-edges into both fragments and out of both
///   accepts
fn thompson(postfix: &[u8]) -> Result<EpsilonNfa, RegexError> {
    let mut table = EpsilonNfaTable::new();
    let mut allocator = StateAllocator::default();
    let mut stack: Vec<Fragment> = Vec::new();

    for &token in postfix {
        match token {
            b'*' => {
                let inner = stack.pop().ok_or(RegexError::MalformedPattern)?;
                let hub = allocator.fresh();
                table.entry(hub).or_default().epsilon.insert(inner.start);
                table.entry(inner.accept).or_default().epsilon.insert(hub);
                stack.push(Fragment {
                    start: hub,
                    accept: hub,
                });
            }
            b'#' => {
                let right = stack.pop().ok_or(RegexError::MalformedPattern)?;
                let left = stack.pop().ok_or(RegexError::MalformedPattern)?;
                table.entry(left.accept).or_default().epsilon.insert(right.start);
                stack.push(Fragment {
                    start: left.start,
                    accept: right.accept,
                });
            }
            b'+' => {
                let right = stack.pop().ok_or(RegexError::MalformedPattern)?;
                let left = stack.pop().ok_or(RegexError::MalformedPattern)?;
                let start = allocator.fresh();
                let accept = allocator.fresh();
                let branches = table.entry(start).or_default();
                branches.epsilon.insert(left.start);
                branches.epsilon.insert(right.start);
                table.entry(left.accept).or_default().epsilon.insert(accept);
                table.entry(right.accept).or_default().epsilon.insert(accept);
                stack.push(Fragment { start, accept });
            }
            literal => {
                let start = allocator.fresh();
                let accept = allocator.fresh();
                table
                    .entry(start)
                    .or_default()
                    .on_symbol
                    .entry(literal)
                    .or_default()
                    .insert(accept);
                stack.push(Fragment { start, accept });
            }
        }
    }

    let whole = stack.pop().ok_or(RegexError::MalformedPattern)?;
    if !stack.is_empty() {
        return Err(RegexError::MalformedPattern);
    }
    Ok(EpsilonNfa::new(
        table,
        whole.start,
        StateSet::from([whole.accept]),
    ))
}
