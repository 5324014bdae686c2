//!# automata
//!
//! `automata` is a Rust library for the classic theory-of-computation pipeline:
//!
//! ```text
//! regular expression → ε-NFA → NFA → DFA → minimized DFA
//! ```
//!
//! Automata are built from in-memory transition tables, can be queried for
//! acceptance of any byte sequence at every stage, and every conversion
//! preserves the accepted language exactly.
//!
//! ## Usage
//!
//! ```rust
//! use automata::regex::Regex;
//!
//! // `+` is alternation, `*` is Kleene closure, adjacency is concatenation
//! let regex = Regex::new("(a+b)*abb");
//! let dfa = regex.to_dfa().unwrap();
//!
//! assert!(dfa.accepts("abb"));
//! assert!(dfa.accepts("aababb"));
//! assert!(!dfa.accepts("ab"));
//!
//! let minimized = dfa.minimize();
//! assert!(minimized.accepts("abb"));
//! assert!(minimized.state_count() <= dfa.state_count());
//! ```
//!
//! Automata can just as well be built by hand. A transition table, a start
//! state and a set of accepting states fully determine an automaton; derived
//! data (alphabet, state set, ε-closures) is computed once at construction,
//! and every operation returns a freshly-owned result:
//!
//! ```rust
//! use automata::dfa::{Dfa, DfaTable};
//! use std::collections::{BTreeSet, HashMap};
//!
//! // Even number of a:s over the alphabet {a, b}
//! let mut table = DfaTable::new();
//! table.insert(0, HashMap::from([(b'a', 1), (b'b', 0)]));
//! table.insert(1, HashMap::from([(b'a', 0), (b'b', 1)]));
//! let dfa = Dfa::new(table, 0, BTreeSet::from([0]));
//!
//! assert!(dfa.accepts("abab"));
//! assert!(!dfa.accepts("ab"));
//! ```
//!
//! ## Operations
//!
//! This library currently supports:
//!
//! * Compiling [regular expressions](regex::Regex) to
//!   [ε-NFAs](epsilon_nfa::EpsilonNfa) by Thompson's construction
//! * Converting [ε-NFAs to NFAs](epsilon_nfa::EpsilonNfa::to_nfa) via the
//!   ε-closure table
//! * Converting [NFAs to DFAs](nfa::Nfa::to_dfa) by the subset construction
//! * Checking if a byte string is accepted by a [DFA](dfa::Dfa::accepts),
//!   [NFA](nfa::Nfa::accepts) or [ε-NFA](epsilon_nfa::EpsilonNfa::accepts)
//! * [Removing unreachable states from a DFA](dfa::Dfa::remove_unreachable)
//! * [Minimizing a DFA](dfa::Dfa::minimize) by Hopcroft partition refinement
//! * [Renumbering a DFA's states in BFS order](dfa::Dfa::reorder)
//! * Serializing a DFA as an [aligned transition table](dfa::Dfa::to_table)
//!   or a [right-linear grammar](dfa::Dfa::to_grammar)
//!
//! The library is synchronous and single-threaded; automata are immutable
//! after construction and may be shared freely across threads.

pub mod dfa;
pub mod epsilon_nfa;
pub mod nfa;
pub mod regex;

mod graph;
mod table;

use std::collections::BTreeSet;

/// A single input symbol. The alphabet of every automaton consists of bytes;
/// the regex compiler additionally reserves `*`, `+`, `#`, `(` and `)` as
/// operators.
pub type Symbol = u8;

/// An opaque state identifier, unique within one automaton. Identifiers
/// carry no meaning across automata and may be reassigned by
/// [reordering](dfa::Dfa::reorder) or [minimization](dfa::Dfa::minimize).
pub type StateId = usize;

/// An ordered set of states.
pub type StateSet = BTreeSet<StateId>;
