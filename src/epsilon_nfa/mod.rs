//! # Nondeterministic Finite Automaton with ε-moves
//! The module includes the [EpsilonNfa] struct, an NFA extended with
//! transitions that consume no input symbol. Each state carries a single
//! [Transitions] record holding both its terminal transitions (symbol →
//! set of states) and its ε-transitions (set of states).
//!
//! The ε-closure of every state — the set of states reachable over zero or
//! more ε-moves, always including the state itself — is computed once at
//! construction and cached for the lifetime of the automaton.
//!
//! ## Example
//! ```
//! use automata::epsilon_nfa::{EpsilonNfa, EpsilonNfaTable, Transitions};
//! use std::collections::{BTreeSet, HashMap};
//!
//! // 0*1*2*: three self-loop states chained by ε-moves
//! let mut table = EpsilonNfaTable::new();
//! table.insert(0, Transitions {
//!     on_symbol: HashMap::from([(b'0', BTreeSet::from([0]))]),
//!     epsilon: BTreeSet::from([1]),
//! });
//! table.insert(1, Transitions {
//!     on_symbol: HashMap::from([(b'1', BTreeSet::from([1]))]),
//!     epsilon: BTreeSet::from([2]),
//! });
//! table.insert(2, Transitions {
//!     on_symbol: HashMap::from([(b'2', BTreeSet::from([2]))]),
//!     epsilon: BTreeSet::new(),
//! });
//! let enfa = EpsilonNfa::new(table, 0, BTreeSet::from([2]));
//!
//! assert!(enfa.accepts(""));
//! assert!(enfa.accepts("0012"));
//! assert!(!enfa.accepts("20"));
//!
//! // ε-elimination yields an equivalent plain NFA
//! let nfa = enfa.to_nfa();
//! assert!(nfa.accepts("0012"));
//! assert!(!nfa.accepts("20"));
//! ```

use crate::graph::{self, Graph};
use crate::nfa::{Nfa, NfaTable};
use crate::{StateId, StateSet, Symbol};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// The outgoing transitions of one ε-NFA state: terminal transitions and
/// ε-transitions live side by side in one record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transitions {
    /// Terminal transitions: a set of destinations per consumed symbol.
    pub on_symbol: HashMap<Symbol, StateSet>,
    /// ε-transitions: destinations reachable without consuming input.
    pub epsilon: StateSet,
}

/// A complete (but possibly partial) ε-NFA transition table. States without
/// outgoing transitions may be absent.
pub type EpsilonNfaTable = HashMap<StateId, Transitions>;

/// A nondeterministic finite automaton with ε-moves, defined by its
/// transition table, its start state and its set of accepting states. See
/// the [module-level documentation](crate::epsilon_nfa) for more info.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpsilonNfa {
    pub(crate) table: EpsilonNfaTable,
    pub(crate) start: StateId,
    pub(crate) accepting: StateSet,
    pub(crate) alphabet: BTreeSet<Symbol>,
    pub(crate) states: StateSet,
    pub(crate) closures: HashMap<StateId, HashSet<StateId>>,
}

impl EpsilonNfa {
    /// Creates an ε-NFA from a transition table, a start state and a set of
    /// accepting states, computing the ε-closure of every state up front.
    /// The table is trusted to be consistent; no validation is performed.
    pub fn new(table: EpsilonNfaTable, start: StateId, accepting: StateSet) -> Self {
        let alphabet = table
            .values()
            .flat_map(|transitions| transitions.on_symbol.keys().copied())
            .collect();
        let states = collect_states(&table, start, &accepting);
        let closures = states
            .iter()
            .map(|&state| (state, closure_of(&table, state)))
            .collect();
        EpsilonNfa {
            table,
            start,
            accepting,
            alphabet,
            states,
            closures,
        }
    }

    /// Checks whether this automaton accepts the given byte string. The
    /// depth-first search runs in two modes: consuming a symbol re-enables
    /// ε-moves, while jumping to a member of the current ε-closure disables
    /// them until the next symbol, so the same closure is never re-entered
    /// without progress. At the end of the input, the automaton accepts iff
    /// the current state or any member of its ε-closure is accepting.
    pub fn accepts(&self, word: impl AsRef<[u8]>) -> bool {
        self.search(self.start, word.as_ref(), 0, true)
    }

    fn search(&self, state: StateId, word: &[u8], position: usize, epsilon_allowed: bool) -> bool {
        if position == word.len() {
            if self.accepting.contains(&state) {
                return true;
            }
            return match self.closures.get(&state) {
                Some(closure) => closure.iter().any(|member| self.accepting.contains(member)),
                None => false,
            };
        }

        if let Some(transitions) = self.table.get(&state) {
            if let Some(targets) = transitions.on_symbol.get(&word[position]) {
                for &next in targets {
                    if self.search(next, word, position + 1, true) {
                        return true;
                    }
                }
            }
        }

        if epsilon_allowed {
            if let Some(closure) = self.closures.get(&state) {
                for &next in closure {
                    if self.search(next, word, position, false) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Converts this ε-NFA to a plain NFA accepting the same language. For
    /// each state q and each member p of its ε-closure, every terminal
    /// transition of p is folded into q's row, together with the ε-closures
    /// of its destinations. The new accepting set contains every state from
    /// which the old accepting set can be reached over ε-moves alone (the
    /// old accepting states included). Every state of this automaton keeps a
    /// row in the result, so the state set is preserved.
    pub fn to_nfa(&self) -> Nfa {
        let mut table = NfaTable::new();
        for &state in &self.states {
            let mut row: HashMap<Symbol, StateSet> = HashMap::new();
            if let Some(closure) = self.closures.get(&state) {
                for member in closure {
                    if let Some(transitions) = self.table.get(member) {
                        for (&symbol, targets) in &transitions.on_symbol {
                            let merged = row.entry(symbol).or_default();
                            for &target in targets {
                                merged.insert(target);
                                if let Some(reached) = self.closures.get(&target) {
                                    merged.extend(reached.iter().copied());
                                }
                            }
                        }
                    }
                }
            }
            table.insert(state, row);
        }

        let epsilon_graph: Graph = self
            .states
            .iter()
            .map(|&state| {
                let targets = self
                    .table
                    .get(&state)
                    .map(|transitions| transitions.epsilon.iter().copied().collect())
                    .unwrap_or_default();
                (state, targets)
            })
            .collect();
        let reversed = graph::reverse(&epsilon_graph);
        let accepting = graph::reachable(&reversed, self.accepting.iter().copied())
            .into_iter()
            .collect();

        Nfa::new(table, self.start, accepting)
    }

    /// Gets the cached ε-closure of a state, or `None` for a state outside
    /// the state set (which trivially has no ε-moves).
    pub fn closure(&self, state: StateId) -> Option<&HashSet<StateId>> {
        self.closures.get(&state)
    }

    /// Gets the alphabet of this ε-NFA: every symbol appearing in a terminal
    /// transition. ε is not a symbol.
    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// Gets the state set of this ε-NFA: every state appearing in the table
    /// (as source or destination of either transition kind), the start state
    /// and all accepting states.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Gets the number of states of this ε-NFA.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Gets the start state of this ε-NFA.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Gets the accepting states of this ε-NFA.
    pub fn accepting(&self) -> &StateSet {
        &self.accepting
    }
}

/// BFS over ε-edges only. The origin is always part of its own closure.
fn closure_of(table: &EpsilonNfaTable, origin: StateId) -> HashSet<StateId> {
    let mut closure = HashSet::from([origin]);
    let mut queue = VecDeque::from([origin]);
    while let Some(state) = queue.pop_front() {
        if let Some(transitions) = table.get(&state) {
            for &next in &transitions.epsilon {
                if closure.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    closure
}

fn collect_states(table: &EpsilonNfaTable, start: StateId, accepting: &StateSet) -> StateSet {
    let mut states: StateSet = accepting.clone();
    states.insert(start);
    for (&state, transitions) in table {
        states.insert(state);
        for targets in transitions.on_symbol.values() {
            states.extend(targets.iter().copied());
        }
        states.extend(transitions.epsilon.iter().copied());
    }
    states
}
