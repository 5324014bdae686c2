//! # Nondeterministic Finite Automaton
//! The NFA module includes the [Nfa] struct which represents a
//! [Nondeterministic finite automaton](https://en.wikipedia.org/wiki/Nondeterministic_finite_automaton)
//! without ε-moves (for ε-moves, see [EpsilonNfa](crate::epsilon_nfa::EpsilonNfa)).
//! Each transition maps a state and a symbol to a *set* of destination
//! states; a missing entry means "no transition".
//!
//! ## Example
//! ```
//! use automata::nfa::{Nfa, NfaTable};
//! use std::collections::{BTreeSet, HashMap};
//!
//! // Strings over {a, b} ending in "ab"
//! let mut table = NfaTable::new();
//! table.insert(0, HashMap::from([
//!     (b'a', BTreeSet::from([0, 1])),
//!     (b'b', BTreeSet::from([0])),
//! ]));
//! table.insert(1, HashMap::from([(b'b', BTreeSet::from([2]))]));
//! let nfa = Nfa::new(table, 0, BTreeSet::from([2]));
//!
//! assert!(nfa.accepts("aab"));
//! assert!(!nfa.accepts("aba"));
//!
//! // The subset construction yields an equivalent DFA
//! let dfa = nfa.to_dfa();
//! assert!(dfa.accepts("aab"));
//! assert!(!dfa.accepts("aba"));
//! ```
//!
//! ## Conversion to DFA
//! [Nfa::to_dfa] uses the reduced
//! [powerset construction](https://en.wikipedia.org/wiki/Powerset_construction):
//! only subsets actually reachable from `{start}` become DFA states, so the
//! exponential worst case is rarely hit in practice. State identifiers in
//! the result are assigned in ascending subset order, so converting the same
//! NFA twice yields identical (not merely equivalent) DFAs.

use crate::dfa::{Dfa, DfaTable};
use crate::{StateId, StateSet, Symbol};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// The outgoing transitions of one state: a set of destinations per symbol.
pub type TransTable = HashMap<Symbol, StateSet>;

/// A complete (but possibly partial) NFA transition table. States without
/// outgoing transitions may be absent.
pub type NfaTable = HashMap<StateId, TransTable>;

/// A nondeterministic finite automaton without ε-moves, defined by its
/// transition table, its start state and its set of accepting states. See
/// the [module-level documentation](crate::nfa) for more info.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) table: NfaTable,
    pub(crate) start: StateId,
    pub(crate) accepting: StateSet,
    pub(crate) alphabet: BTreeSet<Symbol>,
    pub(crate) states: StateSet,
}

impl Nfa {
    /// Creates an NFA from a transition table, a start state and a set of
    /// accepting states. The table is trusted to be consistent; no
    /// validation is performed.
    pub fn new(table: NfaTable, start: StateId, accepting: StateSet) -> Self {
        let alphabet = table
            .values()
            .flat_map(|row| row.keys().copied())
            .collect();
        let states = collect_states(&table, start, &accepting);
        Nfa {
            table,
            start,
            accepting,
            alphabet,
            states,
        }
    }

    /// Checks whether this automaton accepts the given byte string, by
    /// depth-first search over (state, input position) pairs. Pairs that
    /// have been fully explored without success are memoized and never
    /// revisited, so the search succeeds as soon as any branch consumes the
    /// whole input in an accepting state and terminates once all branches
    /// are exhausted.
    pub fn accepts(&self, word: impl AsRef<[u8]>) -> bool {
        let mut failed = HashSet::new();
        self.search(self.start, word.as_ref(), 0, &mut failed)
    }

    fn search(
        &self,
        state: StateId,
        word: &[u8],
        position: usize,
        failed: &mut HashSet<(StateId, usize)>,
    ) -> bool {
        if failed.contains(&(state, position)) {
            return false;
        }
        if position == word.len() {
            return self.accepting.contains(&state);
        }
        if let Some(targets) = self
            .table
            .get(&state)
            .and_then(|row| row.get(&word[position]))
        {
            for &next in targets {
                if self.search(next, word, position + 1, failed) {
                    return true;
                }
            }
        }
        failed.insert((state, position));
        false
    }

    /// Converts this NFA to a DFA by the subset construction. The search
    /// starts from the subset `{start}` and explores breadth-first: the
    /// transition of a subset on a symbol is the union of its members'
    /// destination sets, and every destination subset that has not been seen
    /// before is enqueued. Each discovered subset (including an empty one
    /// arising as a destination) becomes one DFA state; a subset is
    /// accepting iff it intersects this NFA's accepting set.
    pub fn to_dfa(&self) -> Dfa {
        let initial = StateSet::from([self.start]);

        let mut subset_rows: BTreeMap<StateSet, BTreeMap<Symbol, StateSet>> = BTreeMap::new();
        let mut seen: BTreeSet<StateSet> = BTreeSet::from([initial.clone()]);
        let mut queue: VecDeque<StateSet> = VecDeque::from([initial.clone()]);

        while let Some(subset) = queue.pop_front() {
            let mut row: BTreeMap<Symbol, StateSet> = BTreeMap::new();
            for state in &subset {
                if let Some(transitions) = self.table.get(state) {
                    for (&symbol, targets) in transitions {
                        row.entry(symbol).or_default().extend(targets.iter().copied());
                    }
                }
            }
            for targets in row.values() {
                if seen.insert(targets.clone()) {
                    queue.push_back(targets.clone());
                }
            }
            subset_rows.insert(subset, row);
        }

        // ascending subset order makes the assigned ids reproducible
        let ids: BTreeMap<StateSet, StateId> = seen.iter().cloned().zip(0..).collect();

        let mut table = DfaTable::new();
        for (subset, row) in &subset_rows {
            let lifted = row
                .iter()
                .map(|(&symbol, targets)| (symbol, ids[targets]))
                .collect();
            table.insert(ids[subset], lifted);
        }

        let accepting = seen
            .iter()
            .filter(|subset| subset.iter().any(|state| self.accepting.contains(state)))
            .map(|subset| ids[subset])
            .collect();

        Dfa::new(table, ids[&initial], accepting)
    }

    /// Gets the alphabet of this NFA: every symbol appearing in the
    /// transition table.
    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// Gets the state set of this NFA: every state appearing in the table
    /// (as source or destination), the start state and all accepting states.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Gets the number of states of this NFA.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Gets the start state of this NFA.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Gets the accepting states of this NFA.
    pub fn accepting(&self) -> &StateSet {
        &self.accepting
    }
}

fn collect_states(table: &NfaTable, start: StateId, accepting: &StateSet) -> StateSet {
    let mut states: StateSet = accepting.clone();
    states.insert(start);
    for (&state, row) in table {
        states.insert(state);
        for targets in row.values() {
            states.extend(targets.iter().copied());
        }
    }
    states
}
