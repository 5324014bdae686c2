//! # Deterministic Finite Automaton
//! The DFA module includes the [Dfa] struct which represents a
//! [Deterministic finite automaton](https://en.wikipedia.org/wiki/Deterministic_finite_automaton)
//! over an alphabet of bytes. A [Dfa] is created either by
//! [converting an Nfa](crate::nfa::Nfa::to_dfa) or directly from a transition
//! table, a start state and a set of accepting states.
//!
//! The transition table is partial: a state with no entry for some symbol
//! simply has no transition on that symbol, and an input that runs into a
//! missing transition is rejected. The alphabet and the state set are derived
//! from the table once at construction, and a [Dfa] is immutable afterwards;
//! every operation returns a new automaton.
//!
//! ## Example
//! ```
//! use automata::dfa::{Dfa, DfaTable};
//! use std::collections::{BTreeSet, HashMap};
//!
//! // Odd number of a:s, with two redundant state pairs
//! let mut table = DfaTable::new();
//! table.insert(0, HashMap::from([(b'a', 1), (b'b', 0)]));
//! table.insert(1, HashMap::from([(b'a', 2), (b'b', 1)]));
//! table.insert(2, HashMap::from([(b'a', 3), (b'b', 2)]));
//! table.insert(3, HashMap::from([(b'a', 0), (b'b', 3)]));
//! let dfa = Dfa::new(table, 0, BTreeSet::from([1, 3]));
//!
//! assert!(dfa.accepts("abb"));
//! assert!(!dfa.accepts("aab"));
//!
//! // States 0/2 and 1/3 are non-distinguishable, so minimization
//! // collapses the automaton to two states
//! let minimized = dfa.minimize();
//! assert_eq!(minimized.state_count(), 2);
//! assert!(minimized.accepts("abb"));
//! assert!(!minimized.accepts("aab"));
//! ```
//!
//! ## Minimization
//! [Dfa::minimize] first removes all states that are unreachable from the
//! start state or cannot reach an accepting state
//! ([Dfa::remove_unreachable]), then merges non-distinguishable states by
//! Hopcroft partition refinement. The two steps together yield the unique
//! minimal DFA for the language, up to state renaming. [Dfa::reorder]
//! renumbers states 0, 1, 2, … in breadth-first order from the start state
//! and can be used to compare minimized automata structurally.

use crate::graph::{self, Graph};
use crate::nfa::{Nfa, NfaTable};
use crate::table::Table;
use crate::{StateId, StateSet, Symbol};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::mem;

/// The outgoing transitions of one state: at most one destination per symbol.
pub type TransTable = HashMap<Symbol, StateId>;

/// A complete (but possibly partial) DFA transition table. States without
/// outgoing transitions may be absent.
pub type DfaTable = HashMap<StateId, TransTable>;

/// A deterministic finite automaton, defined by its transition table, its
/// start state and its set of accepting states. The alphabet and the state
/// set are derived from those three at construction. See the
/// [module-level documentation](crate::dfa) for more info.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) table: DfaTable,
    pub(crate) start: StateId,
    pub(crate) accepting: StateSet,
    pub(crate) alphabet: BTreeSet<Symbol>,
    pub(crate) states: StateSet,
}

type BlockId = usize;

impl Dfa {
    /// Creates a DFA from a transition table, a start state and a set of
    /// accepting states. The table is trusted to be consistent; no
    /// validation is performed.
    pub fn new(table: DfaTable, start: StateId, accepting: StateSet) -> Self {
        let alphabet = table
            .values()
            .flat_map(|row| row.keys().copied())
            .collect();
        let states = collect_states(&table, start, &accepting);
        Dfa {
            table,
            start,
            accepting,
            alphabet,
            states,
        }
    }

    /// Checks whether this automaton accepts the given byte string. The walk
    /// fails fast on a missing transition, so symbols outside the alphabet
    /// simply lead to rejection.
    pub fn accepts(&self, word: impl AsRef<[u8]>) -> bool {
        let mut current = self.start;
        for &symbol in word.as_ref() {
            match self.table.get(&current).and_then(|row| row.get(&symbol)) {
                Some(&next) => current = next,
                None => return false,
            }
        }
        self.accepting.contains(&current)
    }

    /// Returns a DFA restricted to the states that are both reachable from
    /// the start state and able to reach an accepting state. Transitions
    /// into pruned states are dropped. The start state is always retained,
    /// even when no accepting state can be reached from it, so the result is
    /// well-formed and accepts the same language.
    pub fn remove_unreachable(&self) -> Dfa {
        let forward = self.successor_graph();
        let backward = graph::reverse(&forward);

        let from_start = graph::reachable(&forward, [self.start]);
        let into_accepting = graph::reachable(&backward, self.accepting.iter().copied());

        // intersect starting from the smaller side
        let live: HashSet<StateId> = if from_start.len() <= into_accepting.len() {
            from_start.intersection(&into_accepting).copied().collect()
        } else {
            into_accepting.intersection(&from_start).copied().collect()
        };

        let mut table = DfaTable::new();
        for (&state, row) in &self.table {
            if !live.contains(&state) {
                continue;
            }
            let kept = row
                .iter()
                .filter(|&(_, next)| live.contains(next))
                .map(|(&symbol, &next)| (symbol, next))
                .collect();
            table.insert(state, kept);
        }

        let accepting = self
            .accepting
            .iter()
            .copied()
            .filter(|state| live.contains(state))
            .collect();

        Dfa::new(table, self.start, accepting)
    }

    /// Returns the unique minimal DFA accepting the same language, up to
    /// state renaming: [Dfa::remove_unreachable] followed by Hopcroft
    /// partition refinement.
    pub fn minimize(&self) -> Dfa {
        self.remove_unreachable().hopcroft()
    }

    /// Renumbers the states 0, 1, 2, … in breadth-first order from the start
    /// state, visiting symbols in ascending byte order. States that the
    /// traversal never reaches get the remaining identifiers in ascending
    /// old-id order. Purely cosmetic: the result is an exact renaming of
    /// this automaton, and reordering twice gives the same result as
    /// reordering once.
    pub fn reorder(&self) -> Dfa {
        let mut new_id: HashMap<StateId, StateId> = HashMap::new();
        let mut order = vec![self.start];
        new_id.insert(self.start, 0);

        let mut cursor = 0;
        while cursor < order.len() {
            let old = order[cursor];
            cursor += 1;
            if let Some(row) = self.table.get(&old) {
                let ordered_row: BTreeMap<&Symbol, &StateId> = row.iter().collect();
                for &next in ordered_row.into_values() {
                    if !new_id.contains_key(&next) {
                        new_id.insert(next, order.len());
                        order.push(next);
                    }
                }
            }
        }

        for &state in &self.states {
            let fresh = new_id.len();
            new_id.entry(state).or_insert(fresh);
        }

        let mut table = DfaTable::new();
        for (&state, row) in &self.table {
            let renamed = row
                .iter()
                .map(|(&symbol, next)| (symbol, new_id[next]))
                .collect();
            table.insert(new_id[&state], renamed);
        }
        let accepting = self.accepting.iter().map(|state| new_id[state]).collect();

        Dfa::new(table, new_id[&self.start], accepting)
    }

    /// Converts this DFA to an NFA by wrapping each transition into a
    /// singleton destination set. Every DFA is already an NFA, so this is a
    /// cheap, language-preserving operation.
    pub fn to_nfa(&self) -> Nfa {
        let table: NfaTable = self
            .table
            .iter()
            .map(|(&state, row)| {
                let sets = row
                    .iter()
                    .map(|(&symbol, &next)| (symbol, StateSet::from([next])))
                    .collect();
                (state, sets)
            })
            .collect();
        Nfa::new(table, self.start, self.accepting.clone())
    }

    /// Gets the alphabet of this DFA: every symbol appearing in the
    /// transition table.
    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// Gets the state set of this DFA: every state appearing in the table
    /// (as source or destination), the start state and all accepting states.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Gets the number of states of this DFA.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Gets the start state of this DFA.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Gets the accepting states of this DFA.
    pub fn accepting(&self) -> &StateSet {
        &self.accepting
    }

    /// Renders this DFA as an aligned transition table, with `→` marking the
    /// start state, `*` marking accepting states and `-` marking missing
    /// transitions.
    pub fn to_table(&self) -> String {
        let mut table = Table::default();

        let mut head = vec![String::new(), String::new(), String::new()];
        head.extend(self.alphabet.iter().map(|&symbol| char::from(symbol).to_string()));
        table.push_row(head);

        for &state in &self.states {
            let start_marker = if state == self.start { "→" } else { "" };
            let accept_marker = if self.accepting.contains(&state) { "*" } else { "" };
            let mut row = vec![
                start_marker.to_string(),
                accept_marker.to_string(),
                format!("q{state}"),
            ];
            for symbol in &self.alphabet {
                let cell = self
                    .table
                    .get(&state)
                    .and_then(|transitions| transitions.get(symbol))
                    .map_or_else(|| "-".to_string(), |next| format!("q{next}"));
                row.push(cell);
            }
            table.push_row(row);
        }
        table.render(" ")
    }

    /// Renders this DFA as a right-linear grammar with one nonterminal per
    /// state. A transition q —c→ p yields the production `qN->cqM` whenever
    /// p has outgoing transitions, and additionally `qN->c` whenever p is
    /// accepting. Productions are emitted in ascending state and symbol
    /// order.
    pub fn to_grammar(&self) -> String {
        let ordered: BTreeMap<StateId, BTreeMap<Symbol, StateId>> = self
            .table
            .iter()
            .map(|(&state, row)| {
                (state, row.iter().map(|(&symbol, &next)| (symbol, next)).collect())
            })
            .collect();

        let mut out = String::new();
        for (state, row) in &ordered {
            for (&symbol, next) in row {
                let has_outgoing = self.table.get(next).map_or(false, |r| !r.is_empty());
                if has_outgoing {
                    let c = char::from(symbol);
                    out.push_str(&format!("q{state}->{c}q{next}\n"));
                }
            }
            for (&symbol, next) in row {
                if self.accepting.contains(next) {
                    let c = char::from(symbol);
                    out.push_str(&format!("q{state}->{c}\n"));
                }
            }
        }
        out
    }

    fn successor_graph(&self) -> Graph {
        let mut graph = Graph::new();
        for (&state, row) in &self.table {
            for &next in row.values() {
                graph.entry(state).or_default().insert(next);
            }
        }
        graph
    }

    /// Hopcroft partition refinement. The initial partition separates
    /// accepting from non-accepting states (either side may be empty). Each
    /// round tries to split every pending block; the round's survivors move
    /// to a carry queue, and rounds repeat until one completes without a
    /// successful split.
    fn hopcroft(&self) -> Dfa {
        let mut block_of: HashMap<StateId, BlockId> = HashMap::new();
        let mut next_block: BlockId = 0;

        let mut work: VecDeque<StateSet> = VecDeque::new();
        let mut carry: VecDeque<StateSet> = VecDeque::new();

        let (accepting, rejecting): (StateSet, StateSet) = self
            .states
            .iter()
            .partition(|&state| self.accepting.contains(state));

        for block in [accepting, rejecting] {
            if block.is_empty() {
                continue;
            }
            for &state in &block {
                block_of.insert(state, next_block);
            }
            next_block += 1;
            work.push_back(block);
        }

        let mut blocks: Vec<StateSet> = Vec::new();
        loop {
            let mut split_happened = false;
            while let Some(block) = work.pop_front() {
                // singleton blocks are stable by construction
                if block.len() == 1 {
                    blocks.push(block);
                    continue;
                }
                match self.split_block(&block_of, &block) {
                    Some(parts) => {
                        split_happened = true;
                        for part in parts {
                            for &state in &part {
                                block_of.insert(state, next_block);
                            }
                            next_block += 1;
                            carry.push_back(part);
                        }
                    }
                    None => carry.push_back(block),
                }
            }
            if !split_happened {
                break;
            }
            mem::swap(&mut work, &mut carry);
        }
        blocks.extend(carry.drain(..));

        // one state per block; a representative member's transitions are
        // lifted to block ids
        let mut table = DfaTable::new();
        for block in &blocks {
            let representative = *block.iter().next().expect("blocks are never empty");
            if let Some(row) = self.table.get(&representative) {
                let lifted = row
                    .iter()
                    .map(|(&symbol, next)| (symbol, block_of[next]))
                    .collect();
                table.insert(block_of[&representative], lifted);
            }
        }

        let accepting = self.accepting.iter().map(|state| block_of[state]).collect();
        Dfa::new(table, block_of[&self.start], accepting)
    }

    /// Tries to split a block on some symbol appearing on transitions out of
    /// its members. States are bucketed by the block of their destination,
    /// with a `None` bucket for states lacking the symbol; the first symbol
    /// producing more than one bucket wins.
    fn split_block(
        &self,
        block_of: &HashMap<StateId, BlockId>,
        block: &StateSet,
    ) -> Option<Vec<StateSet>> {
        let symbols: BTreeSet<Symbol> = block
            .iter()
            .filter_map(|state| self.table.get(state))
            .flat_map(|row| row.keys().copied())
            .collect();

        for symbol in symbols {
            let mut buckets: BTreeMap<Option<BlockId>, StateSet> = BTreeMap::new();
            for &state in block {
                let destination = self.table.get(&state).and_then(|row| row.get(&symbol));
                let key = destination.map(|next| block_of[next]);
                buckets.entry(key).or_default().insert(state);
            }
            if buckets.len() > 1 {
                return Some(buckets.into_values().collect());
            }
        }
        None
    }
}

impl From<Dfa> for Nfa {
    fn from(value: Dfa) -> Self {
        value.to_nfa()
    }
}

fn collect_states(table: &DfaTable, start: StateId, accepting: &StateSet) -> StateSet {
    let mut states: StateSet = accepting.clone();
    states.insert(start);
    for (&state, row) in table {
        states.insert(state);
        states.extend(row.values().copied());
    }
    states
}
