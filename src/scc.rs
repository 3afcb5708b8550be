//! Per-SCC map of atomic propositions reachable from an automaton state.
//!
//! Built once from the automaton via Tarjan's algorithm; used to keep AP
//! enumeration narrow (§4.2): only APs that can still influence acceptance
//! from the current automaton state's SCC need to be split.

use std::collections::HashMap;

use fixedbitset::FixedBitSet;

use crate::automaton::{ApCondition, BuchiAutomaton};

/// Maps every automaton state reachable from the automaton's initial state
/// to the conjunction of AP variables appearing on any edge reachable from
/// its strongly-connected component.
pub struct SccApMap<B: BuchiAutomaton> {
    scc_of: HashMap<B::State, usize>,
    ap_of_scc: Vec<FixedBitSet>,
    num_vars: usize,
}

impl<B: BuchiAutomaton> SccApMap<B> {
    /// Compute the SCC-AP map for `automaton`, starting from its initial
    /// state and exploring every state reachable from it.
    pub fn build(automaton: &B, num_vars: usize) -> Self {
        let mut tarjan = Tarjan::new();
        let initial = automaton.initial_state();
        tarjan.visit(automaton, &initial);

        let scc_of = tarjan.scc_of;
        let sccs = tarjan.sccs;
        let num_sccs = sccs.len();

        // ap_of_scc[c] starts as the AP variables appearing directly on any
        // edge whose source lies in SCC c, then is propagated to every SCC
        // that can reach c (an AP on an edge reachable *from* a state of the
        // SCC still counts, per §4.2).
        let mut direct = vec![FixedBitSet::with_capacity(num_vars); num_sccs];
        let mut scc_edges: Vec<Vec<usize>> = vec![Vec::new(); num_sccs];
        for (state, &c) in scc_of.iter() {
            for var in automaton.support_variables(state) {
                direct[c].insert(var as usize);
            }
            for edge in automaton.successors(state) {
                if let Some(&target_scc) = scc_of.get(&edge.target) {
                    if target_scc != c {
                        scc_edges[c].push(target_scc);
                    }
                }
            }
        }

        // Propagate AP variables backward along the SCC condensation DAG:
        // `ap(SCC)` is the union of APs of everything reachable from it.
        let mut ap_of_scc = direct;
        let mut changed = true;
        while changed {
            changed = false;
            for c in 0..num_sccs {
                for &target in &scc_edges[c] {
                    let before = ap_of_scc[c].count_ones(..);
                    let addition = ap_of_scc[target].clone();
                    ap_of_scc[c].union_with(&addition);
                    if ap_of_scc[c].count_ones(..) != before {
                        changed = true;
                    }
                }
            }
        }

        Self {
            scc_of,
            ap_of_scc,
            num_vars,
        }
    }

    /// The conjunction of AP variables for the SCC containing `state`, as a
    /// sorted list of variable indices.
    pub fn variables_of(&self, state: &B::State) -> Vec<u32> {
        let c = match self.scc_of.get(state) {
            Some(&c) => c,
            None => return Vec::new(),
        };
        self.ap_of_scc[c].ones().map(|i| i as u32).collect()
    }

    /// The conjunction of AP variables for the SCC containing `state`,
    /// combined into a single condition via repeated conjunction of
    /// positive literals.
    pub fn condition_of<C: ApCondition>(&self, state: &B::State) -> C {
        let mut cond = C::tt();
        for var in self.variables_of(state) {
            cond = cond.and(&C::literal(var, true));
        }
        cond
    }

    /// Number of BDD variables this map was built over.
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }
}

/// Iterative Tarjan's strongly-connected-components algorithm over the
/// automaton's reachable state graph. Iterative to avoid recursion depth
/// tied to automaton size; each stack frame remembers which successor to
/// resume from.
struct Tarjan<S: std::hash::Hash + Eq + Clone> {
    index_of: HashMap<S, usize>,
    lowlink: HashMap<S, usize>,
    on_stack: HashMap<S, bool>,
    stack: Vec<S>,
    next_index: usize,
    scc_of: HashMap<S, usize>,
    sccs: Vec<Vec<S>>,
}

impl<S: std::hash::Hash + Eq + Clone> Tarjan<S> {
    fn new() -> Self {
        Self {
            index_of: HashMap::new(),
            lowlink: HashMap::new(),
            on_stack: HashMap::new(),
            stack: Vec::new(),
            next_index: 0,
            scc_of: HashMap::new(),
            sccs: Vec::new(),
        }
    }

    fn visit<B: BuchiAutomaton<State = S>>(&mut self, automaton: &B, start: &S) {
        // (state, remaining successors to visit) call-stack frames.
        let mut call_stack: Vec<(S, Vec<S>)> = vec![(start.clone(), self.pending_successors(automaton, start))];
        self.open(start);

        while let Some((v, mut pending)) = call_stack.pop() {
            if let Some(w) = pending.pop() {
                // more successors of v remain: push v back with the rest,
                // then descend into w if unvisited.
                if !self.index_of.contains_key(&w) {
                    let w_pending = self.pending_successors(automaton, &w);
                    self.open(&w);
                    call_stack.push((v, pending));
                    call_stack.push((w, w_pending));
                } else {
                    if *self.on_stack.get(&w).unwrap_or(&false) {
                        let w_index = self.index_of[&w];
                        let v_low = self.lowlink[&v];
                        self.lowlink.insert(v.clone(), v_low.min(w_index));
                    }
                    call_stack.push((v, pending));
                }
            } else {
                // all successors of v processed: propagate v's lowlink to
                // its parent frame, then, if v is still its own component
                // root, pop the SCC off the stack.
                if let Some(parent) = call_stack.last_mut() {
                    let (p, _) = parent;
                    if let (Some(&v_low), Some(&p_low)) = (self.lowlink.get(&v), self.lowlink.get(p)) {
                        self.lowlink.insert(p.clone(), p_low.min(v_low));
                    }
                }
                if self.lowlink[&v] == self.index_of[&v] {
                    let mut component = Vec::new();
                    loop {
                        let w = self.stack.pop().expect("SCC stack unexpectedly empty");
                        self.on_stack.insert(w.clone(), false);
                        let done = w == v;
                        component.push(w);
                        if done {
                            break;
                        }
                    }
                    let scc_id = self.sccs.len();
                    for member in &component {
                        self.scc_of.insert(member.clone(), scc_id);
                    }
                    self.sccs.push(component);
                }
            }
        }
    }

    fn open(&mut self, v: &S) {
        self.index_of.insert(v.clone(), self.next_index);
        self.lowlink.insert(v.clone(), self.next_index);
        self.next_index += 1;
        self.stack.push(v.clone());
        self.on_stack.insert(v.clone(), true);
    }

    fn pending_successors<B: BuchiAutomaton<State = S>>(&self, automaton: &B, v: &S) -> Vec<S> {
        automaton.successors(v).map(|edge| edge.target).collect()
    }
}
