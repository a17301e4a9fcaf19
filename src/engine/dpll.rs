//! Bundled DPLL engine behind the `SatEngine` trait
//!
//! A compact, deterministic backtracking search. It exists so the crate is
//! usable without a native solver dependency and so every configuration
//! knob of the engine interface has observable behavior: phase
//! initialization heuristics, phase saving, seeded randomness, and a
//! cumulative propagation limit. It scans clauses naively rather than
//! watching literals, which is fine at the problem sizes this crate is
//! exercised with.

use super::{SatEngine, SearchStatus};
use crate::config::PhaseInit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A DPLL-style SAT engine with unit propagation and chronological
/// backtracking
pub struct DpllEngine {
    clauses: Vec<Vec<i32>>,
    /// Literals of the clause currently under construction
    staged: Vec<i32>,
    /// Assumptions staged for the next search only
    assumptions: Vec<i32>,
    num_vars: usize,
    phase: PhaseInit,
    verbosity: u32,
    /// None means unbounded
    propagation_limit: Option<u64>,
    /// Cumulative over the engine's lifetime, like the limit it is checked
    /// against
    propagations: u64,
    /// Last-seen polarity per variable; cleared by `reset_phases`
    saved_phase: Vec<Option<bool>>,
    /// Assignment recorded by the most recent satisfiable search
    model: Vec<bool>,
    rng: StdRng,
}

/// One decision on the stack: where the trail stood before it, what was
/// tried, and whether the opposite polarity has been tried too
struct Frame {
    trail_mark: usize,
    variable: usize,
    value: bool,
    flipped: bool,
}

enum Propagation {
    Done,
    Conflict,
    LimitReached,
}

impl DpllEngine {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
            staged: Vec::new(),
            assumptions: Vec::new(),
            num_vars: 0,
            phase: PhaseInit::JeroslowWang,
            verbosity: 0,
            propagation_limit: None,
            propagations: 0,
            saved_phase: Vec::new(),
            model: Vec::new(),
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Number of committed clauses
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    fn track_variable(&mut self, literal: i32) {
        let var = literal.unsigned_abs() as usize;
        if var > self.num_vars {
            self.num_vars = var;
        }
    }

    /// Jeroslow-Wang literal weights over the current clause set: each
    /// clause contributes 2^-len to every literal it contains
    fn jeroslow_wang_weights(&self, n: usize) -> (Vec<f64>, Vec<f64>) {
        let mut pos = vec![0.0; n + 1];
        let mut neg = vec![0.0; n + 1];
        for clause in &self.clauses {
            let weight = 0.5f64.powi(clause.len() as i32);
            for &lit in clause {
                let var = lit.unsigned_abs() as usize;
                if lit > 0 {
                    pos[var] += weight;
                } else {
                    neg[var] += weight;
                }
            }
        }
        (pos, neg)
    }

    fn pick_phase(&mut self, variable: usize, pos: &[f64], neg: &[f64]) -> bool {
        if let Some(saved) = self.saved_phase[variable - 1] {
            return saved;
        }
        match self.phase {
            PhaseInit::False => false,
            PhaseInit::True => true,
            PhaseInit::JeroslowWang => pos[variable] >= neg[variable],
            PhaseInit::Random => self.rng.gen(),
        }
    }

    /// Run unit propagation to a fixed point
    ///
    /// Every unit-forced assignment counts against the propagation limit;
    /// once the cumulative count exceeds the limit the search gives up.
    fn propagate(&mut self, val: &mut [i8], trail: &mut Vec<usize>) -> Propagation {
        loop {
            let mut progressed = false;
            for ci in 0..self.clauses.len() {
                let mut satisfied = false;
                let mut unit: Option<i32> = None;
                let mut open = 0usize;
                for &lit in &self.clauses[ci] {
                    let var = lit.unsigned_abs() as usize;
                    let sign: i8 = if lit > 0 { 1 } else { -1 };
                    match val[var] {
                        0 => {
                            // a repeated occurrence of the same literal is
                            // still just one way to satisfy the clause
                            if unit != Some(lit) {
                                if open == 0 {
                                    unit = Some(lit);
                                }
                                open += 1;
                            }
                        }
                        v if v == sign => {
                            satisfied = true;
                            break;
                        }
                        _ => {}
                    }
                }
                if satisfied {
                    continue;
                }
                match open {
                    0 => return Propagation::Conflict,
                    1 => {
                        self.propagations += 1;
                        if let Some(limit) = self.propagation_limit {
                            if self.propagations > limit {
                                return Propagation::LimitReached;
                            }
                        }
                        let lit = unit.expect("unit literal tracked with open count");
                        let var = lit.unsigned_abs() as usize;
                        val[var] = if lit > 0 { 1 } else { -1 };
                        trail.push(var);
                        progressed = true;
                    }
                    _ => {}
                }
            }
            if !progressed {
                return Propagation::Done;
            }
        }
    }
}

impl Default for DpllEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SatEngine for DpllEngine {
    fn add_literal(&mut self, literal: i32) {
        debug_assert_ne!(literal, 0, "terminator must go through terminate_clause");
        self.track_variable(literal);
        self.staged.push(literal);
    }

    fn terminate_clause(&mut self) {
        self.clauses.push(std::mem::take(&mut self.staged));
    }

    fn assume(&mut self, literal: i32) {
        debug_assert_ne!(literal, 0);
        self.track_variable(literal);
        self.assumptions.push(literal);
    }

    fn search(&mut self) -> SearchStatus {
        debug_assert!(self.staged.is_empty(), "unterminated clause at search time");
        let assumptions = std::mem::take(&mut self.assumptions);
        let n = self.num_vars;
        if self.saved_phase.len() < n {
            self.saved_phase.resize(n, None);
        }
        if self.verbosity > 0 {
            log::debug!(
                "search: {} variables, {} clauses, {} assumptions",
                n,
                self.clauses.len(),
                assumptions.len()
            );
        }

        // 0 = unassigned, 1 = true, -1 = false; index 0 unused
        let mut val: Vec<i8> = vec![0; n + 1];
        for &lit in &assumptions {
            let var = lit.unsigned_abs() as usize;
            let want: i8 = if lit > 0 { 1 } else { -1 };
            if val[var] == -want {
                return SearchStatus::Unsatisfiable;
            }
            val[var] = want;
        }

        let (pos_weight, neg_weight) = self.jeroslow_wang_weights(n);
        // Assumption assignments stay off the trail so backtracking can
        // never undo them
        let mut trail: Vec<usize> = Vec::new();
        let mut decisions: Vec<Frame> = Vec::new();

        loop {
            match self.propagate(&mut val, &mut trail) {
                Propagation::LimitReached => {
                    if self.verbosity > 0 {
                        log::debug!("search: propagation limit exhausted");
                    }
                    return SearchStatus::Unknown;
                }
                Propagation::Conflict => {
                    let mut flipped = false;
                    while let Some(frame) = decisions.pop() {
                        while trail.len() > frame.trail_mark {
                            let var = trail.pop().expect("trail underflow");
                            self.saved_phase[var - 1] = Some(val[var] == 1);
                            val[var] = 0;
                        }
                        if !frame.flipped {
                            let value = !frame.value;
                            val[frame.variable] = if value { 1 } else { -1 };
                            trail.push(frame.variable);
                            decisions.push(Frame {
                                trail_mark: frame.trail_mark,
                                variable: frame.variable,
                                value,
                                flipped: true,
                            });
                            flipped = true;
                            break;
                        }
                    }
                    if !flipped {
                        return SearchStatus::Unsatisfiable;
                    }
                }
                Propagation::Done => match (1..=n).find(|&v| val[v] == 0) {
                    None => {
                        self.model = (1..=n).map(|v| val[v] == 1).collect();
                        for v in 1..=n {
                            self.saved_phase[v - 1] = Some(val[v] == 1);
                        }
                        return SearchStatus::Satisfiable;
                    }
                    Some(variable) => {
                        let value = self.pick_phase(variable, &pos_weight, &neg_weight);
                        val[variable] = if value { 1 } else { -1 };
                        decisions.push(Frame {
                            trail_mark: trail.len(),
                            variable,
                            value,
                            flipped: false,
                        });
                        trail.push(variable);
                    }
                },
            }
        }
    }

    fn variable_count(&self) -> usize {
        self.num_vars
    }

    fn value_of(&self, variable: usize) -> bool {
        self.model[variable - 1]
    }

    fn reset_phases(&mut self) {
        self.saved_phase.clear();
        self.saved_phase.resize(self.num_vars, None);
    }

    fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn set_verbosity(&mut self, level: u32) {
        self.verbosity = level;
    }

    fn set_phase_init(&mut self, phase: PhaseInit) {
        self.phase = phase;
    }

    fn set_propagation_limit(&mut self, limit: u64) {
        debug_assert_ne!(limit, 0, "an unbounded search omits the limit entirely");
        self.propagation_limit = Some(limit);
    }
}
