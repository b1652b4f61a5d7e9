//! Module `state` holds the statistics snapshot read back by callers and
//! the final report printer.

use std::fmt;

/// Counters accumulated by the engine over one run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    pub decisions: u64,
    pub propagations: u64,
    pub checked_clauses: u64,
    pub subsumption_removed: u64,
    pub learned_live: usize,
    pub learned_total: u64,
    pub restarts: u64,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "dec:{}, prp:{}, chk:{}, sub:{}, lrn:{}/{}, rst:{}",
            self.decisions,
            self.propagations,
            self.checked_clauses,
            self.subsumption_removed,
            self.learned_live,
            self.learned_total,
            self.restarts,
        )
    }
}

impl Stats {
    /// the multi-line final report printed after solving.
    pub fn report(&self, elapsed_seconds: f64) {
        println!("Total CPU time: {elapsed_seconds:.6} s");
        println!("Number of decisions: {}", self.decisions);
        println!("Steps of unit propagation: {}", self.propagations);
        println!("Number of checked clauses: {}", self.checked_clauses);
        println!(
            "Number of clauses removed by subsumptions: {}",
            self.subsumption_removed
        );
        println!(
            "Learned clauses (live/total): {}/{}",
            self.learned_live, self.learned_total
        );
        println!("Number of restarts: {}", self.restarts);
    }
}
