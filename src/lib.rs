//! Budget-constrained asset selection: an exhaustive 0/1 knapsack search and a
//! ratio-greedy heuristic, plus the CSV loading, reporting and CLI around them.

pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod menu;
pub mod optimizer;
pub mod report;
