//! CLI module graph.

pub mod check;
pub mod command;
pub mod earnings;
pub mod grid;
pub mod ledger;
pub mod output;
pub mod rides;
pub mod run;
pub mod statement;
