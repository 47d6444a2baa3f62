pub mod exec;
pub mod output;

pub use exec::{commits, files, load_state, resolve_cutoff, select, stats, Cutoff};
