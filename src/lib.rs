pub mod aggregate;
pub mod cli;
pub mod error;
pub mod loader;
pub mod logging;
pub mod model;
pub mod report;
pub mod scales;
pub mod selection;
pub mod state;
pub mod stats;
pub mod tui;
pub mod window;
pub mod windowed;
