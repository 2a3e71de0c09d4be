pub mod api;
pub mod entry;
pub mod errors;
pub mod logging;
pub mod manifest;
pub mod plan;
pub mod preview;
pub mod scaffold;

pub use api::{dry_run, init, list, SkellyError};
pub use scaffold::{OnError, ScaffoldError, ScaffoldReport, Scaffolder};
