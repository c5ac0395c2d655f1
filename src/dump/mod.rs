pub mod format;
pub mod naming;
pub mod orchestrator;
pub mod result;
pub mod runner;

pub use orchestrator::{DumpOrchestrator, EXIT_FAILURE, EXIT_SUCCESS};
pub use result::DumpResult;
pub use runner::MysqldumpRunner;
