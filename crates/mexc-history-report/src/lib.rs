/*
[INPUT]:  Public API exports for the mexc-history-report crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod cli;
pub mod config;
pub mod report;
pub mod runner;

// Re-export main types for convenience
pub use cli::Cli;
pub use config::ReportConfig;
pub use runner::run_report;
