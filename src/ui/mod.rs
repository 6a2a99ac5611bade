pub mod dashboard;
pub mod icons;
pub mod terminal;

pub use dashboard::run_dashboard;
pub use terminal::TerminalGuard;
