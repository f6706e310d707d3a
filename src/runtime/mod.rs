//! Terminal runtime: setup/teardown and the event loop.

mod mount;
mod terminal;

pub use mount::run;
pub use terminal::TerminalGuard;
