//! Usage: Application layer (logging setup, unit runner, startup wiring).

pub(crate) mod logging;
pub(crate) mod runner;
