//! Usage: Infrastructure adapters (store bootstrap, runtime configuration).

pub(crate) mod config;
pub(crate) mod db;
