//! Usage: Domain logic (legacy state import).

pub(crate) mod legacy_import;
