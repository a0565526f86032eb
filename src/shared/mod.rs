//! Usage: Cross-cutting utilities shared across domains (low-level helpers, pure logic).

pub(crate) mod fs;
#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod time;
