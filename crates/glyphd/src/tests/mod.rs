//! Test suites for the Glyph daemon.

pub(crate) mod support;
mod unit;
