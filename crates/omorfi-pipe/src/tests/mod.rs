//! Crate-level unit and behaviour tests.

#[cfg(unix)]
mod process;
mod support;
