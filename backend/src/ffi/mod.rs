//! FFI module for Python integration via PyO3
//!
//! Lets a Python rollout driver host a metric suite: it hands over the
//! scenario and each snapshot as plain dicts and reads results back as
//! Python objects.

pub mod suite;
pub mod types;
