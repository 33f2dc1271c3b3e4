//! Core rollout primitives

pub mod clock;
