//! Internal graph accessors and low-level building blocks.
//!
//! Kept `pub(crate)` so every traversal shares the same identity-keyed
//! visited set without exposing it as public API.

pub(crate) mod visited;
