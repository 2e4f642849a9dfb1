//! Token-branded interior mutability.
//!
//! Only the safe, token-gated `GhostCell` is needed by the graph layer: neighbor
//! lists are rewired through `&mut GhostToken` and read through `&GhostToken`.

pub mod ghost_cell;

pub use ghost_cell::GhostCell;
