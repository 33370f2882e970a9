//! Layout solver: natural sizing, expansion and placement passes.
//!
//! Every pass is an `impl LayoutTree` block so the passes can walk nested
//! layouts through the tree's arenas.

pub mod engine;
mod expand;
mod locate;
mod natural;
