//! pawn - layered option resolution for command-line tools
//!
//! Re-exports the engine from `pawn-core`.
pub use pawn_core::*;
