//! Figure-into-hole placement by force-directed annealing.
//!
//! A rigid figure (vertices + edges) must be posed on the integer lattice
//! inside a simple polygon (the hole) while every edge keeps its squared
//! length within a relative tolerance. Valid poses are scored by "dislikes":
//! the summed squared distance from each hole vertex to its nearest pose vertex.
//!
//! Layout (leaves first)
//! - `geom`: lattice/vector types and the pure predicates (point in polygon,
//!   proper segment crossing, lattice enumeration).
//! - `problem`: immutable puzzle instance derived once from raw geometry.
//! - `score`: pose validity (with diagnostics) and dislikes.
//! - `anneal`: force model and the single-run relaxation loop.
//! - `search`: fork/join restarts over independently seeded annealers.
//!
//! The crate performs no I/O; document formats and transport live in the CLI.

pub mod anneal;
pub mod api;
pub mod geom;
pub mod problem;
pub mod score;
pub mod search;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::{Edge, Point, Vec2, VecExt};
pub use problem::{Problem, ProblemError};
pub use score::Solution;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::anneal::{AnnealCfg, Annealer, Force, Frame, NoopObserver, Observer};
    pub use crate::geom::{Edge, Point, Vec2, VecExt};
    pub use crate::problem::{Problem, ProblemError};
    pub use crate::score::{check_pose, dislikes, is_pose_valid, Solution, Violation};
    pub use crate::search::{search, SearchCfg, WorkerToken};
}
