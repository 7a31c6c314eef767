//! Signed distance propagation and distance-based morphology.

pub use self::candidate_queue::{Candidate, CandidateQueue};
pub use self::density_shell::DensityShellExtractor;
pub use self::distance_offset::{DilationDistance, ErosionDistance};
pub use self::fast_marching::{upwind_solution, FastMarchingTransform};

mod candidate_queue;
mod density_shell;
mod distance_offset;
mod fast_marching;
