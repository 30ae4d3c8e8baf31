mod conflicts;
mod health;
mod links;

pub use conflicts::{ConflictsResponse, ResolveConflictParams};
pub use health::HealthResponse;
pub use links::{CreateParams, ErrorResponse, PageIdResponse, RegenerateParams};
