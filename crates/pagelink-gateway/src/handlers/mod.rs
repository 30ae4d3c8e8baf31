mod conflicts;
mod health;
mod links;

pub use conflicts::{list_conflicts_handler, resolve_conflict_handler};
pub use health::health_handler;
pub use links::{create_handler, redirect_handler, redirect_tenant_handler, regenerate_handler};
