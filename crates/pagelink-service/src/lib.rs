//! Short-link allocation, regeneration, conflict reconciliation and
//! lifecycle cleanup.
//!
//! [`ShortLinkService`] ties the pieces together and implements
//! [`pagelink_core::ShortLinks`]; the pieces are usable on their own:
//!
//! - [`IdAllocator`] draws candidates until one is free,
//! - [`MappingManager`] creates and regenerates a document's mapping,
//! - [`ConflictReconciler`] lists and breaks shared page ids,
//! - [`LifecycleGuard`] strips mappings duplicated by copies.

pub mod allocator;
pub mod guard;
pub mod host;
pub mod manager;
pub mod reconciler;
pub mod service;

pub use allocator::{AllocatorSettings, IdAllocator};
pub use guard::{GuardOutcome, LifecycleContext, LifecycleEvent, LifecycleGuard};
pub use host::Host;
pub use manager::MappingManager;
pub use reconciler::{ConflictReconciler, ReconcilerSettings};
pub use service::{ServiceSettings, ShortLinkService};

pub type Result<T> = std::result::Result<T, pagelink_core::LinkError>;
