//! Shared fixtures for pagelink tests.

pub mod failing;
pub mod fixture;
pub mod scripted;

pub use failing::{FailingIndex, FailingStore};
pub use fixture::{Fixture, FixtureConfig};
pub use scripted::ScriptedGenerator;
