//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Document access (the host's item store)
//! - The slot editor (host UI)
//! - Random document ids (for testing)
//!
//! Template lookup goes through the domain's `TemplateCatalog`.

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use error::RepoError;
pub use repos::ItemStore;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{EditSession, EditorPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::IdGenerator;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::MockEditorPort;
#[cfg(test)]
pub use repos::MockItemStore;
#[cfg(test)]
pub use testing::MockIdGenerator;
