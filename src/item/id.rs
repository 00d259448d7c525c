//! Identifier generation for new items.

use uuid::Uuid;

/// Produces globally unique identifier strings on demand.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier. Must not block.
    fn generate(&self) -> String;
}

/// Generates random (version 4) UUIDs in lowercase hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
