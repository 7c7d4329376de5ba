//! Game identifier generation.

use rand::RngCore;
use std::fmt::Debug;

/// Source of candidate game identifiers.
///
/// The registry checks candidates for uniqueness itself; a generator only
/// has to produce strings.
pub trait IdGenerator: Debug + Send + Sync {
    /// Produces the next candidate identifier.
    fn generate(&self) -> String;
}

/// Random identifiers: 4 bytes, lowercase hex (8 characters).
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomHexIds;

impl IdGenerator for RandomHexIds {
    fn generate(&self) -> String {
        let mut bytes = [0u8; 4];
        rand::thread_rng().fill_bytes(&mut bytes);
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}
