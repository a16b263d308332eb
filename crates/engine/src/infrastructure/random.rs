//! Random implementations.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::infrastructure::ports::IdGenerator;

/// Length of a host document id
pub const DOCUMENT_ID_LEN: usize = 16;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SystemRandom {
    fn gen_document_id(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(DOCUMENT_ID_LEN)
            .map(char::from)
            .collect()
    }
}

/// Fixed ids for testing.
#[cfg(test)]
pub struct FixedRandom(pub &'static str);

#[cfg(test)]
impl IdGenerator for FixedRandom {
    fn gen_document_id(&self) -> String {
        self.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_ids_are_sixteen_alphanumerics() {
        let id = SystemRandom::new().gen_document_id();
        assert_eq!(id.len(), DOCUMENT_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn document_ids_differ() {
        let random = SystemRandom::new();
        assert_ne!(random.gen_document_id(), random.gen_document_id());
    }
}
