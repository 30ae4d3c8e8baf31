use crate::Generator;
use pagelink_core::PageId;
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Number of hex digits in a simple-format UUID.
const UUID_HEX_LEN: usize = 32;

/// Draws a random v4 UUID and keeps the first `length` hex digits.
///
/// With the default length of 5 the space holds 16^5 (about a million)
/// ids, so birthday collisions become likely after roughly a thousand
/// mappings. That is a known scaling limit; the allocator retries on
/// collision and the reconciler catches the ones that slip through.
#[derive(Debug, Clone, TypedBuilder)]
pub struct UuidPrefixGenerator {
    #[builder(default = 5)]
    length: usize,
}

impl UuidPrefixGenerator {
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Number of characters per generated id, capped at 32.
    pub fn length(&self) -> usize {
        self.length.clamp(1, UUID_HEX_LEN)
    }
}

impl Default for UuidPrefixGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for UuidPrefixGenerator {
    type Output = PageId;

    fn generate(&self) -> PageId {
        let mut buffer = Uuid::encode_buffer();
        let hex = Uuid::new_v4().simple().encode_lower(&mut buffer);
        PageId::new_unchecked(&hex[..self.length()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_length_is_five_hex_digits() {
        let generator = UuidPrefixGenerator::new();
        for _ in 0..100 {
            let id = generator.generate();
            assert_eq!(id.as_str().len(), 5);
            assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
            // generated ids must also pass request validation
            assert!(PageId::new(id.as_str()).is_ok());
        }
    }

    #[test]
    fn custom_length_is_capped() {
        let generator = UuidPrefixGenerator::builder().length(8).build();
        assert_eq!(generator.generate().as_str().len(), 8);

        let generator = UuidPrefixGenerator::builder().length(100).build();
        assert_eq!(generator.generate().as_str().len(), 32);
    }

    #[test]
    fn draws_differ() {
        let generator = UuidPrefixGenerator::builder().length(32).build();
        assert_ne!(generator.generate(), generator.generate());
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UuidPrefixGenerator>();
    }
}
