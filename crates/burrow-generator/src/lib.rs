pub mod random;

pub use random::{RandomGenerator, DEFAULT_CODE_LENGTH};

use burrow_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage:
/// a generated code may collide with one already issued, and the URL store
/// is responsible for rejecting and regenerating it.
pub trait Generator: Send + Sync + 'static {
    /// Produces a candidate short code.
    fn generate(&self) -> ShortCode;
}
