use typed_builder::TypedBuilder;

/// Default cap on code generation attempts for a single `create`.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// Tunables of a [`UrlStore`](crate::UrlStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct StoreSettings {
    /// How many candidate codes `create` may draw before giving up with
    /// `StoreError::Exhausted`. Values below 1 are treated as 1.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
