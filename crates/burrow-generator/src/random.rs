use crate::Generator;
use burrow_core::ShortCode;
use rand::distr::Alphanumeric;
use rand::Rng;
use typed_builder::TypedBuilder;

/// Length of generated codes unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Samples fixed-length codes from the 62-character alphanumeric alphabet.
///
/// Every position is drawn independently and uniformly from `a-z`, `A-Z`
/// and `0-9` using the thread-local RNG. With the default length this gives
/// 62^6 (about 5.7e10) distinct codes.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    #[builder(default = DEFAULT_CODE_LENGTH)]
    length: usize,
}

impl RandomGenerator {
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        let code: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();
        ShortCode::new_unchecked(code)
    }
}
