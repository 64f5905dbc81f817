//! Slug generation and collision retry.
//!
//! Slugs are fixed-length strings over the base62 alphabet (`0-9A-Za-z`),
//! drawn from the thread-local CSPRNG. With the default length of 7 there are
//! 62^7 (about 3.5 × 10^12) distinct slugs.
//!
//! Stores allocate slugs through [`SlugAllocator`], which asks the store to
//! insert under a fresh slug until one is free, giving up after a fixed
//! number of attempts.

use std::future::Future;
use std::sync::Arc;

use rand::Rng;
use rand::distr::Alphanumeric;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::entities::ShortUrl;
use crate::domain::repositories::{StoreError, StoreResult};

/// Default slug length.
pub const DEFAULT_SLUG_LENGTH: usize = 7;

/// Default number of insert attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

pub const MIN_SLUG_LENGTH: usize = 4;
pub const MAX_SLUG_LENGTH: usize = 32;

/// Upper bound for the configurable attempt count.
pub const MAX_ATTEMPTS_LIMIT: usize = 100;

/// Errors raised while building a slug policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    #[error("slug length must be between {min} and {max}, got {0}", min = MIN_SLUG_LENGTH, max = MAX_SLUG_LENGTH)]
    InvalidLength(usize),

    #[error("max attempts must be between 1 and {max}, got {0}", max = MAX_ATTEMPTS_LIMIT)]
    InvalidAttempts(usize),
}

/// Source of candidate slugs.
///
/// Implementations only produce candidates; uniqueness is checked by the
/// store at insert time.
pub trait SlugGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Generates uniformly random base62 slugs of a fixed length.
#[derive(Debug, Clone)]
pub struct RandomSlugGenerator {
    length: usize,
}

impl RandomSlugGenerator {
    /// Creates a generator producing slugs of `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::InvalidLength`] outside `4..=32`.
    pub fn new(length: usize) -> Result<Self, SlugError> {
        if !(MIN_SLUG_LENGTH..=MAX_SLUG_LENGTH).contains(&length) {
            return Err(SlugError::InvalidLength(length));
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomSlugGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_SLUG_LENGTH,
        }
    }
}

impl SlugGenerator for RandomSlugGenerator {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

/// Returns true if `slug` is non-empty and only contains base62 characters.
pub fn is_base62(slug: &str) -> bool {
    !slug.is_empty() && slug.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Result of a single insert attempt under a candidate slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(ShortUrl),
    SlugTaken,
}

/// Bounded retry loop around a store's atomic insert.
#[derive(Clone)]
pub struct SlugAllocator {
    generator: Arc<dyn SlugGenerator>,
    max_attempts: usize,
}

impl SlugAllocator {
    /// # Errors
    ///
    /// Returns [`SlugError::InvalidAttempts`] outside `1..=100`.
    pub fn new(generator: Arc<dyn SlugGenerator>, max_attempts: usize) -> Result<Self, SlugError> {
        if max_attempts == 0 || max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(SlugError::InvalidAttempts(max_attempts));
        }
        Ok(Self {
            generator,
            max_attempts,
        })
    }

    /// Allocator backed by [`RandomSlugGenerator`].
    pub fn random(length: usize, max_attempts: usize) -> Result<Self, SlugError> {
        Self::new(Arc::new(RandomSlugGenerator::new(length)?), max_attempts)
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Runs `try_insert` with fresh slugs until one is accepted.
    ///
    /// `try_insert` must check and insert atomically and report a taken slug
    /// as [`InsertOutcome::SlugTaken`]. Backend errors end the loop at once.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] after `max_attempts` taken slugs.
    pub async fn allocate<F, Fut>(&self, mut try_insert: F) -> StoreResult<ShortUrl>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = StoreResult<InsertOutcome>>,
    {
        for attempt in 1..=self.max_attempts {
            let slug = self.generator.generate();

            match try_insert(slug).await? {
                InsertOutcome::Inserted(short_url) => return Ok(short_url),
                InsertOutcome::SlugTaken => {
                    debug!(attempt, max_attempts = self.max_attempts, "Slug collision");
                }
            }
        }

        warn!(
            attempts = self.max_attempts,
            "Slug space exhausted, giving up"
        );

        Err(StoreError::Conflict {
            attempts: self.max_attempts,
        })
    }
}

impl Default for SlugAllocator {
    fn default() -> Self {
        Self {
            generator: Arc::new(RandomSlugGenerator::default()),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl std::fmt::Debug for SlugAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlugAllocator")
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}
