//! Uniform priority generator.

use rand::prelude::*;
use thiserror::Error;

use crate::priority_generator::PriorityGenerator;

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when creating a [`Uniform`] priority generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum UniformError {
    /// The largest priority must be non-zero, otherwise every priority ties.
    #[error("max must be non-zero.")]
    ZeroMax,
    /// The range of priorities is so narrow that ties are common, and the
    /// tree would degenerate towards a list.
    #[error("max must be at least {}.", Uniform::MIN_MAX)]
    NarrowRange,
}

/// A priority generator drawing priorities uniformly from `[0, max]`.
///
/// The generator is backed by a [`SmallRng`]. Cloning the generator clones the
/// state of the random number generator, so a clone replays the same stream
/// of priorities as the original.
#[derive(Debug, Clone)]
pub struct Uniform {
    /// The largest priority that can be generated.
    max: u64,
    /// The random number generator.
    rng: SmallRng,
}

impl Uniform {
    /// The default largest priority, `$2^{63} - 1$`.
    pub const DEFAULT_MAX: u64 = u64::MAX >> 1;

    /// The smallest accepted largest priority, `$2^{32} - 1$`.
    pub const MIN_MAX: u64 = (1 << 32) - 1;

    /// Create a new uniform generator over `[0, Uniform::DEFAULT_MAX]`, seeded
    /// from the thread-local random number generator.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Uniform {
            max: Self::DEFAULT_MAX,
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a new uniform generator over `[0, Uniform::DEFAULT_MAX]` whose
    /// stream of priorities is entirely determined by `seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::{PriorityGenerator, Uniform};
    ///
    /// let mut a = Uniform::seeded(42);
    /// let mut b = Uniform::seeded(42);
    /// assert_eq!(a.priority(), b.priority());
    /// ```
    #[must_use]
    #[inline]
    pub fn seeded(seed: u64) -> Self {
        Uniform {
            max: Self::DEFAULT_MAX,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Create a new uniform generator over `[0, max]`.
    ///
    /// # Errors
    ///
    /// `max` must be non-zero, and at least [`Uniform::MIN_MAX`].
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_set::{Uniform, UniformError};
    ///
    /// assert!(Uniform::with_max(u64::from(u32::MAX)).is_ok());
    /// assert_eq!(Uniform::with_max(1).err(), Some(UniformError::NarrowRange));
    /// ```
    #[inline]
    pub fn with_max(max: u64) -> Result<Self, UniformError> {
        if max == 0 {
            return Err(UniformError::ZeroMax);
        }
        if max < Self::MIN_MAX {
            return Err(UniformError::NarrowRange);
        }
        Ok(Uniform {
            max,
            rng: SmallRng::from_rng(&mut rand::rng()),
        })
    }

    /// The largest priority this generator can produce.
    #[must_use]
    #[inline]
    pub fn max(&self) -> u64 {
        self.max
    }
}

impl Default for Uniform {
    #[inline]
    fn default() -> Self {
        Uniform::new()
    }
}

impl PriorityGenerator for Uniform {
    #[inline]
    fn priority(&mut self) -> u64 {
        self.rng.random_range(0..=self.max)
    }
}
