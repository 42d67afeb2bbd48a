use num_traits::Float;

use crate::SweepFloat;

/// Defaults, as negative powers of ten.
const DEFAULT_EPSILON_EXP: i32 = 6;
const DEFAULT_LAG_EXP: i32 = 3;

/// Numeric tunables of the crossings sweep.
///
/// - `epsilon` is the tolerance under which two heights are treated
/// as coincident, two lines as parallel, and two crossing points as
/// the same crossing.
///
/// - `lag` is how far the sweep steps past a crossing to order the two
/// crossing segments afresh. It is capped to half the distance to the
/// next pending event.
///
/// ```rust
/// use segment_crossings::SweepConfig;
/// let config = SweepConfig::<f64>::default().with_epsilon(1e-9);
/// assert_eq!(config.epsilon(), 1e-9);
/// assert_eq!(config.lag(), 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig<T: SweepFloat> {
    epsilon: T,
    lag: T,
}

impl<T: SweepFloat> Default for SweepConfig<T> {
    fn default() -> Self {
        SweepConfig {
            epsilon: tenth_power(DEFAULT_EPSILON_EXP),
            lag: tenth_power(DEFAULT_LAG_EXP),
        }
    }
}

impl<T: SweepFloat> SweepConfig<T> {
    /// Set the tolerance. Panics unless it is finite and non-negative.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: T) -> Self {
        assert!(
            epsilon.is_finite() && epsilon >= T::zero(),
            "epsilon must be finite and non-negative"
        );
        self.epsilon = epsilon;
        self
    }

    /// Set the perturbation. Panics unless it is finite and
    /// non-negative.
    #[must_use]
    pub fn with_lag(mut self, lag: T) -> Self {
        assert!(
            lag.is_finite() && lag >= T::zero(),
            "lag must be finite and non-negative"
        );
        self.lag = lag;
        self
    }

    #[inline]
    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    #[inline]
    pub fn lag(&self) -> T {
        self.lag
    }
}

/// `10^-exp`, built without a fallible cast. Powers of ten up to
/// `10^7` are exact in `f32`, so the result is correctly rounded.
fn tenth_power<T: SweepFloat>(exp: i32) -> T {
    let two = T::one() + T::one();
    let ten = two * two * two + two;
    T::one() / Float::powi(ten, exp)
}
