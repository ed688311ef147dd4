//! Inverse-CDF distribution adapter and the built-in uniform defaults.
//!
//! Parameters consume probability distributions only through the
//! [`Distribution`] trait: an inverse cumulative distribution function, a
//! discreteness marker, and the family/argument inspection used for equality.
//! The concrete probability machinery lives outside this crate; [`Uniform`]
//! and [`DiscreteUniform`] are provided because they back the implicit
//! defaults of real and integer parameters.

use core::fmt::Debug;

/// Smallest positive `f64`. Stands in for zero when evaluating the inverse
/// CDF of a discrete distribution: at exact zero those return one unit below
/// the true lower bound, following the usual statistical-library convention.
const DISCRETE_PPF_ZERO: f64 = 5e-324;

/// An inverse-CDF view of a probability distribution.
///
/// Implementations must report their family name and shape arguments so two
/// handles can be compared without downcasting; see [`dists_equal`].
pub trait Distribution: Debug + Send + Sync {
    /// Evaluates the inverse cumulative distribution function at `q`.
    ///
    /// `q` is a quantile in `[0, 1]`. Discrete implementations follow the
    /// convention that `inverse_cdf(0.0)` sits one unit below the support.
    fn inverse_cdf(&self, q: f64) -> f64;

    /// Whether this distribution has discrete support.
    fn is_discrete(&self) -> bool {
        false
    }

    /// The distribution family name, used for equality comparison.
    fn family(&self) -> &str;

    /// Positional shape arguments, used for equality comparison.
    fn args(&self) -> Vec<f64> {
        Vec::new()
    }

    /// Keyword shape arguments, used for equality comparison.
    fn keyword_args(&self) -> Vec<(String, f64)> {
        Vec::new()
    }
}

/// Derives the support bounds of a distribution from its inverse CDF.
///
/// The lower bound comes from evaluating at zero — or at the smallest
/// positive float for discrete distributions, sidestepping the
/// one-unit-below-support convention of discrete inverse CDFs. The upper
/// bound comes from evaluating at one.
#[must_use]
pub fn support_from_dist(dist: &dyn Distribution) -> (f64, f64) {
    let ppf_zero = if dist.is_discrete() {
        DISCRETE_PPF_ZERO
    } else {
        0.0
    };
    (dist.inverse_cdf(ppf_zero), dist.inverse_cdf(1.0))
}

/// Compares two distribution handles by family name, positional arguments,
/// keyword arguments, and support bounds.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn dists_equal(a: &dyn Distribution, b: &dyn Distribution) -> bool {
    a.family() == b.family()
        && a.args() == b.args()
        && a.keyword_args() == b.keyword_args()
        && support_from_dist(a) == support_from_dist(b)
}

/// Continuous uniform distribution over `[loc, loc + scale]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniform {
    loc: f64,
    scale: f64,
}

impl Uniform {
    /// Creates a uniform distribution with the given location and scale.
    #[must_use]
    pub fn new(loc: f64, scale: f64) -> Self {
        Self { loc, scale }
    }
}

impl Distribution for Uniform {
    fn inverse_cdf(&self, q: f64) -> f64 {
        self.loc + q * self.scale
    }

    fn family(&self) -> &str {
        "uniform"
    }

    fn args(&self) -> Vec<f64> {
        vec![self.loc, self.scale]
    }
}

/// Discrete uniform distribution over the integers `low..high` (upper bound
/// exclusive), matching the usual statistical-library parameterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscreteUniform {
    low: i64,
    high: i64,
}

impl DiscreteUniform {
    /// Creates a discrete uniform distribution over `low..high`.
    #[must_use]
    pub fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }
}

impl Distribution for DiscreteUniform {
    /// At exact zero this returns `low - 1`, one unit below the support;
    /// callers deriving bounds must evaluate at the smallest positive float
    /// instead (see [`support_from_dist`]).
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_lossless
    )]
    fn inverse_cdf(&self, q: f64) -> f64 {
        let span = (self.high - self.low) as f64;
        ((q * span).ceil() as i64 + self.low - 1) as f64
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn family(&self) -> &str {
        "randint"
    }

    #[allow(clippy::cast_precision_loss)]
    fn args(&self) -> Vec<f64> {
        vec![self.low as f64, self.high as f64]
    }
}
