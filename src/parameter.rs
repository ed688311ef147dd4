//! Typed model input parameters and their validation.
//!
//! A [`Parameter`] is a named uncertain or decision input with bounds derived
//! from a distribution, an optional set of discretization points, and an
//! optional default. The four kinds — real, integer, categorical, boolean —
//! share one struct and are distinguished by [`ParameterKind`].
//!
//! # Example
//!
//! ```
//! use designspace::parameter::Parameter;
//!
//! let rate = Parameter::real("rate", 0.0, 1.0).unwrap();
//! let crews = Parameter::integer("crews", 1, 10).unwrap();
//! let dike = Parameter::categorical("dike", ["none", "heighten", "relocate"]).unwrap();
//! let subsidy = Parameter::boolean("subsidy").unwrap();
//!
//! assert_eq!(dike.index_for_cat("heighten").unwrap(), 1);
//! ```

use core::fmt;
use std::sync::Arc;

use crate::distribution::{dists_equal, support_from_dist, DiscreteUniform, Distribution, Uniform};
use crate::error::{Error, Result};
use crate::value::{Category, Value};

/// Kind tag distinguishing the parameter variants, with kind-specific payload.
#[derive(Clone, Debug)]
pub enum ParameterKind {
    /// Continuous real-valued input.
    Real,
    /// Discrete integer-valued input.
    Integer,
    /// Ordered, named category list sampled by index.
    Categorical {
        /// The categories, in construction order. Order fixes the index
        /// mapping used by samplers and downstream model wiring.
        categories: Vec<Category>,
        /// Whether each category carries one value per variable name.
        multivalue: bool,
    },
    /// Two-level input fixed to the categories false and true.
    Boolean {
        /// Always exactly false then true.
        categories: Vec<Category>,
    },
}

impl ParameterKind {
    fn label(&self) -> &'static str {
        match self {
            ParameterKind::Real => "real",
            ParameterKind::Integer => "integer",
            ParameterKind::Categorical { .. } => "categorical",
            ParameterKind::Boolean { .. } => "boolean",
        }
    }
}

/// A named uncertain or decision input.
///
/// Construct with bounds (an implicit uniform or discrete-uniform
/// distribution is built over that support) or with a distribution handle
/// (bounds are derived from its support). Parameters are immutable after
/// construction, except for [`extend_categories`](Parameter::extend_categories).
#[derive(Clone, Debug)]
pub struct Parameter {
    name: String,
    lower_bound: f64,
    upper_bound: f64,
    resolution: Vec<f64>,
    default: Option<Value>,
    variable_names: Vec<String>,
    pff: bool,
    dist: Option<Arc<dyn Distribution>>,
    kind: ParameterKind,
}

fn check_bounds(name: &str, lower: f64, upper: f64) -> Result<()> {
    if lower >= upper {
        return Err(Error::InvalidBounds {
            name: name.to_string(),
            lower,
            upper,
        });
    }
    Ok(())
}

fn check_integral_bound(name: &str, value: f64) -> Result<()> {
    if value.fract() != 0.0 {
        return Err(Error::NonIntegralBound {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn index_resolution(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

impl Parameter {
    fn assemble(
        name: String,
        lower_bound: f64,
        upper_bound: f64,
        dist: Option<Arc<dyn Distribution>>,
        kind: ParameterKind,
    ) -> Self {
        let variable_names = vec![name.clone()];
        Self {
            name,
            lower_bound,
            upper_bound,
            resolution: Vec::new(),
            default: None,
            variable_names,
            pff: false,
            dist,
            kind,
        }
    }

    /// Creates a continuous real-valued parameter over `[lower, upper]`.
    ///
    /// An implicit continuous uniform distribution is built over the support.
    ///
    /// # Errors
    ///
    /// Returns an error if `lower >= upper`.
    pub fn real(name: impl Into<String>, lower: f64, upper: f64) -> Result<Self> {
        let name = name.into();
        check_bounds(&name, lower, upper)?;
        let dist: Arc<dyn Distribution> = Arc::new(Uniform::new(lower, upper - lower));
        Ok(Self::assemble(
            name,
            lower,
            upper,
            Some(dist),
            ParameterKind::Real,
        ))
    }

    /// Creates a continuous real-valued parameter from a distribution.
    ///
    /// The bounds are derived from the distribution's support.
    ///
    /// # Errors
    ///
    /// Returns an error if the derived support is empty or inverted.
    pub fn real_with_dist(name: impl Into<String>, dist: Arc<dyn Distribution>) -> Result<Self> {
        let name = name.into();
        let (lower, upper) = support_from_dist(dist.as_ref());
        check_bounds(&name, lower, upper)?;
        Ok(Self::assemble(
            name,
            lower,
            upper,
            Some(dist),
            ParameterKind::Real,
        ))
    }

    /// Creates an integer-valued parameter over `lower..=upper`.
    ///
    /// An implicit discrete uniform distribution is built over the integer
    /// range.
    ///
    /// # Errors
    ///
    /// Returns an error if `lower >= upper`.
    #[allow(clippy::cast_precision_loss)]
    pub fn integer(name: impl Into<String>, lower: i64, upper: i64) -> Result<Self> {
        let name = name.into();
        check_bounds(&name, lower as f64, upper as f64)?;
        let dist: Arc<dyn Distribution> = Arc::new(DiscreteUniform::new(lower, upper + 1));
        Ok(Self::assemble(
            name,
            lower as f64,
            upper as f64,
            Some(dist),
            ParameterKind::Integer,
        ))
    }

    /// Creates an integer-valued parameter from a distribution.
    ///
    /// The bounds are derived from the distribution's support and must be
    /// integral.
    ///
    /// # Errors
    ///
    /// Returns an error if a derived bound is not an integer, or if the
    /// derived support is empty or inverted.
    pub fn integer_with_dist(name: impl Into<String>, dist: Arc<dyn Distribution>) -> Result<Self> {
        let name = name.into();
        let (lower, upper) = support_from_dist(dist.as_ref());
        check_integral_bound(&name, lower)?;
        check_integral_bound(&name, upper)?;
        check_bounds(&name, lower, upper)?;
        Ok(Self::assemble(
            name,
            lower,
            upper,
            Some(dist),
            ParameterKind::Integer,
        ))
    }

    /// Creates a categorical parameter from an ordered list of categories.
    ///
    /// Internally this is an integer parameter over the category indices
    /// `[0, N-1]`; the resolution is always the full index range.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two categories are given.
    ///
    /// # Example
    ///
    /// ```
    /// use designspace::parameter::Parameter;
    ///
    /// let p = Parameter::categorical("land_use", ["urban", "farmland", "forest"]).unwrap();
    /// assert_eq!(p.upper_bound(), 2.0);
    /// ```
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    pub fn categorical<I, C>(name: impl Into<String>, categories: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        let name = name.into();
        let categories: Vec<Category> = categories.into_iter().map(Into::into).collect();
        if categories.len() < 2 {
            return Err(Error::TooFewCategories {
                name,
                got: categories.len(),
            });
        }
        let n = categories.len();
        let dist: Arc<dyn Distribution> = Arc::new(DiscreteUniform::new(0, n as i64));
        let mut parameter = Self::assemble(
            name,
            0.0,
            (n - 1) as f64,
            Some(dist),
            ParameterKind::Categorical {
                categories,
                multivalue: false,
            },
        );
        parameter.resolution = index_resolution(n);
        Ok(parameter)
    }

    /// Creates a two-category parameter over false and true.
    ///
    /// This is the categorical twin of [`boolean`](Parameter::boolean): the
    /// full category machinery over exactly `[false, true]`.
    ///
    /// # Errors
    ///
    /// Never fails in practice; kept fallible for uniformity with the other
    /// constructors.
    pub fn binary(name: impl Into<String>) -> Result<Self> {
        Self::categorical(name, [false, true])
    }

    /// Creates a boolean parameter over `[0, 1]`.
    ///
    /// The categories are exactly false then true; the resolution is `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Never fails in practice; kept fallible for uniformity with the other
    /// constructors.
    pub fn boolean(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let dist: Arc<dyn Distribution> = Arc::new(DiscreteUniform::new(0, 2));
        let mut parameter = Self::assemble(
            name,
            0.0,
            1.0,
            Some(dist),
            ParameterKind::Boolean {
                categories: vec![Category::from_value(false), Category::from_value(true)],
            },
        );
        parameter.resolution = vec![0.0, 1.0];
        Ok(parameter)
    }

    /// Creates a boolean parameter from a distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if the distribution's support is not exactly `[0, 1]`.
    pub fn boolean_with_dist(name: impl Into<String>, dist: Arc<dyn Distribution>) -> Result<Self> {
        let name = name.into();
        let (lower, upper) = support_from_dist(dist.as_ref());
        if lower != 0.0 || upper != 1.0 {
            return Err(Error::InvalidBooleanSupport { name, lower, upper });
        }
        let mut parameter = Self::assemble(
            name,
            0.0,
            1.0,
            Some(dist),
            ParameterKind::Boolean {
                categories: vec![Category::from_value(false), Category::from_value(true)],
            },
        );
        parameter.resolution = vec![0.0, 1.0];
        Ok(parameter)
    }

    /// Sets the discretization points.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry lies outside the bounds, or is not an
    /// integer for integer-like kinds.
    pub fn with_resolution(mut self, resolution: Vec<f64>) -> Result<Self> {
        for &entry in &resolution {
            if entry < self.lower_bound || entry > self.upper_bound {
                return Err(Error::ResolutionOutOfRange {
                    name: self.name,
                    value: entry,
                    lower: self.lower_bound,
                    upper: self.upper_bound,
                });
            }
            if self.is_integer_like() && entry.fract() != 0.0 {
                return Err(Error::NonIntegralResolution {
                    name: self.name,
                    value: entry,
                });
            }
        }
        self.resolution = resolution;
        Ok(self)
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the model variable name(s) this parameter maps to.
    ///
    /// Defaults to the parameter's own name.
    #[must_use]
    pub fn with_variable_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variable_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Marks this parameter for partial-factorial sampling.
    #[must_use]
    pub fn with_pff(mut self) -> Self {
        self.pff = true;
        self
    }

    /// Marks the categories as multivalue (one value per variable name).
    ///
    /// Has an effect only on categorical parameters.
    #[must_use]
    pub fn with_multivalue(mut self) -> Self {
        if let ParameterKind::Categorical { multivalue, .. } = &mut self.kind {
            *multivalue = true;
        }
        self
    }

    /// Returns the parameter's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Returns the discretization points.
    #[must_use]
    pub fn resolution(&self) -> &[f64] {
        &self.resolution
    }

    /// Returns the default value, if set.
    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns the model variable name(s) this parameter maps to.
    #[must_use]
    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    /// Whether this parameter participates in partial-factorial sampling.
    #[must_use]
    pub fn pff(&self) -> bool {
        self.pff
    }

    /// Returns the distribution handle, for samplers.
    #[must_use]
    pub fn dist(&self) -> Option<&Arc<dyn Distribution>> {
        self.dist.as_ref()
    }

    /// Returns the kind tag.
    #[must_use]
    pub fn kind(&self) -> &ParameterKind {
        &self.kind
    }

    /// Returns the categories for categorical and boolean parameters.
    #[must_use]
    pub fn categories(&self) -> Option<&[Category]> {
        match &self.kind {
            ParameterKind::Categorical { categories, .. }
            | ParameterKind::Boolean { categories } => Some(categories),
            _ => None,
        }
    }

    /// Whether the categories are multivalue.
    #[must_use]
    pub fn multivalue(&self) -> bool {
        matches!(
            self.kind,
            ParameterKind::Categorical {
                multivalue: true,
                ..
            }
        )
    }

    /// Whether bounds and resolution are constrained to integers.
    #[must_use]
    pub fn is_integer_like(&self) -> bool {
        !matches!(self.kind, ParameterKind::Real)
    }

    /// Returns the index of the named category (first match in construction
    /// order).
    ///
    /// # Errors
    ///
    /// Returns an error if this parameter has no categories or the name is
    /// not found.
    pub fn index_for_cat(&self, category: &str) -> Result<usize> {
        let categories = self.categories().ok_or_else(|| Error::NotCategorical {
            name: self.name.clone(),
        })?;
        categories
            .iter()
            .position(|cat| cat.name() == category)
            .ok_or_else(|| Error::UnknownCategory {
                name: self.name.clone(),
                category: category.to_string(),
            })
    }

    /// Returns the category at the given index.
    ///
    /// # Errors
    ///
    /// Returns an error if this parameter has no categories or the index is
    /// out of range.
    pub fn cat_for_index(&self, index: usize) -> Result<&Category> {
        let categories = self.categories().ok_or_else(|| Error::NotCategorical {
            name: self.name.clone(),
        })?;
        categories
            .get(index)
            .ok_or_else(|| Error::CategoryIndexOutOfRange {
                name: self.name.clone(),
                index,
                len: categories.len(),
            })
    }

    /// Appends categories to a categorical parameter.
    ///
    /// The upper bound, resolution, and implicit index distribution grow to
    /// match the new category count. This is the only permitted mutation
    /// after construction.
    ///
    /// # Errors
    ///
    /// Returns an error if this parameter is not categorical.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    pub fn extend_categories<I, C>(&mut self, new_categories: I) -> Result<()>
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        let ParameterKind::Categorical { categories, .. } = &mut self.kind else {
            return Err(Error::NotCategorical {
                name: self.name.clone(),
            });
        };
        categories.extend(new_categories.into_iter().map(Into::into));
        let n = categories.len();
        self.upper_bound = (n - 1) as f64;
        self.resolution = index_resolution(n);
        self.dist = Some(Arc::new(DiscreteUniform::new(0, n as i64)));
        Ok(())
    }

    fn kind_eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (ParameterKind::Real, ParameterKind::Real)
            | (ParameterKind::Integer, ParameterKind::Integer) => true,
            (
                ParameterKind::Categorical {
                    categories: a,
                    multivalue: ma,
                },
                ParameterKind::Categorical {
                    categories: b,
                    multivalue: mb,
                },
            ) => a == b && ma == mb,
            (
                ParameterKind::Boolean { categories: a },
                ParameterKind::Boolean { categories: b },
            ) => a == b,
            _ => false,
        }
    }
}

/// Equality is an explicit per-field comparison: same kind, same
/// non-distribution fields by value, and distributions matching by family
/// name, positional arguments, keyword arguments, and support bounds. A
/// parameter without a distribution never equals one with a distribution.
impl PartialEq for Parameter {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        let dist_matches = match (&self.dist, &other.dist) {
            (None, None) => true,
            (Some(a), Some(b)) => dists_equal(a.as_ref(), b.as_ref()),
            _ => false,
        };
        self.kind_eq(other)
            && self.name == other.name
            && self.lower_bound == other.lower_bound
            && self.upper_bound == other.upper_bound
            && self.resolution == other.resolution
            && self.default == other.default
            && self.variable_names == other.variable_names
            && self.pff == other.pff
            && dist_matches
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
