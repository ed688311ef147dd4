#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the upper bound does not strictly exceed the lower bound.
    #[error("parameter '{name}': upper bound ({upper}) should be larger than lower bound ({lower})")]
    InvalidBounds {
        /// The name of the offending parameter.
        name: String,
        /// The lower bound value.
        lower: f64,
        /// The upper bound value.
        upper: f64,
    },

    /// Returned when a resolution entry lies outside the parameter bounds.
    #[error("parameter '{name}': resolution entry {value} not consistent with bounds [{lower}, {upper}]")]
    ResolutionOutOfRange {
        /// The name of the offending parameter.
        name: String,
        /// The out-of-range resolution entry.
        value: f64,
        /// The lower bound value.
        lower: f64,
        /// The upper bound value.
        upper: f64,
    },

    /// Returned when an integer-like parameter has a non-integral bound.
    #[error("parameter '{name}': bound {value} is not an integer")]
    NonIntegralBound {
        /// The name of the offending parameter.
        name: String,
        /// The non-integral bound value.
        value: f64,
    },

    /// Returned when an integer-like parameter has a non-integral resolution entry.
    #[error("parameter '{name}': resolution entry {value} is not an integer")]
    NonIntegralResolution {
        /// The name of the offending parameter.
        name: String,
        /// The non-integral resolution entry.
        value: f64,
    },

    /// Returned when a categorical parameter is given fewer than two categories.
    #[error("parameter '{name}': there should be more than 1 category, got {got}")]
    TooFewCategories {
        /// The name of the offending parameter.
        name: String,
        /// The number of categories supplied.
        got: usize,
    },

    /// Returned when a category operation is called on a parameter without categories.
    #[error("parameter '{name}' has no categories")]
    NotCategorical {
        /// The name of the offending parameter.
        name: String,
    },

    /// Returned when a category name lookup finds no match.
    #[error("parameter '{name}': category '{category}' not found")]
    UnknownCategory {
        /// The name of the offending parameter.
        name: String,
        /// The category name that was looked up.
        category: String,
    },

    /// Returned when a category index is outside the category list.
    #[error("parameter '{name}': category index {index} out of range for {len} categories")]
    CategoryIndexOutOfRange {
        /// The name of the offending parameter.
        name: String,
        /// The requested index.
        index: usize,
        /// The number of categories available.
        len: usize,
    },

    /// Returned when a boolean parameter's distribution does not have unit support.
    #[error("parameter '{name}': a bool distribution must have support [0, 1], got [{lower}, {upper}]")]
    InvalidBooleanSupport {
        /// The name of the offending parameter.
        name: String,
        /// The lower support bound of the supplied distribution.
        lower: f64,
        /// The upper support bound of the supplied distribution.
        upper: f64,
    },

    /// Returned when a policy or scenario is missing a value for a parameter.
    #[error("'{point}': no value for parameter '{parameter}'")]
    MissingValue {
        /// The name of the policy or scenario.
        point: String,
        /// The name of the parameter without a value.
        parameter: String,
    },

    /// Returned when flattening an experiment encounters the same key twice.
    #[error("experiment '{name}': key '{key}' occurs more than once")]
    DuplicateKey {
        /// The name of the experiment being assembled.
        name: String,
        /// The duplicated key.
        key: String,
    },

    /// Returned when `zip_over` names exactly one axis.
    #[error("zip_over cannot be one item")]
    ZipSingleAxis,

    /// Returned when an axis name is not one of models, policies, scenarios.
    #[error("unknown axis '{0}', expected one of: models, policies, scenarios")]
    UnknownAxis(String),

    /// Returned when zipped axes have different lengths.
    #[error("zipped axes must have equal lengths: {left} has {left_len}, {right} has {right_len}")]
    ZipLengthMismatch {
        /// The name of the first zipped axis.
        left: &'static str,
        /// The length of the first zipped axis.
        left_len: usize,
        /// The name of the second zipped axis.
        right: &'static str,
        /// The length of the second zipped axis.
        right_len: usize,
    },

    /// Returned when a parameter table has no name column.
    #[error("name column missing")]
    MissingNameColumn,

    /// Returned when a declared non-categorical row does not carry exactly two values.
    #[error("too many values specified for '{name}', is {got}, should be 2")]
    WrongValueCount {
        /// The name cell of the offending row.
        name: String,
        /// The number of values the row carries.
        got: usize,
    },

    /// Returned when a bound cell of a non-categorical row is not numeric.
    #[error("row '{name}': '{value}' is not numeric")]
    NonNumericBound {
        /// The name cell of the offending row.
        name: String,
        /// The cell content that failed to parse.
        value: String,
    },

    /// Returned when a type cell is not one of int, real, cat, bool.
    #[error("row '{name}': unknown parameter type '{kind}'")]
    UnknownParameterType {
        /// The name cell of the offending row.
        name: String,
        /// The unrecognized type cell content.
        kind: String,
    },

    /// Returned when reading a parameter table fails at the I/O layer.
    #[error("table I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
