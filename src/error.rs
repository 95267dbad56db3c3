use thiserror::Error;

/// Result type used throughout the extraction core.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong inside a single extractor call.
///
/// Each variant is local to one invocation and carries a message naming the
/// role, range, or condition that failed. Nothing is retried internally and
/// no partial result is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum Error {
    /// A required column/role could not be resolved against the table
    /// headers. The most common failure mode of the whole system, always
    /// user-correctable by fixing the headers.
    #[error("no column found for '{role}'; expected a header containing {keywords}")]
    Schema { role: String, keywords: String },

    /// Schema was fine but a required range holds too few rows.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A mathematically undefined intermediate (e.g. division by zero).
    #[error("computation failed: {0}")]
    Computation(String),

    /// Regression input without variance.
    #[error("degenerate regression input: {0}")]
    DegenerateInput(String),

    /// Nothing recognizable found in unstructured report text.
    #[error("no usable data found: {0}")]
    DataNotFound(String),

    /// Malformed delimited input.
    #[error("failed to parse tabular input: {0}")]
    Parse(#[from] csv::Error),
}

impl Error {
    /// Schema error for a keyword-matched role.
    pub fn schema(role: &str, keywords: &[&str]) -> Self {
        Error::Schema {
            role: role.to_string(),
            keywords: format!("one of: {}", keywords.join(", ")),
        }
    }

    /// Schema error for an exactly-named column.
    pub fn schema_exact(role: &str, name: &str) -> Self {
        Error::Schema {
            role: role.to_string(),
            keywords: format!("a column named '{name}'"),
        }
    }
}
