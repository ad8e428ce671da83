//! Error types for environment variable binding
//!
//! Failures come in two tiers:
//! - [`ConfigError`]: the record's declarations are wrong (a bug in the
//!   calling code). Binding stops at the first one.
//! - [`BindError`]: the environment does not satisfy the declarations.
//!   Every failing field is collected before returning.

use std::fmt;

/// A defect in a record's field declarations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A field carries a directive with no content at all.
    #[error("field `{field}` has an empty directive")]
    EmptyDirective {
        /// Name of the offending field
        field: String,
    },

    /// A directive has options but no environment variable key (`",required"`).
    #[error("field `{field}` has a directive without an environment variable key")]
    EmptyKey {
        /// Name of the offending field
        field: String,
    },

    /// A directive names an option other than `required` or `default`.
    #[error("unknown option `{option}` in directive of field `{field}`")]
    UnknownOption {
        /// Name of the offending field
        field: String,
        /// The option name as written
        option: String,
    },

    /// A field's declared type has no coercion.
    #[error("field `{field}` has unsupported bind type `{type_name}`")]
    UnsupportedType {
        /// Name of the offending field
        field: String,
        /// Fully qualified name of the declared type
        type_name: &'static str,
    },
}

/// A raw string that could not be converted into a field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {type_name} value {value:?}: {reason}")]
pub struct CoerceError {
    /// Name of the target type (`bool`, `u16`, `Duration`, ...)
    pub type_name: &'static str,
    /// The raw value that failed to parse
    pub value: String,
    /// Message from the underlying parser
    pub reason: String,
}

impl CoerceError {
    pub(crate) fn new(
        type_name: &'static str,
        value: impl Into<String>,
        reason: impl fmt::Display,
    ) -> Self {
        Self {
            type_name,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Failure of a single field, as reported inside a [`BindError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// A `required` field without a default whose variable is not set.
    #[error("{namespace}: {key} not set")]
    Missing {
        /// Binder namespace used as message prefix
        namespace: String,
        /// Environment variable key
        key: String,
    },

    /// The resolved value could not be coerced into the field's type.
    #[error("{namespace}: {key}: {source}")]
    Invalid {
        /// Binder namespace used as message prefix
        namespace: String,
        /// Name of the record field
        field: String,
        /// Environment variable key
        key: String,
        /// Underlying coercion failure
        source: CoerceError,
    },
}

impl FieldError {
    /// The environment variable key the failure belongs to.
    pub fn key(&self) -> &str {
        match self {
            Self::Missing { key, .. } | Self::Invalid { key, .. } => key,
        }
    }
}

/// Every field that failed during one bind, in declaration order.
///
/// Never empty: a bind with no failing field succeeds instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindError {
    errors: Vec<FieldError>,
}

impl BindError {
    /// Returns `None` when `errors` is empty.
    pub(crate) fn from_errors(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Per-field failures in declaration order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Per-field failures, by value.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BindError {}

impl<'a> IntoIterator for &'a BindError {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Either tier of failure, as returned by [`try_bind`](crate::try_bind).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bind(#[from] BindError),
}
