//! Per-field directives: `KEY[,required][,default=LITERAL]`

use crate::error::ConfigError;
use crate::options::split_directive;

/// Directive that excludes a field from binding.
pub const SKIP: &str = "-";

/// Parsed form of a field directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Environment variable key, never empty.
    pub key: &'a str,
    /// Set by the `required` option.
    pub required: bool,
    /// Literal from `default=...`; the last occurrence wins.
    pub default: Option<&'a str>,
}

impl<'a> Directive<'a> {
    /// Parse the directive attached to `field`.
    ///
    /// Fails on an empty directive, an empty key, or an option other than
    /// `required` and `default`.
    pub fn parse(field: &str, raw: &'a str) -> Result<Self, ConfigError> {
        if raw.is_empty() {
            return Err(ConfigError::EmptyDirective {
                field: field.to_string(),
            });
        }

        let (key, opts) = split_directive(raw);
        if key.is_empty() {
            return Err(ConfigError::EmptyKey {
                field: field.to_string(),
            });
        }

        let mut directive = Self {
            key,
            required: false,
            default: None,
        };

        for opt in opts {
            match opt.name {
                "required" => directive.required = true,
                "default" => directive.default = Some(opt.value),
                other => {
                    return Err(ConfigError::UnknownOption {
                        field: field.to_string(),
                        option: other.to_string(),
                    })
                }
            }
        }

        Ok(directive)
    }
}
