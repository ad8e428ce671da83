//! Resolution of record fields against the process environment

use std::borrow::Cow;
use std::env::{self, VarError};

use tracing::{debug, warn};

use crate::coerce;
use crate::directive::{Directive, SKIP};
use crate::error::{BindError, CoerceError, ConfigError, Error, FieldError};
use crate::field::{Field, Record, Slot};
use crate::naming::macro_case;

/// Prefix of error messages produced by the default binder.
pub const DEFAULT_NAMESPACE: &str = "envbind";

static DEFAULT_BINDER: Binder = Binder::new();

/// Binds records from the process environment.
///
/// A binder carries only presentation and policy settings; it holds no
/// state between calls and never modifies the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binder {
    namespace: Cow<'static, str>,
    implicit_keys: bool,
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a field's raw value came from.
#[derive(Debug)]
enum Resolution<'a> {
    Env(String),
    Default(&'a str),
    /// Nothing to assign; the field keeps its current value.
    Zero,
    Missing,
}

impl Resolution<'_> {
    fn source(&self) -> &'static str {
        match self {
            Resolution::Env(_) => "env",
            Resolution::Default(_) => "default",
            Resolution::Zero => "zero",
            Resolution::Missing => "missing",
        }
    }
}

impl Binder {
    /// Binder with the `envbind` namespace and implicit keys disabled.
    pub const fn new() -> Self {
        Self {
            namespace: Cow::Borrowed(DEFAULT_NAMESPACE),
            implicit_keys: false,
        }
    }

    /// Prefix used in runtime error messages (`"<namespace>: KEY not set"`).
    pub fn with_namespace(mut self, namespace: impl Into<Cow<'static, str>>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Bind fields that carry no directive from a key derived from the
    /// field name (`max_conns` reads `MAX_CONNS`).
    ///
    /// Such fields are assigned only when the variable is set and non-empty.
    pub fn with_implicit_keys(mut self, enabled: bool) -> Self {
        self.implicit_keys = enabled;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn implicit_keys(&self) -> bool {
        self.implicit_keys
    }

    /// Bind every field of `record`, reporting both failure tiers as values.
    ///
    /// Fields are resolved in declaration order. A [`ConfigError`] stops the
    /// bind at the offending field; runtime failures are collected and
    /// returned together once every field has been visited. A field whose
    /// value cannot be resolved or coerced is left unmodified.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(namespace = %self.namespace, record = std::any::type_name::<R>())
    )]
    pub fn try_bind<R: Record + ?Sized>(&self, record: &mut R) -> Result<(), Error> {
        let mut errors = Vec::new();

        for field in record.fields() {
            if let Some(error) = self.bind_field(field)? {
                errors.push(error);
            }
        }

        match BindError::from_errors(errors) {
            None => Ok(()),
            Some(error) => {
                warn!(failed = error.len(), "environment binding failed");
                Err(error.into())
            }
        }
    }

    /// Bind every field of `record`.
    ///
    /// # Panics
    ///
    /// Panics on a [`ConfigError`]: the record's declarations are wrong and
    /// there is nothing sensible to bind.
    pub fn bind<R: Record + ?Sized>(&self, record: &mut R) -> Result<(), BindError> {
        match self.try_bind(record) {
            Ok(()) => Ok(()),
            Err(Error::Bind(error)) => Err(error),
            Err(Error::Config(error)) => self.abort(&error),
        }
    }

    /// Bind every field of `record`, panicking on any failure.
    ///
    /// Intended for process startup where a misconfigured environment
    /// leaves nothing to recover.
    pub fn must_bind<R: Record + ?Sized>(&self, record: &mut R) {
        match self.try_bind(record) {
            Ok(()) => {}
            Err(Error::Bind(error)) => panic!("{error}"),
            Err(Error::Config(error)) => self.abort(&error),
        }
    }

    fn abort(&self, error: &ConfigError) -> ! {
        panic!("{}: {error}", self.namespace)
    }

    fn bind_field(&self, field: Field<'_>) -> Result<Option<FieldError>, ConfigError> {
        let Field {
            name,
            directive,
            slot,
        } = field;

        let directive = match directive {
            Some(SKIP) => {
                debug!(field = name, source = "skipped", "field not bound");
                return Ok(None);
            }
            Some(raw) => Directive::parse(name, raw)?,
            None if self.implicit_keys => return self.bind_implicit(name, slot),
            None => {
                debug!(field = name, source = "skipped", "field not bound");
                return Ok(None);
            }
        };
        ensure_supported(name, &slot)?;

        let resolution = match resolve(&directive) {
            Ok(resolution) => resolution,
            Err(source) => return Ok(Some(self.invalid(name, directive.key, source, &slot))),
        };
        debug!(
            field = name,
            key = directive.key,
            source = resolution.source(),
            "resolved field"
        );

        let raw = match &resolution {
            Resolution::Env(value) => value.as_str(),
            Resolution::Default(value) => *value,
            Resolution::Zero => return Ok(None),
            Resolution::Missing => {
                return Ok(Some(FieldError::Missing {
                    namespace: self.namespace.to_string(),
                    key: directive.key.to_string(),
                }))
            }
        };

        Ok(self.assign(name, directive.key, slot, raw))
    }

    fn bind_implicit(&self, name: &str, slot: Slot<'_>) -> Result<Option<FieldError>, ConfigError> {
        ensure_supported(name, &slot)?;
        let key = macro_case(name);

        let value = match lookup(&key) {
            Ok(Some(value)) if !value.is_empty() => value,
            Ok(_) => {
                debug!(field = name, key = %key, source = "zero", "resolved implicit field");
                return Ok(None);
            }
            Err(lossy) => return Ok(Some(self.invalid(name, &key, lossy, &slot))),
        };
        debug!(field = name, key = %key, source = "implicit", "resolved implicit field");

        Ok(self.assign(name, &key, slot, &value))
    }

    fn assign(&self, name: &str, key: &str, slot: Slot<'_>, raw: &str) -> Option<FieldError> {
        coerce::assign(slot, raw)
            .err()
            .map(|source| self.field_error(name, key, source))
    }

    /// Error for a variable whose value is not valid unicode.
    fn invalid(&self, name: &str, key: &str, lossy: String, slot: &Slot<'_>) -> FieldError {
        let source = CoerceError::new(slot.type_name(), lossy, "value is not valid unicode");
        self.field_error(name, key, source)
    }

    fn field_error(&self, name: &str, key: &str, source: CoerceError) -> FieldError {
        FieldError::Invalid {
            namespace: self.namespace.to_string(),
            field: name.to_string(),
            key: key.to_string(),
            source,
        }
    }
}

/// Resolve the raw value for a field with a directive.
///
/// `required` only turns an unset variable without a default into an
/// error; with a default the default is used. Without `required`, an
/// empty variable counts as unset.
fn resolve<'a>(directive: &Directive<'a>) -> Result<Resolution<'a>, String> {
    let value = lookup(directive.key)?;

    let resolution = match (value, directive.required, directive.default) {
        (Some(value), true, _) => Resolution::Env(value),
        (None, true, Some(default)) => Resolution::Default(default),
        (None, true, None) => Resolution::Missing,
        (Some(value), false, _) if !value.is_empty() => Resolution::Env(value),
        (_, false, Some(default)) => Resolution::Default(default),
        (_, false, None) => Resolution::Zero,
    };
    Ok(resolution)
}

/// Read `key`; a set but non-unicode value comes back as its lossy form.
fn lookup(key: &str) -> Result<Option<String>, String> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(raw.to_string_lossy().into_owned()),
    }
}

fn ensure_supported(name: &str, slot: &Slot<'_>) -> Result<(), ConfigError> {
    match slot {
        Slot::Unsupported(type_name) => Err(ConfigError::UnsupportedType {
            field: name.to_string(),
            type_name: *type_name,
        }),
        _ => Ok(()),
    }
}

/// Bind `record` with the default binder.
///
/// # Panics
///
/// Panics if the record's declarations are invalid; see [`Binder::bind`].
pub fn bind<R: Record + ?Sized>(record: &mut R) -> Result<(), BindError> {
    DEFAULT_BINDER.bind(record)
}

/// Bind `record` with the default binder, returning both failure tiers.
pub fn try_bind<R: Record + ?Sized>(record: &mut R) -> Result<(), Error> {
    DEFAULT_BINDER.try_bind(record)
}

/// Bind `record` with the default binder, panicking on any failure.
pub fn must_bind<R: Record + ?Sized>(record: &mut R) {
    DEFAULT_BINDER.must_bind(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::AsSlot;
    use serial_test::serial;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct Manual {
        host: String,
        retries: u8,
        timeout: Duration,
        ratio: f64,
    }

    impl Record for Manual {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::new(
                    "host",
                    Some("MANUAL_HOST,default=localhost"),
                    self.host.as_slot(),
                ),
                Field::new(
                    "retries",
                    Some("MANUAL_RETRIES,required"),
                    self.retries.as_slot(),
                ),
                Field::new(
                    "timeout",
                    Some("MANUAL_TIMEOUT,default=5s"),
                    self.timeout.as_slot(),
                ),
                Field::new("ratio", Some("-"), Slot::unsupported::<f64>()),
            ]
        }
    }

    /// Record with a single field of the given directive and slot type.
    struct Single<T> {
        directive: Option<&'static str>,
        name: &'static str,
        value: T,
    }

    impl<T: AsSlot> Single<T> {
        fn new(name: &'static str, directive: Option<&'static str>, value: T) -> Self {
            Self {
                directive,
                name,
                value,
            }
        }
    }

    impl<T: AsSlot> Record for Single<T> {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![Field::new(self.name, self.directive, self.value.as_slot())]
        }
    }

    struct Opaque;

    impl Record for Opaque {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![Field::new(
                "ratio",
                Some("OPAQUE_RATIO"),
                Slot::unsupported::<f64>(),
            )]
        }
    }

    fn clear(keys: &[&str]) {
        for key in keys {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_manual_record() {
        clear(&["MANUAL_HOST", "MANUAL_TIMEOUT"]);
        env::set_var("MANUAL_RETRIES", "3");

        let mut record = Manual {
            ratio: 0.5,
            ..Default::default()
        };
        bind(&mut record).unwrap();

        assert_eq!(record.host, "localhost");
        assert_eq!(record.retries, 3);
        assert_eq!(record.timeout, Duration::from_secs(5));
        assert_eq!(record.ratio, 0.5);

        clear(&["MANUAL_RETRIES"]);
    }

    #[test]
    #[serial]
    fn test_missing_required_keeps_zero_value() {
        clear(&["SINGLE_REQUIRED"]);

        let mut record = Single::new("value", Some("SINGLE_REQUIRED,required"), 0u32);
        let err = bind(&mut record).unwrap_err();

        assert_eq!(err.to_string(), "envbind: SINGLE_REQUIRED not set");
        assert_eq!(record.value, 0);
    }

    #[test]
    #[serial]
    fn test_required_with_default_falls_back() {
        clear(&["SINGLE_FALLBACK"]);

        let mut record = Single::new(
            "value",
            Some("SINGLE_FALLBACK,required,default=fallback"),
            String::new(),
        );
        bind(&mut record).unwrap();

        assert_eq!(record.value, "fallback");
    }

    #[test]
    #[serial]
    fn test_required_accepts_empty_value() {
        env::set_var("SINGLE_EMPTY", "");

        let mut record = Single::new(
            "value",
            Some("SINGLE_EMPTY,required,default=fallback"),
            "initial".to_string(),
        );
        bind(&mut record).unwrap();

        assert_eq!(record.value, "");
        clear(&["SINGLE_EMPTY"]);
    }

    #[test]
    #[serial]
    fn test_optional_empty_value_uses_default() {
        env::set_var("SINGLE_OPTIONAL", "");

        let mut record = Single::new("value", Some("SINGLE_OPTIONAL,default=7"), 0i32);
        bind(&mut record).unwrap();

        assert_eq!(record.value, 7);
        clear(&["SINGLE_OPTIONAL"]);
    }

    #[test]
    #[serial]
    fn test_optional_without_default_is_untouched() {
        clear(&["SINGLE_UNTOUCHED"]);

        let mut record = Single::new("value", Some("SINGLE_UNTOUCHED"), 42u64);
        bind(&mut record).unwrap();

        assert_eq!(record.value, 42);
    }

    #[test]
    #[serial]
    fn test_invalid_default_is_reported() {
        clear(&["SINGLE_BAD_DEFAULT"]);

        let mut record = Single::new("value", Some("SINGLE_BAD_DEFAULT,default=often"), false);
        let err = bind(&mut record).unwrap_err();

        assert!(matches!(
            &err.errors()[0],
            FieldError::Invalid { field, key, .. } if field == "value" && key == "SINGLE_BAD_DEFAULT"
        ));
    }

    #[test]
    #[serial]
    fn test_custom_namespace() {
        clear(&["SINGLE_NS"]);

        let binder = Binder::new().with_namespace("myapp");
        let mut record = Single::new("value", Some("SINGLE_NS,required"), String::new());
        let err = binder.bind(&mut record).unwrap_err();

        assert_eq!(binder.namespace(), "myapp");
        assert_eq!(err.to_string(), "myapp: SINGLE_NS not set");
    }

    #[test]
    #[serial]
    fn test_undirected_field_is_skipped_by_default() {
        env::set_var("MAX_CONNS", "32");

        let mut record = Single::new("max_conns", None, 0u16);
        bind(&mut record).unwrap();

        assert_eq!(record.value, 0);
        clear(&["MAX_CONNS"]);
    }

    #[test]
    #[serial]
    fn test_implicit_keys() {
        env::set_var("MAX_CONNS", "32");

        let binder = Binder::new().with_implicit_keys(true);
        let mut record = Single::new("MaxConns", None, 0u16);
        binder.bind(&mut record).unwrap();

        assert!(binder.implicit_keys());
        assert_eq!(record.value, 32);
        clear(&["MAX_CONNS"]);
    }

    #[test]
    #[serial]
    fn test_implicit_keys_ignore_empty_values() {
        env::set_var("IMPLICIT_EMPTY", "");

        let binder = Binder::new().with_implicit_keys(true);
        let mut record = Single::new("implicit_empty", None, 9u16);
        binder.bind(&mut record).unwrap();

        assert_eq!(record.value, 9);
        clear(&["IMPLICIT_EMPTY"]);
    }

    #[test]
    #[serial]
    fn test_implicit_keys_report_parse_errors() {
        env::set_var("IMPLICIT_PORT", "http");

        let binder = Binder::new().with_implicit_keys(true);
        let mut record = Single::new("implicit_port", None, 80u16);
        let err = binder.bind(&mut record).unwrap_err();

        assert_eq!(err.errors()[0].key(), "IMPLICIT_PORT");
        assert_eq!(record.value, 80);
        clear(&["IMPLICIT_PORT"]);
    }

    #[test]
    #[serial]
    fn test_skip_sentinel_wins_over_implicit_keys() {
        env::set_var("SKIPPED", "1");

        let binder = Binder::new().with_implicit_keys(true);
        let mut record = Single::new("skipped", Some(SKIP), false);
        binder.bind(&mut record).unwrap();

        assert!(!record.value);
        clear(&["SKIPPED"]);
    }

    #[test]
    fn test_empty_directive_is_config_error() {
        let mut record = Single::new("host", Some(""), String::new());
        let err = try_bind(&mut record).unwrap_err();

        assert_eq!(
            err,
            Error::Config(ConfigError::EmptyDirective {
                field: "host".to_string()
            })
        );
    }

    #[test]
    #[should_panic(expected = "envbind: field `host` has an empty directive")]
    fn test_empty_directive_panics() {
        let mut record = Single::new("host", Some(""), String::new());
        let _ = bind(&mut record);
    }

    #[test]
    #[should_panic(expected = "unknown option `unknown`")]
    fn test_unknown_option_panics() {
        let mut record = Single::new("host", Some("ENV_KEY,unknown"), String::new());
        let _ = bind(&mut record);
    }

    #[test]
    #[serial]
    fn test_unsupported_type_is_config_error_regardless_of_env() {
        clear(&["OPAQUE_RATIO"]);

        let err = try_bind(&mut Opaque).unwrap_err();
        assert_eq!(
            err,
            Error::Config(ConfigError::UnsupportedType {
                field: "ratio".to_string(),
                type_name: "f64",
            })
        );
    }

    #[test]
    #[serial]
    #[should_panic(expected = "envbind: MUST_BIND_KEY not set")]
    fn test_must_bind_panics_on_bind_error() {
        clear(&["MUST_BIND_KEY"]);

        let mut record = Single::new("key", Some("MUST_BIND_KEY,required"), String::new());
        must_bind(&mut record);
    }

    #[test]
    #[serial]
    fn test_config_error_stops_before_later_fields() {
        struct Mixed {
            first: String,
            second: String,
        }

        impl Record for Mixed {
            fn fields(&mut self) -> Vec<Field<'_>> {
                vec![
                    Field::new("first", Some("MIXED_FIRST,required"), self.first.as_slot()),
                    Field::new("second", Some("MIXED_SECOND,bogus"), self.second.as_slot()),
                ]
            }
        }

        clear(&["MIXED_FIRST"]);
        let mut record = Mixed {
            first: String::new(),
            second: String::new(),
        };
        let err = try_bind(&mut record).unwrap_err();

        assert!(matches!(err, Error::Config(ConfigError::UnknownOption { .. })));
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_non_unicode_value_is_reported() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        env::set_var("NON_UNICODE", OsStr::from_bytes(b"ab\xffcd"));

        let mut record = Single::new("value", Some("NON_UNICODE"), String::new());
        let err = bind(&mut record).unwrap_err();

        assert!(err.to_string().contains("not valid unicode"));
        assert_eq!(record.value, "");
        clear(&["NON_UNICODE"]);
    }
}
