//! Bind environment variables into struct fields
//!
//! `envbind` populates a configuration struct from the process environment
//! in one synchronous pass. Each field names its variable with a directive
//! string, optionally marking it `required` or giving it a `default`.
//!
//! # Features
//!
//! - **Declarative**: `#[derive(EnvBind)]` with `#[env("KEY,options")]` per field
//! - **Every problem at once**: all missing and malformed variables are reported together
//! - **Scalar coercion**: strings, booleans, integers of any width, and durations
//! - **Strict declarations**: malformed directives and unsupported types fail loudly
//!
//! # Directive Syntax
//!
//! ```text
//! ENV_KEY[,required][,default=LITERAL]
//! ```
//!
//! - `required`: an unset variable without a default is an error. With a
//!   default, the default is used instead.
//! - `default=LITERAL`: used when the variable is unset (or, without
//!   `required`, empty). Everything after the first `=` is the literal.
//! - `-`: skip the field.
//!
//! Fields without `#[env]` are left alone and may be of any type. With
//! `#[env(implicit)]` on the struct they become part of the record, and a
//! binder configured with [`Binder::with_implicit_keys`] reads them from
//! their MACRO_CASE names. Commas cannot appear in a default.
//!
//! # Value Parsing
//!
//! - `String`: used verbatim
//! - `bool`: `1 t T TRUE true True` / `0 f F FALSE false False`
//! - integers: base 10, range-checked against the field's width
//! - [`Duration`](std::time::Duration): `300ms`, `10s`, `1h30m`, `1.5h`
//!
//! # Example
//!
//! ```rust
//! use envbind::EnvBind;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, EnvBind)]
//! struct MySqlConfig {
//!     #[env("MYSQL_HOST,default=localhost:3306")]
//!     host: String,
//!
//!     #[env("MYSQL_DATABASE,required")]
//!     database: String,
//!
//!     #[env("MYSQL_TIMEOUT,default=10s")]
//!     timeout: Duration,
//!
//!     #[env("MYSQL_MAX_CONNS")]
//!     max_conns: u32,
//! }
//!
//! # fn main() -> Result<(), envbind::BindError> {
//! #     std::env::remove_var("MYSQL_HOST");
//! #     std::env::remove_var("MYSQL_TIMEOUT");
//! #     std::env::remove_var("MYSQL_MAX_CONNS");
//! std::env::set_var("MYSQL_DATABASE", "db");
//!
//! let mut config = MySqlConfig::default();
//! envbind::bind(&mut config)?;
//!
//! assert_eq!(config.host, "localhost:3306");
//! assert_eq!(config.database, "db");
//! assert_eq!(config.timeout, Duration::from_secs(10));
//! assert_eq!(config.max_conns, 0);
//! #     Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Missing and malformed variables are collected into a [`BindError`] whose
//! message joins every failure with `", "`:
//!
//! ```text
//! envbind: MYSQL_DATABASE not set, envbind: MYSQL_MAX_CONNS: invalid u32 value "many": invalid digit found in string
//! ```
//!
//! Mistakes in the declarations themselves (an empty directive, an unknown
//! option, a field type without coercion) are [`ConfigError`]s. [`bind`]
//! panics on them; [`try_bind`] returns them. [`must_bind`] panics on
//! anything, for startup code with no way to recover.

mod binder;
mod coerce;
mod directive;
mod error;
mod field;
mod interval;
mod naming;
pub mod options;

pub use binder::{bind, must_bind, try_bind, Binder, DEFAULT_NAMESPACE};
pub use directive::{Directive, SKIP};
pub use envbind_derive::EnvBind;
pub use error::{BindError, CoerceError, ConfigError, Error, FieldError};
pub use field::{AsSlot, Field, Record, Slot};
pub use interval::{parse_interval, IntervalError};
pub use naming::macro_case;
