//! Field descriptors: the table a record exposes to the binder

use std::time::Duration;

/// A typed, mutable view of one record field.
///
/// Each variant pairs the declared scalar type with a place to write the
/// coerced value.
#[derive(Debug)]
pub enum Slot<'a> {
    Text(&'a mut String),
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    I128(&'a mut i128),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    U128(&'a mut u128),
    Usize(&'a mut usize),
    Duration(&'a mut Duration),
    /// A declared type with no coercion, identified by its name.
    Unsupported(&'static str),
}

impl Slot<'_> {
    /// Slot for a field whose type `T` cannot be bound.
    pub fn unsupported<T: ?Sized>() -> Self {
        Slot::Unsupported(std::any::type_name::<T>())
    }

    /// Name of the declared type behind this slot.
    pub fn type_name(&self) -> &'static str {
        match self {
            Slot::Text(_) => "String",
            Slot::Bool(_) => "bool",
            Slot::I8(_) => "i8",
            Slot::I16(_) => "i16",
            Slot::I32(_) => "i32",
            Slot::I64(_) => "i64",
            Slot::I128(_) => "i128",
            Slot::Isize(_) => "isize",
            Slot::U8(_) => "u8",
            Slot::U16(_) => "u16",
            Slot::U32(_) => "u32",
            Slot::U64(_) => "u64",
            Slot::U128(_) => "u128",
            Slot::Usize(_) => "usize",
            Slot::Duration(_) => "Duration",
            Slot::Unsupported(name) => *name,
        }
    }
}

/// Types that can be the target of a binding.
///
/// Implemented for `String`, `bool`, every primitive integer and
/// [`Duration`]. The derive macro calls this for every field it lists, so a
/// field with a directive of any other type fails to compile:
///
/// ```compile_fail,E0277
/// use envbind::EnvBind;
///
/// #[derive(Default, EnvBind)]
/// struct Config {
///     #[env("APP_PEERS")]
///     peers: Vec<String>,
/// }
/// ```
///
/// Fields without `#[env]` are only listed under `#[env(implicit)]`, and
/// `#[env("-")]` fields never are.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be bound from an environment variable",
    label = "unsupported bind type",
    note = "bindable types are `String`, `bool`, primitive integers and `Duration`; skip the field with `#[env(\"-\")]`"
)]
pub trait AsSlot {
    fn as_slot(&mut self) -> Slot<'_>;
}

macro_rules! impl_as_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AsSlot for $ty {
                fn as_slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )*
    };
}

impl_as_slot! {
    String => Text,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    Duration => Duration,
}

/// One entry of a record's field table.
#[derive(Debug)]
pub struct Field<'a> {
    /// Field name as declared, used in messages and for implicit keys.
    pub name: &'a str,
    /// Directive string; `None` when the field has none.
    pub directive: Option<&'a str>,
    pub slot: Slot<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, directive: Option<&'a str>, slot: Slot<'a>) -> Self {
        Self {
            name,
            directive,
            slot,
        }
    }
}

/// A configuration record whose fields can be bound from the environment.
///
/// Usually implemented with `#[derive(EnvBind)]`:
///
/// ```rust
/// use envbind::EnvBind;
///
/// #[derive(Debug, Default, EnvBind)]
/// struct Config {
///     #[env("APP_HOST,default=localhost:3306")]
///     host: String,
/// }
///
/// # fn main() -> Result<(), envbind::BindError> {
/// # std::env::remove_var("APP_HOST");
/// let config = Config::from_env()?;
/// assert_eq!(config.host, "localhost:3306");
/// # Ok(())
/// # }
/// ```
///
/// Hand-written tables list fields in declaration order:
///
/// ```rust
/// use envbind::{AsSlot, Field, Record};
///
/// #[derive(Default)]
/// struct Config {
///     port: u16,
/// }
///
/// impl Record for Config {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![Field::new("port", Some("APP_PORT,default=8080"), self.port.as_slot())]
///     }
/// }
/// ```
pub trait Record {
    /// Descriptors for every field, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;

    /// Build a default record and bind it with the default binder.
    ///
    /// # Panics
    ///
    /// Panics if the record's declarations are invalid, like
    /// [`bind`](crate::bind).
    fn from_env() -> Result<Self, crate::BindError>
    where
        Self: Default + Sized,
    {
        let mut record = Self::default();
        crate::bind(&mut record)?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_slot_writes_through() {
        let mut port: u16 = 0;
        if let Slot::U16(slot) = port.as_slot() {
            *slot = 8080;
        }
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_type_names() {
        let mut text = String::new();
        let mut timeout = Duration::ZERO;
        assert_eq!(text.as_slot().type_name(), "String");
        assert_eq!(timeout.as_slot().type_name(), "Duration");
        assert!(Slot::unsupported::<Vec<String>>()
            .type_name()
            .contains("Vec"));
    }
}
