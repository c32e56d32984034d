//! Binding between coerced values and the fields of a host record.

use crate::coerce::{FieldKind, Value};

/// A Rust type that can be populated from a config value.
pub trait Field: Sized {
    fn kind() -> FieldKind;
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! int_field {
    ($($ty:ty => $variant:ident($width:expr)),+ $(,)?) => {
        $(
            impl Field for $ty {
                fn kind() -> FieldKind {
                    FieldKind::$variant($width)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => <$ty>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )+
    };
}

int_field! {
    i8 => Int(8),
    i16 => Int(16),
    i32 => Int(32),
    i64 => Int(64),
    isize => Int(isize::BITS),
    u8 => Uint(8),
    u16 => Uint(16),
    u32 => Uint(32),
    u64 => Uint(64),
    usize => Uint(usize::BITS),
}

impl Field for f32 {
    fn kind() -> FieldKind {
        FieldKind::Float(32)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            // Values for f32 slots were parsed as f32, so narrowing is exact.
            Value::Float(v) => Some(v as f32),
            _ => None,
        }
    }
}

impl Field for f64 {
    fn kind() -> FieldKind {
        FieldKind::Float(64)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl Field for bool {
    fn kind() -> FieldKind {
        FieldKind::Bool
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl Field for String {
    fn kind() -> FieldKind {
        FieldKind::Text
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Field> Field for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::sequence_of(T::kind())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Sequence(items) => items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

/// A writable, typed location inside a record.
pub trait FieldSlot {
    fn kind(&self) -> FieldKind;

    /// Overwrites the slot. Returns false, leaving the slot untouched, when
    /// `value` does not match the slot's kind.
    fn assign(&mut self, value: Value) -> bool;
}

impl<T: Field> FieldSlot for T {
    fn kind(&self) -> FieldKind {
        T::kind()
    }

    fn assign(&mut self, value: Value) -> bool {
        match T::from_value(value) {
            Some(v) => {
                *self = v;
                true
            }
            None => false,
        }
    }
}

/// Name and declared kind of one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A target the loader can write into, field by field.
///
/// Most records implement this with [`record!`](crate::record).
pub trait Record {
    /// The slot for `name`, or `None` when the record has no such field.
    fn slot(&mut self, name: &str) -> Option<&mut dyn FieldSlot>;

    fn fields(&self) -> Vec<FieldDescriptor>;
}

/// Implements [`Record`] for a struct from a list of its fields.
///
/// Keys default to the field name; use `"Key" => field` to map a different key.
///
/// ```
/// #[derive(Default)]
/// struct Server {
///     name: String,
///     port: u16,
/// }
///
/// knut::record!(Server { "Name" => name, "Port" => port });
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        $crate::record!($ty { $(stringify!($field) => $field),+ });
    };
    ($ty:ty { $($key:expr => $field:ident),+ $(,)? }) => {
        impl $crate::Record for $ty {
            fn slot(&mut self, name: &str) -> Option<&mut dyn $crate::FieldSlot> {
                $(
                    if name == $key {
                        return Some(&mut self.$field);
                    }
                )+
                None
            }

            fn fields(&self) -> Vec<$crate::FieldDescriptor> {
                vec![$($crate::FieldDescriptor::new(
                    $key,
                    $crate::FieldSlot::kind(&self.$field),
                )),+]
            }
        }
    };
}
