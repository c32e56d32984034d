//! String to typed value conversion, per declared field kind.

use std::fmt;
use std::str::FromStr;

use crate::error::CoerceError;

/// Declared kind of a record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Int(u32),
    Uint(u32),
    Float(u32),
    Text,
    Sequence(Box<FieldKind>),
}

impl FieldKind {
    pub fn sequence_of(element: FieldKind) -> Self {
        FieldKind::Sequence(Box::new(element))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Int(width) => write!(f, "i{}", width),
            FieldKind::Uint(width) => write!(f, "u{}", width),
            FieldKind::Float(width) => write!(f, "f{}", width),
            FieldKind::Text => write!(f, "string"),
            FieldKind::Sequence(element) => write!(f, "[{}]", element),
        }
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(inner) = s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            return Ok(FieldKind::sequence_of(inner.parse()?));
        }
        match s.to_lowercase().as_str() {
            "bool" => Ok(FieldKind::Bool),
            "i8" => Ok(FieldKind::Int(8)),
            "i16" => Ok(FieldKind::Int(16)),
            "i32" => Ok(FieldKind::Int(32)),
            "i64" | "int" => Ok(FieldKind::Int(64)),
            "u8" => Ok(FieldKind::Uint(8)),
            "u16" => Ok(FieldKind::Uint(16)),
            "u32" => Ok(FieldKind::Uint(32)),
            "u64" | "uint" => Ok(FieldKind::Uint(64)),
            "f32" => Ok(FieldKind::Float(32)),
            "f64" | "float" => Ok(FieldKind::Float(64)),
            "string" | "text" => Ok(FieldKind::Text),
            other => Err(format!("unknown field kind '{}'", other)),
        }
    }
}

/// A coerced value, ready to be written into a slot.
///
/// Narrow integer widths are range checked before they get here, and `f32`
/// values are widened losslessly, so converting back never loses bits.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Sequence(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Uint(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{:?}", v),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Converts `raw` into a value of `kind`.
pub fn coerce(raw: &str, kind: &FieldKind) -> Result<Value, CoerceError> {
    match kind {
        FieldKind::Bool => parse_bool(raw.trim())
            .map(Value::Bool)
            .ok_or_else(|| invalid(kind, raw)),
        FieldKind::Int(width) => coerce_int(raw, kind, *width),
        FieldKind::Uint(width) => coerce_uint(raw, kind, *width),
        FieldKind::Float(32) => raw
            .trim()
            .parse::<f32>()
            .map(|v| Value::Float(f64::from(v)))
            .map_err(|_| invalid(kind, raw)),
        FieldKind::Float(64) => raw
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid(kind, raw)),
        FieldKind::Float(_) => Err(unsupported(kind)),
        FieldKind::Text => Ok(Value::Text(unquote(raw).to_string())),
        FieldKind::Sequence(element) => coerce_sequence(raw, kind, element),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

/// Strips one matching pair of outer `'` or `"`, if present.
pub fn unquote(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

fn parse_wide(raw: &str, kind: &FieldKind, width: u32) -> Result<i128, CoerceError> {
    use std::num::IntErrorKind;

    raw.trim().parse::<i128>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => overflow(kind, width, raw),
        _ => invalid(kind, raw),
    })
}

fn coerce_int(raw: &str, kind: &FieldKind, width: u32) -> Result<Value, CoerceError> {
    if !matches!(width, 8 | 16 | 32 | 64) {
        return Err(unsupported(kind));
    }
    let v = parse_wide(raw, kind, width)?;
    let max = (1i128 << (width - 1)) - 1;
    let min = -(1i128 << (width - 1));
    if v < min || v > max {
        return Err(overflow(kind, width, raw));
    }
    i64::try_from(v)
        .map(Value::Int)
        .map_err(|_| overflow(kind, width, raw))
}

fn coerce_uint(raw: &str, kind: &FieldKind, width: u32) -> Result<Value, CoerceError> {
    if !matches!(width, 8 | 16 | 32 | 64) {
        return Err(unsupported(kind));
    }
    let v = parse_wide(raw, kind, width)?;
    let max = (1i128 << width) - 1;
    if v < 0 || v > max {
        return Err(overflow(kind, width, raw));
    }
    u64::try_from(v)
        .map(Value::Uint)
        .map_err(|_| overflow(kind, width, raw))
}

fn coerce_sequence(
    raw: &str,
    kind: &FieldKind,
    element: &FieldKind,
) -> Result<Value, CoerceError> {
    if matches!(element, FieldKind::Sequence(_)) {
        return Err(unsupported(kind));
    }
    let inner = raw
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| invalid(kind, raw))?;

    if inner.trim().is_empty() {
        return Ok(Value::Sequence(Vec::new()));
    }

    inner
        .split(',')
        .map(|item| coerce(unquote(item.trim()), element))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Sequence)
}

fn invalid(kind: &FieldKind, raw: &str) -> CoerceError {
    CoerceError::InvalidValue {
        kind: kind.clone(),
        raw: raw.to_string(),
    }
}

fn overflow(kind: &FieldKind, width: u32, raw: &str) -> CoerceError {
    CoerceError::Overflow {
        kind: kind.clone(),
        width,
        raw: raw.to_string(),
    }
}

fn unsupported(kind: &FieldKind) -> CoerceError {
    CoerceError::UnsupportedKind { kind: kind.clone() }
}
