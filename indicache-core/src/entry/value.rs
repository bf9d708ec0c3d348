//! Numeric entry values.
//!
//! An entry slot holds exactly one of the numeric kinds an indicator can
//! produce. Raw readings are narrowed with saturating casts, so the
//! `f64::MAX` "empty value" marker lands on the max sentinel of every kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The numeric kind a value is fetched and stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Int,
    Long,
    UInt,
    ULong,
    Float,
    Double,
}

/// One value of an indicator entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum EntryValue {
    Int(i32),
    Long(i64),
    UInt(u32),
    ULong(u64),
    Float(f32),
    Double(f64),
}

impl Default for EntryValue {
    fn default() -> Self {
        EntryValue::Int(0)
    }
}

impl EntryValue {
    /// Builds a value of `kind` from a raw `f64` reading.
    ///
    /// NaN means "no value yet" and maps to the max sentinel of every kind.
    pub fn from_f64(kind: ValueKind, raw: f64) -> Self {
        if raw.is_nan() {
            return EntryValue::max_of(kind);
        }
        match kind {
            ValueKind::Int => EntryValue::Int(raw as i32),
            ValueKind::Long => EntryValue::Long(raw as i64),
            ValueKind::UInt => EntryValue::UInt(raw as u32),
            ValueKind::ULong => EntryValue::ULong(raw as u64),
            ValueKind::Float => {
                EntryValue::Float(raw.clamp(f32::MIN as f64, f32::MAX as f64) as f32)
            }
            ValueKind::Double => EntryValue::Double(raw),
        }
    }

    /// This value re-expressed as `kind`, without an `f64` round trip.
    pub fn to_kind(&self, kind: ValueKind) -> Self {
        match kind {
            ValueKind::Int => EntryValue::Int(self.as_i32()),
            ValueKind::Long => EntryValue::Long(self.as_i64()),
            ValueKind::UInt => EntryValue::UInt(self.as_u32()),
            ValueKind::ULong => EntryValue::ULong(self.as_u64()),
            ValueKind::Float => EntryValue::Float(self.as_f32()),
            ValueKind::Double => EntryValue::Double(self.as_f64()),
        }
    }

    /// The max representable value of `kind`, used as the "no data" marker.
    pub fn max_of(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Int => EntryValue::Int(i32::MAX),
            ValueKind::Long => EntryValue::Long(i64::MAX),
            ValueKind::UInt => EntryValue::UInt(u32::MAX),
            ValueKind::ULong => EntryValue::ULong(u64::MAX),
            ValueKind::Float => EntryValue::Float(f32::MAX),
            ValueKind::Double => EntryValue::Double(f64::MAX),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            EntryValue::Int(_) => ValueKind::Int,
            EntryValue::Long(_) => ValueKind::Long,
            EntryValue::UInt(_) => ValueKind::UInt,
            EntryValue::ULong(_) => ValueKind::ULong,
            EntryValue::Float(_) => ValueKind::Float,
            EntryValue::Double(_) => ValueKind::Double,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            EntryValue::Int(v) => v as f64,
            EntryValue::Long(v) => v as f64,
            EntryValue::UInt(v) => v as f64,
            EntryValue::ULong(v) => v as f64,
            EntryValue::Float(v) => v as f64,
            EntryValue::Double(v) => v,
        }
    }

    pub fn as_f32(&self) -> f32 {
        match *self {
            EntryValue::Int(v) => v as f32,
            EntryValue::Long(v) => v as f32,
            EntryValue::UInt(v) => v as f32,
            EntryValue::ULong(v) => v as f32,
            EntryValue::Float(v) => v,
            EntryValue::Double(v) => v as f32,
        }
    }

    pub fn as_i32(&self) -> i32 {
        match *self {
            EntryValue::Int(v) => v,
            EntryValue::Long(v) => v as i32,
            EntryValue::UInt(v) => v as i32,
            EntryValue::ULong(v) => v as i32,
            EntryValue::Float(v) => v as i32,
            EntryValue::Double(v) => v as i32,
        }
    }

    pub fn as_i64(&self) -> i64 {
        match *self {
            EntryValue::Int(v) => v as i64,
            EntryValue::Long(v) => v,
            EntryValue::UInt(v) => v as i64,
            EntryValue::ULong(v) => v as i64,
            EntryValue::Float(v) => v as i64,
            EntryValue::Double(v) => v as i64,
        }
    }

    pub fn as_u32(&self) -> u32 {
        match *self {
            EntryValue::Int(v) => v as u32,
            EntryValue::Long(v) => v as u32,
            EntryValue::UInt(v) => v,
            EntryValue::ULong(v) => v as u32,
            EntryValue::Float(v) => v as u32,
            EntryValue::Double(v) => v as u32,
        }
    }

    pub fn as_u64(&self) -> u64 {
        match *self {
            EntryValue::Int(v) => v as u64,
            EntryValue::Long(v) => v as u64,
            EntryValue::UInt(v) => v as u64,
            EntryValue::ULong(v) => v,
            EntryValue::Float(v) => v as u64,
            EntryValue::Double(v) => v as u64,
        }
    }
}

impl fmt::Display for EntryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryValue::Int(v) => write!(f, "{v}"),
            EntryValue::Long(v) => write!(f, "{v}"),
            EntryValue::UInt(v) => write!(f, "{v}"),
            EntryValue::ULong(v) => write!(f, "{v}"),
            EntryValue::Float(v) => write!(f, "{v}"),
            EntryValue::Double(v) => write!(f, "{v}"),
        }
    }
}

/// A primitive that entry values can be projected onto.
///
/// Lets sentinel checks be written once per kind (`has_value::<f64>(f64::MAX)`).
pub trait EntryScalar: Copy + PartialEq {
    fn project(value: &EntryValue) -> Self;
}

macro_rules! impl_entry_scalar {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl EntryScalar for $ty {
                fn project(value: &EntryValue) -> Self {
                    value.$method()
                }
            }
        )*
    };
}

impl_entry_scalar!(
    f64 => as_f64,
    f32 => as_f32,
    i32 => as_i32,
    i64 => as_i64,
    u32 => as_u32,
    u64 => as_u64,
);
