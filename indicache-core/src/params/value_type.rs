//! Configured data value type of an indicator.

use crate::entry::{EntryFlags, ValueKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage type an indicator reports its values in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataValueType {
    Bool,
    Char,
    Int,
    Long,
    UInt,
    ULong,
    #[default]
    Double,
    Float,
    String,
    UChar,
}

impl DataValueType {
    /// Numeric kind values are fetched as, or `None` for types no provider
    /// can produce (string, uchar).
    pub fn value_kind(self) -> Option<ValueKind> {
        match self {
            DataValueType::Bool | DataValueType::Char | DataValueType::Int => Some(ValueKind::Int),
            DataValueType::Long => Some(ValueKind::Long),
            DataValueType::UInt => Some(ValueKind::UInt),
            DataValueType::ULong => Some(ValueKind::ULong),
            DataValueType::Double => Some(ValueKind::Double),
            DataValueType::Float => Some(ValueKind::Float),
            DataValueType::String | DataValueType::UChar => None,
        }
    }

    /// Entry flags describing the numeric kind of this type.
    pub fn type_flags(self) -> EntryFlags {
        match self {
            DataValueType::Double => EntryFlags::REAL | EntryFlags::DOUBLED,
            DataValueType::Float => EntryFlags::REAL,
            DataValueType::Long => EntryFlags::DOUBLED,
            DataValueType::UInt => EntryFlags::UNSIGNED,
            DataValueType::ULong => EntryFlags::UNSIGNED | EntryFlags::DOUBLED,
            _ => EntryFlags::NONE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataValueType::Bool => "bool",
            DataValueType::Char => "char",
            DataValueType::Int => "int",
            DataValueType::Long => "long",
            DataValueType::UInt => "uint",
            DataValueType::ULong => "ulong",
            DataValueType::Double => "double",
            DataValueType::Float => "float",
            DataValueType::String => "string",
            DataValueType::UChar => "uchar",
        }
    }
}

impl fmt::Display for DataValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bool" => Ok(DataValueType::Bool),
            "char" => Ok(DataValueType::Char),
            "int" => Ok(DataValueType::Int),
            "long" => Ok(DataValueType::Long),
            "uint" => Ok(DataValueType::UInt),
            "ulong" => Ok(DataValueType::ULong),
            "double" => Ok(DataValueType::Double),
            "float" => Ok(DataValueType::Float),
            "string" => Ok(DataValueType::String),
            "uchar" => Ok(DataValueType::UChar),
            other => Err(format!("unknown data value type '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_integer_types_fetch_as_int() {
        assert_eq!(DataValueType::Bool.value_kind(), Some(ValueKind::Int));
        assert_eq!(DataValueType::Char.value_kind(), Some(ValueKind::Int));
        assert_eq!(DataValueType::Int.value_kind(), Some(ValueKind::Int));
    }

    #[test]
    fn string_and_uchar_are_unsupported() {
        assert_eq!(DataValueType::String.value_kind(), None);
        assert_eq!(DataValueType::UChar.value_kind(), None);
    }

    #[test]
    fn type_flags_per_kind() {
        assert_eq!(
            DataValueType::Double.type_flags(),
            EntryFlags::REAL | EntryFlags::DOUBLED
        );
        assert_eq!(DataValueType::Float.type_flags(), EntryFlags::REAL);
        assert_eq!(DataValueType::Long.type_flags(), EntryFlags::DOUBLED);
        assert_eq!(DataValueType::UInt.type_flags(), EntryFlags::UNSIGNED);
        assert_eq!(
            DataValueType::ULong.type_flags(),
            EntryFlags::UNSIGNED | EntryFlags::DOUBLED
        );
        assert_eq!(DataValueType::Int.type_flags(), EntryFlags::NONE);
    }

    #[test]
    fn parse_roundtrips_display() {
        for ty in [
            DataValueType::Bool,
            DataValueType::ULong,
            DataValueType::Double,
            DataValueType::UChar,
        ] {
            assert_eq!(ty.to_string().parse::<DataValueType>(), Ok(ty));
        }
        assert!("decimal".parse::<DataValueType>().is_err());
    }
}
