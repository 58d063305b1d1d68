//! Type tags for validated values

use std::fmt;

/// The semantic kind of a value checked by a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// A value validated by a custom rule (email, URL, pattern...)
    Custom,
    Bool,

    Int,
    Int8,
    Int16,
    Int32,
    Int64,

    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,

    Float32,
    Float64,

    String,
    RawBytes,

    Slice,
    Time,
}

impl Type {
    pub fn name(&self) -> &'static str {
        match self {
            Type::Custom => "custom",
            Type::Bool => "bool",
            Type::Int => "int",
            Type::Int8 => "int8",
            Type::Int16 => "int16",
            Type::Int32 => "int32",
            Type::Int64 => "int64",
            Type::Uint => "uint",
            Type::Uint8 => "uint8",
            Type::Uint16 => "uint16",
            Type::Uint32 => "uint32",
            Type::Uint64 => "uint64",
            Type::Float32 => "float32",
            Type::Float64 => "float64",
            Type::String => "string",
            Type::RawBytes => "[]byte",
            Type::Slice => "[]",
            Type::Time => "time",
        }
    }

    /// Signed integer kinds
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Type::Int | Type::Int8 | Type::Int16 | Type::Int32 | Type::Int64
        )
    }

    /// Unsigned integer kinds
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Type::Uint | Type::Uint8 | Type::Uint16 | Type::Uint32 | Type::Uint64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Type::Float32 | Type::Float64)
    }

    /// Kinds whose input is kept as text, so case folding and length bounds apply
    pub fn is_textual(&self) -> bool {
        matches!(self, Type::String | Type::Custom)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
