use crate::error::TransformError;

/// Element representation of a typed buffer or matrix.
///
/// `Generic` is the unconstrained floating-point representation used by
/// plain sequences; when it backs a buffer it stores `f64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt8Clamped,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Generic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TypeKind {
    Unsigned,
    Signed,
    Float,
}

impl DType {
    /// Every recognized representation, in declaration order.
    pub const ALL: [DType; 12] = [
        DType::Int8,
        DType::Int16,
        DType::Int32,
        DType::Int64,
        DType::UInt8,
        DType::UInt8Clamped,
        DType::UInt16,
        DType::UInt32,
        DType::UInt64,
        DType::Float32,
        DType::Float64,
        DType::Generic,
    ];

    pub const fn size_of(self) -> usize {
        match self {
            DType::Int8 | DType::UInt8 | DType::UInt8Clamped => 1,
            DType::Int16 | DType::UInt16 => 2,
            DType::Int32 | DType::UInt32 | DType::Float32 => 4,
            DType::Int64 | DType::UInt64 | DType::Float64 | DType::Generic => 8,
        }
    }

    const fn kind(self) -> TypeKind {
        match self {
            DType::UInt8 | DType::UInt8Clamped | DType::UInt16 | DType::UInt32 | DType::UInt64 => {
                TypeKind::Unsigned
            }
            DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64 => TypeKind::Signed,
            DType::Float32 | DType::Float64 | DType::Generic => TypeKind::Float,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self.kind(), TypeKind::Float)
    }

    pub const fn is_integer(self) -> bool {
        !self.is_float()
    }

    pub const fn is_signed(self) -> bool {
        !matches!(self.kind(), TypeKind::Unsigned)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::UInt8 => "uint8",
            DType::UInt8Clamped => "uint8_clamped",
            DType::UInt16 => "uint16",
            DType::UInt32 => "uint32",
            DType::UInt64 => "uint64",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Generic => "generic",
        }
    }
}

impl core::fmt::Display for DType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for DType {
    type Err = TransformError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DType::ALL
            .iter()
            .copied()
            .find(|dtype| dtype.as_str() == value)
            .ok_or_else(|| TransformError::UnsupportedDType(value.to_string()))
    }
}

/// Picks the representation a freshly allocated output uses.
///
/// An explicit request always wins; otherwise the output keeps the
/// representation of the input it was derived from.
pub fn output_dtype(input: DType, requested: Option<DType>) -> DType {
    requested.unwrap_or(input)
}
