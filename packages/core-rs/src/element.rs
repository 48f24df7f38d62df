use crate::buffer::Storage;
use crate::dtype::DType;
use num_traits::AsPrimitive;

/// A native element type that can back a [`TypedBuffer`](crate::buffer::TypedBuffer).
///
/// `store` is the only way a computed `f64` enters a buffer, so it carries
/// the casting rule for the representation.
pub trait Element: Copy + Default + PartialEq + core::fmt::Debug + 'static {
    const DTYPE: DType;

    fn to_f64(self) -> f64;

    fn store(value: f64) -> Self;

    fn into_storage(data: Vec<Self>) -> Storage;

    fn view(storage: &Storage) -> Option<&[Self]>;

    fn view_mut(storage: &mut Storage) -> Option<&mut [Self]>;
}

macro_rules! impl_storage_access {
    ($variant:ident) => {
        fn into_storage(data: Vec<Self>) -> Storage {
            Storage::$variant(data)
        }

        fn view(storage: &Storage) -> Option<&[Self]> {
            match storage {
                Storage::$variant(data) => Some(data.as_slice()),
                _ => None,
            }
        }

        fn view_mut(storage: &mut Storage) -> Option<&mut [Self]> {
            match storage {
                Storage::$variant(data) => Some(data.as_mut_slice()),
                _ => None,
            }
        }
    };
}

/// `uint8_clamped` element: saturating, rounds half to even.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Clamped(pub u8);

/// Truncates toward zero and reduces modulo `2^bits`.
///
/// NaN and infinities map to zero. The remainder is exact in `f64`, so the
/// reduction is done in `i128` to keep the low bits intact for 64-bit targets.
pub(crate) fn wrap_to_bits(value: f64, bits: u32) -> u64 {
    if !value.is_finite() {
        return 0;
    }
    let modulus = 2f64.powi(bits as i32);
    let remainder = value.trunc() % modulus;
    (remainder as i128).rem_euclid(1i128 << bits) as u64
}

macro_rules! impl_integer_element {
    ($t:ty, $unsigned:ty, $bits:expr, $variant:ident) => {
        impl Element for $t {
            const DTYPE: DType = DType::$variant;

            impl_storage_access!($variant);

            #[inline]
            fn to_f64(self) -> f64 {
                self.as_()
            }

            #[inline]
            fn store(value: f64) -> Self {
                wrap_to_bits(value, $bits) as $unsigned as $t
            }
        }
    };
}

impl_integer_element!(i8, u8, 8, Int8);
impl_integer_element!(i16, u16, 16, Int16);
impl_integer_element!(i32, u32, 32, Int32);
impl_integer_element!(i64, u64, 64, Int64);
impl_integer_element!(u8, u8, 8, UInt8);
impl_integer_element!(u16, u16, 16, UInt16);
impl_integer_element!(u32, u32, 32, UInt32);
impl_integer_element!(u64, u64, 64, UInt64);

impl Element for f32 {
    const DTYPE: DType = DType::Float32;

    impl_storage_access!(Float32);

    #[inline]
    fn to_f64(self) -> f64 {
        self.as_()
    }

    #[inline]
    fn store(value: f64) -> Self {
        value as f32
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::Float64;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn store(value: f64) -> Self {
        value
    }

    fn into_storage(data: Vec<Self>) -> Storage {
        Storage::Float64(data)
    }

    // `generic` buffers are f64-backed as well.
    fn view(storage: &Storage) -> Option<&[Self]> {
        match storage {
            Storage::Float64(data) | Storage::Generic(data) => Some(data.as_slice()),
            _ => None,
        }
    }

    fn view_mut(storage: &mut Storage) -> Option<&mut [Self]> {
        match storage {
            Storage::Float64(data) | Storage::Generic(data) => Some(data.as_mut_slice()),
            _ => None,
        }
    }
}

impl Element for Clamped {
    const DTYPE: DType = DType::UInt8Clamped;

    impl_storage_access!(UInt8Clamped);

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self.0)
    }

    #[inline]
    fn store(value: f64) -> Self {
        if value.is_nan() {
            return Clamped(0);
        }
        Clamped(value.clamp(0.0, 255.0).round_ties_even() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_truncate_toward_zero() {
        assert_eq!(i32::store(6.9), 6);
        assert_eq!(i32::store(-6.9), -6);
        assert_eq!(u16::store(0.5), 0);
    }

    #[test]
    fn non_finite_stores_zero() {
        assert_eq!(i8::store(f64::NAN), 0);
        assert_eq!(i32::store(f64::INFINITY), 0);
        assert_eq!(u64::store(f64::NEG_INFINITY), 0);
        assert_eq!(Clamped::store(f64::NAN), Clamped(0));
    }

    #[test]
    fn integers_wrap_around() {
        assert_eq!(i8::store(128.0), -128);
        assert_eq!(i8::store(-129.0), 127);
        assert_eq!(u8::store(256.0), 0);
        assert_eq!(u8::store(-1.0), 255);
        assert_eq!(u32::store(-1.0), u32::MAX);
        assert_eq!(i32::store(2_147_483_648.0), i32::MIN);
        assert_eq!(u64::store(-1.0), u64::MAX);
        assert_eq!(i64::store(-1.0), -1);
    }

    #[test]
    fn clamped_saturates_and_rounds_half_even() {
        assert_eq!(Clamped::store(300.0), Clamped(255));
        assert_eq!(Clamped::store(-4.0), Clamped(0));
        assert_eq!(Clamped::store(2.5), Clamped(2));
        assert_eq!(Clamped::store(3.5), Clamped(4));
        assert_eq!(Clamped::store(f64::INFINITY), Clamped(255));
    }

    #[test]
    fn floats_keep_nan() {
        assert!(f32::store(f64::NAN).is_nan());
        assert!(f64::store(f64::NAN).is_nan());
        assert_eq!(f32::store(6.0), 6.0f32);
    }

    #[test]
    fn reads_widen_to_f64() {
        assert_eq!((-3i8).to_f64(), -3.0);
        assert_eq!(u64::MAX.to_f64(), u64::MAX as f64);
        assert_eq!(Clamped(200).to_f64(), 200.0);
    }
}
