/// Dispatch a [`Storage`](crate::buffer::Storage) to a body generic over its element vector.
///
/// `$data` is bound to the variant payload (`&Vec<T>`, `&mut Vec<T>` or
/// `Vec<T>` depending on how the storage expression is passed), so the body
/// can use [`Element`](crate::element::Element) methods without naming `T`.
///
/// ```
/// # use ekurtosis_core::{buffer::Storage, match_storage};
/// let storage = Storage::Int16(vec![1, 2, 3]);
/// let len = match_storage!(&storage, data, { data.len() });
/// assert_eq!(len, 3);
/// ```
#[macro_export]
macro_rules! match_storage {
    ($storage:expr, $data:ident, $body:block) => {{
        match $storage {
            $crate::buffer::Storage::Int8($data) => $body,
            $crate::buffer::Storage::Int16($data) => $body,
            $crate::buffer::Storage::Int32($data) => $body,
            $crate::buffer::Storage::Int64($data) => $body,
            $crate::buffer::Storage::UInt8($data) => $body,
            $crate::buffer::Storage::UInt8Clamped($data) => $body,
            $crate::buffer::Storage::UInt16($data) => $body,
            $crate::buffer::Storage::UInt32($data) => $body,
            $crate::buffer::Storage::UInt64($data) => $body,
            $crate::buffer::Storage::Float32($data) => $body,
            $crate::buffer::Storage::Float64($data) => $body,
            $crate::buffer::Storage::Generic($data) => $body,
        }
    }};
}

/// Build a [`Storage`](crate::buffer::Storage) of the given dtype from a body
/// generic over the element type `$T`.
///
/// `Generic` binds `$T = f64` and wraps the result in `Storage::Generic`.
#[macro_export]
macro_rules! storage_for_dtype {
    ($dtype:expr, $T:ident, $body:block) => {{
        match $dtype {
            $crate::dtype::DType::Int8 => {
                type $T = i8;
                $crate::buffer::Storage::Int8($body)
            }
            $crate::dtype::DType::Int16 => {
                type $T = i16;
                $crate::buffer::Storage::Int16($body)
            }
            $crate::dtype::DType::Int32 => {
                type $T = i32;
                $crate::buffer::Storage::Int32($body)
            }
            $crate::dtype::DType::Int64 => {
                type $T = i64;
                $crate::buffer::Storage::Int64($body)
            }
            $crate::dtype::DType::UInt8 => {
                type $T = u8;
                $crate::buffer::Storage::UInt8($body)
            }
            $crate::dtype::DType::UInt8Clamped => {
                type $T = $crate::element::Clamped;
                $crate::buffer::Storage::UInt8Clamped($body)
            }
            $crate::dtype::DType::UInt16 => {
                type $T = u16;
                $crate::buffer::Storage::UInt16($body)
            }
            $crate::dtype::DType::UInt32 => {
                type $T = u32;
                $crate::buffer::Storage::UInt32($body)
            }
            $crate::dtype::DType::UInt64 => {
                type $T = u64;
                $crate::buffer::Storage::UInt64($body)
            }
            $crate::dtype::DType::Float32 => {
                type $T = f32;
                $crate::buffer::Storage::Float32($body)
            }
            $crate::dtype::DType::Float64 => {
                type $T = f64;
                $crate::buffer::Storage::Float64($body)
            }
            $crate::dtype::DType::Generic => {
                type $T = f64;
                $crate::buffer::Storage::Generic($body)
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::buffer::Storage;
    use crate::dtype::DType;
    use crate::element::Element;

    #[test]
    fn storage_for_dtype_sizes_elements() {
        let storage = storage_for_dtype!(DType::UInt16, Ty, { vec![Ty::default(); 3] });
        assert_eq!(storage, Storage::UInt16(vec![0, 0, 0]));
    }

    #[test]
    fn generic_dtype_builds_generic_storage() {
        let storage = storage_for_dtype!(DType::Generic, Ty, { vec![Ty::store(2.5)] });
        assert_eq!(storage, Storage::Generic(vec![2.5]));
    }

    #[test]
    fn match_storage_reads_through_element() {
        let storage = Storage::Int8(vec![-1, 2]);
        let values: Vec<f64> =
            match_storage!(&storage, data, { data.iter().map(|v| v.to_f64()).collect() });
        assert_eq!(values, vec![-1.0, 2.0]);
    }

    #[test]
    fn match_storage_writes_through_element() {
        let mut storage = Storage::Float32(vec![0.0; 2]);
        match_storage!(&mut storage, data, {
            for slot in data.iter_mut() {
                *slot = Element::store(6.0);
            }
        });
        assert_eq!(storage, Storage::Float32(vec![6.0, 6.0]));
    }
}
