use crate::dtype::DType;
use crate::element::{Clamped, Element};
use crate::error::TransformError;
use crate::metrics::record_copy_bytes;
use crate::{match_storage, storage_for_dtype};
use ndarray::{ArrayBase, ArrayD, Data as NdData, Dimension, IxDyn};

/// Homogeneous element vector, one variant per [`DType`].
#[derive(Clone, Debug, PartialEq)]
pub enum Storage {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    UInt8(Vec<u8>),
    UInt8Clamped(Vec<Clamped>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Generic(Vec<f64>),
}

impl Storage {
    pub fn zeros(dtype: DType, len: usize) -> Self {
        storage_for_dtype!(dtype, T, { vec![T::default(); len] })
    }

    pub fn dtype(&self) -> DType {
        match self {
            Storage::Int8(_) => DType::Int8,
            Storage::Int16(_) => DType::Int16,
            Storage::Int32(_) => DType::Int32,
            Storage::Int64(_) => DType::Int64,
            Storage::UInt8(_) => DType::UInt8,
            Storage::UInt8Clamped(_) => DType::UInt8Clamped,
            Storage::UInt16(_) => DType::UInt16,
            Storage::UInt32(_) => DType::UInt32,
            Storage::UInt64(_) => DType::UInt64,
            Storage::Float32(_) => DType::Float32,
            Storage::Float64(_) => DType::Float64,
            Storage::Generic(_) => DType::Generic,
        }
    }

    pub fn len(&self) -> usize {
        match_storage!(self, data, { data.len() })
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fixed-width, fixed-length numeric buffer with a declared element type.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedBuffer {
    storage: Storage,
}

impl TypedBuffer {
    /// Allocates a zero-initialized buffer.
    pub fn zeros(dtype: DType, len: usize) -> Self {
        record_copy_bytes(len * dtype.size_of());
        TypedBuffer {
            storage: Storage::zeros(dtype, len),
        }
    }

    pub fn from_vec<T: Element>(data: Vec<T>) -> Self {
        TypedBuffer {
            storage: T::into_storage(data),
        }
    }

    pub fn from_storage(storage: Storage) -> Self {
        TypedBuffer { storage }
    }

    /// Builds a buffer of `dtype` by storing each value through the dtype's cast.
    pub fn from_f64(dtype: DType, values: &[f64]) -> Self {
        let mut buffer = TypedBuffer::zeros(dtype, values.len());
        for (index, &value) in values.iter().enumerate() {
            buffer.set(index, value);
        }
        buffer
    }

    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn bytes_per_element(&self) -> usize {
        self.dtype().size_of()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn into_storage(self) -> Storage {
        self.storage
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        match_storage!(&self.storage, data, { data.get(index).map(|v| v.to_f64()) })
    }

    /// Stores `value` at `index` with the buffer's native cast. Returns
    /// `false` when `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: f64) -> bool {
        match_storage!(&mut self.storage, data, {
            match data.get_mut(index) {
                Some(slot) => {
                    *slot = Element::store(value);
                    true
                }
                None => false,
            }
        })
    }

    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::view(&self.storage)
    }

    pub fn as_slice_mut<T: Element>(&mut self) -> Option<&mut [T]> {
        T::view_mut(&mut self.storage)
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        match_storage!(&self.storage, data, {
            data.iter().map(|v| v.to_f64()).collect()
        })
    }

    /// Copies the values into a new buffer of `target`, casting each element.
    pub fn cast(&self, target: DType) -> Self {
        if target == self.dtype() {
            record_copy_bytes(self.len() * target.size_of());
            return self.clone();
        }
        TypedBuffer::from_f64(target, &self.to_f64_vec())
    }
}

/// N-dimensional matrix-like container: a shape plus a flat row-major buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixBuffer {
    shape: Vec<usize>,
    data: TypedBuffer,
}

impl MatrixBuffer {
    pub fn new(data: TypedBuffer, shape: Vec<usize>) -> Result<Self, TransformError> {
        let expected = shape.iter().product::<usize>();
        if expected != data.len() {
            return Err(TransformError::ShapeMismatch {
                shape,
                expected,
                len: data.len(),
            });
        }
        Ok(MatrixBuffer { shape, data })
    }

    pub fn zeros(shape: Vec<usize>, dtype: DType) -> Self {
        let len = shape.iter().product::<usize>();
        MatrixBuffer {
            shape,
            data: TypedBuffer::zeros(dtype, len),
        }
    }

    pub fn from_vec<T: Element>(data: Vec<T>, shape: Vec<usize>) -> Result<Self, TransformError> {
        MatrixBuffer::new(TypedBuffer::from_vec(data), shape)
    }

    /// Copies an `ndarray` array in logical (row-major) order.
    pub fn from_array<T, S, D>(array: &ArrayBase<S, D>) -> Self
    where
        T: Element,
        S: NdData<Elem = T>,
        D: Dimension,
    {
        let shape = array.shape().to_vec();
        let data: Vec<T> = array.iter().copied().collect();
        record_copy_bytes(data.len() * T::DTYPE.size_of());
        MatrixBuffer {
            shape,
            data: TypedBuffer::from_vec(data),
        }
    }

    pub fn to_array(&self) -> Result<ArrayD<f64>, TransformError> {
        ArrayD::from_shape_vec(IxDyn(&self.shape), self.data.to_f64_vec()).map_err(|_| {
            TransformError::ShapeMismatch {
                shape: self.shape.clone(),
                expected: self.shape.iter().product(),
                len: self.data.len(),
            }
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &TypedBuffer {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut TypedBuffer {
        &mut self.data
    }

    pub fn into_data(self) -> TypedBuffer {
        self.data
    }
}
