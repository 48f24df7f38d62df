use crate::dtype::DType;
use crate::value::{Data, Value};

/// Structural kind of a transform input, resolved once before traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Number,
    /// Array whose elements are all numbers. Empty arrays land here.
    Sequence,
    TypedBuffer(DType),
    Matrix(DType),
    /// Array holding at least one non-number element.
    Records,
    Unsupported,
}

impl Kind {
    /// Representation a `copy: false` call would write into, if any.
    pub fn existing_dtype(self) -> Option<DType> {
        match self {
            Kind::Sequence | Kind::Records => Some(DType::Generic),
            Kind::TypedBuffer(dtype) | Kind::Matrix(dtype) => Some(dtype),
            Kind::Number | Kind::Unsupported => None,
        }
    }
}

pub fn resolve(input: &Data) -> Kind {
    match input {
        Data::Value(Value::Number(_)) => Kind::Number,
        Data::Typed(buffer) => Kind::TypedBuffer(buffer.dtype()),
        Data::Matrix(matrix) => Kind::Matrix(matrix.dtype()),
        Data::Value(Value::Array(items)) if items.iter().all(Value::is_number) => Kind::Sequence,
        Data::Value(Value::Array(_)) => Kind::Records,
        Data::Value(_) => Kind::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{MatrixBuffer, TypedBuffer};
    use serde_json::json;

    #[test]
    fn classifies_each_container() {
        assert_eq!(resolve(&Data::from(0.5)), Kind::Number);
        assert_eq!(resolve(&Data::from(vec![1.0, 2.0])), Kind::Sequence);
        assert_eq!(resolve(&Data::from(Vec::<f64>::new())), Kind::Sequence);
        assert_eq!(
            resolve(&Data::from(TypedBuffer::from_vec(vec![1u16]))),
            Kind::TypedBuffer(DType::UInt16)
        );
        let matrix = MatrixBuffer::from_vec(vec![1.0f32; 4], vec![2, 2]).unwrap();
        assert_eq!(resolve(&Data::from(matrix)), Kind::Matrix(DType::Float32));
        assert_eq!(resolve(&Data::from(json!([{"x": 1}, 2]))), Kind::Records);
    }

    #[test]
    fn everything_else_is_unsupported() {
        for raw in [json!(null), json!(true), json!("5"), json!({"lambda": 1})] {
            assert_eq!(resolve(&Data::from(raw)), Kind::Unsupported);
        }
    }

    #[test]
    fn plain_arrays_are_generic() {
        assert_eq!(Kind::Records.existing_dtype(), Some(DType::Generic));
        assert_eq!(Kind::Number.existing_dtype(), None);
    }
}
