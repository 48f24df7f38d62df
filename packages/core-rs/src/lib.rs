pub mod buffer;
pub mod dtype;
pub mod ekurtosis;
pub mod element;
pub mod error;
mod macros;
pub mod metrics;
pub mod options;
pub mod path;
pub mod resolve;
pub mod traverse;
pub mod value;

use std::ops::Deref;

pub use buffer::{MatrixBuffer, Storage, TypedBuffer};
pub use dtype::DType;
pub use ekurtosis::ekurtosis;
pub use element::Clamped;
pub use error::{ErrorKind, TransformError};
pub use metrics::{
    copy_bytes_total, evaluations_total, reset_copy_bytes, snapshot, take_copy_bytes, Snapshot,
};
pub use options::{validate_options, Accessor, Options};
pub use path::DeepPath;
pub use resolve::{resolve, Kind};
pub use value::{Data, Value};

use dtype::output_dtype;
use metrics::{record_copy_bytes, record_evaluations};
use traverse::{traverse, traverse_in_place, Elements, Records, TypedElements};

/// Result of a transform: either a freshly allocated container or the
/// caller's own container, mutated in place.
#[derive(Debug)]
pub enum Output<'a> {
    Owned(Data),
    InPlace(&'a mut Data),
}

impl Output<'_> {
    pub fn is_in_place(&self) -> bool {
        matches!(self, Output::InPlace(_))
    }

    pub fn into_owned(self) -> Data {
        match self {
            Output::Owned(data) => data,
            Output::InPlace(data) => data.clone(),
        }
    }
}

impl Deref for Output<'_> {
    type Target = Data;

    fn deref(&self) -> &Data {
        match self {
            Output::Owned(data) => data,
            Output::InPlace(data) => &**data,
        }
    }
}

/// Evaluates the exponential excess kurtosis for every rate in `input`.
pub fn transform<'a>(input: &'a mut Data, options: &Options) -> Result<Output<'a>, TransformError> {
    transform_with(ekurtosis, input, options)
}

/// Applies the scalar formula `f` element-wise, preserving the container kind.
///
/// With `copy` set (the default) the input is left untouched and a new
/// container is returned. Otherwise the input is overwritten and handed back
/// as [`Output::InPlace`]. Record arrays addressed through `path` are always
/// written in place.
pub fn transform_with<'a, F>(
    f: F,
    input: &'a mut Data,
    options: &Options,
) -> Result<Output<'a>, TransformError>
where
    F: Fn(f64) -> f64,
{
    let kind = resolve(input);

    if let (Kind::Records, Some(path)) = (kind, options.get_path()) {
        let path = DeepPath::new(path, options.get_sep());
        if let Data::Value(Value::Array(items)) = &mut *input {
            traverse_in_place(&mut Records::new(items, &path), &f);
        }
        return Ok(Output::InPlace(input));
    }

    if !options.get_copy() {
        if let (Some(requested), Some(existing)) = (options.get_dtype(), kind.existing_dtype()) {
            if requested != existing {
                return Err(TransformError::IncompatibleDType {
                    requested,
                    existing,
                });
            }
        }
    }

    if options.get_copy() || matches!(kind, Kind::Number | Kind::Unsupported) {
        return Ok(Output::Owned(evaluate_owned(&f, input, kind, options)?));
    }
    write_in_place(&f, input, options.get_accessor());
    Ok(Output::InPlace(input))
}

/// Copying transform for callers that only hold a shared reference.
pub fn transform_copy(input: &Data, options: &Options) -> Result<Data, TransformError> {
    transform_copy_with(ekurtosis, input, options)
}

/// Like [`transform_with`], but never touches `input` and ignores `copy`.
///
/// Record arrays addressed through `path` are cloned and the results are
/// written into the clone's leaves.
pub fn transform_copy_with<F>(f: F, input: &Data, options: &Options) -> Result<Data, TransformError>
where
    F: Fn(f64) -> f64,
{
    let kind = resolve(input);
    if let (Kind::Records, Some(path), Data::Value(Value::Array(items))) =
        (kind, options.get_path(), input)
    {
        let path = DeepPath::new(path, options.get_sep());
        let mut records = items.clone();
        traverse_in_place(&mut Records::new(&mut records, &path), &f);
        return Ok(Data::Value(Value::Array(records)));
    }
    evaluate_owned(&f, input, kind, options)
}

fn evaluate_owned<F>(f: &F, input: &Data, kind: Kind, options: &Options) -> Result<Data, TransformError>
where
    F: Fn(f64) -> f64,
{
    match kind {
        Kind::Number => {
            let lambda = input.as_f64().unwrap_or(f64::NAN);
            record_evaluations(1);
            Ok(Data::from(f(lambda)))
        }
        Kind::Unsupported => Ok(Data::from(f64::NAN)),
        _ => copy_into(f, input, options),
    }
}

fn copy_into<F>(f: &F, input: &Data, options: &Options) -> Result<Data, TransformError>
where
    F: Fn(f64) -> f64,
{
    let accessor = options.get_accessor();
    let requested = options.get_dtype();
    match input {
        Data::Value(Value::Array(items)) => {
            let source = Elements::new(items.as_slice(), accessor);
            match requested.filter(|dtype| *dtype != DType::Generic) {
                Some(dtype) => {
                    let mut out = TypedBuffer::zeros(dtype, items.len());
                    traverse(&source, &mut out, f);
                    Ok(Data::Typed(out))
                }
                None => {
                    record_copy_bytes(items.len() * DType::Generic.size_of());
                    let mut out = vec![Value::Null; items.len()];
                    traverse(&source, out.as_mut_slice(), f);
                    Ok(Data::Value(Value::Array(out)))
                }
            }
        }
        Data::Typed(buffer) => Ok(Data::Typed(map_typed(f, buffer, requested, accessor))),
        Data::Matrix(matrix) => {
            let data = map_typed(f, matrix.data(), requested, None);
            Ok(Data::Matrix(MatrixBuffer::new(data, matrix.shape().to_vec())?))
        }
        Data::Value(_) => Ok(Data::from(f64::NAN)),
    }
}

fn map_typed<F>(
    f: &F,
    buffer: &TypedBuffer,
    requested: Option<DType>,
    accessor: Option<&Accessor>,
) -> TypedBuffer
where
    F: Fn(f64) -> f64,
{
    let mut out = TypedBuffer::zeros(output_dtype(buffer.dtype(), requested), buffer.len());
    traverse(&TypedElements::new(buffer, accessor), &mut out, f);
    out
}

fn write_in_place<F>(f: &F, input: &mut Data, accessor: Option<&Accessor>)
where
    F: Fn(f64) -> f64,
{
    match input {
        Data::Value(Value::Array(items)) => {
            traverse_in_place(&mut Elements::new(items.as_mut_slice(), accessor), f)
        }
        Data::Typed(buffer) => traverse_in_place(&mut TypedElements::new(buffer, accessor), f),
        Data::Matrix(matrix) => traverse_in_place(matrix.data_mut(), f),
        Data::Value(_) => {}
    }
}
