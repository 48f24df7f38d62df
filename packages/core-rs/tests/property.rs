use ekurtosis_core::{
    ekurtosis, transform, transform_with, DType, Data, MatrixBuffer, Options, TypedBuffer, Value,
};
use proptest::prelude::*;

fn matrix_from_vec(data: Vec<f64>, shape: Vec<usize>) -> MatrixBuffer {
    MatrixBuffer::from_vec(data, shape).expect("matrix shape mismatch")
}

prop_compose! {
    fn small_matrix()(rows in 0usize..5, cols in 1usize..5,
                      values in prop::collection::vec(-10f64..10f64, 1..=25))
                      -> MatrixBuffer {
        let data = values.into_iter().cycle().take(rows * cols).collect::<Vec<_>>();
        matrix_from_vec(data, vec![rows, cols])
    }
}

prop_compose! {
    fn rates()(values in prop::collection::vec(-5f64..5f64, 0..32)) -> Vec<f64> {
        values
    }
}

proptest! {
    #[test]
    fn formula_is_six_on_positive_rates(lambda in 1e-300f64..1e300) {
        prop_assert_eq!(ekurtosis(lambda), 6.0);
    }

    #[test]
    fn formula_is_nan_on_non_positive_rates(lambda in -1e300f64..=0.0) {
        prop_assert!(ekurtosis(lambda).is_nan());
    }

    #[test]
    fn sequence_length_is_preserved(values in rates()) {
        let mut input = Data::from(values.clone());
        let out = transform(&mut input, &Options::new()).expect("transform");
        let items = out.as_array().expect("plain sequence");
        prop_assert_eq!(items.len(), values.len());
        for (item, lambda) in items.iter().zip(values.iter()) {
            let result = item.as_f64().expect("number");
            if *lambda > 0.0 {
                prop_assert_eq!(result, 6.0);
            } else {
                prop_assert!(result.is_nan());
            }
        }
    }

    #[test]
    fn matrix_shape_is_preserved(matrix in small_matrix()) {
        let shape = matrix.shape().to_vec();
        let mut input = Data::from(matrix);
        let out = transform(&mut input, &Options::new()).expect("transform");
        let result = out.as_matrix().expect("matrix");
        prop_assert_eq!(result.shape(), shape.as_slice());
        prop_assert_eq!(result.dtype(), DType::Float64);
    }

    #[test]
    fn copying_never_mutates_the_input(values in rates()) {
        let mut input = Data::from(TypedBuffer::from_vec(values.clone()));
        let before = input.clone();
        let out = transform(&mut input, &Options::new()).expect("transform");
        prop_assert!(!out.is_in_place());
        drop(out);
        prop_assert_eq!(input, before);
    }

    #[test]
    fn in_place_returns_the_same_container(values in rates()) {
        let mut input = Data::from(values.clone());
        let address: *const Data = &input;
        let out = transform(&mut input, &Options::new().copy(false)).expect("transform");
        prop_assert!(std::ptr::eq(&*out, address));
        drop(out);
        let items = input.as_array().expect("plain sequence");
        for (item, lambda) in items.iter().zip(values.iter()) {
            let result = item.as_f64().expect("number");
            prop_assert_eq!(result.is_nan(), *lambda <= 0.0);
        }
    }

    #[test]
    fn int32_output_wraps_like_a_native_store(values in prop::collection::vec(-1e10f64..1e10, 0..32)) {
        let mut input = Data::from(values.clone());
        let options = Options::new().dtype(DType::Int32);
        let out = transform_with(|x| x, &mut input, &options).expect("transform");
        let buffer = out.as_typed().expect("typed output");
        prop_assert_eq!(buffer.bytes_per_element(), 4);
        let expected = values
            .iter()
            .map(|value| value.trunc() as i64 as i32)
            .collect::<Vec<_>>();
        prop_assert_eq!(buffer.as_slice::<i32>().expect("int32"), expected.as_slice());
    }

    #[test]
    fn uint8_output_wraps_modulo_256(values in prop::collection::vec(-1000f64..1000.0, 0..32)) {
        let mut input = Data::from(values.clone());
        let out = transform_with(|x| x, &mut input, &Options::new().dtype(DType::UInt8))
            .expect("transform");
        let expected = values
            .iter()
            .map(|value| value.trunc() as i64 as u8)
            .collect::<Vec<_>>();
        prop_assert_eq!(
            out.as_typed().and_then(|buffer| buffer.as_slice::<u8>()).expect("uint8"),
            expected.as_slice()
        );
    }

    #[test]
    fn accessor_sees_every_record(values in rates()) {
        let records = values
            .iter()
            .map(|lambda| Value::from(serde_json::json!({ "lambda": lambda })))
            .collect::<Vec<_>>();
        let mut input = Data::from(Value::from(records));
        let options = Options::new().accessor(|record: &Value, _index: usize| {
            record
                .as_object()
                .and_then(|map| map.get("lambda"))
                .and_then(Value::as_f64)
                .unwrap_or(f64::NAN)
        });
        let out = transform(&mut input, &options).expect("transform");
        let items = out.as_array().expect("plain sequence");
        prop_assert_eq!(items.len(), values.len());
        for (item, lambda) in items.iter().zip(values.iter()) {
            prop_assert_eq!(item.as_f64().expect("number").is_nan(), *lambda <= 0.0);
        }
    }
}
