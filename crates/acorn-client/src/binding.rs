//! Parameter type classification

use acorn_core::{AcornError, Result, TypeTag, Value};

/// Map one argument to its wire type tag.
///
/// Ordered decision list: integers and booleans share the integer tag,
/// floating point maps to the double tag, strings to the string tag. NULL
/// arguments borrow the integer tag as a placeholder; the wire value
/// transmitted is still NULL and the receiving parameter tolerates any
/// type. Structured values have no tag and fail here, before any driver
/// round trip, naming the argument's position and observed kind.
pub fn classify(index: usize, value: &Value) -> Result<TypeTag> {
    match value {
        Value::Int64(_) | Value::Bool(_) => Ok(TypeTag::Int),
        Value::Float64(_) => Ok(TypeTag::Double),
        Value::String(_) => Ok(TypeTag::Str),
        Value::Null => Ok(TypeTag::Int),
        Value::Bytes(_) | Value::Json(_) | Value::Array(_) => Err(AcornError::UnsupportedType {
            index,
            kind: value.kind(),
        }),
    }
}

/// Concatenated tag string for a full argument list, in argument order.
/// Fails on the first unsupported argument.
pub fn type_tags(arguments: &[Value]) -> Result<String> {
    arguments
        .iter()
        .enumerate()
        .map(|(index, value)| classify(index, value).map(TypeTag::as_char))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn supported_kinds_classify_deterministically() {
        assert_eq!(classify(0, &Value::Int64(1)).unwrap(), TypeTag::Int);
        assert_eq!(classify(0, &Value::Bool(false)).unwrap(), TypeTag::Int);
        assert_eq!(classify(0, &Value::Float64(0.5)).unwrap(), TypeTag::Double);
        assert_eq!(classify(0, &Value::String("x".into())).unwrap(), TypeTag::Str);
        assert_eq!(classify(0, &Value::Null).unwrap(), TypeTag::Int);
    }

    #[test]
    fn unsupported_kind_reports_index_and_kind() {
        let err = classify(3, &Value::Array(vec![])).unwrap_err();
        match err {
            AcornError::UnsupportedType { index, kind } => {
                assert_eq!(index, 3);
                assert_eq!(kind, "array");
            }
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
    }

    #[test]
    fn tags_concatenate_in_argument_order() {
        let args = vec![
            Value::Int64(7),
            Value::Null,
            Value::Float64(1.5),
            Value::String("ada".into()),
            Value::Bool(true),
        ];
        assert_eq!(type_tags(&args).unwrap(), "iidsi");
        assert_eq!(type_tags(&[]).unwrap(), "");
    }

    #[test]
    fn first_unsupported_argument_wins() {
        let args = vec![
            Value::Int64(1),
            Value::Bytes(vec![0xff]),
            Value::Array(vec![]),
        ];
        let err = type_tags(&args).unwrap_err();
        assert!(matches!(
            err,
            AcornError::UnsupportedType { index: 1, kind: "bytes" }
        ));
    }
}
