use std::sync::Arc;

use indexmap::IndexMap;
use ndarray::{array, Array2, ArrayD, IxDyn};
use primo_object_json::{decode_graph, encode_graph, DecodeError, EncodeError, ObjectNode, ObjectValue};
use proptest::prelude::*;

fn roundtrip(value: &ObjectValue) -> ObjectValue {
    let text = encode_graph(value).unwrap_or_else(|e| panic!("encode failed for {value:?}: {e}"));
    decode_graph(&text).unwrap_or_else(|e| panic!("decode failed for {text}: {e}"))
}

#[test]
fn scalar_and_container_matrix() {
    let mut map = IndexMap::new();
    map.insert("k".to_owned(), ObjectValue::Int(1));
    map.insert("class".to_owned(), ObjectValue::Str("not a tag".to_owned()));

    let values = vec![
        ObjectValue::Null,
        ObjectValue::Bool(true),
        ObjectValue::Bool(false),
        ObjectValue::Int(0),
        ObjectValue::Int(-42),
        ObjectValue::Int(i64::MAX),
        ObjectValue::Float(0.5),
        ObjectValue::Float(-123.125),
        ObjectValue::Str(String::new()),
        ObjectValue::Str("asdf asfd 😱 asdf".to_owned()),
        ObjectValue::Seq(vec![]),
        ObjectValue::Seq(vec![
            ObjectValue::Int(1),
            ObjectValue::Str("a".to_owned()),
            ObjectValue::Null,
        ]),
        ObjectValue::Map(map),
        ObjectNode::new("Empty").into(),
        ObjectNode::new("Trajectory")
            .with("tau", 0.5)
            .with("n_dims", 2i64)
            .with("ys", array![[0.0, 0.0], [1.0, 0.5]])
            .into(),
    ];

    for value in values {
        assert_eq!(roundtrip(&value), value);
    }
}

#[test]
fn arrays_keep_their_shape() {
    let one_d: ArrayD<f64> = array![1.0, 2.0, 3.0].into_dyn();
    let two_d: ArrayD<f64> = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
    let three_d = ArrayD::from_shape_vec(IxDyn(&[2, 2, 2]), (0..8).map(f64::from).collect())
        .unwrap();

    for arr in [one_d, two_d, three_d] {
        let shape = arr.shape().to_vec();
        match roundtrip(&ObjectValue::Array(arr.clone())) {
            ObjectValue::Array(back) => {
                assert_eq!(back.shape(), &shape[..]);
                assert_eq!(back, arr);
            }
            other => panic!("array decoded as {}", other.kind()),
        }
    }
}

#[test]
fn floats_and_ints_stay_distinct() {
    assert_eq!(roundtrip(&ObjectValue::Float(2.0)), ObjectValue::Float(2.0));
    assert_eq!(roundtrip(&ObjectValue::Int(2)), ObjectValue::Int(2));
}

#[test]
fn shared_nodes_encode_once_and_keep_identity() {
    let params = Arc::new(ObjectNode::new("ModelParameters").with("w", array![1.0, 2.0]));
    let root: ObjectValue = ObjectNode::new("Dmp")
        .with("goal_system", params.clone())
        .with("gating_system", params)
        .into();

    let text = encode_graph(&root).unwrap();
    assert_eq!(text.matches("\"$id\"").count(), 1);
    assert_eq!(text.matches("\"$ref\"").count(), 1);
    assert_eq!(text.matches("ModelParameters").count(), 1);

    let back = decode_graph(&text).unwrap();
    assert_eq!(back, root);

    let node = back.as_object().expect("root should be an object");
    let first = node.object_field("goal_system").unwrap();
    let second = node.object_field("gating_system").unwrap();
    assert!(Arc::ptr_eq(first, second));
}

#[test]
fn distinct_but_equal_nodes_stay_distinct() {
    let root: ObjectValue = ObjectNode::new("Pair")
        .with("a", ObjectNode::new("P").with("w", 1.0))
        .with("b", ObjectNode::new("P").with("w", 1.0))
        .into();

    let text = encode_graph(&root).unwrap();
    assert!(!text.contains("$ref"));

    let back = decode_graph(&text).unwrap();
    let node = back.as_object().unwrap();
    let a = node.object_field("a").unwrap();
    let b = node.object_field("b").unwrap();
    assert!(!Arc::ptr_eq(a, b));
}

#[test]
fn encoding_is_deterministic() {
    let shared = Arc::new(ObjectNode::new("P").with("w", array![1.0, 2.0]));
    let root: ObjectValue = ObjectNode::new("T")
        .with("a", shared.clone())
        .with("b", shared)
        .with("tau", 0.25)
        .into();

    let first = encode_graph(&root).unwrap();
    let second = encode_graph(&root).unwrap();
    assert_eq!(first, second);
}

#[test]
fn non_finite_floats_are_rejected() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let scalar = ObjectValue::Float(bad);
        assert!(matches!(
            encode_graph(&scalar),
            Err(EncodeError::NonFiniteFloat(_))
        ));

        let in_array = ObjectValue::Array(array![1.0, bad].into_dyn());
        assert!(matches!(
            encode_graph(&in_array),
            Err(EncodeError::NonFiniteFloat(_))
        ));
    }
}

#[test]
fn reserved_field_names_are_rejected() {
    let root: ObjectValue = ObjectNode::new("T").with("$class", 1i64).into();
    assert!(matches!(
        encode_graph(&root),
        Err(EncodeError::ReservedKey(key)) if key == "$class"
    ));
}

#[test]
fn decode_error_matrix() {
    // Garbage text.
    assert!(matches!(
        decode_graph("this is not json"),
        Err(DecodeError::Json(_))
    ));

    // Reference to a node that was never defined.
    assert!(matches!(
        decode_graph(r#"{"$class":"T","x":{"$ref":7}}"#),
        Err(DecodeError::UnresolvedRef(7))
    ));

    // Array payload shorter than its shape.
    assert!(matches!(
        decode_graph(r#"{"$ndarray":[2,2],"$data":[1.0,2.0,3.0]}"#),
        Err(DecodeError::ShapeMismatch { actual: 3, .. })
    ));

    // Two nodes claiming the same id.
    let text = r#"{"$class":"T","a":{"$class":"P","$id":0},"b":{"$class":"P","$id":0}}"#;
    assert!(matches!(
        decode_graph(text),
        Err(DecodeError::DuplicateId(0))
    ));

    // Marker keys that make no sense.
    assert!(matches!(
        decode_graph(r#"{"$ref":"zero"}"#),
        Err(DecodeError::BadMarker(_))
    ));
    assert!(matches!(
        decode_graph(r#"{"$class":"T","$bogus":1}"#),
        Err(DecodeError::BadMarker(_))
    ));
}

fn leaf_values() -> impl Strategy<Value = ObjectValue> {
    prop_oneof![
        Just(ObjectValue::Null),
        any::<bool>().prop_map(ObjectValue::Bool),
        any::<i64>().prop_map(ObjectValue::Int),
        (-1.0e9..1.0e9f64).prop_map(ObjectValue::Float),
        "[a-z ]{0,12}".prop_map(ObjectValue::Str),
        (1usize..4, 1usize..4).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(-100.0..100.0f64, rows * cols).prop_map(move |data| {
                ObjectValue::Array(
                    Array2::from_shape_vec((rows, cols), data)
                        .expect("shape matches data length")
                        .into_dyn(),
                )
            })
        }),
    ]
}

fn graphs() -> impl Strategy<Value = ObjectValue> {
    leaf_values().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(ObjectValue::Seq),
            prop::collection::btree_map("[a-z]{1,6}", inner.clone(), 0..4)
                .prop_map(|map| ObjectValue::Map(map.into_iter().collect())),
            ("[A-Z][a-zA-Z]{0,10}", prop::collection::btree_map("[a-z_]{1,6}", inner, 0..4))
                .prop_map(|(class, fields)| {
                    let mut node = ObjectNode::new(class);
                    for (name, value) in fields {
                        node.set(name, value);
                    }
                    node.into()
                }),
        ]
    })
}

proptest! {
    #[test]
    fn any_finite_graph_roundtrips(root in graphs()) {
        let text = encode_graph(&root).unwrap();
        let back = decode_graph(&text).unwrap();
        prop_assert_eq!(back, root);
    }
}
