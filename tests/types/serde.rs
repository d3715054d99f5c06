use flow_rail::{Unit, ValueBox};

#[test]
fn value_box_is_transparent() {
    let json = serde_json::to_string(&ValueBox::new(vec!["a", "b"])).unwrap();
    assert_eq!(json, r#"["a","b"]"#);

    let back: ValueBox<u32> = serde_json::from_str("17").unwrap();
    assert_eq!(back.into_inner(), 17);
}

#[test]
fn unit_serializes_as_null() {
    assert_eq!(serde_json::to_string(&Unit).unwrap(), "null");
    let _: Unit = serde_json::from_str("null").unwrap();
}
