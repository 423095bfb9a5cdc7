use selkie_codec::{CellCodec, Codec, CodecError, CodecRegistry, CodecValue, Element};
use selkie_model::{GraphDataModel, Style, StyleValue, Stylesheet};

fn decode(xml: &str, model: &mut GraphDataModel) -> Result<(), CodecError> {
    let registry = CodecRegistry::new();
    let element = Element::parse(xml)?;
    Codec::new(&registry).decode(&element, model)
}

#[test]
fn forward_references_resolve() {
    // The edge appears before both of its terminals and before its parent's
    // own child list is complete; a child even precedes its parent.
    let xml = r#"
<GraphDataModel>
  <root>
    <Cell id="0" />
    <Cell id="1" parent="0" />
    <Cell id="e1" edge="1" parent="1" source="v1" target="v2" />
    <Cell id="inner" vertex="1" parent="g" />
    <Cell id="g" vertex="1" parent="1" />
    <Cell id="v1" vertex="1" parent="1" />
    <Cell id="v2" vertex="1" parent="1" />
  </root>
</GraphDataModel>"#;

    let mut model = GraphDataModel::new();
    decode(xml, &mut model).unwrap();

    assert_eq!(model.terminal("e1", true), Some("v1"));
    assert_eq!(model.terminal("e1", false), Some("v2"));
    assert_eq!(model.parent("inner"), Some("g"));
    assert_eq!(model.parent("g"), Some("1"));
}

#[test]
fn unresolvable_parent_drops_the_cell_but_not_the_document() {
    let xml = r#"
<GraphDataModel>
  <root>
    <Cell id="0" />
    <Cell id="1" parent="0" />
    <Cell id="ok" vertex="1" parent="1" />
    <Cell id="orphan" vertex="1" parent="nope" />
  </root>
</GraphDataModel>"#;

    let mut model = GraphDataModel::new();
    decode(xml, &mut model).unwrap();
    assert!(model.contains("ok"));
    assert!(!model.contains("orphan"));
}

#[test]
fn unresolvable_terminal_is_left_unset() {
    let xml = r#"
<GraphDataModel>
  <root>
    <Cell id="0" />
    <Cell id="1" parent="0" />
    <Cell id="v1" vertex="1" parent="1" />
    <Cell id="e1" edge="1" parent="1" source="v1" target="ghost" />
  </root>
</GraphDataModel>"#;

    let mut model = GraphDataModel::new();
    decode(xml, &mut model).unwrap();
    assert!(model.contains("e1"));
    assert_eq!(model.terminal("e1", true), Some("v1"));
    assert_eq!(model.terminal("e1", false), None);
}

#[test]
fn typed_boolean_attributes_decode_as_booleans() {
    // Historical writers emit "1"/"0"; hand-written documents may use
    // "true"/"false". Both must come back as real booleans on typed fields.
    let xml = r#"
<GraphDataModel>
  <root>
    <Cell id="0" />
    <Cell id="1" parent="0" />
    <Cell id="v1" vertex="1" visible="0" connectable="false" parent="1">
      <Geometry _x="10" _y="10" relative="1" as="geometry" />
    </Cell>
  </root>
</GraphDataModel>"#;

    let mut model = GraphDataModel::new();
    decode(xml, &mut model).unwrap();
    let cell = model.cell("v1").unwrap();
    assert!(cell.is_vertex());
    assert!(!cell.is_visible());
    assert!(!cell.is_connectable());
    assert!(model.geometry("v1").is_some_and(|g| g.relative));
}

#[test]
fn untyped_style_scalars_keep_the_wire_ambiguity() {
    // Inside a style bag there is no schema, so "1" parses as the number 1
    // even if the writer meant a boolean.
    let xml = r#"
<GraphDataModel>
  <root>
    <Cell id="0" />
    <Cell id="1" parent="0" />
    <Cell id="v1" vertex="1" parent="1">
      <Object rounded="1" fillColor="red" as="style" />
    </Cell>
  </root>
</GraphDataModel>"#;

    let mut model = GraphDataModel::new();
    decode(xml, &mut model).unwrap();
    let style = model.style("v1").unwrap();
    assert_eq!(style.get("rounded"), Some(&StyleValue::Number(1.0)));
    assert_eq!(
        style.get("fillColor"),
        Some(&StyleValue::String("red".to_string()))
    );
}

#[test]
fn malformed_numeric_attribute_is_a_decode_error() {
    let xml = r#"
<GraphDataModel>
  <root>
    <Cell id="0" />
    <Cell id="1" parent="0" />
    <Cell id="v1" vertex="1" parent="1">
      <Geometry _x="wide" as="geometry" />
    </Cell>
  </root>
</GraphDataModel>"#;

    let mut model = GraphDataModel::new();
    let err = decode(xml, &mut model).unwrap_err();
    assert!(
        matches!(err, CodecError::InvalidAttribute { ref attribute, .. } if attribute == "_x"),
        "got: {err}"
    );
}

#[test]
fn malformed_boolean_attribute_is_a_decode_error() {
    let xml = r#"
<GraphDataModel>
  <root>
    <Cell id="0" />
    <Cell id="1" parent="0" />
    <Cell id="v1" vertex="yes" parent="1" />
  </root>
</GraphDataModel>"#;

    let mut model = GraphDataModel::new();
    let err = decode(xml, &mut model).unwrap_err();
    assert!(
        matches!(err, CodecError::InvalidAttribute { ref attribute, .. } if attribute == "vertex"),
        "got: {err}"
    );
}

#[test]
fn model_document_without_a_root_child_is_rejected() {
    let mut model = GraphDataModel::new();
    let err = decode("<GraphDataModel />", &mut model).unwrap_err();
    assert!(matches!(err, CodecError::MissingChild { .. }), "got: {err}");
}

#[test]
fn non_model_document_is_rejected_by_model_decode() {
    let mut model = GraphDataModel::new();
    let err = decode("<Wrapper />", &mut model).unwrap_err();
    assert!(
        matches!(err, CodecError::UnexpectedElement { .. }),
        "got: {err}"
    );
}

#[test]
fn invalid_xml_reports_a_parse_error() {
    let mut model = GraphDataModel::new();
    let err = decode("<GraphDataModel><root>", &mut model).unwrap_err();
    assert!(matches!(err, CodecError::Xml(_)), "got: {err}");
}

#[test]
fn unknown_tags_fall_back_to_generic_attribute_bags() {
    let registry = CodecRegistry::new();
    let element = Element::parse(r#"<FancyShape name="star" spikes="5" />"#).unwrap();
    let value = Codec::new(&registry).decode_value(&element).unwrap();

    let CodecValue::Object(bag) = value else {
        panic!("expected an object bag, got {value:?}");
    };
    assert_eq!(bag.tag, "FancyShape");
    assert_eq!(
        bag.attrs.get("name"),
        Some(&StyleValue::String("star".to_string()))
    );
    assert_eq!(bag.attrs.get("spikes"), Some(&StyleValue::Number(5.0)));
}

#[test]
fn excluded_fields_stay_out_of_the_output() {
    let mut registry = CodecRegistry::new();
    registry.register(Box::new(CellCodec::new().with_exclude(["value"])));

    let mut model = GraphDataModel::new();
    model
        .add("1", selkie_model::Cell::vertex("v1", "secret"), None)
        .unwrap();

    let element = Codec::new(&registry).encode(&model).unwrap();
    let xml = element.to_xml(false);
    assert!(!xml.contains("secret"), "got: {xml}");
    assert!(xml.contains("id=\"v1\""), "got: {xml}");
}

#[test]
fn stylesheet_round_trips_through_its_element_form() {
    let mut sheet = Stylesheet::new();
    let mut rounded = Style::new();
    rounded.set("rounded", true).set("arcSize", 20);
    sheet.put_cell_style("rounded", rounded);

    let registry = CodecRegistry::new();
    let codec = Codec::new(&registry);
    let element = codec
        .encode_value(&CodecValue::Stylesheet(Box::new(sheet)))
        .unwrap();
    assert_eq!(element.tag, "Stylesheet");

    let xml = element.to_xml(true);
    assert!(
        xml.contains("<add as=\"defaultVertexStyle\">"),
        "got: {xml}"
    );
    assert!(xml.contains("<add as=\"rounded\">"), "got: {xml}");
    assert!(
        xml.contains("<add as=\"arcSize\" value=\"20\" />"),
        "got: {xml}"
    );

    let reparsed = Element::parse(&xml).unwrap();
    let value = codec.decode_value(&reparsed).unwrap();
    let CodecValue::Stylesheet(decoded) = value else {
        panic!("expected a stylesheet, got {value:?}");
    };
    assert_eq!(
        decoded.style("rounded").and_then(|s| s.get("arcSize")),
        Some(&StyleValue::Number(20.0))
    );
    assert_eq!(
        decoded.default_vertex_style().get("fillColor"),
        Some(&StyleValue::String("#C3D9FF".to_string()))
    );
}

#[test]
fn decode_failure_keeps_the_transaction_machinery_balanced() {
    let mut model = GraphDataModel::new();
    let xml = r#"
<GraphDataModel>
  <root>
    <Cell id="0" />
    <Cell id="bad" vertex="1" parent="0">
      <Geometry _x="oops" as="geometry" />
    </Cell>
  </root>
</GraphDataModel>"#;
    assert!(decode(xml, &mut model).is_err());
    assert_eq!(model.update_level(), 0);

    // The model stays usable after the failed import.
    model.add("1", selkie_model::Cell::new("x"), None).unwrap();
}
