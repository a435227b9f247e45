use std::collections::BTreeMap;
use uvl_model::document::UvlDocument;
use uvl_model::{
    parse_feature_model, serialize_feature_model, Cardinality, FeatureModel, Formula,
};

fn document(json: &str) -> UvlDocument {
    serde_json::from_str(json).unwrap()
}

fn reparse(model: &FeatureModel) -> FeatureModel {
    let exported = serialize_feature_model(model).unwrap().into_value();
    parse_feature_model(&exported.document).unwrap().into_value()
}

fn group_ranges(model: &FeatureModel, feature: &str) -> Vec<Cardinality> {
    let id = model.feature_id(feature).unwrap();
    let node = model
        .roots()
        .iter()
        .copied()
        .flat_map(|root| collect(model, root))
        .find(|&node| model.node(node).feature() == id)
        .unwrap();
    model
        .node(node)
        .groups()
        .iter()
        .map(|group| group.range)
        .collect()
}

fn collect(model: &FeatureModel, root: uvl_model::NodeId) -> Vec<uvl_model::NodeId> {
    let mut nodes = vec![root];
    let mut cursor = 0;
    while cursor < nodes.len() {
        let node = nodes[cursor];
        nodes.extend(model.node(node).children().iter().copied());
        cursor += 1;
    }
    nodes
}

#[test]
fn and_groups_survive_a_round_trip() {
    let doc = document(
        r#"{
            "root": {
                "name": "Root",
                "lowerBound": "1",
                "groups": [
                    { "type": "mandatory", "features": [{ "name": "M" }] },
                    { "type": "optional", "features": [{ "name": "O" }] }
                ]
            }
        }"#,
    );
    let first = parse_feature_model(&doc).unwrap().into_value();
    let second = reparse(&first);
    assert_eq!(group_ranges(&first, "Root"), group_ranges(&second, "Root"));
    for name in ["Root", "M", "O"] {
        assert!(second.feature_id(name).is_some(), "{} lost", name);
    }
}

#[test]
fn or_and_alternative_groups_survive_a_round_trip() {
    let doc = document(
        r#"{
            "root": {
                "name": "Root",
                "lowerBound": "1",
                "groups": [
                    { "type": "or", "features": [{ "name": "A" }, { "name": "B" }] },
                    { "type": "alternative", "features": [{ "name": "X" }, { "name": "Y" }] }
                ]
            }
        }"#,
    );
    let first = parse_feature_model(&doc).unwrap().into_value();
    let second = reparse(&first);
    assert_eq!(
        group_ranges(&second, "Root"),
        vec![Cardinality::at_least(1), Cardinality::exactly(1)]
    );
}

#[test]
fn cardinality_groups_keep_their_bounds() {
    let doc = document(
        r#"{
            "root": {
                "name": "Root",
                "lowerBound": "1",
                "groups": [{
                    "type": "cardinality",
                    "lowerBound": "2",
                    "upperBound": "4",
                    "features": [
                        { "name": "A" }, { "name": "B" },
                        { "name": "C" }, { "name": "D" }
                    ]
                }]
            }
        }"#,
    );
    let first = parse_feature_model(&doc).unwrap().into_value();
    let second = reparse(&first);
    assert_eq!(group_ranges(&second, "Root"), vec![Cardinality::of(2, 4)]);
}

#[test]
fn namespaces_and_types_survive_a_round_trip() {
    let doc = document(
        r#"{
            "root": {
                "namespace": "fleet",
                "name": "Car",
                "lowerBound": "1",
                "groups": [{
                    "type": "optional",
                    "features": [{ "name": "Seats", "type": "Integer" }]
                }]
            }
        }"#,
    );
    let first = parse_feature_model(&doc).unwrap().into_value();
    let second = reparse(&first);
    let id = second.feature_id("fleet::Car").unwrap();
    assert_eq!(second.feature(id).name, "fleet::Car");
    let seats = second.feature_id("Seats").unwrap();
    assert_eq!(second.feature(seats).feature_type, uvl_model::FeatureType::Integer);
}

#[test]
fn abstract_flag_survives_a_round_trip() {
    let doc = document(
        r#"{ "root": { "name": "Root", "lowerBound": "1", "attributes": { "abstract": true } } }"#,
    );
    let first = parse_feature_model(&doc).unwrap().into_value();
    let second = reparse(&first);
    assert!(second.feature(second.feature_id("Root").unwrap()).is_abstract);
}

#[test]
fn constraint_conversion_preserves_truth_tables() {
    let formula = Formula::Or(vec![
        Formula::And(vec![Formula::literal("A"), Formula::literal("B")]),
        Formula::not(Formula::literal("C")),
    ]);
    let constraint = uvl_model::convert::formula_to_constraint(&formula).unwrap();
    let reparsed = uvl_model::constraint_parser::parse_constraint(&constraint.to_string()).unwrap();
    let back = uvl_model::convert::constraint_to_formula(&reparsed);

    for bits in 0..8u8 {
        let mut assignment = BTreeMap::new();
        assignment.insert("A".to_string(), bits & 1 != 0);
        assignment.insert("B".to_string(), bits & 2 != 0);
        assignment.insert("C".to_string(), bits & 4 != 0);
        assert_eq!(
            formula.evaluate(&assignment),
            back.evaluate(&assignment),
            "diverged on {:?}",
            assignment
        );
    }
}

#[test]
fn documents_round_trip_through_json() {
    let doc = document(
        r#"{
            "root": {
                "name": "Root",
                "lowerBound": "1",
                "groups": [{ "type": "or", "features": [{ "name": "A" }, { "name": "B" }] }]
            },
            "constraints": ["A => B"]
        }"#,
    );
    let json = serde_json::to_string(&doc).unwrap();
    let back: UvlDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(doc, back);
}
