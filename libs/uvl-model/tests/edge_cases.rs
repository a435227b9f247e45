use uvl_model::document::UvlDocument;
use uvl_model::{
    formula_to_model, parse_feature_model, serialize_feature_model, DiagnosticKind, Feature,
    FeatureModel, Formula, Severity, UvlError,
};

fn document(json: &str) -> UvlDocument {
    serde_json::from_str(json).unwrap()
}

fn has_error(error: &UvlError, kind: DiagnosticKind) -> bool {
    error
        .diagnostics()
        .iter()
        .any(|d| d.kind == kind && d.severity == Severity::Error)
}

#[test]
fn malformed_bound_is_a_domain_error() {
    let doc = document(r#"{ "root": { "name": "Root", "lowerBound": "abc" } }"#);
    let error = parse_feature_model(&doc).unwrap_err();
    assert!(has_error(&error, DiagnosticKind::Domain));
}

#[test]
fn unknown_feature_type_is_a_domain_error() {
    let doc = document(r#"{ "root": { "name": "Root", "type": "Complex", "lowerBound": "1" } }"#);
    let error = parse_feature_model(&doc).unwrap_err();
    assert!(has_error(&error, DiagnosticKind::Domain));
}

#[test]
fn unknown_group_kind_is_a_structural_error() {
    let doc = document(
        r#"{
            "root": {
                "name": "Root",
                "lowerBound": "1",
                "groups": [{ "type": "xor", "features": [{ "name": "A" }] }]
            }
        }"#,
    );
    let error = parse_feature_model(&doc).unwrap_err();
    assert!(has_error(&error, DiagnosticKind::Structural));
}

#[test]
fn duplicate_feature_names_are_rejected() {
    let doc = document(
        r#"{
            "root": {
                "name": "Root",
                "lowerBound": "1",
                "groups": [{
                    "type": "optional",
                    "features": [{ "name": "Twin" }, { "name": "Twin" }]
                }]
            }
        }"#,
    );
    let error = parse_feature_model(&doc).unwrap_err();
    assert!(has_error(&error, DiagnosticKind::Structural));
}

#[test]
fn blank_feature_name_is_rejected() {
    let doc = document(r#"{ "root": { "name": "  " } }"#);
    let error = parse_feature_model(&doc).unwrap_err();
    assert!(has_error(&error, DiagnosticKind::Structural));
}

#[test]
fn cardinality_group_without_lower_bound_is_rejected() {
    let doc = document(
        r#"{
            "root": {
                "name": "Root",
                "lowerBound": "1",
                "groups": [{ "type": "cardinality", "features": [{ "name": "A" }] }]
            }
        }"#,
    );
    let error = parse_feature_model(&doc).unwrap_err();
    assert!(has_error(&error, DiagnosticKind::Cardinality));
}

#[test]
fn non_boolean_abstract_attribute_is_rejected() {
    let doc = document(
        r#"{ "root": { "name": "Root", "lowerBound": "1", "attributes": { "abstract": "yes" } } }"#,
    );
    let error = parse_feature_model(&doc).unwrap_err();
    assert!(has_error(&error, DiagnosticKind::Domain));
}

#[test]
fn unparseable_constraint_is_rejected() {
    let doc = document(
        r#"{ "root": { "name": "Root", "lowerBound": "1" }, "constraints": ["A &"] }"#,
    );
    let error = parse_feature_model(&doc).unwrap_err();
    assert!(has_error(&error, DiagnosticKind::Structural));
}

#[test]
fn multi_root_serialization_warns_once_and_keeps_the_first_root() {
    let mut model = FeatureModel::new();
    let first = model.add_feature(Feature::new("First")).unwrap();
    let second = model.add_feature(Feature::new("Second")).unwrap();
    let first_node = model.add_root(first);
    let second_node = model.add_root(second);
    model.node_mut(first_node).set_mandatory();
    model.node_mut(second_node).set_mandatory();

    let translation = serialize_feature_model(&model).unwrap();
    let warnings: Vec<_> = translation
        .warnings
        .iter()
        .filter(|d| d.kind == DiagnosticKind::MultiRoot)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, Severity::Warning);
    assert_eq!(translation.value.document.root.name, "First");
}

#[test]
fn empty_model_cannot_be_serialized() {
    let model = FeatureModel::new();
    let error = serialize_feature_model(&model).unwrap_err();
    assert!(has_error(&error, DiagnosticKind::Structural));
}

#[test]
fn nested_namespaces_cannot_be_serialized() {
    let mut model = FeatureModel::new();
    let feature = model.add_feature(Feature::new("a::b::c")).unwrap();
    let node = model.add_root(feature);
    model.node_mut(node).set_mandatory();

    let error = serialize_feature_model(&model).unwrap_err();
    assert!(has_error(&error, DiagnosticKind::Structural));
}

#[test]
fn quantified_constraints_cannot_be_serialized() {
    let mut model = FeatureModel::new();
    let feature = model.add_feature(Feature::new("Root")).unwrap();
    let node = model.add_root(feature);
    model.node_mut(node).set_mandatory();
    model.add_constraint(Formula::AtLeast {
        bound: 2,
        children: vec![Formula::literal("Root")],
    });

    let error = serialize_feature_model(&model).unwrap_err();
    assert!(has_error(&error, DiagnosticKind::Structural));
}

#[test]
fn variable_named_like_the_synthetic_root_collides() {
    let formula = Formula::And(vec![Formula::literal("Formula"), Formula::literal("A")]);
    let error = formula_to_model(&formula).unwrap_err();
    assert!(has_error(&error, DiagnosticKind::Structural));
}

#[test]
fn lifting_a_formula_builds_one_optional_variable_per_name() {
    let formula = Formula::implies(Formula::literal("A"), Formula::literal("B"));
    let model = formula_to_model(&formula).unwrap().into_value();
    assert!(model.feature_id("Formula").is_some());
    assert!(model.feature_id("A").is_some());
    assert!(model.feature_id("B").is_some());
    assert_eq!(model.constraints().len(), 1);
}
