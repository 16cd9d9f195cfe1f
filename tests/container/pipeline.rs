use crate::common::{build_data, build_data_with, person_form, person_with_phone_numbers};
use form_rail::container::{ContainerSchema, FormContainer};
use form_rail::engine::{FormEngine, FormSetEngine};
use form_rail::form_data;
use form_rail::forms::MANAGEMENT_FORM_MESSAGE;
use serde_json::json;

#[test]
fn is_bound_follows_the_payload() {
    let schema = person_with_phone_numbers();

    assert!(!FormContainer::unbound(&schema).is_bound());
    assert!(FormContainer::new(&schema, build_data()).is_bound());
    assert!(FormContainer::new(&schema, form_data! {}).is_bound());
}

#[test]
fn valid_payload_is_valid() {
    let mut container = FormContainer::new(&person_with_phone_numbers(), build_data());
    assert!(container.is_valid());
}

#[test]
fn missing_required_field_invalidates_the_container() {
    let data = build_data_with(&[], &["person-first_name"]);
    let mut container = FormContainer::new(&person_with_phone_numbers(), data);
    assert!(!container.is_valid());
}

#[test]
fn invalid_record_invalidates_the_container() {
    let data = build_data_with(&[("phone_numbers-1-phone_number", "2")], &[]);
    let mut container = FormContainer::new(&person_with_phone_numbers(), data);
    assert!(!container.is_valid());
}

#[test]
fn errors_merge_form_and_formset_shapes() {
    let data = build_data_with(&[("phone_numbers-1-phone_number", "2")], &["person-first_name"]);
    let mut container = FormContainer::new(&person_with_phone_numbers(), data);

    assert_eq!(
        container.errors().to_value().unwrap(),
        json!({
            "person": { "first_name": ["This field is required."] },
            "phone_numbers": [
                {},
                { "phone_number": ["Ensure this value has at least 2 characters (it has 1)."] },
            ],
        })
    );
}

#[test]
fn errors_as_json_is_uniform() {
    let data = build_data_with(&[("phone_numbers-1-phone_number", "2")], &["person-first_name"]);
    let mut container = FormContainer::new(&person_with_phone_numbers(), data);

    let raw = container.errors().as_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert!(parsed["person"]["first_name"].is_array());
    assert!(parsed["phone_numbers"].is_array());
    assert_eq!(parsed["phone_numbers"][0], json!({}));
    assert_eq!(
        parsed["phone_numbers"][1]["phone_number"][0],
        "Ensure this value has at least 2 characters (it has 1)."
    );
}

#[test]
fn form_branch_appears_only_with_errors() {
    let mut container = FormContainer::new(&person_with_phone_numbers(), build_data());

    let errors = container.errors();
    assert!(!errors.contains_key("person"));
    assert_eq!(errors.keys().collect::<Vec<_>>(), ["phone_numbers"]);
    assert_eq!(errors.formset("phone_numbers").unwrap().len(), 2);
}

#[test]
fn cleaned_data_holds_every_valid_subform() {
    let mut container = FormContainer::new(&person_with_phone_numbers(), build_data());

    assert!(container.is_valid());
    assert_eq!(
        container.cleaned_data().unwrap().to_value().unwrap(),
        json!({
            "person": { "first_name": "John", "last_name": "Smith" },
            "phone_numbers": [{ "phone_number": "12345" }, { "phone_number": "23456" }],
        })
    );
}

#[test]
fn cleaned_data_skips_invalid_subforms() {
    let data = build_data_with(&[], &["person-first_name"]);
    let mut container = FormContainer::new(&person_with_phone_numbers(), data);

    let cleaned = container.cleaned_data().unwrap();
    assert!(!cleaned.contains_key("person"));
    assert_eq!(cleaned.records("phone_numbers").unwrap().len(), 2);
}

#[test]
fn cleaned_data_is_populated_by_any_accessor() {
    let mut container = FormContainer::new(&person_with_phone_numbers(), build_data());
    assert_eq!(container.cleaned_data().unwrap().len(), 2);

    let mut container = FormContainer::new(&person_with_phone_numbers(), build_data());
    container.errors();
    assert_eq!(container.cleaned_data().unwrap().len(), 2);
}

#[test]
fn unbound_container_is_never_valid() {
    let mut container = FormContainer::unbound(&person_with_phone_numbers());

    assert!(container.errors().is_empty());
    assert!(!container.is_valid());
    assert!(container.cleaned_data().is_none());
}

#[test]
fn empty_schema_is_trivially_valid() {
    let schema = ContainerSchema::builder().build().unwrap();
    let mut container = FormContainer::new(&schema, form_data! { "anything" => "goes" });

    assert!(container.is_valid());
    assert!(container.errors().is_empty());
    assert!(container.cleaned_data().unwrap().is_empty());
}

#[test]
fn formset_without_records_is_valid() {
    let data = build_data_with(
        &[("phone_numbers-TOTAL_FORMS", "0"), ("phone_numbers-INITIAL_FORMS", "0")],
        &[],
    );
    let mut container = FormContainer::new(&person_with_phone_numbers(), data);

    assert!(container.is_valid());
    assert_eq!(container.errors().formset("phone_numbers").unwrap().len(), 0);
    assert_eq!(container.cleaned_data().unwrap().records("phone_numbers").unwrap().len(), 0);
}

#[test]
fn formset_set_level_errors_stay_inside_the_formset() {
    let data = build_data_with(&[], &["phone_numbers-TOTAL_FORMS", "phone_numbers-INITIAL_FORMS"]);
    let mut container = FormContainer::new(&person_with_phone_numbers(), data);

    assert!(container.is_valid());
    assert!(!container.cleaned_data().unwrap().contains_key("phone_numbers"));

    let formset = container.subform("phone_numbers").and_then(|s| s.as_formset()).unwrap();
    assert_eq!(formset.non_form_errors(), &[MANAGEMENT_FORM_MESSAGE]);
}

#[test]
fn untouched_extra_record_cleans_to_an_empty_record() {
    let data = build_data_with(&[], &["phone_numbers-1-phone_number"]);
    let mut container = FormContainer::new(&person_with_phone_numbers(), data);

    assert!(container.is_valid());
    assert_eq!(
        container.cleaned_data().unwrap().to_value().unwrap()["phone_numbers"],
        json!([{ "phone_number": "12345" }, {}])
    );
}

#[test]
fn has_changed_compares_with_initial_values() {
    let schema = person_with_phone_numbers();
    let bind = |data| {
        FormContainer::builder(&schema)
            .data(data)
            .initial_for("person", json!({ "first_name": "John", "last_name": "Smith" }))
            .initial_for(
                "phone_numbers",
                json!([{ "phone_number": "12345" }, { "phone_number": "23456" }]),
            )
            .build()
    };

    assert!(!bind(build_data()).has_changed());

    let renamed = build_data_with(
        &[("person-first_name", "Johannes"), ("person-last_name", "Schmidt")],
        &[],
    );
    assert!(bind(renamed).has_changed());

    let new_number = build_data_with(&[("phone_numbers-0-phone_number", "54321")], &[]);
    assert!(bind(new_number).has_changed());
}

#[test]
fn subforms_are_bound_in_declaration_order_with_their_prefix() {
    let container = FormContainer::new(&person_with_phone_numbers(), build_data());

    let names: Vec<_> =
        container.subforms().map(|(name, subform)| (name, subform.type_name())).collect();
    assert_eq!(names, [("person", "PersonForm"), ("phone_numbers", "PhoneNumberFormFormSet")]);

    let person = container.subform("person").and_then(|s| s.as_form()).unwrap();
    assert_eq!(person.prefix(), Some("person"));
    assert_eq!(person.field_names(), ["first_name", "last_name"]);
}

#[test]
fn each_container_binds_fresh_engines() {
    let schema = ContainerSchema::builder().form("person", person_form()).build().unwrap();

    let mut valid = FormContainer::new(&schema, form_data! {
        "person-first_name" => "John",
        "person-last_name" => "Smith",
    });
    let mut invalid = FormContainer::new(&schema, form_data! {});

    assert!(valid.is_valid());
    assert!(!invalid.is_valid());
    assert!(valid.is_valid());
}
