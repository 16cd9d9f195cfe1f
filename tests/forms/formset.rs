use crate::common::{phone_number_form, phone_numbers_formset};
use form_rail::engine::FormSetEngine;
use form_rail::form_data;
use form_rail::forms::{
    FormSetSpec, ABSOLUTE_MAX_CEILING, DEFAULT_MAX_NUM, MANAGEMENT_FORM_MESSAGE,
};
use serde_json::json;

#[test]
fn formset_name_derives_from_the_form() {
    assert_eq!(phone_numbers_formset().name(), "PhoneNumberFormFormSet");
    assert_eq!(phone_numbers_formset().named("PhoneNumbers").name(), "PhoneNumbers");
}

#[test]
fn defaults_allow_one_extra_record() {
    let formset = phone_numbers_formset().unbound();

    assert_eq!(formset.total_form_count(), 1);
    assert_eq!(formset.initial_form_count(), 0);
    assert_eq!(phone_numbers_formset().absolute_max(), 2 * DEFAULT_MAX_NUM);
}

#[test]
fn records_are_validated_independently() {
    let formset = phone_numbers_formset().bound(form_data! {
        "form-TOTAL_FORMS" => 3,
        "form-INITIAL_FORMS" => 3,
        "form-0-phone_number" => "12345",
        "form-1-phone_number" => "2",
    });

    let errors = formset.errors();
    assert_eq!(errors.len(), 3);
    assert!(errors[0].is_empty());
    assert_eq!(
        errors[1].get("phone_number").unwrap(),
        &["Ensure this value has at least 2 characters (it has 1)."]
    );
    assert_eq!(errors[2].get("phone_number").unwrap(), &["This field is required."]);
    assert!(!formset.is_valid());
    assert_eq!(formset.cleaned_data(), None);
}

#[test]
fn min_num_records_are_required_even_when_extra() {
    let formset = FormSetSpec::new(phone_number_form()).min_num(1).bound(form_data! {
        "form-TOTAL_FORMS" => 1,
        "form-INITIAL_FORMS" => 0,
    });

    assert_eq!(formset.errors()[0].get("phone_number").unwrap(), &["This field is required."]);
}

#[test]
fn malformed_counts_are_treated_as_missing() {
    let formset = phone_numbers_formset().bound(form_data! {
        "form-TOTAL_FORMS" => "two",
        "form-INITIAL_FORMS" => 0,
    });

    assert_eq!(formset.total_form_count(), 0);
    assert_eq!(formset.non_form_errors(), &[MANAGEMENT_FORM_MESSAGE]);
    assert!(!formset.is_valid());
}

#[test]
fn has_changed_checks_every_record() {
    let spec = phone_numbers_formset();
    let data = form_data! {
        "form-TOTAL_FORMS" => 2,
        "form-INITIAL_FORMS" => 1,
        "form-0-phone_number" => "12345",
    };
    assert!(spec.bound(data.clone()).has_changed());

    let mut edited = data;
    edited.insert("form-1-phone_number".into(), "999".into());
    let formset = spec.bound(edited);
    assert!(formset.has_changed());
    assert_eq!(
        formset.cleaned_data().unwrap()[1]["phone_number"],
        json!("999")
    );
}

#[test]
fn bound_management_inputs_echo_the_payload() {
    let formset = phone_numbers_formset().bound(form_data! {
        "form-TOTAL_FORMS" => 0,
        "form-INITIAL_FORMS" => 0,
        "form-MAX_NUM_FORMS" => 5,
    });

    let html = formset.management_form();
    assert!(html.contains(r#"name="form-TOTAL_FORMS" id="id_form-TOTAL_FORMS" value="0""#));
    assert!(html.contains(r#"name="form-MIN_NUM_FORMS" id="id_form-MIN_NUM_FORMS">"#));
    assert!(html.contains(r#"name="form-MAX_NUM_FORMS" id="id_form-MAX_NUM_FORMS" value="5""#));
}

#[test]
fn huge_max_num_still_caps_bound_records() {
    let spec = phone_numbers_formset().max_num(usize::MAX).extra(0);
    assert_eq!(spec.absolute_max(), ABSOLUTE_MAX_CEILING);

    let formset = spec.bound(form_data! {
        "form-TOTAL_FORMS" => usize::MAX,
        "form-INITIAL_FORMS" => 0,
    });
    assert_eq!(formset.total_form_count(), ABSOLUTE_MAX_CEILING);
    assert!(formset.is_valid());
}
