pub mod formset;

use crate::common::person_form;
use form_rail::engine::{FormEngine, RenderStyle};
use form_rail::form_data;
use form_rail::forms::{CharField, FormSpec, REQUIRED_MESSAGE};
use serde_json::json;

#[test]
fn required_field_rejects_blank_input() {
    let field = CharField::new("first_name");

    assert_eq!(field.clean(None).into_errors().unwrap().as_slice(), [REQUIRED_MESSAGE]);
    assert!(field.clean(Some("   ")).is_invalid());
}

#[test]
fn optional_field_accepts_blank_input_without_length_checks() {
    let field = CharField::new("nickname").optional().min_length(3);

    assert_eq!(field.clean(Some("")).into_value(), Some(json!("")));
}

#[test]
fn length_rules_accumulate() {
    let field = CharField::new("code").min_length(4).max_length(2);

    let errors = field.clean(Some("abc")).into_errors().unwrap();
    assert_eq!(
        errors.as_slice(),
        [
            "Ensure this value has at least 4 characters (it has 3).",
            "Ensure this value has at most 2 characters (it has 3).",
        ]
    );
}

#[test]
fn length_counts_characters() {
    let field = CharField::new("name").max_length(4);
    assert!(field.clean(Some("Zoë!")).is_valid());
}

#[test]
fn stripping_can_be_disabled() {
    let stripped = CharField::new("name");
    let verbatim = CharField::new("name").strip(false);

    assert_eq!(stripped.clean(Some(" John ")).into_value(), Some(json!("John")));
    assert_eq!(verbatim.clean(Some(" John ")).into_value(), Some(json!(" John ")));
}

#[test]
fn labels_are_derived_from_names() {
    assert_eq!(CharField::new("first_name").label_text(), "First name");
    assert_eq!(CharField::new("email").label("E-mail").label_text(), "E-mail");
}

#[test]
fn change_detection_normalises_initial_values() {
    let field = CharField::new("age");

    assert!(!field.has_changed(Some(&json!(42)), Some("42")));
    assert!(!field.has_changed(Some(&json!(null)), None));
    assert!(field.has_changed(None, Some("new")));
}

#[test]
fn standalone_form_reports_field_errors() {
    let form = person_form().bound(form_data! { "first_name" => "John" });

    assert!(!form.is_valid());
    assert_eq!(form.errors().get("last_name").unwrap(), &[REQUIRED_MESSAGE]);
    assert_eq!(form.cleaned_data(), None);
}

#[test]
fn standalone_form_cleans_values() {
    let form = person_form().bound(form_data! {
        "first_name" => " John ",
        "last_name" => "Smith",
    });

    assert!(form.is_valid());
    let cleaned = form.cleaned_data().unwrap();
    assert_eq!(cleaned["first_name"], json!("John"));
    assert_eq!(cleaned.keys().collect::<Vec<_>>(), ["first_name", "last_name"]);
}

#[test]
fn unbound_form_has_no_errors_and_no_data() {
    let form = person_form().unbound();

    assert!(!form.is_bound());
    assert!(form.errors().is_empty());
    assert!(form.cleaned_data().is_none());
    assert!(!form.has_changed());
}

#[test]
fn unknown_fields_are_not_declared() {
    let form = FormSpec::new("Empty", Vec::<CharField>::new()).unbound();
    assert!(!form.has_field("anything"));
    assert!(form.field_names().is_empty());
}

#[test]
fn standalone_form_renders_without_prefix() {
    let form = FormSpec::new("LoginForm", [CharField::new("user").max_length(8)])
        .bound(form_data! { "user" => "jo" });

    assert_eq!(
        form.render(RenderStyle::List),
        concat!(
            r#"<li><label for="id_user">User:</label> "#,
            r#"<input type="text" name="user" id="id_user" value="jo" maxlength="8"></li>"#,
        )
    );
}
