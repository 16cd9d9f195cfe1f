use crate::common::{build_data, person_with_phone_numbers, person_with_phone_numbers_and_hooks};
use form_rail::container::{ContainerHooks, ContainerSchema, FormContainer};
use form_rail::types::CleanedData;
use form_rail::field_errors;
use form_rail::validation::Validation;
use serde_json::json;

struct AlwaysFails;

impl ContainerHooks for AlwaysFails {
    fn clean(&self, _cleaned: &CleanedData) -> Validation<String, Option<CleanedData>> {
        Validation::invalid("error!".to_owned())
    }
}

struct KeepOnlyPerson;

impl ContainerHooks for KeepOnlyPerson {
    fn clean(&self, cleaned: &CleanedData) -> Validation<String, Option<CleanedData>> {
        let kept = cleaned
            .iter()
            .filter(|(name, _)| name.as_str() == "person")
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Validation::valid(Some(kept))
    }
}

struct RejectSmiths;

impl ContainerHooks for RejectSmiths {
    fn post_clean(&self, container: &mut FormContainer) {
        let is_smith = container
            .cleaned_data()
            .and_then(|cleaned| cleaned.record("person"))
            .and_then(|person| person.get("last_name"))
            .is_some_and(|value| value == "Smith");
        if is_smith {
            container
                .add_error(Some("person"), None, field_errors! { "last_name" => ["No Smiths."] })
                .expect("person declares last_name");
        }
    }
}

#[test]
fn failing_clean_becomes_a_container_wide_error() {
    let mut container =
        FormContainer::new(&person_with_phone_numbers_and_hooks(AlwaysFails), build_data());

    assert!(!container.is_valid());
    let errors = container.errors();
    assert_eq!(
        errors.to_value().unwrap(),
        json!({ "phone_numbers": [{}, {}], "__all__": ["error!"] })
    );
    assert_eq!(errors.keys().collect::<Vec<_>>(), ["phone_numbers", "__all__"]);
}

#[test]
fn failing_clean_keeps_the_cleaned_data() {
    let mut container =
        FormContainer::new(&person_with_phone_numbers_and_hooks(AlwaysFails), build_data());

    assert_eq!(container.cleaned_data().unwrap().len(), 2);
}

#[test]
fn clean_may_replace_the_cleaned_data() {
    let mut container =
        FormContainer::new(&person_with_phone_numbers_and_hooks(KeepOnlyPerson), build_data());

    assert!(container.is_valid());
    assert_eq!(container.cleaned_data().unwrap().keys().collect::<Vec<_>>(), ["person"]);
}

#[test]
fn default_clean_keeps_the_cleaned_data() {
    let mut container = FormContainer::new(&person_with_phone_numbers(), build_data());
    assert_eq!(
        container.cleaned_data().unwrap().keys().collect::<Vec<_>>(),
        ["person", "phone_numbers"]
    );
}

#[test]
fn post_clean_may_add_errors() {
    let mut container =
        FormContainer::new(&person_with_phone_numbers_and_hooks(RejectSmiths), build_data());

    assert!(!container.is_valid());
    assert_eq!(
        container.errors().form("person").unwrap().get("last_name").unwrap(),
        &["No Smiths."]
    );
    let person = container.cleaned_data().unwrap().record("person").unwrap();
    assert!(!person.contains_key("last_name"));
}

#[test]
fn hooks_are_inherited_unless_overridden() {
    let parent = person_with_phone_numbers_and_hooks(AlwaysFails);

    let child = ContainerSchema::builder().inherit(&parent).build().unwrap();
    assert!(child.has_custom_hooks());
    let mut container = FormContainer::new(&child, build_data());
    assert!(!container.is_valid());

    let overriding =
        ContainerSchema::builder().inherit(&parent).hooks(KeepOnlyPerson).build().unwrap();
    let mut container = FormContainer::new(&overriding, build_data());
    assert!(container.is_valid());
}

#[test]
fn first_parent_with_hooks_wins() {
    let plain = person_with_phone_numbers();
    let failing = person_with_phone_numbers_and_hooks(AlwaysFails);
    let replacing = person_with_phone_numbers_and_hooks(KeepOnlyPerson);

    let schema = ContainerSchema::builder()
        .inherit(&plain)
        .inherit(&failing)
        .inherit(&replacing)
        .build()
        .unwrap();

    let mut container = FormContainer::new(&schema, build_data());
    assert_eq!(container.non_form_errors(), ["error!"]);
}
