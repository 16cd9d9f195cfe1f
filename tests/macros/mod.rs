use form_rail::types::ValidationError;
use form_rail::{field_errors, form_data};

#[test]
fn test_form_data_stringifies_keys_and_values() {
    let prefix = "phones";
    let data = form_data! {
        format!("{prefix}-TOTAL_FORMS") => 3,
        "person-first_name" => "John",
    };

    assert_eq!(data["phones-TOTAL_FORMS"], "3");
    assert_eq!(data["person-first_name"], "John");
}

#[test]
fn test_form_data_keeps_insertion_order() {
    let data = form_data! { "b" => 1, "a" => 2, "c" => 3 };
    assert_eq!(data.keys().map(String::as_str).collect::<Vec<_>>(), ["b", "a", "c"]);
}

#[test]
fn test_form_data_last_value_wins() {
    let data = form_data! { "x" => "old", "x" => "new" };

    assert_eq!(data.len(), 1);
    assert_eq!(data["x"], "new");
}

#[test]
fn test_form_data_empty() {
    assert!(form_data! {}.is_empty());
}

#[test]
fn test_field_errors_builds_field_map() {
    let error = field_errors! {
        "first_name" => ["Too short."],
        "__all__" => ["Unknown person.", "Try again."],
    };

    let ValidationError::Fields(fields) = &error else {
        panic!("expected field errors, got {error:?}");
    };
    assert_eq!(fields.keys().collect::<Vec<_>>(), ["first_name", "__all__"]);
    assert_eq!(fields["__all__"], ["Unknown person.", "Try again."]);
}
