use form_rail::validation::Validation;

#[test]
fn test_iter_errors() {
    let validation: Validation<&str, i32> = Validation::invalid_many(["x", "y"]);
    let collected: Vec<_> = validation.iter_errors().copied().collect();
    assert_eq!(collected, vec!["x", "y"]);

    let valid: Validation<&str, i32> = Validation::valid(42);
    assert_eq!(valid.iter_errors().next(), None);
}

#[test]
fn test_collecting_results_accumulates_errors() {
    let inputs = vec![Ok(1), Err("err1"), Err("err2")];
    let collected: Validation<&str, Vec<i32>> = inputs.into_iter().collect();

    assert_eq!(collected.into_errors().unwrap().as_slice(), ["err1", "err2"]);
}

#[test]
fn test_collecting_results_all_ok() {
    let inputs: Vec<Result<i32, &str>> = vec![Ok(1), Ok(2)];
    let collected: Validation<&str, Vec<i32>> = inputs.into_iter().collect();

    assert_eq!(collected.into_value(), Some(vec![1, 2]));
}

#[test]
fn test_collecting_validations_preserves_all_errors() {
    let items = vec![
        Validation::valid(10),
        Validation::invalid("bad"),
        Validation::invalid_many(["worse", "worst"]),
    ];

    let collected: Validation<&str, Vec<i32>> = items.into_iter().collect();
    assert_eq!(collected.into_errors().unwrap().len(), 3);
}

#[test]
fn test_collecting_into_custom_collection() {
    use smallvec::SmallVec;

    let inputs = vec![Ok(1), Err("err1"), Ok(2)];
    let collected: Validation<&str, SmallVec<[i32; 4]>> = inputs.into_iter().collect();

    assert_eq!(collected.into_errors().unwrap().len(), 1);
}
