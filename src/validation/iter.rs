use crate::types::ErrorVec;
use crate::validation::core::Validation;

/// Collects results, keeping every error instead of stopping at the first.
///
/// # Examples
///
/// ```
/// use form_rail::validation::Validation;
///
/// let inputs = vec![Ok(1), Err("err1"), Err("err2")];
/// let collected: Validation<&str, Vec<i32>> = inputs.into_iter().collect();
/// assert_eq!(collected.into_errors().unwrap().len(), 2);
/// ```
impl<E, A, C> FromIterator<Result<A, E>> for Validation<E, C>
where
    C: FromIterator<A>,
{
    fn from_iter<I: IntoIterator<Item = Result<A, E>>>(iter: I) -> Self {
        let mut values = Vec::new();
        let mut errors = ErrorVec::new();

        for item in iter {
            match item {
                Ok(value) => values.push(value),
                Err(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            Validation::Valid(values.into_iter().collect())
        } else {
            Validation::Invalid(errors)
        }
    }
}

/// Collects validations, concatenating the errors of every invalid item.
impl<E, A, C> FromIterator<Validation<E, A>> for Validation<E, C>
where
    C: FromIterator<A>,
{
    fn from_iter<I: IntoIterator<Item = Validation<E, A>>>(iter: I) -> Self {
        let mut values = Vec::new();
        let mut errors = ErrorVec::new();

        for item in iter {
            match item {
                Validation::Valid(value) => values.push(value),
                Validation::Invalid(errs) => errors.extend(errs),
            }
        }

        if errors.is_empty() {
            Validation::Valid(values.into_iter().collect())
        } else {
            Validation::Invalid(errors)
        }
    }
}

impl<E, A> Validation<E, A> {
    /// Iterates over the accumulated errors.
    pub fn iter_errors(&self) -> core::slice::Iter<'_, E> {
        self.errors().iter()
    }
}
