use crate::types::ErrorVec;
use smallvec::smallvec;

/// Applicative-style validation that accumulates many errors instead of failing fast.
///
/// `Validation<E, A>` either succeeds with a value of type `A` or fails with
/// one or more errors of type `E`. Field cleaning uses it to report every
/// broken rule of a value at once, and container `clean` hooks return it so
/// container-wide failures are plain data rather than early returns.
///
/// # Examples
///
/// ```
/// use form_rail::validation::Validation;
///
/// let valid = Validation::<&str, i32>::valid(42);
/// assert!(valid.is_valid());
///
/// let invalid = Validation::<&str, i32>::invalid("error");
/// assert!(invalid.is_invalid());
/// ```
#[must_use]
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum Validation<E, A> {
    Valid(A),
    Invalid(ErrorVec<E>),
}

impl<E, A> Validation<E, A> {
    /// Creates a valid value.
    #[must_use]
    #[inline]
    pub fn valid(value: A) -> Self {
        Self::Valid(value)
    }

    /// Creates an invalid value from a single error.
    #[must_use]
    #[inline]
    pub fn invalid(error: E) -> Self {
        Self::Invalid(smallvec![error])
    }

    /// Creates an invalid value from an iterator of errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use form_rail::validation::Validation;
    ///
    /// let v = Validation::<&str, ()>::invalid_many(["missing", "invalid"]);
    /// assert_eq!(v.into_errors().unwrap().len(), 2);
    /// ```
    #[must_use]
    #[inline]
    pub fn invalid_many<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        Self::Invalid(errors.into_iter().collect())
    }

    #[must_use]
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    #[must_use]
    #[inline]
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Maps the valid value, leaving errors unchanged.
    #[must_use]
    #[inline]
    pub fn map<B, F>(self, f: F) -> Validation<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Valid(value) => Validation::Valid(f(value)),
            Self::Invalid(errors) => Validation::Invalid(errors),
        }
    }

    /// Chains a step that may fail, invoked only while still valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use form_rail::validation::Validation;
    ///
    /// fn non_blank(input: &str) -> Validation<&'static str, &str> {
    ///     if input.trim().is_empty() {
    ///         Validation::invalid("blank")
    ///     } else {
    ///         Validation::valid(input)
    ///     }
    /// }
    ///
    /// assert!(Validation::valid("  ").and_then(non_blank).is_invalid());
    /// assert!(Validation::valid("John").and_then(non_blank).is_valid());
    /// ```
    #[must_use]
    #[inline]
    pub fn and_then<B, F>(self, f: F) -> Validation<E, B>
    where
        F: FnOnce(A) -> Validation<E, B>,
    {
        match self {
            Self::Valid(value) => f(value),
            Self::Invalid(errors) => Validation::Invalid(errors),
        }
    }

    /// Extracts the error list, if any.
    #[must_use]
    #[inline]
    pub fn into_errors(self) -> Option<ErrorVec<E>> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(errors) => Some(errors),
        }
    }

    /// Extracts the value, if valid.
    #[must_use]
    #[inline]
    pub fn into_value(self) -> Option<A> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }

    /// Borrows the accumulated errors; empty when valid.
    #[inline]
    pub fn errors(&self) -> &[E] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(errors) => errors,
        }
    }
}
