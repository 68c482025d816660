//! Chaining helpers for fallible steps.
//!
//! Value-producing steps return a plain [`Result`]: `map` and `and_then` are
//! the success-only combinators and `?` is the early-return idiom that keeps
//! handler bodies linear. Steps that only assert a condition return a
//! [`ValidationResult`], which carries nothing on success. When two checks are
//! combined the first failure wins; failures are never aggregated.

/// Outcome of a check that carries no payload on success.
#[must_use = "a failed check must be handled"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationResult<E> {
    /// The checked condition holds.
    Valid,
    /// The checked condition failed with the given reason.
    Invalid(E),
}

impl<E> ValidationResult<E> {
    /// Builds a result from a condition. The failure is only constructed when
    /// the condition does not hold.
    ///
    /// # Examples
    ///
    /// ```
    /// use access_core::ValidationResult;
    ///
    /// let check = ValidationResult::ensure(2 > 1, || "unreachable");
    /// assert!(check.is_valid());
    /// ```
    pub fn ensure<F>(condition: bool, failure: F) -> Self
    where
        F: FnOnce() -> E,
    {
        if condition {
            Self::Valid
        } else {
            Self::Invalid(failure())
        }
    }

    /// Returns `true` when the check passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Combines two evaluated checks. Succeeds only when both pass; when both
    /// fail the failure of `self` is kept.
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::Valid => other,
            invalid @ Self::Invalid(_) => invalid,
        }
    }

    /// Runs `next` only when this check passed.
    pub fn and_then<F>(self, next: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Valid => next(),
            invalid @ Self::Invalid(_) => invalid,
        }
    }

    /// Converts the failure, leaving a passing check untouched.
    pub fn map_err<F, O>(self, op: O) -> ValidationResult<F>
    where
        O: FnOnce(E) -> F,
    {
        match self {
            Self::Valid => ValidationResult::Valid,
            Self::Invalid(reason) => ValidationResult::Invalid(op(reason)),
        }
    }

    /// Returns the failure, discarding a pass.
    pub fn err(self) -> Option<E> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason),
        }
    }

    /// Converts into a `Result` so the check can take part in `?` chains.
    ///
    /// # Errors
    ///
    /// Returns the failure when the check did not pass.
    pub fn into_result(self) -> Result<(), E> {
        self.err().map_or(Ok(()), Err)
    }

    /// Produces a value once the check has passed.
    ///
    /// # Errors
    ///
    /// Returns the failure without calling `value` when the check did not pass.
    pub fn map_valid<T, F>(self, value: F) -> Result<T, E>
    where
        F: FnOnce() -> T,
    {
        self.into_result().map(|()| value())
    }

    /// Evaluates checks in order and stops at the first failure.
    ///
    /// Checks produced lazily by the iterator after a failure are never run.
    pub fn all<I>(checks: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        checks.into_iter().collect()
    }
}

impl<E> From<Result<(), E>> for ValidationResult<E> {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(reason) => Self::Invalid(reason),
        }
    }
}

impl<E> From<ValidationResult<E>> for Result<(), E> {
    fn from(check: ValidationResult<E>) -> Self {
        check.into_result()
    }
}

impl<E> FromIterator<ValidationResult<E>> for ValidationResult<E> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        iter.into_iter()
            .find_map(Self::err)
            .map_or(Self::Valid, Self::Invalid)
    }
}

/// Helpers that splice [`ValidationResult`] checks into `Result` pipelines.
pub trait ResultExt<T, E> {
    /// Runs `check` against the carried value and keeps the value when the
    /// check passes. A failure short-circuits without calling `check`.
    ///
    /// # Errors
    ///
    /// Returns the incoming failure, or the failure reported by `check`.
    fn validate<F>(self, check: F) -> Result<T, E>
    where
        F: FnOnce(&T) -> ValidationResult<E>;

    /// Drops the carried value, keeping only whether the step succeeded.
    fn into_validation(self) -> ValidationResult<E>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn validate<F>(self, check: F) -> Self
    where
        F: FnOnce(&T) -> ValidationResult<E>,
    {
        self.and_then(|value| check(&value).map_valid(|| value))
    }

    fn into_validation(self) -> ValidationResult<E> {
        self.map(|_| ()).into()
    }
}
