//! Assertion helpers for handler output.
//!
//! Entity type checks return a [`Result`] so that tests can inspect the
//! failure; the response helpers panic with a descriptive message, like
//! `assert_eq!`.
//!
//! - [`assert_type`] - Assert an entity holds a `T` (or a `Some(T)`)
//! - [`assert_collection_type`] - Assert an entity is a collection of `T`
//! - [`assert_status`] - Assert the response status
//! - [`assert_header`] - Assert a response header value
//! - [`assert_entity_eq`] - Assert the response entity equals a value

use std::any::{type_name, Any};
use std::fmt::Debug;

use http::StatusCode;
use routekit_http::{Entity, RouteResponse};
use thiserror::Error;

/// A failed entity assertion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssertionError {
    /// There is no entity to check.
    #[error("Entity cannot be null.")]
    MissingEntity,

    /// The entity, or an element of it, is not of the expected type.
    #[error("Object cannot be cast from '{actual}' to the expected type '{expected}'")]
    TypeMismatch {
        /// The expected type name.
        expected: String,
        /// The actual type name.
        actual: String,
    },
}

impl AssertionError {
    fn mismatch<T>(actual: &str) -> Self {
        Self::TypeMismatch {
            expected: type_name::<T>().to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Asserts that an entity holds a `T`.
///
/// An entity holding `Option<T>` passes if it is `Some`, and the inner value
/// is returned.
///
/// # Errors
///
/// Returns [`AssertionError::MissingEntity`] if `entity` is `None` or holds a
/// `None::<T>`, and [`AssertionError::TypeMismatch`] otherwise.
///
/// # Examples
///
/// ```
/// use routekit_http::Entity;
/// use routekit_test::assertions::assert_type;
///
/// let entity = Entity::new(7_u64);
/// assert_eq!(assert_type::<u64>(Some(&entity)), Ok(&7));
/// assert!(assert_type::<String>(Some(&entity)).is_err());
/// ```
pub fn assert_type<T: Any>(entity: Option<&Entity>) -> Result<&T, AssertionError> {
    let entity = entity.ok_or(AssertionError::MissingEntity)?;
    unwrap_optional::<T>(entity)
        .unwrap_or_else(|| Err(AssertionError::mismatch::<T>(entity.type_name())))
}

/// Asserts that an entity is a collection whose elements are all `T`.
///
/// Accepts an entity holding `Vec<T>`, or `Vec<Entity>` where every element
/// holds a `T`. Either may also be wrapped in `Some`, as with
/// [`assert_type`]. Returns the number of elements.
///
/// # Errors
///
/// Returns [`AssertionError::MissingEntity`] if `entity` is `None` or holds a
/// `None` collection, and [`AssertionError::TypeMismatch`] if the entity is
/// not a collection or one of its elements is not a `T`.
pub fn assert_collection_type<T: Any>(entity: Option<&Entity>) -> Result<usize, AssertionError> {
    let entity = entity.ok_or(AssertionError::MissingEntity)?;

    if let Some(values) = unwrap_optional::<Vec<T>>(entity) {
        return values.map(Vec::len);
    }

    let elements = unwrap_optional::<Vec<Entity>>(entity)
        .unwrap_or_else(|| Err(AssertionError::mismatch::<Vec<T>>(entity.type_name())))?;
    if let Some(wrong) = elements.iter().find(|element| !element.is::<T>()) {
        return Err(AssertionError::mismatch::<T>(wrong.type_name()));
    }
    Ok(elements.len())
}

/// Looks for a `V` or a `Some(V)` in the entity.
///
/// `None` means the entity holds neither `V` nor `Option<V>`.
fn unwrap_optional<V: Any>(entity: &Entity) -> Option<Result<&V, AssertionError>> {
    if let Some(value) = entity.downcast_ref::<V>() {
        return Some(Ok(value));
    }
    match entity.downcast_ref::<Option<V>>() {
        Some(Some(value)) => Some(Ok(value)),
        Some(None) => Some(Err(AssertionError::MissingEntity)),
        None => None,
    }
}

/// Asserts that the response status matches the expected value.
///
/// # Panics
///
/// Panics if the status is unset or does not match.
#[track_caller]
pub fn assert_status(response: &RouteResponse, expected: StatusCode) {
    assert_eq!(
        response.status_code(),
        Some(expected),
        "Expected status {expected}, got {:?}",
        response.status_code()
    );
}

/// Asserts that the response has a header with the expected value.
///
/// # Panics
///
/// Panics if the header is missing or has a different value.
#[track_caller]
pub fn assert_header(response: &RouteResponse, name: &str, expected: &str) {
    let actual = response
        .header_value(name)
        .unwrap_or_else(|| panic!("Expected response to have header '{name}'"));
    assert_eq!(
        actual, expected,
        "Expected header '{name}' to be '{expected}', got '{actual}'"
    );
}

/// Asserts that the response entity is a `T` equal to `expected`.
///
/// # Panics
///
/// Panics if the entity is missing, of another type, or not equal.
#[track_caller]
pub fn assert_entity_eq<T: Any + PartialEq + Debug>(response: &RouteResponse, expected: &T) {
    match assert_type::<T>(response.entity()) {
        Ok(actual) => assert_eq!(actual, expected, "Response entity mismatch"),
        Err(err) => panic!("{err}"),
    }
}
