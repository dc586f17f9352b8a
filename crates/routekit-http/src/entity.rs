//! Type-erased request and response payloads.
//!
//! Bodies are never serialized by routekit. A handler receives and produces
//! plain Rust values wrapped in an [`Entity`], which remembers the name of
//! the wrapped type so that assertion failures can report it.

use std::any::Any;
use std::fmt;

/// A type-erased payload carried by a request or a response.
///
/// # Examples
///
/// ```
/// use routekit_http::Entity;
///
/// let entity = Entity::new(42_u32);
/// assert!(entity.is::<u32>());
/// assert_eq!(entity.downcast_ref::<u32>(), Some(&42));
/// assert_eq!(entity.type_name(), "u32");
/// ```
pub struct Entity {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Entity {
    /// Wraps a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns the name of the wrapped type.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        (*self.value).is::<T>()
    }

    /// Returns a reference to the wrapped value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.value).downcast_ref::<T>()
    }

    /// Unwraps the value if it is a `T`, otherwise returns the entity unchanged.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        self.value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|value| Self { value, type_name })
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
