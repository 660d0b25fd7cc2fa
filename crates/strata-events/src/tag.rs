//! Identity handles for runtime types.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An opaque, identity-comparable handle for a type.
///
/// Two tags are equal iff they denote the same type. Equality and hashing
/// only look at the [`TypeId`]; the name is kept for diagnostics.
///
/// Any `'static` type works, including trait objects, which lets `dyn Trait`
/// stand for an interface in a [`TypeHierarchy`](crate::TypeHierarchy).
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Get the tag for `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying type id.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The type name without its module path.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        // Only strip the path of the outermost segment; generic arguments keep theirs.
        let head = self.name.split('<').next().unwrap_or(self.name);
        match head.rfind("::") {
            Some(idx) => self.name.get(idx.saturating_add(2)..).unwrap_or(self.name),
            None => self.name,
        }
    }

    /// Returns `true` if this tag denotes `T`.
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
