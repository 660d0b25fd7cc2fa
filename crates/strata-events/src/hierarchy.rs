//! Type hierarchy introspection.
//!
//! Rust has no runtime class hierarchy, so the registry consumes one through
//! the [`TypeHierarchy`] trait. [`TypeGraph`] is the stock implementation: an
//! immutable graph of declared types and their direct supertypes.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use crate::error::{RegistryError, RegistryResult};
use crate::tag::TypeTag;

/// Source of supertype information for type tags.
///
/// Implementations must be deterministic: the same tag always yields the same
/// supertypes in the same order. The registry caches derived ancestor sets and
/// never asks twice for the same concrete type.
pub trait TypeHierarchy: Send + Sync {
    /// Direct supertypes of `ty` in declaration order.
    ///
    /// Returns `None` if `ty` is unknown to this hierarchy.
    fn supertypes(&self, ty: TypeTag) -> Option<&[TypeTag]>;

    /// Returns `true` if `ty` is known to this hierarchy.
    fn contains(&self, ty: TypeTag) -> bool {
        self.supertypes(ty).is_some()
    }

    /// All types `ty` is assignable to, `ty` itself first.
    ///
    /// The walk is breadth-first; direct supertypes are visited in declaration
    /// order and every type appears once. Unknown types yield just themselves.
    fn ancestors(&self, ty: TypeTag) -> Vec<TypeTag> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([ty]);

        while let Some(next) = queue.pop_front() {
            if !seen.insert(next) {
                continue;
            }
            order.push(next);
            if let Some(parents) = self.supertypes(next) {
                queue.extend(parents.iter().copied());
            }
        }

        order
    }

    /// Returns `true` if instances of `from` are also instances of `to`.
    fn is_assignable(&self, from: TypeTag, to: TypeTag) -> bool {
        from == to || self.ancestors(from).contains(&to)
    }
}

/// An immutable graph of declared types.
///
/// Built once with [`TypeGraph::builder`]. A type's parents must be declared
/// before the type itself, so the graph is acyclic by construction.
#[derive(Clone, Default)]
pub struct TypeGraph {
    parents: HashMap<TypeTag, Vec<TypeTag>>,
}

impl TypeGraph {
    /// Start building a graph.
    #[must_use]
    pub fn builder() -> TypeGraphBuilder {
        TypeGraphBuilder::default()
    }

    /// Number of declared types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Check if no types are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl TypeHierarchy for TypeGraph {
    fn supertypes(&self, ty: TypeTag) -> Option<&[TypeTag]> {
        self.parents.get(&ty).map(Vec::as_slice)
    }
}

impl fmt::Debug for TypeGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeGraph")
            .field("type_count", &self.parents.len())
            .finish()
    }
}

/// Builder for [`TypeGraph`].
///
/// Declaration errors are deferred to [`build`](Self::build) so declarations
/// can be chained.
#[derive(Debug, Default)]
pub struct TypeGraphBuilder {
    graph: TypeGraph,
    error: Option<RegistryError>,
}

impl TypeGraphBuilder {
    /// Declare a root type with no supertypes.
    #[must_use]
    pub fn root<T: ?Sized + 'static>(self) -> Self {
        self.declare(TypeTag::of::<T>(), &[])
    }

    /// Declare `T` with a single direct supertype `P`.
    #[must_use]
    pub fn extends<T: ?Sized + 'static, P: ?Sized + 'static>(self) -> Self {
        self.declare(TypeTag::of::<T>(), &[TypeTag::of::<P>()])
    }

    /// Declare a type with the given direct supertypes, in order.
    ///
    /// Every parent must already be declared and the type must be new.
    #[must_use]
    pub fn declare(mut self, ty: TypeTag, parents: &[TypeTag]) -> Self {
        if self.error.is_some() {
            return self;
        }

        if self.graph.parents.contains_key(&ty) {
            self.error = Some(RegistryError::invalid(format!(
                "type {} is already declared",
                ty.name()
            )));
            return self;
        }

        if let Some(missing) = parents
            .iter()
            .find(|parent| !self.graph.parents.contains_key(*parent))
        {
            self.error = Some(RegistryError::invalid(format!(
                "supertype {} of {} is not declared",
                missing.name(),
                ty.name()
            )));
            return self;
        }

        let mut unique = Vec::with_capacity(parents.len());
        for parent in parents {
            if !unique.contains(parent) {
                unique.push(*parent);
            }
        }
        self.graph.parents.insert(ty, unique);
        self
    }

    /// Finish the graph.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgument`] if a type was declared twice
    /// or before one of its supertypes.
    pub fn build(self) -> RegistryResult<TypeGraph> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.graph),
        }
    }
}
