use crate::metadata::typesystem::{TypeDescriptor, TypeReference, TypeRegistry};

/// Resolves type references to the descriptors of locally defined types.
///
/// The hierarchy walk only needs this lookup, which keeps it independent of how the
/// descriptors were produced.
pub trait TypeResolver {
    /// Returns the definition behind `reference`, or `None` if the type is not defined
    /// locally (e.g. a framework type from another assembly).
    fn resolve(&self, reference: &TypeReference) -> Option<&TypeDescriptor>;
}

impl TypeResolver for TypeRegistry {
    /// Resolves through the arena index first, then through the full name.
    fn resolve(&self, reference: &TypeReference) -> Option<&TypeDescriptor> {
        if let Some(index) = reference.index {
            if let Some(descriptor) = self.get(index) {
                return Some(descriptor);
            }
        }

        self.index_of(&reference.name)
            .and_then(|index| self.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{metadata::tables::TypeAttributes, test::create_type};

    #[test]
    fn resolve() {
        let registry = TypeRegistry::new(vec![
            create_type("Game.Bar", TypeAttributes::PUBLIC, None, false),
            create_type("Game.Foo", TypeAttributes::PUBLIC, None, false),
        ]);

        let by_index = TypeReference::local("Game.Foo", false, 1);
        assert_eq!(registry.resolve(&by_index).unwrap().fullname(), "Game.Foo");

        let by_name = TypeReference::external("Game.Bar", false);
        assert_eq!(registry.resolve(&by_name).unwrap().fullname(), "Game.Bar");

        let stale_index = TypeReference::local("Game.Bar", false, 9);
        assert_eq!(registry.resolve(&stale_index).unwrap().fullname(), "Game.Bar");

        let foreign = TypeReference::external("System.Collections.ArrayList", false);
        assert!(registry.resolve(&foreign).is_none());
    }
}
