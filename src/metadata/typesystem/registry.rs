//! Arena of the types defined in one module.
//!
//! [`TypeRegistry`] is built once from loaded metadata and never mutated afterwards, so a
//! shared reference can be handed to any number of threads. Types are addressed by their
//! position in the arena ([`crate::metadata::typesystem::TypeIndex`], `TypeDef` rid - 1) or by
//! their full name.

use std::{collections::HashMap, path::Path};

use crate::{
    metadata::{
        assemblyview::{AssemblyView, Metadata},
        loader::load_types,
        tables::TableId,
        token::Token,
        typesystem::{TypeDescriptor, TypeIndex},
    },
    Error::TypeNotFound,
    Result,
};

/// All `TypeDef`s of a module, indexed by position and by full name.
///
/// # Examples
///
/// ```rust,no_run
/// use serialscope::metadata::typesystem::TypeRegistry;
/// use std::path::Path;
///
/// let registry = TypeRegistry::from_file(Path::new("Game.dll"))?;
/// let foo = registry.by_name("Game.Foo")?;
/// println!("{} has {} fields", foo.fullname(), foo.fields.len());
/// # Ok::<(), serialscope::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// Descriptors in `TypeDef` order
    types: Vec<TypeDescriptor>,
    /// Full name (`Ns.Outer/Inner`) to arena index; the first definition of a name wins
    by_name: HashMap<String, TypeIndex>,
}

impl TypeRegistry {
    /// Creates a registry over already built descriptors.
    #[must_use]
    pub fn new(types: Vec<TypeDescriptor>) -> Self {
        let mut by_name = HashMap::with_capacity(types.len());
        for (index, descriptor) in types.iter().enumerate() {
            by_name
                .entry(descriptor.fullname().to_string())
                .or_insert(index);
        }

        TypeRegistry { types, by_name }
    }

    /// Builds the descriptors of every type in `metadata`.
    ///
    /// # Errors
    /// Returns an integrity error if the tables, heaps or signatures are damaged.
    pub fn from_metadata(metadata: &Metadata<'_>) -> Result<Self> {
        Ok(Self::new(load_types(metadata)?))
    }

    /// Loads the .NET module at `path` and builds its registry.
    ///
    /// # Errors
    /// Returns a resolution error if the file is not a loadable .NET image and an integrity
    /// error if its metadata is damaged.
    pub fn from_file(path: &Path) -> Result<Self> {
        let view = AssemblyView::from_file(path)?;
        Self::from_view(&view)
    }

    /// Builds the registry of a .NET module held in memory.
    ///
    /// # Errors
    /// See [`TypeRegistry::from_file`].
    pub fn from_mem(data: Vec<u8>) -> Result<Self> {
        let view = AssemblyView::from_mem(data)?;
        Self::from_view(&view)
    }

    /// Builds the registry of an already loaded module.
    ///
    /// # Errors
    /// See [`TypeRegistry::from_metadata`].
    pub fn from_view(view: &AssemblyView) -> Result<Self> {
        view.with_metadata(Self::from_metadata)
    }

    /// Returns the type at arena `index`.
    #[must_use]
    pub fn get(&self, index: TypeIndex) -> Option<&TypeDescriptor> {
        self.types.get(index)
    }

    /// Returns the type defined by `token`.
    #[must_use]
    pub fn get_by_token(&self, token: Token) -> Option<&TypeDescriptor> {
        if token.table() != TableId::TypeDef as u8 || token.row() == 0 {
            return None;
        }

        self.get(token.row() as usize - 1)
    }

    /// Looks up a type by full name, accepting `Ns.Outer/Inner` and `Ns.Outer+Inner` for
    /// nested types.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the module defines no such type.
    pub fn by_name(&self, fullname: &str) -> Result<&TypeDescriptor> {
        self.index_of(fullname)
            .and_then(|index| self.types.get(index))
            .ok_or_else(|| TypeNotFound(fullname.to_string()))
    }

    /// Arena index of the type named `fullname`.
    #[must_use]
    pub fn index_of(&self, fullname: &str) -> Option<TypeIndex> {
        if let Some(index) = self.by_name.get(fullname) {
            return Some(*index);
        }

        if fullname.contains('+') {
            return self.by_name.get(&fullname.replace('+', "/")).copied();
        }

        None
    }

    /// Number of types in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the registry holds no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over all types in `TypeDef` order.
    pub fn iter(&self) -> std::slice::Iter<'_, TypeDescriptor> {
        self.types.iter()
    }
}

impl<'r> IntoIterator for &'r TypeRegistry {
    type Item = &'r TypeDescriptor;
    type IntoIter = std::slice::Iter<'r, TypeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
