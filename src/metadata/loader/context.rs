//! Lookup state shared by the loader stages.

use std::collections::HashMap;

use crate::{
    metadata::{
        assemblyview::Metadata,
        tables::{
            GenericParamRaw, MetadataTable, MethodDefRaw, NestedClassRaw, RowReadable, TableId,
            TypeDefRaw, TypeRefRaw,
        },
        token::Token,
    },
    Result,
};

/// Maximum nesting of types declared inside other types
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

/// Rows and cross references the descriptor construction needs repeatedly.
pub(crate) struct LoaderContext<'m, 'a> {
    /// Heaps and tables being loaded
    pub metadata: &'m Metadata<'a>,
    /// All `TypeDef` rows, index `rid - 1`
    pub typedefs: Vec<TypeDefRaw>,
    /// Full name of every `TypeDef`, index `rid - 1`
    pub names: Vec<String>,
    /// Value type flag of every `TypeDef`, index `rid - 1`
    pub value_types: Vec<bool>,
    /// `TypeDef` rid of a nested type to the rid of its enclosing type
    pub enclosing: HashMap<u32, u32>,
    /// Declared generic parameter names per owning `TypeDef` or `MethodDef`
    pub generic_params: HashMap<Token, Vec<(u32, String)>>,
}

impl<'m, 'a> LoaderContext<'m, 'a> {
    /// Reads the `TypeDef`, `NestedClass` and `GenericParam` tables and names every type.
    ///
    /// # Errors
    /// Returns an integrity error if a row cannot be decoded or a heap index is invalid.
    pub fn new(metadata: &'m Metadata<'a>) -> Result<Self> {
        let typedefs = read_all::<TypeDefRaw>(metadata)?;

        let mut enclosing = HashMap::new();
        for nested in read_all::<NestedClassRaw>(metadata)? {
            if nested.nested_class == 0 || nested.nested_class as usize > typedefs.len() {
                return Err(malformed_error!(
                    "NestedClass {} refers to missing TypeDef {}",
                    nested.rid,
                    nested.nested_class
                ));
            }
            if nested.enclosing_class == 0 || nested.enclosing_class as usize > typedefs.len() {
                return Err(malformed_error!(
                    "NestedClass {} refers to missing TypeDef {}",
                    nested.rid,
                    nested.enclosing_class
                ));
            }

            enclosing.insert(nested.nested_class, nested.enclosing_class);
        }

        let mut generic_params: HashMap<Token, Vec<(u32, String)>> = HashMap::new();
        for param in read_all::<GenericParamRaw>(metadata)? {
            let name = metadata.strings.get(param.name as usize)?;
            generic_params
                .entry(param.owner.token)
                .or_default()
                .push((param.number, name.to_string()));
        }

        let mut context = LoaderContext {
            metadata,
            typedefs,
            names: Vec::new(),
            value_types: Vec::new(),
            enclosing,
            generic_params,
        };

        let mut names = Vec::with_capacity(context.typedefs.len());
        for typedef in &context.typedefs {
            names.push(context.typedef_name(typedef.rid, 0)?);
        }
        context.names = names;

        let mut value_types = Vec::with_capacity(context.typedefs.len());
        for index in 0..context.typedefs.len() {
            value_types.push(context.is_value_type_def(index)?);
        }
        context.value_types = value_types;

        Ok(context)
    }

    /// Builds the full name of `TypeDef` `rid`, `Outer/Inner` for nested types.
    fn typedef_name(&self, rid: u32, depth: usize) -> Result<String> {
        if depth > MAX_NESTING_DEPTH {
            return Err(malformed_error!(
                "TypeDef {} is nested deeper than {} levels",
                rid,
                MAX_NESTING_DEPTH
            ));
        }

        let typedef = &self.typedefs[rid as usize - 1];
        let name = self.metadata.strings.get(typedef.type_name as usize)?;

        if let Some(enclosing) = self.enclosing.get(&rid) {
            return Ok(format!("{}/{}", self.typedef_name(*enclosing, depth + 1)?, name));
        }

        let namespace = self.metadata.strings.get(typedef.type_namespace as usize)?;
        Ok(qualify(namespace, name))
    }

    /// Builds the full name of `TypeRef` `rid`, following nested references.
    pub fn typeref_name(&self, rid: u32, depth: usize) -> Result<String> {
        if depth > MAX_NESTING_DEPTH {
            return Err(malformed_error!(
                "TypeRef {} is nested deeper than {} levels",
                rid,
                MAX_NESTING_DEPTH
            ));
        }

        let typeref = self.table::<TypeRefRaw>()?.row(rid)?;
        let name = self.metadata.strings.get(typeref.type_name as usize)?;

        if typeref.resolution_scope.tag == TableId::TypeRef && !typeref.resolution_scope.is_null()
        {
            let outer = self.typeref_name(typeref.resolution_scope.row, depth + 1)?;
            return Ok(format!("{outer}/{name}"));
        }

        let namespace = self.metadata.strings.get(typeref.type_namespace as usize)?;
        Ok(qualify(namespace, name))
    }

    /// A type is a value type if it derives from `System.ValueType` or `System.Enum`;
    /// `System.Enum` itself derives from `System.ValueType` but is a class.
    fn is_value_type_def(&self, index: usize) -> Result<bool> {
        if self.names[index] == "System.Enum" {
            return Ok(false);
        }

        let extends = self.typedefs[index].extends;
        if extends.is_null() {
            return Ok(false);
        }

        let base_name = match extends.tag {
            TableId::TypeDef => self
                .names
                .get(extends.row as usize - 1)
                .cloned()
                .ok_or_else(|| malformed_error!("Base type {} does not exist", extends.token))?,
            TableId::TypeRef => self.typeref_name(extends.row, 0)?,
            _ => return Ok(false),
        };

        Ok(base_name == "System.ValueType" || base_name == "System.Enum")
    }

    /// Returns the typed view of table `T`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the table has no rows.
    pub fn table<T: RowReadable>(&self) -> Result<MetadataTable<'a, T>> {
        self.metadata
            .tables
            .table::<T>()
            .ok_or_else(|| malformed_error!("Table {:?} is empty", T::TABLE_ID))
    }

    /// Returns `MethodDef` row `rid`.
    pub fn method(&self, rid: u32) -> Result<MethodDefRaw> {
        self.table::<MethodDefRaw>()?.row(rid)
    }

    /// Row range `[start, end)` of the list starting at `start` for `TypeDef` `index`, where
    /// the following `TypeDef` (or the end of the table) bounds the list.
    pub fn list_range(
        &self,
        index: usize,
        start: u32,
        next_start: impl Fn(&TypeDefRaw) -> u32,
        table: TableId,
    ) -> Result<(u32, u32)> {
        let row_count = self.metadata.tables.row_count(table);
        let end = self
            .typedefs
            .get(index + 1)
            .map_or(row_count + 1, next_start);

        if start == 0 || start > end || end > row_count + 1 {
            return Err(malformed_error!(
                "TypeDef {} has an invalid {:?} list {}..{} ({} rows)",
                index + 1,
                table,
                start,
                end,
                row_count
            ));
        }

        Ok((start, end))
    }

    /// `TypeDef` rid owning `MethodDef` `rid`, if any.
    pub fn method_owner(&self, rid: u32) -> Option<u32> {
        let position = self
            .typedefs
            .partition_point(|typedef| typedef.method_list <= rid);
        if position == 0 {
            return None;
        }

        let owner = &self.typedefs[position - 1];
        let end = self
            .typedefs
            .get(position)
            .map_or(self.metadata.tables.row_count(TableId::MethodDef) + 1, |next| {
                next.method_list
            });

        (rid < end).then_some(owner.rid)
    }
}

/// Reads every row of table `T`, failing on the first row that cannot be decoded.
pub(crate) fn read_all<T: RowReadable>(metadata: &Metadata<'_>) -> Result<Vec<T>> {
    let Some(table) = metadata.tables.table::<T>() else {
        return Ok(Vec::new());
    };

    (1..=table.row_count()).map(|rid| table.row(rid)).collect()
}

/// `Namespace.Name`, or `Name` in the global namespace.
pub(crate) fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}
