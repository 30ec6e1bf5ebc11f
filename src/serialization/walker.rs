//! Inheritance chain traversal.

use crate::{
    metadata::typesystem::{TypeDescriptor, TypeResolver},
    Error::HierarchyLimit,
    Result,
};

/// Maximum number of types a single walk may produce
pub const MAX_HIERARCHY_DEPTH: usize = 256;

/// Returns `root` followed by its base types, most-derived first.
///
/// The walk stops before a base that is `System.Object` or a value type, and at a base the
/// resolver cannot find (a type from another assembly). Types of the module are validated
/// layer by layer in the order returned.
///
/// ## Arguments
/// * `resolver` - Lookup for the base type references
/// * `root`     - The type to start from
///
/// # Errors
/// Returns [`crate::Error::HierarchyLimit`] if the chain is longer than
/// [`MAX_HIERARCHY_DEPTH`], which only a cyclic inheritance in damaged metadata produces.
///
/// # Examples
///
/// ```rust,no_run
/// use serialscope::{metadata::typesystem::TypeRegistry, serialization::walk};
/// use std::path::Path;
///
/// let registry = TypeRegistry::from_file(Path::new("Game.dll"))?;
/// let chain = walk(&registry, registry.by_name("Game.Derived")?)?;
/// for layer in chain {
///     println!("{}", layer.fullname());
/// }
/// # Ok::<(), serialscope::Error>(())
/// ```
pub fn walk<'r, R>(resolver: &'r R, root: &'r TypeDescriptor) -> Result<Vec<&'r TypeDescriptor>>
where
    R: TypeResolver + ?Sized,
{
    let mut chain = vec![root];
    let mut current = root;

    while let Some(base) = &current.base {
        if base.is_value_type || base.is_object() {
            break;
        }

        let Some(next) = resolver.resolve(base) else {
            log::debug!(
                "Base type {} of {} is not defined in this module, ending walk",
                base,
                current.fullname()
            );
            break;
        };

        if chain.len() >= MAX_HIERARCHY_DEPTH {
            return Err(HierarchyLimit {
                type_name: root.fullname().to_string(),
                limit: MAX_HIERARCHY_DEPTH,
            });
        }

        chain.push(next);
        current = next;
    }

    log::debug!("Hierarchy of {} has {} layers", root.fullname(), chain.len());
    Ok(chain)
}
