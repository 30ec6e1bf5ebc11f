//! End-to-end inspection of named types.

use rayon::prelude::*;

use crate::{
    metadata::typesystem::{TypeDescriptor, TypeRegistry, TypeResolver},
    serialization::{validate, walk, MemberReport},
    Result,
};

/// Validates every member of `type_name` and of its base types.
///
/// Reports come in walk order (most-derived type first), fields before properties within each
/// type. An ineligible member is a report like any other; only errors abort the inspection.
///
/// # Errors
/// Returns [`crate::Error::TypeNotFound`] if the registry has no such type, before anything is
/// validated, and an integrity error ([`crate::Error::HierarchyLimit`],
/// [`crate::Error::InvalidMember`]) if the descriptors are damaged.
///
/// # Examples
///
/// ```rust,no_run
/// use serialscope::{metadata::typesystem::TypeRegistry, serialization::inspect};
/// use std::path::Path;
///
/// let registry = TypeRegistry::from_file(Path::new("Game.dll"))?;
/// for report in inspect(&registry, "Game.Foo")? {
///     println!("{report}");
/// }
/// # Ok::<(), serialscope::Error>(())
/// ```
pub fn inspect(registry: &TypeRegistry, type_name: &str) -> Result<Vec<MemberReport>> {
    let root = registry.by_name(type_name)?;
    inspect_type(registry, root)
}

/// Validates every member of `root` and of the base types `resolver` finds for it.
///
/// # Errors
/// See [`inspect`].
pub fn inspect_type<R>(resolver: &R, root: &TypeDescriptor) -> Result<Vec<MemberReport>>
where
    R: TypeResolver + ?Sized,
{
    let mut reports = Vec::new();
    for layer in walk(resolver, root)? {
        for member in layer.members() {
            reports.push(MemberReport::new(member, validate(member)?));
        }
    }

    log::debug!(
        "{}: {} of {} members eligible",
        root.fullname(),
        reports.iter().filter(|report| report.is_eligible()).count(),
        reports.len()
    );
    Ok(reports)
}

/// Runs [`inspect`] for every name in parallel. Results keep the order of `type_names`, and a
/// failing name does not affect the others.
pub fn inspect_all<S>(registry: &TypeRegistry, type_names: &[S]) -> Vec<Result<Vec<MemberReport>>>
where
    S: AsRef<str> + Sync,
{
    type_names
        .par_iter()
        .map(|name| inspect(registry, name.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::assemblyview::Metadata,
        serialization::IneligibleReason,
        test::{game_image, game_metadata},
        Error,
    };

    fn registry() -> TypeRegistry {
        TypeRegistry::from_metadata(&Metadata::parse(&game_metadata()).unwrap()).unwrap()
    }

    fn lines(reports: &[MemberReport]) -> Vec<String> {
        reports.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn foo() {
        let reports = inspect(&registry(), "Game.Foo").unwrap();
        assert_eq!(
            lines(&reports),
            vec![
                "Name: \"X\", Type: \"System.Int32\", Is Value: True",
                "ERROR: INVALID: Setter isn't public!",
                "Name: \"Z\", Type: \"Game.Bar\", Is Value: False",
                "Name: \"W\", Type: \"System.Int32\", Is Value: True",
            ]
        );
        assert!(reports.iter().all(|report| report.declaring_type == "Game.Foo"));
    }

    #[test]
    fn derived_then_base() {
        let reports = inspect(&registry(), "Game.Derived").unwrap();
        let names: Vec<_> = reports
            .iter()
            .map(|report| (report.declaring_type.as_str(), report.name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Game.Derived", "hidden"),
                ("Game.Derived", "Ignored"),
                ("Game.Derived", "Item"),
                ("Game.Foo", "X"),
                ("Game.Foo", "Y"),
                ("Game.Foo", "Z"),
                ("Game.Foo", "W"),
            ]
        );

        assert!(reports[0].is_eligible());
        assert_eq!(reports[1].reason(), Some(IneligibleReason::ExplicitlyIgnored));
        assert_eq!(reports[2].reason(), Some(IneligibleReason::IndexedProperty));
    }

    #[test]
    fn static_and_value_types() {
        let registry = registry();

        let settings = inspect(&registry, "Game.Settings").unwrap();
        assert_eq!(lines(&settings), vec!["ERROR: INVALID: Cannot be static!"]);

        let point = inspect(&registry, "Game.Point").unwrap();
        assert_eq!(point.len(), 2);
        assert!(point.iter().all(MemberReport::is_eligible));

        // The base type is external, the walk ends at the type itself
        let note = inspect(&registry, "Game.NoteAttribute").unwrap();
        assert!(note.is_empty());
    }

    #[test]
    fn unknown_type() {
        let result = inspect(&registry(), "Game.Missing");
        assert!(matches!(result, Err(Error::TypeNotFound(_))));
    }

    #[test]
    fn parallel() {
        let registry = TypeRegistry::from_mem(game_image()).unwrap();
        let names = ["Game.Derived", "Game.Missing", "Game.Foo", "Game.Settings"];

        let results = inspect_all(&registry, &names);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().len(), 7);
        assert!(results[1].as_ref().is_err_and(|error| error.is_resolution()));
        assert_eq!(
            results[2].as_ref().unwrap(),
            &inspect(&registry, "Game.Foo").unwrap()
        );
        assert_eq!(results[3].as_ref().unwrap().len(), 1);
    }
}
