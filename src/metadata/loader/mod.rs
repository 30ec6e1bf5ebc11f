//! Construction of type and member descriptors from metadata tables.
//!
//! Loading runs in stages over the raw tables:
//! - `TypeDef`, `NestedClass` and `GenericParam` give every type its full name
//! - `CustomAttribute` with `MethodDef` / `MemberRef` constructors gives the serialization
//!   markers of every member
//! - `MethodSemantics` links properties to their accessors
//! - `Field` ranges and `PropertyMap` ranges give the members of every type, with declared
//!   types decoded from their signature blobs
//!
//! Every table row is read with error propagation: a damaged row fails the load instead of
//! silently dropping a member.

mod context;
mod naming;

use std::{collections::HashMap, sync::Arc};

use crate::{
    metadata::{
        assemblyview::Metadata,
        signatures::{parse_field_signature, parse_property_signature},
        tables::{
            CustomAttributeRaw, FieldRaw, MemberRefRaw, MethodSemanticsAttributes,
            MethodSemanticsRaw, PropertyMapRaw, PropertyRaw, TableId, TypeDefRaw,
        },
        token::Token,
        typesystem::{
            Accessor, Annotations, DeclaringType, MemberAccess, MemberDescriptor, MemberKind,
            PropertyAccessors, TypeDescriptor,
        },
    },
    Result,
};

use context::{read_all, LoaderContext};

/// Builds a descriptor for every `TypeDef` of `metadata`, in table order.
///
/// # Errors
/// Returns an integrity error ([`crate::Error::Malformed`], [`crate::Error::OutOfBounds`],
/// [`crate::Error::RecursionLimit`]) if a table, heap entry or signature is damaged.
pub(crate) fn load_types(metadata: &Metadata<'_>) -> Result<Vec<TypeDescriptor>> {
    let context = LoaderContext::new(metadata)?;
    let annotations = load_annotations(&context)?;
    let accessors = load_semantics(&context)?;
    let property_ranges = load_property_ranges(&context)?;

    let mut types = Vec::with_capacity(context.typedefs.len());
    for (index, typedef) in context.typedefs.iter().enumerate() {
        let descriptor =
            load_type(&context, index, typedef, &annotations, &accessors, &property_ranges)?;

        log::trace!(
            "Loaded {} with {} fields and {} properties",
            descriptor.fullname(),
            descriptor.fields.len(),
            descriptor.properties.len()
        );
        types.push(descriptor);
    }

    log::debug!("Loaded {} types", types.len());
    Ok(types)
}

fn load_type(
    context: &LoaderContext<'_, '_>,
    index: usize,
    typedef: &TypeDefRaw,
    annotations: &HashMap<Token, Annotations>,
    accessors: &HashMap<u32, (Option<u32>, Option<u32>)>,
    property_ranges: &HashMap<u32, (u32, u32)>,
) -> Result<TypeDescriptor> {
    let declaring = Arc::new(DeclaringType {
        token: typedef.token,
        name: context.names[index].clone(),
        flags: typedef.flags,
    });

    let base = if typedef.extends.is_null() {
        None
    } else {
        Some(context.base_reference(typedef.extends.token, typedef.token)?)
    };

    let (field_start, field_end) = context.list_range(
        index,
        typedef.field_list,
        |next| next.field_list,
        TableId::Field,
    )?;

    let mut fields = Vec::new();
    if field_start < field_end {
        let table = context.table::<FieldRaw>()?;
        for rid in field_start..field_end {
            let field = table.row(rid)?;
            fields.push(load_field(context, &declaring, &field, annotations)?);
        }
    }

    let mut properties = Vec::new();
    if let Some((start, end)) = property_ranges.get(&typedef.rid) {
        let table = context.table::<PropertyRaw>()?;
        for rid in *start..*end {
            let property = table.row(rid)?;
            properties.push(load_property(
                context,
                &declaring,
                &property,
                annotations,
                accessors,
            )?);
        }
    }

    let namespace = if context.enclosing.contains_key(&typedef.rid) {
        String::new()
    } else {
        context
            .metadata
            .strings
            .get(typedef.type_namespace as usize)?
            .to_string()
    };

    Ok(TypeDescriptor {
        declaring,
        namespace,
        name: context
            .metadata
            .strings
            .get(typedef.type_name as usize)?
            .to_string(),
        base,
        is_value_type: context.value_types[index],
        fields,
        properties,
    })
}

fn load_field(
    context: &LoaderContext<'_, '_>,
    declaring: &Arc<DeclaringType>,
    field: &FieldRaw,
    annotations: &HashMap<Token, Annotations>,
) -> Result<MemberDescriptor> {
    let name = context.metadata.strings.get(field.name as usize)?;
    let signature = parse_field_signature(context.metadata.blobs.get(field.signature as usize)?)?;

    let Some(access) = MemberAccess::from_flags(field.flags) else {
        return Err(malformed_error!(
            "Field {} has an invalid access level - {}",
            field.token,
            field.flags
        ));
    };

    Ok(MemberDescriptor {
        token: field.token,
        name: name.to_string(),
        declared_type: context.type_reference(&signature.base, declaring.token)?,
        declaring_type: declaring.clone(),
        kind: MemberKind::Field { access },
        annotations: annotations.get(&field.token).copied().unwrap_or_default(),
    })
}

fn load_property(
    context: &LoaderContext<'_, '_>,
    declaring: &Arc<DeclaringType>,
    property: &PropertyRaw,
    annotations: &HashMap<Token, Annotations>,
    accessors: &HashMap<u32, (Option<u32>, Option<u32>)>,
) -> Result<MemberDescriptor> {
    let name = context.metadata.strings.get(property.name as usize)?;
    let signature =
        parse_property_signature(context.metadata.blobs.get(property.signature as usize)?)?;

    let (getter, setter) = accessors.get(&property.rid).copied().unwrap_or_default();

    Ok(MemberDescriptor {
        token: property.token,
        name: name.to_string(),
        declared_type: context.type_reference(&signature.base, declaring.token)?,
        declaring_type: declaring.clone(),
        kind: MemberKind::Property(PropertyAccessors {
            getter: getter.map(|rid| load_accessor(context, rid)).transpose()?,
            setter: setter.map(|rid| load_accessor(context, rid)).transpose()?,
            has_parameters: !signature.params.is_empty(),
        }),
        annotations: annotations.get(&property.token).copied().unwrap_or_default(),
    })
}

fn load_accessor(context: &LoaderContext<'_, '_>, rid: u32) -> Result<Accessor> {
    let method = context.method(rid)?;

    let Some(access) = MemberAccess::from_flags(method.flags) else {
        return Err(malformed_error!(
            "Method {} has an invalid access level - {}",
            method.token,
            method.flags
        ));
    };

    Ok(Accessor {
        token: method.token,
        name: context.metadata.strings.get(method.name as usize)?.to_string(),
        access,
    })
}

/// Resolves the attribute type of every `CustomAttribute` row and keeps the recognised ones,
/// keyed by the token of the decorated entity.
fn load_annotations(context: &LoaderContext<'_, '_>) -> Result<HashMap<Token, Annotations>> {
    let mut annotations: HashMap<Token, Annotations> = HashMap::new();

    for attribute in read_all::<CustomAttributeRaw>(context.metadata)? {
        let Some(type_name) = attribute_type_name(context, &attribute)? else {
            continue;
        };

        let set = Annotations::from_type_names([type_name.as_str()]);
        if set.is_empty() {
            continue;
        }

        log::trace!("{} carries {}", attribute.parent.token, type_name);
        *annotations.entry(attribute.parent.token).or_default() |= set;
    }

    Ok(annotations)
}

/// Full name of the type declaring the attribute constructor, `None` for a `MemberRef`
/// constructor whose parent is not a type.
fn attribute_type_name(
    context: &LoaderContext<'_, '_>,
    attribute: &CustomAttributeRaw,
) -> Result<Option<String>> {
    let constructor = attribute.constructor;
    match constructor.tag {
        TableId::MethodDef => {
            let method_count = context.metadata.tables.row_count(TableId::MethodDef);
            if constructor.row == 0 || constructor.row > method_count {
                return Err(malformed_error!(
                    "CustomAttribute {} refers to missing constructor {}",
                    attribute.rid,
                    constructor.token
                ));
            }

            match context.method_owner(constructor.row) {
                Some(rid) => Ok(Some(context.names[rid as usize - 1].clone())),
                None => Err(malformed_error!(
                    "CustomAttribute {} constructor {} has no declaring type",
                    attribute.rid,
                    constructor.token
                )),
            }
        }
        TableId::MemberRef => {
            let member = context.table::<MemberRefRaw>()?.row(constructor.row)?;
            match member.class.tag {
                TableId::TypeDef | TableId::TypeRef | TableId::TypeSpec => Ok(Some(
                    context.token_name(member.class.token, Token::default(), 0)?,
                )),
                _ => Ok(None),
            }
        }
        _ => Err(malformed_error!(
            "CustomAttribute {} has an invalid constructor {}",
            attribute.rid,
            constructor.token
        )),
    }
}

/// Getter and setter `MethodDef` rids per `Property` rid.
fn load_semantics(
    context: &LoaderContext<'_, '_>,
) -> Result<HashMap<u32, (Option<u32>, Option<u32>)>> {
    let mut accessors: HashMap<u32, (Option<u32>, Option<u32>)> = HashMap::new();

    for semantics in read_all::<MethodSemanticsRaw>(context.metadata)? {
        if semantics.association.tag != TableId::Property {
            continue;
        }

        let entry = accessors.entry(semantics.association.row).or_default();
        if semantics.semantics & MethodSemanticsAttributes::GETTER != 0 {
            entry.0 = Some(semantics.method);
        } else if semantics.semantics & MethodSemanticsAttributes::SETTER != 0 {
            entry.1 = Some(semantics.method);
        }
    }

    Ok(accessors)
}

/// Property rid range `[start, end)` per `TypeDef` rid.
fn load_property_ranges(context: &LoaderContext<'_, '_>) -> Result<HashMap<u32, (u32, u32)>> {
    let maps = read_all::<PropertyMapRaw>(context.metadata)?;
    let property_count = context.metadata.tables.row_count(TableId::Property);

    let mut ranges = HashMap::with_capacity(maps.len());
    for (position, map) in maps.iter().enumerate() {
        let end = maps
            .get(position + 1)
            .map_or(property_count + 1, |next| next.property_list);

        if map.property_list == 0 || map.property_list > end || end > property_count + 1 {
            return Err(malformed_error!(
                "PropertyMap {} has an invalid property list {}..{} ({} rows)",
                map.rid,
                map.property_list,
                end,
                property_count
            ));
        }
        if map.parent == 0 || map.parent as usize > context.typedefs.len() {
            return Err(malformed_error!(
                "PropertyMap {} refers to missing TypeDef {}",
                map.rid,
                map.parent
            ));
        }

        ranges.insert(map.parent, (map.property_list, end));
    }

    Ok(ranges)
}
