//! Benchmarks for the serialization checks.
//!
//! Covers the hot paths of an inspection:
//! - Decoding member signatures
//! - Validating single members against the eligibility rules
//! - Walking and validating a deep type hierarchy

extern crate serialscope;

use criterion::{criterion_group, criterion_main, Criterion};
use serialscope::{
    metadata::{
        signatures::{parse_field_signature, parse_property_signature},
        tables::TypeAttributes,
        token::Token,
        typesystem::{
            Accessor, Annotations, DeclaringType, MemberAccess, MemberDescriptor, MemberKind,
            PropertyAccessors, TypeDescriptor, TypeReference, TypeRegistry,
        },
    },
    serialization::{inspect, validate},
};
use std::{hint::black_box, sync::Arc};

const LAYERS: usize = 64;
const MEMBERS_PER_LAYER: usize = 16;

fn declaring(name: &str, rid: u32) -> Arc<DeclaringType> {
    Arc::new(DeclaringType {
        token: Token::new(0x0200_0000 | rid),
        name: name.to_string(),
        flags: TypeAttributes::PUBLIC,
    })
}

fn field(declaring: &Arc<DeclaringType>, index: usize) -> MemberDescriptor {
    MemberDescriptor {
        token: Token::new(0x0400_0001 + index as u32),
        name: format!("field{index}"),
        declared_type: TypeReference::external("System.Int32", true),
        declaring_type: declaring.clone(),
        kind: MemberKind::Field {
            access: if index % 3 == 0 {
                MemberAccess::Private
            } else {
                MemberAccess::Public
            },
        },
        annotations: Annotations::empty(),
    }
}

fn property(declaring: &Arc<DeclaringType>, index: usize) -> MemberDescriptor {
    let accessor = |prefix: &str, access| Accessor {
        token: Token::new(0x0600_0001 + index as u32),
        name: format!("{prefix}_Property{index}"),
        access,
    };

    MemberDescriptor {
        token: Token::new(0x1700_0001 + index as u32),
        name: format!("Property{index}"),
        declared_type: TypeReference::external("System.String", false),
        declaring_type: declaring.clone(),
        kind: MemberKind::Property(PropertyAccessors {
            getter: Some(accessor("get", MemberAccess::Public)),
            setter: (index % 2 == 0).then(|| accessor("set", MemberAccess::Public)),
            has_parameters: false,
        }),
        annotations: if index % 4 == 0 {
            Annotations::CONTENT_SERIALIZER
        } else {
            Annotations::empty()
        },
    }
}

/// `Bench.T0` derives from `System.Object`, every `Bench.Tn` from `Bench.Tn-1`.
fn deep_registry() -> TypeRegistry {
    let types = (0..LAYERS)
        .map(|layer| {
            let name = format!("Bench.T{layer}");
            let declaring = declaring(&name, layer as u32 + 1);
            let base = if layer == 0 {
                TypeReference::external("System.Object", false)
            } else {
                TypeReference::local(format!("Bench.T{}", layer - 1), false, layer - 1)
            };

            TypeDescriptor {
                declaring: declaring.clone(),
                namespace: "Bench".to_string(),
                name: format!("T{layer}"),
                base: Some(base),
                is_value_type: false,
                fields: (0..MEMBERS_PER_LAYER).map(|i| field(&declaring, i)).collect(),
                properties: (0..MEMBERS_PER_LAYER)
                    .map(|i| property(&declaring, i))
                    .collect(),
            }
        })
        .collect();

    TypeRegistry::new(types)
}

/// Benchmark decoding a generic field and an indexer property.
/// Signatures: List`1<string> and string this[int]
fn bench_member_signatures(c: &mut Criterion) {
    let field = [0x06, 0x15, 0x12, 0x11, 0x01, 0x0E];
    let property = [0x28, 0x01, 0x0E, 0x08];

    c.bench_function("member_signatures", |b| {
        b.iter(|| {
            let field = parse_field_signature(black_box(&field)).unwrap();
            let property = parse_property_signature(black_box(&property)).unwrap();
            black_box((field, property))
        });
    });
}

/// Benchmark the rule chain for a mix of fields and properties.
fn bench_validate(c: &mut Criterion) {
    let declaring = declaring("Bench.Flat", 1);
    let members: Vec<MemberDescriptor> = (0..MEMBERS_PER_LAYER)
        .flat_map(|i| [field(&declaring, i), property(&declaring, i)])
        .collect();

    c.bench_function("validate_members", |b| {
        b.iter(|| {
            for member in &members {
                black_box(validate(black_box(member)).unwrap());
            }
        });
    });
}

/// Benchmark a full inspection of the most-derived type of a deep hierarchy.
fn bench_inspect_deep(c: &mut Criterion) {
    let registry = deep_registry();
    let leaf = format!("Bench.T{}", LAYERS - 1);

    c.bench_function("inspect_deep_hierarchy", |b| {
        b.iter(|| {
            let reports = inspect(&registry, black_box(&leaf)).unwrap();
            black_box(reports)
        });
    });
}

criterion_group!(
    benches,
    bench_member_signatures,
    bench_validate,
    bench_inspect_deep
);
criterion_main!(benches);
