//! # serialscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the serialscope library. Import this module to get quick access to the essential
//! types for checking content serialization of .NET types.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all serialscope operations
pub use crate::Error;

/// The result type used throughout serialscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// A loaded module and its parsed metadata
pub use crate::metadata::assemblyview::{AssemblyView, Metadata};

/// Low-level file parsing utilities
pub use crate::{File, Parser};

// ================================================================================================
// Metadata System - Core Types
// ================================================================================================

/// Metadata token type for referencing table entries
pub use crate::metadata::token::Token;

/// Metadata root constants
pub use crate::metadata::root::CIL_HEADER_MAGIC;

/// Metadata table identifiers and flag constants
pub use crate::metadata::tables::{FieldAttributes, MethodAttributes, TableId, TypeAttributes};

// ================================================================================================
// Type System
// ================================================================================================

/// Type and member descriptors
pub use crate::metadata::typesystem::{
    Accessor, AnnotationKind, Annotations, DeclaringType, MemberAccess, MemberDescriptor,
    MemberKind, PropertyAccessors, TypeDescriptor, TypeIndex, TypeReference, TypeRegistry,
    TypeResolver,
};

// ================================================================================================
// Signatures
// ================================================================================================

/// Core signature types
pub use crate::metadata::signatures::{
    SignatureArray, SignatureField, SignatureMethod, SignatureParameter, SignatureProperty,
    SignatureTypeSpec, TypeSignature,
};

/// Signature parsing functions
pub use crate::metadata::signatures::{
    parse_field_signature, parse_property_signature, parse_type_spec_signature,
};

// ================================================================================================
// Serialization Checks
// ================================================================================================

/// Eligibility rules, hierarchy walk and reporting
pub use crate::serialization::{
    emit_all, inspect, inspect_all, validate, walk, Eligibility, IneligibleReason, LineEmitter,
    MemberReport, ReportEmitter,
};
