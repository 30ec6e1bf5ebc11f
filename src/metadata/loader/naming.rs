//! Display names of types referenced from signatures.
//!
//! Names follow the full-name conventions of common .NET metadata tooling: `System.Int32`,
//! `Ns.Outer/Inner`, ``Ns.List`1<System.String>``, `T[]`, `T[0...,0...]`, `T*`, `T&` and
//! `method R *(P1,P2)` for function pointers.

use crate::{
    metadata::{
        loader::context::LoaderContext,
        signatures::{
            parse_type_spec_signature, SignatureArray, SignatureParameter, TypeSignature,
            MAX_RECURSION_DEPTH,
        },
        tables::{TableId, TypeSpecRaw},
        token::Token,
        typesystem::{TypeIndex, TypeReference},
    },
    Error::RecursionLimit,
    Result,
};

impl LoaderContext<'_, '_> {
    /// Converts a decoded signature type into a reference.
    ///
    /// `owner` is the `TypeDef` whose generic parameters `!n` refers to.
    pub fn type_reference(&self, signature: &TypeSignature, owner: Token) -> Result<TypeReference> {
        Ok(TypeReference {
            name: self.signature_name(signature, owner, 0)?,
            is_value_type: signature.is_value_type(),
            index: self.local_index(signature, 0)?,
        })
    }

    /// Converts the `extends` token of a type into a reference.
    pub fn base_reference(&self, token: Token, owner: Token) -> Result<TypeReference> {
        if token.table() == TableId::TypeSpec as u8 {
            let signature = self.type_spec(token)?;
            return self.type_reference(&signature, owner);
        }

        let name = self.token_name(token, owner, 0)?;
        match self.typedef_index(token)? {
            Some(index) => Ok(TypeReference::local(name, self.value_types[index], index)),
            None => Ok(TypeReference::external(name, false)),
        }
    }

    /// Full name of the type behind a `TypeDef`, `TypeRef` or `TypeSpec` token.
    pub fn token_name(&self, token: Token, owner: Token, depth: usize) -> Result<String> {
        match token.table() {
            table if table == TableId::TypeDef as u8 => match self.typedef_index(token)? {
                Some(index) => Ok(self.names[index].clone()),
                None => Err(malformed_error!("Invalid TypeDef token - {}", token)),
            },
            table if table == TableId::TypeRef as u8 => self.typeref_name(token.row(), 0),
            table if table == TableId::TypeSpec as u8 => {
                let signature = self.type_spec(token)?;
                self.signature_name(&signature, owner, depth + 1)
            }
            _ => Err(malformed_error!("Token {} does not refer to a type", token)),
        }
    }

    fn type_spec(&self, token: Token) -> Result<TypeSignature> {
        let spec = self.table::<TypeSpecRaw>()?.row(token.row())?;
        let blob = self.metadata.blobs.get(spec.signature as usize)?;
        Ok(parse_type_spec_signature(blob)?.base)
    }

    fn typedef_index(&self, token: Token) -> Result<Option<TypeIndex>> {
        if token.table() != TableId::TypeDef as u8 {
            return Ok(None);
        }

        let row = token.row() as usize;
        if row == 0 || row > self.typedefs.len() {
            return Err(malformed_error!("Invalid TypeDef token - {}", token));
        }

        Ok(Some(row - 1))
    }

    /// The local definition a signature resolves to; generic instantiations resolve to their
    /// generic type.
    fn local_index(&self, signature: &TypeSignature, depth: usize) -> Result<Option<TypeIndex>> {
        if depth >= MAX_RECURSION_DEPTH {
            return Err(RecursionLimit(MAX_RECURSION_DEPTH));
        }

        match signature {
            TypeSignature::ValueType(token) | TypeSignature::Class(token) => {
                if token.table() == TableId::TypeSpec as u8 {
                    self.local_index(&self.type_spec(*token)?, depth + 1)
                } else {
                    self.typedef_index(*token)
                }
            }
            TypeSignature::GenericInst(base, _) => self.local_index(base, depth + 1),
            _ => Ok(None),
        }
    }

    /// Renders `signature` as a full type name.
    pub fn signature_name(
        &self,
        signature: &TypeSignature,
        owner: Token,
        depth: usize,
    ) -> Result<String> {
        if depth >= MAX_RECURSION_DEPTH {
            return Err(RecursionLimit(MAX_RECURSION_DEPTH));
        }

        if let Some(name) = signature.primitive_name() {
            return Ok(name.to_string());
        }

        Ok(match signature {
            TypeSignature::Ptr(inner) => format!("{}*", self.signature_name(inner, owner, depth + 1)?),
            TypeSignature::ByRef(inner) => {
                format!("{}&", self.signature_name(inner, owner, depth + 1)?)
            }
            TypeSignature::ValueType(token) | TypeSignature::Class(token) => {
                self.token_name(*token, owner, depth + 1)?
            }
            TypeSignature::GenericParamType(number) => self.generic_param_name(owner, *number),
            TypeSignature::GenericParamMethod(number) => format!("!!{number}"),
            TypeSignature::SzArray(inner) => {
                format!("{}[]", self.signature_name(inner, owner, depth + 1)?)
            }
            TypeSignature::Array(array) => format!(
                "{}{}",
                self.signature_name(&array.base, owner, depth + 1)?,
                array_suffix(array)
            ),
            TypeSignature::GenericInst(base, args) => {
                let mut name = self.signature_name(base, owner, depth + 1)?;
                name.push('<');
                for (position, arg) in args.iter().enumerate() {
                    if position > 0 {
                        name.push(',');
                    }
                    name.push_str(&self.signature_name(arg, owner, depth + 1)?);
                }
                name.push('>');
                name
            }
            TypeSignature::FnPtr(method) => {
                let mut name = format!(
                    "method {} *(",
                    self.parameter_name(&method.return_type, owner, depth + 1)?
                );
                for (position, param) in method.params.iter().enumerate() {
                    if position > 0 {
                        name.push(',');
                    }
                    name.push_str(&self.parameter_name(param, owner, depth + 1)?);
                }
                name.push(')');
                name
            }
            _ => {
                return Err(malformed_error!(
                    "Type signature has no name - {:?}",
                    signature
                ))
            }
        })
    }

    fn parameter_name(
        &self,
        param: &SignatureParameter,
        owner: Token,
        depth: usize,
    ) -> Result<String> {
        let name = self.signature_name(&param.base, owner, depth)?;
        Ok(if param.by_ref { format!("{name}&") } else { name })
    }

    fn generic_param_name(&self, owner: Token, number: u32) -> String {
        self.generic_params
            .get(&owner)
            .and_then(|params| params.iter().find(|(position, _)| *position == number))
            .map_or_else(|| format!("!{number}"), |(_, name)| name.clone())
    }
}

/// `[]` for vectors, otherwise one entry per dimension: `lower...upper`, `lower...` or empty.
fn array_suffix(array: &SignatureArray) -> String {
    let dimensions: Vec<String> = (0..array.rank as usize)
        .map(|dimension| {
            let lower = array.lower_bounds.get(dimension).copied();
            let size = array.sizes.get(dimension).copied();
            let upper = lower
                .zip(size)
                .map(|(lower, size)| i64::from(lower) + i64::from(size) - 1);

            match (lower, upper) {
                (None, _) => String::new(),
                (Some(lower), Some(upper)) => format!("{lower}...{upper}"),
                (Some(lower), None) => format!("{lower}..."),
            }
        })
        .collect();

    if dimensions.len() <= 1 && dimensions.iter().all(String::is_empty) {
        "[]".to_string()
    } else {
        format!("[{}]", dimensions.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array(rank: u32, sizes: Vec<u32>, lower_bounds: Vec<i32>) -> SignatureArray {
        SignatureArray {
            base: Box::new(TypeSignature::I4),
            rank,
            sizes,
            lower_bounds,
        }
    }

    #[test]
    fn array_suffixes() {
        assert_eq!(array_suffix(&array(1, vec![], vec![])), "[]");
        assert_eq!(array_suffix(&array(2, vec![], vec![0, 0])), "[0...,0...]");
        assert_eq!(array_suffix(&array(2, vec![3, 4], vec![0, 1])), "[0...2,1...4]");
        assert_eq!(array_suffix(&array(3, vec![], vec![])), "[,,]");
        assert_eq!(array_suffix(&array(2, vec![5], vec![])), "[,]");
        assert_eq!(array_suffix(&array(1, vec![], vec![-2])), "[-2...]");
    }
}
