//! Parsing of component type lists and element value literals.

use anyhow::{Context, Result, bail};
use bta_core::Type;
use bta_stream::scalar::{self, Value};

/// Parse a list of component type names.
pub fn parse_components(specs: &[String]) -> Result<Vec<Type>> {
    specs
        .iter()
        .map(|s| {
            s.parse::<Type>()
                .with_context(|| format!("invalid component type '{s}'"))
        })
        .collect()
}

/// Real component types the engine computes with natively (up to 64 bits).
pub fn is_native_real(ty: Type) -> bool {
    matches!(
        ty,
        Type::Int8
            | Type::Int16
            | Type::Int32
            | Type::Int64
            | Type::Uint8
            | Type::Uint16
            | Type::Uint32
            | Type::Uint64
            | Type::Float32
            | Type::Float64
    )
}

/// Build one element from per-component value literals.
///
/// Each component consumes one literal, except complex components which
/// consume two (real, imaginary). 128-bit integers parse directly;
/// `float128`, `cfloat128`, and blob components cannot be given literal
/// values. Integer literals are checked against the component's range.
pub fn parse_element(components: &[Type], literals: &[String]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut next = literals.iter();
    let mut take = |ty: Type| {
        next.next()
            .map(String::as_str)
            .with_context(|| format!("missing value for {ty} component"))
    };

    for &ty in components {
        match ty {
            Type::Int128 => {
                let lit = take(ty)?;
                let v: i128 = lit
                    .parse()
                    .with_context(|| format!("invalid integer '{lit}'"))?;
                out.extend_from_slice(&v.to_le_bytes());
            }
            Type::Uint128 => {
                let lit = take(ty)?;
                let v: u128 = lit
                    .parse()
                    .with_context(|| format!("invalid integer '{lit}'"))?;
                out.extend_from_slice(&v.to_le_bytes());
            }
            Type::Float128 | Type::Cfloat128 | Type::Blob { .. } => {
                bail!("cannot give {ty} components a literal value");
            }
            Type::Cfloat32 | Type::Cfloat64 => {
                let re = parse_float(take(ty)?)?;
                let im = parse_float(take(ty)?)?;
                out.extend(encoded(Value::Complex(re, im), ty)?);
            }
            Type::Float32 | Type::Float64 => {
                let v = parse_float(take(ty)?)?;
                out.extend(encoded(Value::Float(v), ty)?);
            }
            _ => {
                let lit = take(ty)?;
                let v: i128 = lit
                    .parse()
                    .with_context(|| format!("invalid integer '{lit}'"))?;
                out.extend(encoded(Value::Int(v), ty)?);
            }
        }
    }

    if let Some(extra) = next.next() {
        bail!(
            "unused value '{extra}': too many values for {} component(s)",
            components.len()
        );
    }
    Ok(out)
}

fn parse_float(lit: &str) -> Result<f64> {
    lit.parse()
        .with_context(|| format!("invalid number '{lit}'"))
}

fn encoded(value: Value, ty: Type) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; ty.width() as usize];
    scalar::encode(value, ty, &mut buf)?;
    Ok(buf)
}
