//! Component conversion command.
//!
//! Converts each element's components to a target type list of the same
//! length. Integer targets are range-checked; float conversions follow
//! native rounding and saturation; real values gain a zero imaginary slot
//! on complex targets. Complex sources cannot become real, and 128-bit or
//! blob components only pass through to the identical type.

use anyhow::{Context, Result, bail};
use bta_core::{Class, Header, Type};
use bta_stream::scalar;
use bta_stream::{ArrayReader, ArrayWriter, ElementLayout, ElementStream};

use crate::cli::ConvertArgs;
use crate::commands;
use crate::values;

/// Run the component-convert command.
pub fn run(args: &ConvertArgs) -> Result<()> {
    let targets = values::parse_components(&args.components)?;
    let mut inputs = commands::open_inputs(&args.files)?;
    let mut writer = commands::open_output(args.output.as_deref())?;

    for input in &mut inputs {
        while let Some(header) = input.read_next()? {
            let ctx = commands::array_context(input);
            convert_array(&header, &targets, input, &mut writer)
                .with_context(|| ctx)?;
        }
    }
    writer.finish()?;
    Ok(())
}

fn convert_array(
    src: &Header,
    targets: &[Type],
    input: &mut ArrayReader,
    writer: &mut ArrayWriter,
) -> Result<()> {
    if src.components().len() != targets.len() {
        bail!(
            "expected {} component type(s), array has {}",
            targets.len(),
            src.components().len()
        );
    }
    for (&from, &to) in src.components().iter().zip(targets) {
        check_conversion(from, to)?;
    }

    // Same shape and tags, new component types.
    let mut dst = Header::new();
    dst.set_dimensions(src.dimensions().to_vec())?;
    dst.set_components(targets.to_vec())?;
    *dst.global_tags_mut() = src.global_tags().clone();
    for c in 0..targets.len() {
        *dst.component_tags_mut(c) = src.component_tags(c).clone();
    }

    writer.write_header(&dst)?;
    let in_layout = ElementLayout::new(src)?;
    let out_layout = ElementLayout::new(&dst)?;
    let mut elements = ElementStream::new(src, &dst)?;
    let mut out = vec![0u8; out_layout.element_size()];

    for _ in 0..src.elements() {
        {
            let element = elements.read_one(input)?;
            for c in 0..targets.len() {
                let from = src.components()[c];
                let to = targets[c];
                let a = in_layout.component(element, c);
                let o = out_layout.component_mut(&mut out, c);
                if from == to {
                    o.copy_from_slice(a);
                } else {
                    scalar::encode(scalar::decode(from, a)?, to, o)?;
                }
            }
        }
        elements.write_one(writer, &out)?;
    }
    Ok(())
}

/// Identical types always pass through; anything else must be a computable
/// scalar conversion.
fn check_conversion(from: Type, to: Type) -> Result<()> {
    if from == to {
        return Ok(());
    }
    if !is_convertible(from) {
        bail!("cannot convert {from} data");
    }
    if !is_convertible(to) {
        bail!("cannot convert to {to}");
    }
    if from.class() == Class::ComplexFloat && to.class() != Class::ComplexFloat {
        bail!("cannot convert complex {from} to real {to}");
    }
    Ok(())
}

fn is_convertible(ty: Type) -> bool {
    values::is_native_real(ty) || matches!(ty, Type::Cfloat32 | Type::Cfloat64)
}
