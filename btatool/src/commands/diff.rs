//! Diff command: pairwise per-component difference of two sessions.
//!
//! Arrays are paired in order. Signed components subtract with overflow
//! checks and (with `-a`) take a checked absolute value; unsigned
//! components use `abs_diff` in absolute mode, so `|a - b|` never fails;
//! floats subtract natively and propagate infinities and NaNs.

use anyhow::{Context, Result, bail};
use bta_core::{Header, Type};
use bta_stream::checked::{self, AbsDiff, Checked};
use bta_stream::scalar::Scalar;
use bta_stream::{ArrayReader, ArrayWriter, ByteSource, ElementLayout, ElementStream};

use crate::cli::DiffArgs;
use crate::commands;
use crate::output;
use crate::values;

/// Run the diff command.
pub fn run(args: &DiffArgs) -> Result<()> {
    let mut first = ArrayReader::new(ByteSource::open(&args.first)?);
    let mut second = ArrayReader::new(ByteSource::open(&args.second)?);
    let mut writer = commands::open_output(args.output.as_deref())?;

    loop {
        match (first.read_next()?, second.read_next()?) {
            (None, None) => break,
            (Some(_), None) => {
                output::print_warning(&format!(
                    "{}: ignoring additional array(s)",
                    first.name()
                ));
                break;
            }
            (None, Some(_)) => {
                output::print_warning(&format!(
                    "{}: ignoring additional array(s)",
                    second.name()
                ));
                break;
            }
            (Some(h1), Some(h2)) => {
                diff_array(&h1, &h2, &mut first, &mut second, &mut writer, args.absolute)?;
            }
        }
    }
    writer.finish()?;
    Ok(())
}

/// Arrays must agree in shape and carry only computable component types.
fn check_compatible(ctx: &str, h1: &Header, h2: &Header) -> Result<()> {
    if h1.dimensions() != h2.dimensions() {
        bail!("{ctx}: array dimensions do not match");
    }
    if h1.components() != h2.components() {
        bail!("{ctx}: array component types do not match");
    }
    for &ty in h1.components() {
        if !values::is_native_real(ty) {
            bail!("{ctx}: cannot compute differences of {ty} data");
        }
    }
    Ok(())
}

fn diff_array(
    h1: &Header,
    h2: &Header,
    first: &mut ArrayReader,
    second: &mut ArrayReader,
    writer: &mut ArrayWriter,
    absolute: bool,
) -> Result<()> {
    let ctx = commands::array_context(first);
    check_compatible(&ctx, h1, h2)?;

    // The result keeps the first input's header, tags included.
    writer.write_header(h1)?;
    let layout = ElementLayout::new(h1)?;
    let mut lhs = ElementStream::new(h1, h1)?;
    let mut rhs = ElementStream::new(h2, &Header::new())?;
    let mut out = vec![0u8; layout.element_size()];

    for _ in 0..h1.elements() {
        {
            let a = lhs.read_one(first)?;
            let b = rhs.read_one(second)?;
            for c in 0..layout.len() {
                diff_slot(
                    layout.slot(c).ty,
                    layout.component(a, c),
                    layout.component(b, c),
                    layout.component_mut(&mut out, c),
                    absolute,
                )
                .with_context(|| ctx.clone())?;
            }
        }
        lhs.write_one(writer, &out)?;
    }
    Ok(())
}

fn diff_slot(
    ty: Type,
    a: &[u8],
    b: &[u8],
    out: &mut [u8],
    absolute: bool,
) -> bta_stream::Result<()> {
    match ty {
        Type::Int8 => diff_signed::<i8>(a, b, out, absolute),
        Type::Int16 => diff_signed::<i16>(a, b, out, absolute),
        Type::Int32 => diff_signed::<i32>(a, b, out, absolute),
        Type::Int64 => diff_signed::<i64>(a, b, out, absolute),
        Type::Uint8 => diff_unsigned::<u8>(a, b, out, absolute),
        Type::Uint16 => diff_unsigned::<u16>(a, b, out, absolute),
        Type::Uint32 => diff_unsigned::<u32>(a, b, out, absolute),
        Type::Uint64 => diff_unsigned::<u64>(a, b, out, absolute),
        Type::Float32 => diff_unsigned::<f32>(a, b, out, absolute),
        Type::Float64 => diff_unsigned::<f64>(a, b, out, absolute),
        _ => Err(bta_stream::Error::usage(format!(
            "cannot compute differences of {ty} data"
        ))),
    }
}

fn diff_signed<T: Checked + Scalar>(
    a: &[u8],
    b: &[u8],
    out: &mut [u8],
    absolute: bool,
) -> bta_stream::Result<()> {
    let mut d = checked::checked_sub(T::get_le(a), T::get_le(b))?;
    if absolute {
        d = checked::checked_abs(d)?;
    }
    d.put_le(out);
    Ok(())
}

/// Also used for floats: IEEE subtraction is total and `abs_diff` is
/// `|a - b|` there.
fn diff_unsigned<T: AbsDiff + Scalar>(
    a: &[u8],
    b: &[u8],
    out: &mut [u8],
    absolute: bool,
) -> bta_stream::Result<()> {
    let a = T::get_le(a);
    let b = T::get_le(b);
    let d = if absolute {
        checked::abs_diff(a, b)
    } else {
        checked::checked_sub(a, b)?
    };
    d.put_le(out);
    Ok(())
}
