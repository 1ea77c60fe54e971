//! Create command: write arrays filled with a constant element.

use anyhow::Result;
use bta_core::Header;
use bta_stream::ElementStream;
use bta_stream::checked::checked_cast;

use crate::cli::CreateArgs;
use crate::commands;
use crate::values;

/// Run the create command.
pub fn run(args: &CreateArgs) -> Result<()> {
    let components = values::parse_components(&args.components)?;

    let mut header = Header::new();
    if !args.dimensions.is_empty() {
        header.set_dimensions(args.dimensions.clone())?;
    }
    header.set_components(components.clone())?;

    let element = match &args.value {
        Some(literals) => values::parse_element(&components, literals)?,
        None => vec![0u8; checked_cast::<usize, u64>(header.element_size())?],
    };

    let mut writer = commands::open_output(args.output.as_deref())?;
    for _ in 0..args.count {
        writer.write_header(&header)?;
        let mut elements = ElementStream::new(&Header::new(), &header)?;
        for _ in 0..header.elements() {
            elements.write_one(&mut writer, &element)?;
        }
    }
    writer.finish()?;
    Ok(())
}
