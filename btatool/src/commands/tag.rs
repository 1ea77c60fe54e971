//! Tag command: edit array tag lists, passing payloads through unchanged.

use anyhow::{Context, Result, bail};
use bta_core::Header;

use crate::cli::TagArgs;
use crate::commands;

/// Parsed tag edits, applied to every array in order: global sets, global
/// removals, component sets, component removals.
struct TagEdits {
    set_global: Vec<(String, String)>,
    unset_global: Vec<String>,
    set_component: Vec<(usize, String, String)>,
    unset_component: Vec<(usize, String)>,
}

/// Run the tag command.
pub fn run(args: &TagArgs) -> Result<()> {
    let edits = parse_edits(args)?;
    let mut inputs = commands::open_inputs(&args.files)?;
    let mut writer = commands::open_output(args.output.as_deref())?;

    for input in &mut inputs {
        while let Some(mut header) = input.read_next()? {
            apply_edits(&mut header, &edits)
                .with_context(|| commands::array_context(input))?;
            writer.write_header(&header)?;
            writer.copy_data(input)?;
        }
    }
    writer.finish()?;
    Ok(())
}

fn parse_edits(args: &TagArgs) -> Result<TagEdits> {
    let mut edits = TagEdits {
        set_global: Vec::new(),
        unset_global: args.unset_global.clone(),
        set_component: Vec::new(),
        unset_component: Vec::new(),
    };
    for spec in &args.set_global {
        let (name, value) = parse_name_value(spec)?;
        edits.set_global.push((name, value));
    }
    for spec in &args.set_component {
        let (index, rest) = parse_indexed(spec)?;
        let (name, value) = parse_name_value(rest)?;
        edits.set_component.push((index, name, value));
    }
    for spec in &args.unset_component {
        let (index, name) = parse_indexed(spec)?;
        edits.unset_component.push((index, name.to_string()));
    }
    Ok(edits)
}

fn parse_name_value(spec: &str) -> Result<(String, String)> {
    let (name, value) = spec
        .split_once('=')
        .with_context(|| format!("expected NAME=VALUE, got '{spec}'"))?;
    Ok((name.to_string(), value.to_string()))
}

fn parse_indexed(spec: &str) -> Result<(usize, &str)> {
    let (index, rest) = spec
        .split_once(',')
        .with_context(|| format!("expected INDEX,..., got '{spec}'"))?;
    let index = index
        .parse::<usize>()
        .with_context(|| format!("invalid component index '{index}'"))?;
    Ok((index, rest))
}

fn apply_edits(header: &mut Header, edits: &TagEdits) -> Result<()> {
    for (name, value) in &edits.set_global {
        header.global_tags_mut().set(name, value)?;
    }
    for name in &edits.unset_global {
        header.global_tags_mut().unset(name);
    }
    for (index, name, value) in &edits.set_component {
        check_component_index(header, *index)?;
        header.component_tags_mut(*index).set(name, value)?;
    }
    for (index, name) in &edits.unset_component {
        check_component_index(header, *index)?;
        header.component_tags_mut(*index).unset(name);
    }
    Ok(())
}

fn check_component_index(header: &Header, index: usize) -> Result<()> {
    if index >= header.components().len() {
        bail!(
            "component index {} out of range ({} components)",
            index,
            header.components().len()
        );
    }
    Ok(())
}
