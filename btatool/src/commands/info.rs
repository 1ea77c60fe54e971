//! Info command: describe each array in a session.

use anyhow::Result;
use bta_core::{Header, Type};
use bta_stream::scalar;
use bta_stream::{ArrayReader, ElementLayout, ElementStream};

use crate::cli::InfoArgs;
use crate::commands;
use crate::output;
use crate::values;

/// Run the info command.
pub fn run(args: &InfoArgs) -> Result<()> {
    let mut inputs = commands::open_inputs(&args.files)?;
    for input in &mut inputs {
        let mut arrays = 0u64;
        let mut bytes = 0u64;
        while let Some(header) = input.read_next()? {
            arrays += 1;
            bytes = bytes.saturating_add(header.data_size());
            print_array(&commands::array_context(input), &header);
            if args.statistics {
                print_statistics(input, &header)?;
            }
        }
        output::print_info(&format!(
            "\n{}: {} array(s), {} of array data",
            input.name(),
            arrays,
            output::format_size(bytes)
        ));
    }
    Ok(())
}

fn print_array(title: &str, header: &Header) {
    output::print_header(title);
    output::print_kv("dimensions", &dimensions_string(header), 2);
    output::print_kv("components", &components_string(header), 2);
    output::print_kv(
        "data size",
        &format!(
            "{} ({} elements of {} bytes)",
            output::format_size(header.data_size()),
            output::format_number(header.elements()),
            header.element_size()
        ),
        2,
    );
    if !header.global_tags().is_empty() {
        output::print_kv("tags", &header.global_tags().to_string(), 2);
    }
    for c in 0..header.components().len() {
        let tags = header.component_tags(c);
        if !tags.is_empty() {
            output::print_kv(&format!("component {c} tags"), &tags.to_string(), 2);
        }
    }
}

fn dimensions_string(header: &Header) -> String {
    if header.dimensions().is_empty() {
        return "scalar (0 dimensions)".to_string();
    }
    let dims: Vec<String> = header.dimensions().iter().map(u64::to_string).collect();
    dims.join("x")
}

fn components_string(header: &Header) -> String {
    if header.components().is_empty() {
        return "none".to_string();
    }
    let comps: Vec<String> = header.components().iter().map(Type::to_string).collect();
    comps.join(",")
}

/// Stream the array's data and print min/max/mean per component.
///
/// Only real components up to 64 bits are summarized; NaNs are skipped.
fn print_statistics(input: &mut ArrayReader, header: &Header) -> Result<()> {
    let layout = ElementLayout::new(header)?;
    let mut stats: Vec<Option<Stats>> = header
        .components()
        .iter()
        .map(|ty| values::is_native_real(*ty).then(Stats::default))
        .collect();

    let mut elements = ElementStream::new(header, &Header::new())?;
    for _ in 0..header.elements() {
        let element = elements.read_one(input)?;
        for (c, slot) in stats.iter_mut().enumerate() {
            let Some(s) = slot else { continue };
            let value = scalar::decode(layout.slot(c).ty, layout.component(element, c))?;
            if let Some(x) = value.as_f64() {
                if !x.is_nan() {
                    s.add(x);
                }
            }
        }
    }

    for (c, slot) in stats.iter().enumerate() {
        let key = format!("component {c} ({})", header.components()[c]);
        match slot {
            None => output::print_kv(&key, "statistics unsupported for this type", 2),
            Some(s) if s.count == 0 => output::print_kv(&key, "no finite values", 2),
            Some(s) => output::print_kv(
                &key,
                &format!("min {} max {} mean {}", s.min, s.max, s.mean()),
                2,
            ),
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Stats {
    count: u64,
    min: f64,
    max: f64,
    sum: f64,
}

impl Stats {
    fn add(&mut self, x: f64) {
        if self.count == 0 {
            self.min = x;
            self.max = x;
        } else {
            if x < self.min {
                self.min = x;
            }
            if x > self.max {
                self.max = x;
            }
        }
        self.sum += x;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}
