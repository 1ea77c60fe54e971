//! Command-line argument definitions using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Create, inspect, and transform BTA array sessions.
///
/// btatool works on streams of arrays: every command reads arrays from
/// files or standard input and writes results to a file or standard
/// output, one element at a time.
#[derive(Parser, Debug)]
#[command(name = "btatool")]
#[command(author, version, about, long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// The toolkit's commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create arrays filled with a constant element
    Create(CreateArgs),
    /// Describe the arrays in one or more sessions
    Info(InfoArgs),
    /// Compute per-component differences between two sessions
    Diff(DiffArgs),
    /// Edit array tags, passing data through unchanged
    Tag(TagArgs),
    /// Convert array components to other types
    ComponentConvert(ConvertArgs),
}

/// Arguments for `btatool create`.
#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Array dimensions (comma-separated)
    ///
    /// Omit for a 0-dimensional scalar array holding a single element.
    #[arg(
        short = 'd',
        long = "dimensions",
        value_name = "D0,D1,...",
        value_delimiter = ','
    )]
    pub dimensions: Vec<u64>,

    /// Component types of each element (comma-separated)
    ///
    /// Types: int8-int128, uint8-uint128, float32/64/128, cfloat32/64/128,
    /// blob:SIZE. Omit for elements with no components.
    #[arg(
        short = 'c',
        long = "components",
        value_name = "T0,T1,...",
        value_delimiter = ','
    )]
    pub components: Vec<String>,

    /// Initial value for every element (comma-separated, one per component)
    ///
    /// Complex components consume two entries (real, imaginary). Without
    /// this option elements are zero-filled.
    #[arg(
        short = 'v',
        long = "value",
        value_name = "V0,V1,...",
        value_delimiter = ',',
        allow_hyphen_values = true
    )]
    pub value: Option<Vec<String>>,

    /// Number of arrays to write
    #[arg(short = 'n', long, value_name = "N", default_value = "1")]
    pub count: u64,

    /// Output file (default: standard output)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for `btatool info`.
#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    /// Input session files (default: standard input)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Stream the data and print per-component statistics
    #[arg(short = 's', long)]
    pub statistics: bool,
}

/// Arguments for `btatool diff`.
#[derive(clap::Args, Debug)]
pub struct DiffArgs {
    /// First input session
    #[arg(value_name = "FILE1")]
    pub first: PathBuf,

    /// Second input session
    #[arg(value_name = "FILE2")]
    pub second: PathBuf,

    /// Compute absolute differences
    ///
    /// For unsigned components this makes the difference total (max minus
    /// min); without it, a smaller first operand is an overflow error.
    #[arg(short = 'a', long)]
    pub absolute: bool,

    /// Output file (default: standard output)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for `btatool tag`.
#[derive(clap::Args, Debug)]
pub struct TagArgs {
    /// Input session files (default: standard input)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Set a global tag (repeatable)
    #[arg(long = "set-global", value_name = "NAME=VALUE")]
    pub set_global: Vec<String>,

    /// Remove a global tag (repeatable)
    #[arg(long = "unset-global", value_name = "NAME")]
    pub unset_global: Vec<String>,

    /// Set a tag on one component (repeatable)
    #[arg(long = "set-component", value_name = "INDEX,NAME=VALUE")]
    pub set_component: Vec<String>,

    /// Remove a tag from one component (repeatable)
    #[arg(long = "unset-component", value_name = "INDEX,NAME")]
    pub unset_component: Vec<String>,

    /// Output file (default: standard output)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for `btatool component-convert`.
#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Target component types (comma-separated, one per source component)
    #[arg(
        short = 'c',
        long = "components",
        value_name = "T0,T1,...",
        value_delimiter = ',',
        required = true
    )]
    pub components: Vec<String>,

    /// Input session files (default: standard input)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output file (default: standard output)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Example usage shown in --help.
const EXAMPLES: &str = r#"
EXAMPLES:
    # A 256x128 three-component image, zero-filled
    btatool create -d 256,128 -c uint8,uint8,uint8 -o image.bta

    # A scalar array holding one complex value
    btatool create -c cfloat64 -v 1.5,-0.5 -o z.bta

    # Describe every array in a session, with data statistics
    btatool info -s image.bta

    # Absolute per-component difference of two sessions
    btatool diff -a before.bta after.bta -o delta.bta

    # Label an array and one of its components
    btatool tag --set-global DESCRIPTION="night sky" \
        --set-component 0,INTERPRETATION=RED image.bta -o tagged.bta

    # Convert uint8 samples to float32 in a pipeline
    btatool create -d 4 -c uint8 -v 7 | btatool component-convert -c float32 -o wide.bta
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let args = Args::try_parse_from([
            "btatool", "create", "-d", "4,2", "-c", "uint8,float32", "-v", "-7,0.5", "-n", "3",
            "-o", "out.bta",
        ])
        .unwrap();

        match args.command {
            Command::Create(c) => {
                assert_eq!(c.dimensions, vec![4, 2]);
                assert_eq!(c.components, vec!["uint8", "float32"]);
                assert_eq!(c.value.as_deref(), Some(&["-7".to_string(), "0.5".to_string()][..]));
                assert_eq!(c.count, 3);
            }
            other => panic!("parsed wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_component_convert() {
        let args = Args::try_parse_from([
            "btatool",
            "component-convert",
            "-c",
            "float32,float32",
            "in.bta",
        ])
        .unwrap();

        match args.command {
            Command::ComponentConvert(c) => {
                assert_eq!(c.components.len(), 2);
                assert_eq!(c.files.len(), 1);
            }
            other => panic!("parsed wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_tag_edit_values_not_split() {
        // INDEX,NAME=VALUE arguments contain commas and must stay whole.
        let args = Args::try_parse_from([
            "btatool",
            "tag",
            "--set-component",
            "0,INTERPRETATION=RED",
            "in.bta",
        ])
        .unwrap();

        match args.command {
            Command::Tag(t) => {
                assert_eq!(t.set_component, vec!["0,INTERPRETATION=RED"]);
            }
            other => panic!("parsed wrong command: {other:?}"),
        }
    }
}
