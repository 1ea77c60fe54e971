//! Integration tests for the btatool CLI.

use assert_cmd::Command;
use bta_core::{Header, Type};
use bta_stream::{ArrayReader, ArrayWriter, ByteSink, ByteSource};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get the btatool command.
fn btatool() -> Command {
    Command::cargo_bin("btatool").unwrap()
}

/// One single-component uint8 array with the given shape.
fn u8_array(dims: Vec<u64>, data: Vec<u8>) -> (Header, Vec<u8>) {
    let mut header = Header::new();
    header.set_dimensions(dims).unwrap();
    header.set_components(vec![Type::Uint8]).unwrap();
    assert_eq!(header.data_size() as usize, data.len());
    (header, data)
}

fn write_session(path: &Path, arrays: &[(Header, Vec<u8>)]) {
    let mut writer = ArrayWriter::new(ByteSink::create(path).unwrap()).unwrap();
    for (header, data) in arrays {
        writer.write_header(header).unwrap();
        writer.write_data(data).unwrap();
    }
    writer.finish().unwrap();
}

fn read_session(path: &Path) -> Vec<(Header, Vec<u8>)> {
    let mut reader = ArrayReader::new(ByteSource::open(path).unwrap());
    let mut arrays = Vec::new();
    while let Some(header) = reader.read_next().unwrap() {
        let mut data = vec![0u8; header.data_size() as usize];
        reader.read_data(&mut data).unwrap();
        arrays.push((header, data));
    }
    arrays
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_help() {
    btatool()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("BTA array sessions"))
        .stdout(predicate::str::contains("component-convert"))
        .stdout(predicate::str::contains("EXAMPLES"));
}

#[test]
fn test_version() {
    btatool()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("btatool"));
}

#[test]
fn test_missing_command() {
    btatool().assert().failure();
}

// ============================================================================
// create
// ============================================================================

#[test]
fn test_create_writes_constant_elements() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out.bta");

    btatool()
        .args(["create", "-d", "4,2", "-c", "uint8,uint16", "-v", "7,300"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let arrays = read_session(&out);
    assert_eq!(arrays.len(), 1);
    let (header, data) = &arrays[0];
    assert_eq!(header.dimensions(), &[4, 2]);
    assert_eq!(header.components(), &[Type::Uint8, Type::Uint16]);
    assert_eq!(data.len(), 8 * 3);
    // 300 = 0x012C little-endian
    assert_eq!(&data[..3], &[7, 0x2C, 0x01]);
    assert_eq!(&data[21..], &[7, 0x2C, 0x01]);
}

#[test]
fn test_create_scalar_default() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("scalar.bta");

    btatool()
        .args(["create", "-c", "int32", "-v", "-5"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let arrays = read_session(&out);
    assert_eq!(arrays.len(), 1);
    assert_eq!(arrays[0].0.dimensions(), &[] as &[u64]);
    assert_eq!(arrays[0].0.elements(), 1);
    assert_eq!(arrays[0].1, (-5i32).to_le_bytes());
}

#[test]
fn test_create_multiple_arrays_to_stdout() {
    let output = btatool()
        .args(["create", "-d", "2", "-c", "uint8", "-v", "9", "-n", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let mut reader = ArrayReader::new(ByteSource::from_reader(
        std::io::Cursor::new(output),
        "captured stdout",
    ));
    let mut count = 0;
    while let Some(header) = reader.read_next().unwrap() {
        let mut data = vec![0u8; header.data_size() as usize];
        reader.read_data(&mut data).unwrap();
        assert_eq!(data, [9, 9]);
        count += 1;
    }
    assert_eq!(count, 2);
}

#[test]
fn test_create_value_overflow() {
    btatool()
        .args(["create", "-c", "uint8", "-v", "300", "-o", "unused.bta"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not fit"));
}

#[test]
fn test_create_invalid_component_type() {
    btatool()
        .args(["create", "-c", "uint9", "-o", "unused.bta"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid component type"));
}

// ============================================================================
// diff
// ============================================================================

#[test]
fn test_diff_absolute() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a.bta");
    let b = temp.path().join("b.bta");
    let out = temp.path().join("delta.bta");
    write_session(&a, &[u8_array(vec![4], vec![10, 20, 30, 255])]);
    write_session(&b, &[u8_array(vec![4], vec![20, 20, 10, 0])]);

    btatool()
        .arg("diff")
        .arg("-a")
        .arg(&a)
        .arg(&b)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let arrays = read_session(&out);
    assert_eq!(arrays.len(), 1);
    assert_eq!(arrays[0].1, vec![10, 0, 20, 255]);
}

#[test]
fn test_diff_unsigned_overflow_fails() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a.bta");
    let b = temp.path().join("b.bta");
    write_session(&a, &[u8_array(vec![1], vec![0])]);
    write_session(&b, &[u8_array(vec![1], vec![255])]);

    btatool()
        .arg("diff")
        .arg(&a)
        .arg(&b)
        .arg("-o")
        .arg(temp.path().join("delta.bta"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("array 0"))
        .stderr(predicate::str::contains("overflow"));
}

#[test]
fn test_diff_extra_arrays_warn() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a.bta");
    let b = temp.path().join("b.bta");
    write_session(
        &a,
        &[
            u8_array(vec![2], vec![5, 6]),
            u8_array(vec![2], vec![7, 8]),
        ],
    );
    write_session(&b, &[u8_array(vec![2], vec![1, 2])]);

    btatool()
        .arg("diff")
        .arg(&a)
        .arg(&b)
        .arg("-o")
        .arg(temp.path().join("delta.bta"))
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring additional array"));

    let arrays = read_session(&temp.path().join("delta.bta"));
    assert_eq!(arrays.len(), 1);
    assert_eq!(arrays[0].1, vec![4, 4]);
}

#[test]
fn test_diff_shape_mismatch() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a.bta");
    let b = temp.path().join("b.bta");
    write_session(&a, &[u8_array(vec![2], vec![5, 6])]);
    write_session(&b, &[u8_array(vec![3], vec![1, 2, 3])]);

    btatool()
        .arg("diff")
        .arg(&a)
        .arg(&b)
        .arg("-o")
        .arg(temp.path().join("delta.bta"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("dimensions do not match"));
}

// ============================================================================
// tag
// ============================================================================

#[test]
fn test_tag_set_and_unset() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.bta");
    let out = temp.path().join("out.bta");

    let (mut header, data) = u8_array(vec![3], vec![1, 2, 3]);
    header.global_tags_mut().set("OLD", "x").unwrap();
    write_session(&input, &[(header, data)]);

    btatool()
        .arg("tag")
        .args(["--set-global", "DESCRIPTION=ramp"])
        .args(["--unset-global", "OLD"])
        .args(["--set-component", "0,INTERPRETATION=GRAY"])
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let arrays = read_session(&out);
    assert_eq!(arrays.len(), 1);
    let (header, data) = &arrays[0];
    assert_eq!(header.global_tags().get("DESCRIPTION"), Some("ramp"));
    assert_eq!(header.global_tags().get("OLD"), None);
    assert_eq!(header.component_tags(0).get("INTERPRETATION"), Some("GRAY"));
    assert_eq!(data, &[1, 2, 3]);
}

#[test]
fn test_tag_passthrough_pipe() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.bta");
    write_session(
        &input,
        &[
            u8_array(vec![3], vec![1, 2, 3]),
            u8_array(vec![1], vec![9]),
        ],
    );
    let bytes = fs::read(&input).unwrap();

    // No files, no -o, no edits: standard input to standard output verbatim.
    let output = btatool()
        .arg("tag")
        .write_stdin(bytes.clone())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(output, bytes);
}

#[test]
fn test_tag_component_index_out_of_range() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.bta");
    write_session(&input, &[u8_array(vec![1], vec![0])]);

    btatool()
        .arg("tag")
        .args(["--set-component", "5,X=1"])
        .arg(&input)
        .arg("-o")
        .arg(temp.path().join("out.bta"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

// ============================================================================
// component-convert
// ============================================================================

#[test]
fn test_convert_uint8_to_float32() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.bta");
    let out = temp.path().join("out.bta");

    let (mut header, data) = u8_array(vec![2], vec![10, 20]);
    header.global_tags_mut().set("DESCRIPTION", "ramp").unwrap();
    write_session(&input, &[(header, data)]);

    btatool()
        .arg("component-convert")
        .args(["-c", "float32"])
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let arrays = read_session(&out);
    assert_eq!(arrays.len(), 1);
    let (header, data) = &arrays[0];
    assert_eq!(header.components(), &[Type::Float32]);
    assert_eq!(header.dimensions(), &[2]);
    assert_eq!(header.global_tags().get("DESCRIPTION"), Some("ramp"));
    assert_eq!(&data[..4], &10.0f32.to_le_bytes());
    assert_eq!(&data[4..], &20.0f32.to_le_bytes());
}

#[test]
fn test_convert_range_checked() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.bta");

    let mut header = Header::new();
    header.set_dimensions(vec![1]).unwrap();
    header.set_components(vec![Type::Uint16]).unwrap();
    write_session(&input, &[(header, 300u16.to_le_bytes().to_vec())]);

    btatool()
        .arg("component-convert")
        .args(["-c", "uint8"])
        .arg(&input)
        .arg("-o")
        .arg(temp.path().join("out.bta"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not fit"))
        .stderr(predicate::str::contains("array 0"));
}

#[test]
fn test_convert_component_count_mismatch() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.bta");
    write_session(&input, &[u8_array(vec![1], vec![0])]);

    btatool()
        .arg("component-convert")
        .args(["-c", "float32,float32"])
        .arg(&input)
        .arg("-o")
        .arg(temp.path().join("out.bta"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 2 component type(s)"));
}

// ============================================================================
// info
// ============================================================================

#[test]
fn test_info_listing() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.bta");

    let (mut header, data) = u8_array(vec![4, 2], vec![0; 8]);
    header.global_tags_mut().set("DESCRIPTION", "test").unwrap();
    write_session(&input, &[(header, data)]);

    btatool()
        .arg("info")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("4x2"))
        .stdout(predicate::str::contains("uint8"))
        .stdout(predicate::str::contains("8 elements"))
        .stdout(predicate::str::contains("DESCRIPTION=test"))
        .stdout(predicate::str::contains("1 array(s)"));
}

#[test]
fn test_info_statistics() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.bta");

    let mut header = Header::new();
    header.set_dimensions(vec![3]).unwrap();
    header.set_components(vec![Type::Float64]).unwrap();
    let mut data = Vec::new();
    for x in [1.0f64, 2.0, 3.0] {
        data.extend_from_slice(&x.to_le_bytes());
    }
    write_session(&input, &[(header, data)]);

    btatool()
        .arg("info")
        .arg("-s")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("min 1 max 3 mean 2"));
}

#[test]
fn test_info_statistics_unsupported_type() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("in.bta");

    let mut header = Header::new();
    header.set_dimensions(vec![2]).unwrap();
    header.set_components(vec![Type::Blob { size: 4 }]).unwrap();
    write_session(&input, &[(header, vec![0; 8])]);

    btatool()
        .arg("info")
        .arg("-s")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("statistics unsupported"));
}

#[test]
fn test_info_nonexistent_file() {
    btatool()
        .arg("info")
        .arg("/nonexistent/file.bta")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file.bta"));
}
