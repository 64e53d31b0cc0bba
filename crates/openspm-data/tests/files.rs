use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use openspm_data::{
    list_data_files, load_output_list, read_array, read_channel_list, save_output_list,
    write_array, write_channel_list, DataError, ScanArray, Shape,
};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "openspm-data-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

#[test]
fn array_file_round_trip_is_bit_exact() {
    let dir = unique_temp_dir("roundtrip");
    let path = dir.join("000001.dat");

    let shape = Shape::new(4, 8, 2, 3);
    let n = shape.element_count().unwrap();
    let data: Vec<f32> = (0..n).map(|i| (i as f32).sin() * 1.0e-3).collect();
    let array = ScanArray::new(shape, data.clone()).unwrap();

    write_array(&path, &array).unwrap();
    assert_eq!(
        std::fs::metadata(&path).unwrap().len() as usize,
        16 + 4 * n
    );

    let back = read_array(&path).unwrap();
    assert_eq!(back.shape(), shape);
    let (_, values) = back.into_parts();
    assert!(values
        .iter()
        .zip(&data)
        .all(|(a, b)| a.to_bits() == b.to_bits()));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn read_rejects_short_and_mismatched_files() {
    let dir = unique_temp_dir("corrupt");

    let short = dir.join("short.dat");
    std::fs::write(&short, [0u8; 12]).unwrap();
    assert!(matches!(
        read_array(&short),
        Err(DataError::TruncatedHeader { len: 12, .. })
    ));

    let mismatched = dir.join("mismatched.dat");
    let mut bytes = Vec::new();
    for d in [2i32, 2, 1, 1] {
        bytes.extend_from_slice(&d.to_le_bytes());
    }
    bytes.extend_from_slice(&1.0f32.to_le_bytes());
    std::fs::write(&mismatched, &bytes).unwrap();
    assert!(matches!(
        read_array(&mismatched),
        Err(DataError::PayloadSizeMismatch {
            expected: 16,
            actual: 4
        })
    ));

    let ragged = dir.join("ragged.dat");
    bytes.push(0);
    std::fs::write(&ragged, &bytes).unwrap();
    assert!(matches!(
        read_array(&ragged),
        Err(DataError::TruncatedPayload { len: 5 })
    ));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_is_io_error_with_path() {
    let dir = unique_temp_dir("missing");
    let path = dir.join("nope.dat");

    match read_array(&path) {
        Err(DataError::Io { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io error, got {other:?}"),
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn channel_list_file_round_trip() {
    let dir = unique_temp_dir("channels");
    let path = dir.join("list_ch.dat");

    write_channel_list(&path, &[2, 0, 7]).unwrap();
    let raw = std::fs::read(&path).unwrap();
    assert_eq!(&raw[..4], &3i32.to_le_bytes());
    assert_eq!(read_channel_list(&path).unwrap(), vec![2, 0, 7]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn output_list_writes_paired_files() {
    let dir = unique_temp_dir("output-list");
    let base = dir.join("line_a");

    let output = ScanArray::new((3, 1, 1, 2), vec![0.0, 1.0, 0.5, 1.5, 1.0, 2.0]).unwrap();
    let paths = save_output_list(&base, &[0, 1], &output).unwrap();

    assert_eq!(paths.data, dir.join("line_a.dat"));
    assert_eq!(paths.channels, dir.join("line_a_ch.dat"));
    assert!(paths.data.is_file());
    assert!(paths.channels.is_file());

    let (channels, back) = load_output_list(&base).unwrap();
    assert_eq!(channels, vec![0, 1]);
    assert_eq!(back, output);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn data_files_listed_oldest_first() {
    let dir = unique_temp_dir("listing");

    for name in ["000003.dat", "000001.dat", "000002.dat"] {
        std::fs::write(dir.join(name), [0u8; 16]).unwrap();
        thread::sleep(Duration::from_millis(20));
    }
    std::fs::write(dir.join("000001_ch.dat"), [0u8; 4]).unwrap();
    std::fs::write(dir.join("notes.txt"), b"x").unwrap();
    std::fs::create_dir(dir.join("999999.dat")).unwrap();

    let names: Vec<String> = list_data_files(&dir)
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["000003.dat", "000001.dat", "000002.dat"]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[cfg(unix)]
#[test]
fn symlinked_data_files_are_listed() {
    let dir = unique_temp_dir("symlinks");
    let store = unique_temp_dir("symlink-target");

    let target = store.join("capture.bin");
    std::fs::write(&target, [0u8; 16]).unwrap();
    std::os::unix::fs::symlink(&target, dir.join("000001.dat")).unwrap();
    std::os::unix::fs::symlink(store.join("missing.bin"), dir.join("000002.dat")).unwrap();

    let listed = list_data_files(&dir).unwrap();
    assert_eq!(listed, [dir.join("000001.dat")]);

    let _ = std::fs::remove_dir_all(&dir);
    let _ = std::fs::remove_dir_all(&store);
}
