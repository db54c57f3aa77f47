// End-to-end pipeline tests: determinism, size fidelity, cleanup and atomicity
use std::path::Path;

use svg2ico::icon_builder::{
    IconBuilder, IconConfig, IconError, RenderStrategy, SizeSpec, VectorSource, decode_entries,
};

const RED_SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64"><rect width="64" height="64" fill="#ff0000"/></svg>"##;

fn red_square_source() -> VectorSource {
    VectorSource::Bytes(RED_SQUARE_SVG.as_bytes().to_vec())
}

fn builder() -> IconBuilder {
    IconBuilder::new(IconConfig::default()).expect("builder init failed")
}

fn dir_entry_names(dir: &Path) -> Vec<std::ffi::OsString> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .expect("read dir failed")
        .map(|entry| entry.expect("read dir entry failed").file_name())
        .collect();
    names.sort();
    names
}

#[test]
fn round_trip_red_square_two_sizes() {
    let dir = tempfile::tempdir().expect("temp dir init failed");
    let dest = dir.path().join("red.ico");
    let sizes = SizeSpec::new([(16, 16), (32, 32)]).expect("size list should build");

    let summary = builder()
        .convert(&red_square_source(), &sizes, &dest)
        .expect("convert should succeed");
    assert_eq!(summary.entries, vec![(16, 16), (32, 32)]);

    let bytes = std::fs::read(&dest).expect("read output failed");
    assert_eq!(summary.bytes_written, bytes.len() as u64);

    let decoded = decode_entries(&bytes).expect("decode should succeed");
    assert_eq!(decoded.len(), 2);
    for (entry, &(width, height)) in decoded.iter().zip(sizes.entries()) {
        assert_eq!((entry.width, entry.height), (width, height));
        assert_eq!(entry.rgba.len(), (width * height * 4) as usize);
        for pixel in entry.rgba.chunks_exact(4) {
            assert_eq!(pixel, &[255, 0, 0, 255], "entry {}x{} should be solid red", width, height);
        }
    }
}

#[test]
fn same_input_yields_byte_identical_output() {
    let dir = tempfile::tempdir().expect("temp dir init failed");
    let sizes = SizeSpec::new([(16, 16), (48, 48), (512, 512)]).expect("size list should build");

    let first = dir.path().join("a.ico");
    let second = dir.path().join("b.ico");
    let builder = builder();
    builder
        .convert(&red_square_source(), &sizes, &first)
        .expect("first convert should succeed");
    builder
        .convert(&red_square_source(), &sizes, &second)
        .expect("second convert should succeed");

    assert_eq!(
        std::fs::read(&first).expect("read output failed"),
        std::fs::read(&second).expect("read output failed")
    );
}

#[test]
fn missing_source_fails_without_creating_destination() {
    let dir = tempfile::tempdir().expect("temp dir init failed");
    let dest = dir.path().join("never.ico");
    let sizes = SizeSpec::new([(16, 16)]).expect("size list should build");

    let source = VectorSource::FilePath(dir.path().join("no_such_file.svg"));
    let result = builder().convert(&source, &sizes, &dest);

    assert!(matches!(result, Err(IconError::Rasterize(_))));
    assert!(!dest.exists());
    assert!(dir_entry_names(dir.path()).is_empty());
}

#[test]
fn duplicate_sizes_collapse_to_single_entry() {
    let dir = tempfile::tempdir().expect("temp dir init failed");
    let dest = dir.path().join("dedup.ico");
    let sizes = SizeSpec::new([(32, 32), (32, 32), (16, 16)]).expect("size list should build");
    assert_eq!(sizes.entries(), &[(32, 32), (16, 16)]);

    builder()
        .convert(&red_square_source(), &sizes, &dest)
        .expect("convert should succeed");

    let decoded =
        decode_entries(&std::fs::read(&dest).expect("read output failed")).expect("decode should succeed");
    assert_eq!(decoded.len(), 2);
    assert_eq!((decoded[0].width, decoded[0].height), (32, 32));
    assert_eq!((decoded[1].width, decoded[1].height), (16, 16));
}

#[test]
fn oversize_request_fails_and_preserves_existing_destination() {
    let dir = tempfile::tempdir().expect("temp dir init failed");
    let dest = dir.path().join("existing.ico");
    std::fs::write(&dest, b"sentinel").expect("seed file failed");

    let sizes = SizeSpec::new([(1024, 1024)]).expect("size list should build");
    let result = builder().convert(&red_square_source(), &sizes, &dest);

    assert!(matches!(result, Err(IconError::Pack(_))));
    assert_eq!(std::fs::read(&dest).expect("read output failed"), b"sentinel");
    // No temporary residue after a failed conversion
    assert_eq!(
        dir_entry_names(dir.path()),
        vec![std::ffi::OsString::from("existing.ico")]
    );
}

#[test]
fn success_leaves_no_temporary_residue() {
    let dir = tempfile::tempdir().expect("temp dir init failed");
    let dest = dir.path().join("clean.ico");
    let sizes = SizeSpec::new([(16, 16)]).expect("size list should build");

    builder()
        .convert(&red_square_source(), &sizes, &dest)
        .expect("convert should succeed");

    assert_eq!(
        dir_entry_names(dir.path()),
        vec![std::ffi::OsString::from("clean.ico")]
    );
}

#[test]
fn file_source_converts_like_bytes_source() {
    let dir = tempfile::tempdir().expect("temp dir init failed");
    let svg_path = dir.path().join("logo.svg");
    std::fs::write(&svg_path, RED_SQUARE_SVG).expect("write test svg failed");
    let sizes = SizeSpec::new([(24, 24)]).expect("size list should build");

    let from_file = dir.path().join("from_file.ico");
    let from_bytes = dir.path().join("from_bytes.ico");
    let builder = builder();
    builder
        .convert(&VectorSource::FilePath(svg_path), &sizes, &from_file)
        .expect("file source convert should succeed");
    builder
        .convert(&red_square_source(), &sizes, &from_bytes)
        .expect("bytes source convert should succeed");

    assert_eq!(
        std::fs::read(&from_file).expect("read output failed"),
        std::fs::read(&from_bytes).expect("read output failed")
    );
}

#[test]
fn rerender_strategy_honors_size_fidelity() {
    let dir = tempfile::tempdir().expect("temp dir init failed");
    let dest = dir.path().join("rerender.ico");
    let sizes = SizeSpec::new([(16, 16), (64, 64)]).expect("size list should build");

    let builder = builder();
    builder
        .set_render_strategy(RenderStrategy::Rerender)
        .expect("set strategy failed");
    builder
        .convert(&red_square_source(), &sizes, &dest)
        .expect("convert should succeed");

    let decoded =
        decode_entries(&std::fs::read(&dest).expect("read output failed")).expect("decode should succeed");
    let dims: Vec<_> = decoded
        .iter()
        .map(|entry| (entry.width, entry.height))
        .collect();
    assert_eq!(dims, vec![(16, 16), (64, 64)]);
}

#[test]
fn default_size_set_produces_eight_entries() {
    let dir = tempfile::tempdir().expect("temp dir init failed");
    let dest = dir.path().join("default.ico");

    let summary = builder()
        .convert(&red_square_source(), &SizeSpec::default_icon_sizes(), &dest)
        .expect("convert should succeed");
    assert_eq!(summary.entries.len(), 8);

    let decoded =
        decode_entries(&std::fs::read(&dest).expect("read output failed")).expect("decode should succeed");
    assert_eq!(decoded.len(), 8);
    // Entries up to 256 use DIB payloads, 512 uses a PNG-embedded payload
    for entry in &decoded {
        assert_eq!(entry.png_payload, entry.width > 256);
    }
}
