//! Writes the C header for the FFI crate to `include/planar_homography.h`.
//!
//! Run with `cargo run -p planar-homography-ffi --features generate-header`.

use std::path::PathBuf;

fn main() {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let out = crate_dir.join("include").join("planar_homography.h");

    let config = cbindgen::Config {
        language: cbindgen::Language::C,
        include_guard: Some("PLANAR_HOMOGRAPHY_H".into()),
        ..Default::default()
    };

    cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
        .expect("cbindgen generation failed")
        .write_to_file(&out);

    println!("wrote {}", out.display());
}
