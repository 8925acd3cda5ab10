//! Generate the C header for the exported `fetch_*` functions.
//!
//! The header is written to `OUT_DIR`. Set `FETCH_FFI_HEADER_DIR` to also
//! copy it somewhere a C build can pick it up.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");
    println!("cargo:rerun-if-env-changed=FETCH_FFI_HEADER_DIR");

    let (crate_dir, out_dir) = match (env::var("CARGO_MANIFEST_DIR"), env::var("OUT_DIR")) {
        (Ok(crate_dir), Ok(out_dir)) => (PathBuf::from(crate_dir), PathBuf::from(out_dir)),
        _ => return,
    };

    let generated = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("FETCH_FFI_H")
        .generate();
    let bindings = match generated {
        Ok(bindings) => bindings,
        Err(e) => {
            println!("cargo:warning=cbindgen failed, header not generated: {e}");
            return;
        }
    };

    bindings.write_to_file(out_dir.join("fetch_ffi.h"));
    if let Ok(dir) = env::var("FETCH_FFI_HEADER_DIR") {
        bindings.write_to_file(PathBuf::from(dir).join("fetch_ffi.h"));
    }
}
