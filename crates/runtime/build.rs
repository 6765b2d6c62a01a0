//! Generates catalogs from `tests/fixtures/res` so that the emitted code is
//! compiled by `tests/compiled_catalog.rs`.

use rescat_core::Generator;
use rescat_core::config::{GeneratorConfig, ShardGranularity};
use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let fixture = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?).join("tests/fixtures/res");
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    println!("cargo:rerun-if-changed={}", fixture.display());

    let layouts = [
        ("per_type", ShardGranularity::PerType),
        ("namespace", ShardGranularity::Namespace),
    ];
    for (name, granularity) in layouts {
        let config = GeneratorConfig {
            max_shard_size: 2,
            granularity,
            content_hash: true,
            ..Default::default()
        };
        let target = out_dir.join(name);
        Generator::new(&fixture, &target, config).run()?;

        // `include!` cannot carry the inner attributes of `mod.rs`, so mount
        // the generated tree through an absolute `#[path]` instead.
        fs::write(
            out_dir.join(format!("{}.rs", name)),
            format!("#[path = {:?}]\nmod {};\n", target.join("mod.rs"), name),
        )?;
    }
    Ok(())
}
