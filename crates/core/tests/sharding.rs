//! Shard layout of generated catalogs.

use rescat_core::config::{GeneratorConfig, ShardGranularity};
use rescat_core::emit::GeneratedFile;
use rescat_core::Generator;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, relative).unwrap();
}

fn config(max_shard_size: usize) -> GeneratorConfig {
    GeneratorConfig {
        max_shard_size,
        ..Default::default()
    }
}

fn by_path(files: Vec<GeneratedFile>) -> BTreeMap<PathBuf, String> {
    files.into_iter().map(|f| (f.path, f.contents)).collect()
}

#[test]
fn test_large_drawable_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let res = dir.path().join("res");
    let mut names = Vec::new();
    for i in 1..=3247 {
        let name = format!("icon_{}", i);
        touch(&res, &format!("drawable/{}.png", name));
        names.push(name);
    }

    let plan = Generator::new(&res, dir.path().join("gen"), config(100))
        .plan()
        .unwrap();

    assert_eq!(plan.shards.len(), 33);
    assert!(plan.shards.iter().all(|s| s.members.len() <= 100));
    assert_eq!(plan.shards[32].members.len(), 47);
    assert_eq!(plan.shards[32].module_name(), "drawable32");

    names.sort();
    let files = by_path(plan.files);
    for (rank, name) in names.iter().enumerate() {
        let shard = rank / 100;
        let source = &files[&PathBuf::from(format!("drawable{}.rs", shard))];
        assert!(
            source.contains(&format!("pub fn {}() ->", name)),
            "{} should live in drawable{}",
            name,
            shard
        );
    }

    // icon_1, icon_10, icon_100, icon_1000, ...
    let first: Vec<_> = plan.shards[0]
        .members
        .iter()
        .take(4)
        .map(|r| r.identifier.as_str())
        .collect();
    assert_eq!(first, vec!["icon_1", "icon_10", "icon_100", "icon_1000"]);

    let root = &files[&PathBuf::from("mod.rs")];
    assert!(root.contains("mod drawable0;\n"));
    assert!(root.contains("mod drawable32;\n"));
    assert!(!root.contains("mod drawable33;"));
    assert!(root.contains("    drawable32::collect_drawable(&mut map);\n"));
}

#[test]
fn test_every_resource_in_exactly_one_shard() {
    let dir = tempfile::tempdir().unwrap();
    let res = dir.path().join("res");
    for i in 0..57 {
        touch(&res, &format!("drawable/d{}.png", i));
    }
    for i in 0..13 {
        touch(&res, &format!("font/f{}.ttf", i));
    }

    for granularity in [ShardGranularity::PerType, ShardGranularity::Namespace] {
        let config = GeneratorConfig {
            max_shard_size: 8,
            granularity,
            ..Default::default()
        };
        let plan = Generator::new(&res, dir.path().join("gen"), config)
            .plan()
            .unwrap();

        let mut seen = Vec::new();
        for shard in &plan.shards {
            assert!(!shard.members.is_empty() && shard.members.len() <= 8);
            seen.extend(shard.members.iter().map(|r| r.id()));
        }
        let total = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(total, 70);
        assert_eq!(seen.len(), 70);
    }
}

#[test]
fn test_insertion_keeps_earlier_shards() {
    let dir = tempfile::tempdir().unwrap();
    let res = dir.path().join("res");
    for i in 0..300 {
        touch(&res, &format!("drawable/icon_{:03}.png", i));
    }

    let generator = Generator::new(&res, dir.path().join("gen"), config(100));
    let before = by_path(generator.plan().unwrap().files);

    // Sorts right after icon_250, inside drawable2.
    touch(&res, "drawable/icon_250a.png");
    let after = by_path(generator.plan().unwrap().files);

    assert_eq!(before[Path::new("drawable0.rs")], after[Path::new("drawable0.rs")]);
    assert_eq!(before[Path::new("drawable1.rs")], after[Path::new("drawable1.rs")]);
    assert_ne!(before[Path::new("drawable2.rs")], after[Path::new("drawable2.rs")]);
    assert!(!before.contains_key(Path::new("drawable3.rs")));
    assert!(after[Path::new("drawable3.rs")].contains("pub fn icon_299()"));
}

#[test]
fn test_namespace_root_module() {
    let dir = tempfile::tempdir().unwrap();
    let res = dir.path().join("res");
    touch(&res, "drawable/logo.png");
    touch(&res, "font/mono.ttf");
    touch(&res, "font/sans.ttf");

    let config = GeneratorConfig {
        max_shard_size: 2,
        granularity: ShardGranularity::Namespace,
        ..Default::default()
    };
    let plan = Generator::new(&res, dir.path().join("gen"), config)
        .plan()
        .unwrap();
    let files = by_path(plan.files);

    let root = &files[Path::new("mod.rs")];
    assert!(root.contains("mod res0;\nmod res1;\n"));
    assert!(root.contains("pub(crate) mod drawable {\n    pub use super::res0::drawable::*;\n}"));
    assert!(root.contains("    pub use super::res0::font::*;\n    pub use super::res1::font::*;\n"));

    let first = &files[Path::new("res0.rs")];
    assert!(first.contains("pub mod drawable {"));
    assert!(first.contains("pub mod font {"));
    assert!(first.contains("pub(super) fn collect_font("));
}
