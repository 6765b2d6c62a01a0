//! Rust source for shard files and the catalog root module.

use super::code::{CodeWriter, string_literal};
use crate::config::GeneratorConfig;
use crate::model::{LogicalResource, Qualifier, ResourceItem};
use crate::partition::Shard;
use rescat_api::ResourceKind;

pub const HEADER: &str = "// @generated by rescat. Do not edit.";

const RESOURCE_MAP: &str = "::std::collections::BTreeMap<&'static str, &'static rt::Resource>";

pub fn collector_name(kind: ResourceKind) -> String {
    format!("collect_{}", kind.module_name())
}

pub fn all_resources_name(kind: ResourceKind) -> String {
    format!("all_{}_resources", kind.module_name())
}

/// One shard: a static descriptor table, one accessor module per kind and
/// one collector per kind.
pub fn render_shard(shard: &Shard, config: &GeneratorConfig) -> String {
    let mut w = CodeWriter::new();
    w.line(HEADER);
    w.line(format!(
        "// {}: resources {}",
        shard.container_name(),
        shard.members.len()
    ));
    w.blank();
    w.line(format!("use {} as rt;", config.runtime_crate));
    w.blank();

    w.block(
        format!("static TABLE: [rt::Resource; {}] = [", shard.members.len()),
        "];",
        |w| {
            for resource in &shard.members {
                render_resource(w, resource, config);
            }
        },
    );

    for kind in shard.kinds() {
        w.blank();
        w.block(format!("pub mod {} {{", kind.module_name()), "}", |w| {
            let mut first = true;
            for (index, resource) in shard.members.iter().enumerate() {
                if resource.kind != kind {
                    continue;
                }
                if !first {
                    w.blank();
                }
                first = false;
                if config.content_hash {
                    if let Some(hash) = resource.content_hash() {
                        w.line(format!("/// Content hash: `{:016x}`", hash));
                    }
                }
                w.block(
                    format!(
                        "pub fn {}() -> &'static super::rt::Resource {{",
                        resource.identifier
                    ),
                    "}",
                    |w| {
                        w.line(format!("&super::TABLE[{}]", index));
                    },
                );
            }
        });
    }

    for kind in shard.kinds() {
        w.blank();
        w.block(
            format!(
                "pub(super) fn {}(map: &mut {}) {{",
                collector_name(kind),
                RESOURCE_MAP
            ),
            "}",
            |w| {
                for (index, resource) in shard.members.iter().enumerate() {
                    if resource.kind == kind {
                        w.line(format!(
                            "map.insert({}, &TABLE[{}]);",
                            string_literal(&resource.name),
                            index
                        ));
                    }
                }
            },
        );
    }

    w.finish()
}

fn render_resource(w: &mut CodeWriter, resource: &LogicalResource, config: &GeneratorConfig) {
    w.block("rt::Resource {", "},", |w| {
        w.line(format!("id: {},", string_literal(&resource.id())));
        w.line(format!(
            "kind: rt::ResourceKind::{},",
            resource.kind.variant_name()
        ));
        w.line(format!("key: {},", string_literal(&resource.name)));
        w.block("items: &[", "],", |w| {
            for item in &resource.items {
                render_item(w, item, config);
            }
        });
    });
}

fn render_item(w: &mut CodeWriter, item: &ResourceItem, config: &GeneratorConfig) {
    let qualifiers: Vec<String> = item.qualifiers.iter().map(qualifier_expr).collect();
    let path = format!("{}{}", config.path_prefix, item.relative_path);
    let span = match item.span {
        Some(span) => format!(
            "Some(rt::ByteSpan {{ offset: {}, size: {} }})",
            span.offset, span.size
        ),
        None => "None".to_string(),
    };

    w.block("rt::ResourceItem {", "},", |w| {
        w.line(format!("qualifiers: &[{}],", qualifiers.join(", ")));
        w.line(format!("path: {},", string_literal(&path)));
        w.line(format!("span: {},", span));
    });
}

fn qualifier_expr(qualifier: &Qualifier) -> String {
    match qualifier {
        Qualifier::Language(code) => {
            format!("rt::Qualifier::Language({})", string_literal(code))
        }
        Qualifier::Region(code) => format!("rt::Qualifier::Region({})", string_literal(code)),
        Qualifier::Theme(theme) => {
            format!("rt::Qualifier::Theme(rt::Theme::{})", theme.variant_name())
        }
        Qualifier::Density(density) => format!(
            "rt::Qualifier::Density(rt::Density::{})",
            density.variant_name()
        ),
    }
}

/// The catalog root: shard module declarations, one namespace module per
/// kind re-exporting its accessors, and one `all_<kind>_resources` function
/// per kind.
pub fn render_root(shards: &[Shard], config: &GeneratorConfig) -> String {
    let vis = config.visibility.keyword();
    let mut w = CodeWriter::new();
    w.line(HEADER);
    w.line("#![allow(dead_code, non_snake_case, unused_imports)]");
    w.blank();
    w.line(format!("use {} as rt;", config.runtime_crate));

    if !shards.is_empty() {
        w.blank();
        for shard in shards {
            w.line(format!("mod {};", shard.module_name()));
        }
    }

    for kind in ResourceKind::ALL {
        let owners: Vec<&Shard> = shards
            .iter()
            .filter(|shard| shard.members.iter().any(|r| r.kind == kind))
            .collect();
        if owners.is_empty() {
            continue;
        }

        w.blank();
        w.block(format!("{} mod {} {{", vis, kind.module_name()), "}", |w| {
            for shard in &owners {
                w.line(format!(
                    "pub use super::{}::{}::*;",
                    shard.module_name(),
                    kind.module_name()
                ));
            }
        });

        w.blank();
        w.block(
            format!(
                "{} fn {}() -> {} {{",
                vis,
                all_resources_name(kind),
                RESOURCE_MAP
            ),
            "}",
            |w| {
                w.line("let mut map = ::std::collections::BTreeMap::new();");
                for shard in &owners {
                    w.line(format!(
                        "{}::{}(&mut map);",
                        shard.module_name(),
                        collector_name(kind)
                    ));
                }
                w.line("map");
            },
        );
    }

    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Visibility;
    use crate::model::QualifierSet;
    use crate::partition::ShardGroup;
    use rescat_api::ByteSpan;
    use std::path::{Path, PathBuf};

    fn item(relative: &str, qualifiers: &[&str], span: Option<ByteSpan>) -> ResourceItem {
        ResourceItem {
            qualifiers: QualifierSet::parse(qualifiers.iter().copied(), Path::new(relative))
                .unwrap(),
            path: PathBuf::from(relative),
            relative_path: relative.to_string(),
            span,
            content_hash: Some(7),
        }
    }

    fn drawable_shard() -> Shard {
        Shard {
            group: ShardGroup::Kind(ResourceKind::Drawable),
            index: 0,
            members: vec![LogicalResource {
                kind: ResourceKind::Drawable,
                name: "my.icon".to_string(),
                identifier: "my_icon".to_string(),
                items: vec![
                    item("drawable/my.icon.png", &[], None),
                    item("drawable-en-rUS-dark/my.icon.png", &["en", "rUS", "dark"], None),
                ],
            }],
        }
    }

    #[test]
    fn test_render_shard() {
        let source = render_shard(&drawable_shard(), &GeneratorConfig::default());
        let expected = r#"// @generated by rescat. Do not edit.
// Drawable0: resources 1

use ::rescat_api as rt;

static TABLE: [rt::Resource; 1] = [
    rt::Resource {
        id: "drawable:my.icon",
        kind: rt::ResourceKind::Drawable,
        key: "my.icon",
        items: &[
            rt::ResourceItem {
                qualifiers: &[],
                path: "drawable/my.icon.png",
                span: None,
            },
            rt::ResourceItem {
                qualifiers: &[rt::Qualifier::Language("en"), rt::Qualifier::Region("US"), rt::Qualifier::Theme(rt::Theme::Dark)],
                path: "drawable-en-rUS-dark/my.icon.png",
                span: None,
            },
        ],
    },
];

pub mod drawable {
    pub fn my_icon() -> &'static super::rt::Resource {
        &super::TABLE[0]
    }
}

pub(super) fn collect_drawable(map: &mut ::std::collections::BTreeMap<&'static str, &'static rt::Resource>) {
    map.insert("my.icon", &TABLE[0]);
}
"#;
        assert_eq!(source, expected);
    }

    #[test]
    fn test_render_shard_options() {
        let config = GeneratorConfig {
            content_hash: true,
            path_prefix: "composeResources/app/".to_string(),
            runtime_crate: "crate::rt_api".to_string(),
            ..Default::default()
        };
        let source = render_shard(&drawable_shard(), &config);
        assert!(source.contains("use crate::rt_api as rt;"));
        assert!(source.contains("path: \"composeResources/app/drawable/my.icon.png\","));
        assert!(source.contains("    /// Content hash: `"));
    }

    #[test]
    fn test_render_values_span() {
        let shard = Shard {
            group: ShardGroup::Kind(ResourceKind::String),
            index: 2,
            members: vec![LogicalResource {
                kind: ResourceKind::String,
                name: "hello".to_string(),
                identifier: "hello".to_string(),
                items: vec![item(
                    "values-xhdpi/strings.xml",
                    &["xhdpi"],
                    Some(ByteSpan { offset: 12, size: 34 }),
                )],
            }],
        };
        let source = render_shard(&shard, &GeneratorConfig::default());
        assert!(source.contains("// String2: resources 1\n"));
        assert!(source.contains("span: Some(rt::ByteSpan { offset: 12, size: 34 }),"));
        assert!(source.contains("qualifiers: &[rt::Qualifier::Density(rt::Density::Xhdpi)],"));
        assert!(source.contains("kind: rt::ResourceKind::String,"));
    }

    #[test]
    fn test_render_root() {
        let mut second = drawable_shard();
        second.index = 1;
        let font = Shard {
            group: ShardGroup::Kind(ResourceKind::Font),
            index: 0,
            members: vec![LogicalResource {
                kind: ResourceKind::Font,
                name: "mono".to_string(),
                identifier: "mono".to_string(),
                items: vec![item("font/mono.ttf", &[], None)],
            }],
        };
        let config = GeneratorConfig {
            visibility: Visibility::Public,
            ..Default::default()
        };

        let source = render_root(&[drawable_shard(), second, font], &config);
        let expected = r#"// @generated by rescat. Do not edit.
#![allow(dead_code, non_snake_case, unused_imports)]

use ::rescat_api as rt;

mod drawable0;
mod drawable1;
mod font0;

pub mod drawable {
    pub use super::drawable0::drawable::*;
    pub use super::drawable1::drawable::*;
}

pub fn all_drawable_resources() -> ::std::collections::BTreeMap<&'static str, &'static rt::Resource> {
    let mut map = ::std::collections::BTreeMap::new();
    drawable0::collect_drawable(&mut map);
    drawable1::collect_drawable(&mut map);
    map
}

pub mod font {
    pub use super::font0::font::*;
}

pub fn all_font_resources() -> ::std::collections::BTreeMap<&'static str, &'static rt::Resource> {
    let mut map = ::std::collections::BTreeMap::new();
    font0::collect_font(&mut map);
    map
}
"#;
        assert_eq!(source, expected);
    }

    #[test]
    fn test_render_empty_root() {
        let source = render_root(&[], &GeneratorConfig::default());
        assert!(source.starts_with(HEADER));
        assert!(!source.contains("mod "));
        assert!(!source.contains("fn "));
    }
}
