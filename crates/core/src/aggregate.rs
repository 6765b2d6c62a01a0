//! Groups scanned entries into logical resources.

use crate::error::{CatalogError, Result};
use crate::model::{LogicalResource, ResourceFile, ResourceItem};
use crate::naming::sanitize;
use rescat_api::ResourceKind;
use std::collections::BTreeMap;
use tracing::debug;

pub type ResourceKey = (ResourceKind, String);

/// Group entries by `(kind, logical name)`. Every group becomes one
/// [`LogicalResource`] whose items are sorted by qualifier precedence.
///
/// Two entries of the same group with an identical qualifier set claim the
/// same variant and abort aggregation.
pub fn aggregate(files: Vec<ResourceFile>) -> Result<BTreeMap<ResourceKey, LogicalResource>> {
    let mut groups: BTreeMap<ResourceKey, Vec<ResourceFile>> = BTreeMap::new();
    for file in files {
        groups
            .entry((file.kind, file.name.clone()))
            .or_default()
            .push(file);
    }

    let mut resources = BTreeMap::new();
    for ((kind, name), mut files) in groups {
        files.sort_by(|a, b| {
            a.qualifiers
                .cmp(&b.qualifiers)
                .then_with(|| a.relative_path.cmp(&b.relative_path))
        });

        if let Some(pair) = files.windows(2).find(|w| w[0].qualifiers == w[1].qualifiers) {
            return Err(CatalogError::DuplicateVariant {
                id: pair[0].id(),
                qualifiers: pair[0].qualifiers.to_string(),
                first: pair[0].path.clone(),
                second: pair[1].path.clone(),
            });
        }

        let items: Vec<ResourceItem> = files.into_iter().map(ResourceItem::from).collect();
        let resource = LogicalResource {
            kind,
            identifier: sanitize(&name),
            name: name.clone(),
            items,
        };
        resources.insert((kind, name), resource);
    }

    debug!("Aggregated {} logical resources", resources.len());
    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QualifierSet;
    use std::path::{Path, PathBuf};

    fn file(kind: ResourceKind, relative: &str, name: &str, qualifiers: &[&str]) -> ResourceFile {
        ResourceFile {
            path: PathBuf::from("/res").join(relative),
            relative_path: relative.to_string(),
            kind,
            qualifiers: QualifierSet::parse(qualifiers.iter().copied(), Path::new(relative))
                .unwrap(),
            name: name.to_string(),
            span: None,
            content_hash: None,
        }
    }

    #[test]
    fn test_groups_variants() {
        let files = vec![
            file(ResourceKind::Drawable, "drawable-dark/icon.png", "icon", &["dark"]),
            file(ResourceKind::Drawable, "drawable-en-dark/icon.png", "icon", &["en", "dark"]),
            file(ResourceKind::Drawable, "drawable/icon.png", "icon", &[]),
            file(ResourceKind::Drawable, "drawable-en/icon.png", "icon", &["en"]),
            file(ResourceKind::Font, "font/icon.ttf", "icon", &[]),
        ];

        let resources = aggregate(files).unwrap();
        assert_eq!(resources.len(), 2);

        let icon = &resources[&(ResourceKind::Drawable, "icon".to_string())];
        let order: Vec<_> = icon.items.iter().map(|i| i.relative_path.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "drawable/icon.png",
                "drawable-en/icon.png",
                "drawable-dark/icon.png",
                "drawable-en-dark/icon.png",
            ]
        );
        assert_eq!(icon.id(), "drawable:icon");

        let font = &resources[&(ResourceKind::Font, "icon".to_string())];
        assert_eq!(font.items.len(), 1);
    }

    #[test]
    fn test_duplicate_variant_names_both_paths() {
        let files = vec![
            file(ResourceKind::Drawable, "drawable/icon.png", "icon", &[]),
            file(ResourceKind::Drawable, "drawable/icon.xml", "icon", &[]),
        ];

        let err = aggregate(files).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, CatalogError::DuplicateVariant { .. }));
        assert!(message.contains("drawable/icon.png"));
        assert!(message.contains("drawable/icon.xml"));
        assert!(message.contains("drawable:icon"));
    }

    #[test]
    fn test_directory_and_file_qualifiers_collide() {
        let files = vec![
            file(ResourceKind::Drawable, "drawable-en/icon.png", "icon", &["en"]),
            file(ResourceKind::Drawable, "drawable/icon-en.png", "icon", &["en"]),
        ];
        assert!(matches!(
            aggregate(files),
            Err(CatalogError::DuplicateVariant { .. })
        ));
    }

    #[test]
    fn test_identifier_is_sanitized() {
        let files = vec![file(ResourceKind::Drawable, "drawable/my.icon.png", "my.icon", &[])];
        let resources = aggregate(files).unwrap();
        let resource = resources.values().next().unwrap();
        assert_eq!(resource.identifier, "my_icon");
        assert_eq!(resource.name, "my.icon");
    }
}
