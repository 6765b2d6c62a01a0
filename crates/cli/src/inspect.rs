use rescat_core::config::GeneratorConfig;
use std::path::PathBuf;
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct ShardRow {
    #[tabled(rename = "Shard")]
    container: String,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Kinds")]
    kinds: String,
    #[tabled(rename = "Resources")]
    size: usize,
    #[tabled(rename = "First")]
    first: String,
    #[tabled(rename = "Last")]
    last: String,
}

#[derive(Tabled)]
struct CollisionRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Wanted")]
    base: String,
    #[tabled(rename = "Assigned")]
    assigned: String,
}

pub fn run(root: PathBuf, config: GeneratorConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Output directory is never touched by plan()
    let generator = rescat_runtime::build_default_generator(root, PathBuf::new(), config);
    let plan = generator.plan()?;

    let rows: Vec<ShardRow> = plan
        .shards
        .iter()
        .map(|shard| ShardRow {
            container: shard.container_name(),
            file: format!("{}.rs", shard.module_name()),
            kinds: shard
                .kinds()
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            size: shard.members.len(),
            first: shard
                .members
                .first()
                .map(|r| r.identifier.clone())
                .unwrap_or_default(),
            last: shard
                .members
                .last()
                .map(|r| r.identifier.clone())
                .unwrap_or_default(),
        })
        .collect();

    if rows.is_empty() {
        println!("No resources found.");
    } else {
        println!("{}", Table::new(rows).with(Style::psql()));
    }

    let total: usize = plan.resources.values().sum();
    println!(
        "\n{} resources, {} shards, {} ignored files",
        total,
        plan.shards.len(),
        plan.ignored
    );

    if !plan.collisions.is_empty() {
        let rows: Vec<CollisionRow> = plan
            .collisions
            .into_iter()
            .map(|c| CollisionRow {
                kind: c.kind.to_string(),
                name: c.name,
                base: c.base,
                assigned: c.assigned,
            })
            .collect();
        println!("\nIdentifier collisions:");
        println!("{}", Table::new(rows).with(Style::psql()));
    }

    Ok(())
}
