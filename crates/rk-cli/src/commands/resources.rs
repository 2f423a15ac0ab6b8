use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rk_engine::{Element, ResourceKind};

use crate::host::load_actor;

pub fn run(path: &Path) -> Result<(), String> {
    let actor = load_actor(path)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Resource", "Remaining"]);

    let kinds = std::iter::once(ResourceKind::Primary)
        .chain(Element::ALL.into_iter().map(ResourceKind::Elemental));
    for kind in kinds {
        table.add_row(vec![kind.to_string(), actor.resources.get(kind).to_string()]);
    }

    println!("  {}", actor.name.bold());
    if actor.wound_penalty > 0 {
        println!("  wound penalty: +{}", actor.wound_penalty);
    }
    println!("{table}");

    Ok(())
}
