use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use karma_core::{DirectiveId, FudgeDirective, PolicyStore, RollKind};

use crate::store_file;

#[allow(clippy::too_many_arguments)]
pub fn add(
    store_path: &Path,
    owner: &str,
    kind: &str,
    operator: &str,
    threshold: i32,
    how: &str,
    endless: bool,
) -> Result<(), String> {
    let owner = super::parse_owner(owner)?;
    let operator = super::parse_operator(operator)?;
    let kind = RollKind::parse(kind);

    let directive = FudgeDirective::new(kind, operator, threshold)
        .with_how(how)
        .with_endless(endless);
    let summary = directive.to_string();
    let id = directive.id;

    let mut store = store_file::load(store_path)?;
    store.add_fudge_directive(&owner, directive);
    store_file::save(store_path, &store)?;

    let tail = if endless { " (endless)" } else { "" };
    println!("Added directive {id} for {owner}: {summary}{tail}");
    Ok(())
}

pub fn list(store_path: &Path, owner: Option<&str>) -> Result<(), String> {
    let store = store_file::load(store_path)?;

    let owners = match owner {
        Some(o) => vec![super::parse_owner(o)?],
        None => store.owners(),
    };

    let mut rows = Vec::new();
    for owner in &owners {
        for directive in store.fudge_directives(owner) {
            rows.push((owner.clone(), directive));
        }
    }

    if rows.is_empty() {
        println!("  No directives.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Owner", "Kind", "Predicate", "How", "State"]);

    for (owner, directive) in &rows {
        let state = match (directive.active, directive.endless) {
            (true, true) => "active, endless".to_string(),
            (true, false) => "active".to_string(),
            (false, _) => "inactive".to_string(),
        };
        let how = if directive.how.is_empty() {
            "—".to_string()
        } else {
            directive.how.clone()
        };
        table.add_row(vec![
            directive.id.to_string(),
            owner.to_string(),
            directive.roll_kind.to_string(),
            format!("total {}", directive.predicate()),
            how,
            state,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} directives", rows.len());
    Ok(())
}

pub fn remove(store_path: &Path, owner: &str, id: &str) -> Result<(), String> {
    let owner = super::parse_owner(owner)?;
    let mut store = store_file::load(store_path)?;

    let target = find_directive(&store.fudge_directives(&owner), id)?;
    store.remove_fudge_directive(&owner, target);
    store_file::save(store_path, &store)?;

    println!("Removed directive {target} from {owner}");
    Ok(())
}

/// Resolve an id prefix against an owner's directive list.
fn find_directive(list: &[FudgeDirective], prefix: &str) -> Result<DirectiveId, String> {
    let matches: Vec<&FudgeDirective> = list
        .iter()
        .filter(|d| d.id.0.to_string().starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [] => Err(format!("no directive with id {prefix}")),
        [directive] => Ok(directive.id),
        _ => Err(format!("directive id {prefix} is ambiguous")),
    }
}
