use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use karma_core::{KarmaKind, KarmaPolicy, PolicyId, PolicyStore};

use crate::store_file;

#[allow(clippy::too_many_arguments)]
pub fn add_simple(
    store_path: &Path,
    name: &str,
    operator: &str,
    threshold: i32,
    history: usize,
    floor: i32,
    players: bool,
    gms: bool,
    users: Vec<String>,
) -> Result<(), String> {
    let operator = super::parse_operator(operator)?;
    let policy = KarmaPolicy::simple(name, operator, threshold, history, floor)
        .with_scope(super::scope_from_flags(players, gms, users));
    add(store_path, policy)
}

#[allow(clippy::too_many_arguments)]
pub fn add_average(
    store_path: &Path,
    name: &str,
    operator: &str,
    threshold: i32,
    history: usize,
    nudge: i32,
    cumulative: bool,
    players: bool,
    gms: bool,
    users: Vec<String>,
) -> Result<(), String> {
    let operator = super::parse_operator(operator)?;
    let policy = KarmaPolicy::average(name, operator, threshold, history, nudge, cumulative)
        .with_scope(super::scope_from_flags(players, gms, users));
    add(store_path, policy)
}

fn add(store_path: &Path, policy: KarmaPolicy) -> Result<(), String> {
    policy.validate().map_err(|e| e.to_string())?;

    let mut store = store_file::load(store_path)?;
    let id = policy.id;
    let name = policy.name.clone();
    store.add_karma_policy(policy);
    store_file::save(store_path, &store)?;

    println!("Added karma policy '{name}' ({id})");
    Ok(())
}

pub fn list(store_path: &Path) -> Result<(), String> {
    let store = store_file::load(store_path)?;
    let policies = store.karma_policies();

    if policies.is_empty() {
        println!("  No karma policies.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Die", "Trigger", "Effect", "Scope", "State"]);

    for policy in &policies {
        let (trigger, effect) = describe(policy);
        table.add_row(vec![
            policy.id.to_string(),
            policy.name.clone(),
            format!("d{}", policy.die_sides),
            trigger,
            effect,
            super::scope_label(&policy.scope),
            if policy.enabled { "enabled" } else { "disabled" }.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} policies", policies.len());
    Ok(())
}

pub fn toggle(store_path: &Path, id: &str) -> Result<(), String> {
    let mut store = store_file::load(store_path)?;
    let mut policies = store.karma_policies();

    let target = find_policy(&policies, id)?;
    let policy = policies
        .iter_mut()
        .find(|p| p.id == target)
        .ok_or_else(|| format!("no policy with id {id}"))?;
    policy.enabled = !policy.enabled;
    let name = policy.name.clone();
    let state = if policy.enabled { "enabled" } else { "disabled" };

    store.set_karma_policies(policies);
    store_file::save(store_path, &store)?;

    println!("Policy '{name}' {state}");
    Ok(())
}

pub fn remove(store_path: &Path, id: &str) -> Result<(), String> {
    let mut store = store_file::load(store_path)?;

    let target = find_policy(&store.karma_policies(), id)?;
    store.remove_karma_policy(target);
    store_file::save(store_path, &store)?;

    println!("Removed policy {target}");
    Ok(())
}

/// Render a policy's trigger condition and adjustment for table output.
fn describe(policy: &KarmaPolicy) -> (String, String) {
    match &policy.kind {
        KarmaKind::Simple { history, floor } => (
            format!(
                "last {history} rolls all {} {}",
                policy.operator, policy.threshold
            ),
            format!(
                "pull die to {} {floor}",
                if policy.operator.favors_low() {
                    "at least"
                } else {
                    "at most"
                }
            ),
        ),
        KarmaKind::Average {
            history,
            nudge,
            cumulative,
        } => (
            format!(
                "avg of last {history} rolls {} {}",
                policy.operator, policy.threshold
            ),
            format!(
                "nudge die by {}{nudge}{}",
                if policy.operator.favors_low() { "+" } else { "-" },
                if *cumulative { ", cumulative" } else { "" }
            ),
        ),
    }
}

/// Resolve an id prefix against the policy list.
fn find_policy(policies: &[KarmaPolicy], prefix: &str) -> Result<PolicyId, String> {
    let matches: Vec<&KarmaPolicy> = policies
        .iter()
        .filter(|p| p.id.0.to_string().starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [] => Err(format!("no policy with id {prefix}")),
        [policy] => Ok(policy.id),
        _ => Err(format!("policy id {prefix} is ambiguous")),
    }
}
