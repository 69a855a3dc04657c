use std::path::Path;

use karma_core::PolicyStore;

use crate::store_file;

pub fn run(store_path: &Path, user: &str, die: u32) -> Result<(), String> {
    let store = store_file::load(store_path)?;
    let history = store.roll_history(user, die);

    if history.is_empty() {
        println!("  No rolls recorded for {user} on d{die}.");
        return Ok(());
    }

    let values: Vec<String> = history.iter().map(|v| v.to_string()).collect();
    println!("  d{die} history for {user}: {}", values.join(", "));
    if let Some(average) = history.average(history.len()) {
        println!("  {} rolls, average {average:.1}", history.len());
    }
    Ok(())
}
