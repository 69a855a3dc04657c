use std::path::Path;

use karma_core::PolicyStore;

use crate::store_file;

pub fn show(store_path: &Path) -> Result<(), String> {
    let store = store_file::load(store_path)?;

    let owners = store.owners();
    let directive_count: usize = owners.iter().map(|o| store.fudge_directives(o).len()).sum();

    println!("  Store:              {}", store_path.display());
    println!("  Max fudge attempts: {}", store.max_fudge_attempts());
    println!(
        "  Directives:         {} across {} owners",
        directive_count,
        owners.len()
    );
    println!("  Karma policies:     {}", store.karma_policies().len());
    Ok(())
}

pub fn set_max_attempts(store_path: &Path, attempts: i32) -> Result<(), String> {
    let mut store = store_file::load(store_path)?;
    store.set_max_fudge_attempts(attempts);
    store_file::save(store_path, &store)?;

    println!("Max fudge attempts set to {attempts}");
    Ok(())
}
