use std::{fs, path::Path};

use anyhow::{Context, bail};
use tracing::info;

use crate::{
    config::Config,
    display,
    markdown::{self, SyncPlan},
    store::RecordStore,
};

/// Load the store and plan a sync of the configured document against it.
pub fn plan(config: &Config) -> anyhow::Result<SyncPlan> {
    let store = RecordStore::open(config.csv_path());
    if !store.exists_on_disk() {
        bail!("record store not found: {}", store.path().display());
    }
    let records = store.load_all()?;
    let tables = markdown::tables_by_topic(&records);

    let readme = config.readme_path();
    let existing = read_optional(&readme)?;
    Ok(markdown::plan(existing.as_deref(), &tables))
}

fn read_optional(path: &Path) -> anyhow::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("failed to read {}", path.display()))
}

/// Apply `plan` to the document. Returns whether anything was written.
pub fn apply(config: &Config, plan: &SyncPlan) -> anyhow::Result<bool> {
    if plan.is_noop() {
        return Ok(false);
    }
    let readme = config.readme_path();
    fs::write(&readme, &plan.content)
        .with_context(|| format!("failed to write {}", readme.display()))?;
    info!(path = %readme.display(), changes = plan.changes.len(), "document updated");
    Ok(true)
}

pub fn run(config: &Config) -> anyhow::Result<()> {
    let plan = plan(config)?;
    println!("{}", plan.summary());
    if apply(config, &plan)? {
        display::success(format!("Updated {}", config.readme_path().display()));
    }
    Ok(())
}
