use anyhow::bail;

use crate::{commands::sync, config::Config, display, markdown, store::RecordStore};

pub fn run(config: &Config, topic: Option<&str>, diff: bool) -> anyhow::Result<()> {
    if diff {
        let plan = sync::plan(config)?;
        println!("{}", plan.summary());
        return Ok(());
    }

    let store = RecordStore::open(config.csv_path());
    if !store.exists_on_disk() {
        bail!("record store not found: {}", store.path().display());
    }
    let tables = markdown::tables_by_topic(&store.load_all()?);
    match markdown::preview(&tables, topic) {
        Some(text) => print!("{text}"),
        None => match topic {
            Some(topic) => display::warning(format!("No papers found for topic '{}'", topic.trim())),
            None => display::warning("No papers in the library yet"),
        },
    }
    Ok(())
}
