use crate::{config::Config, display, store::RecordStore};

/// Tags shown by `stats`.
const TOP_TAGS: usize = 10;

pub fn topics(config: &Config) -> anyhow::Result<()> {
    let topics = RecordStore::open(config.csv_path()).topics()?;
    if topics.is_empty() {
        println!("No topics found.");
        return Ok(());
    }
    display::print_counts("Topics", &topics);
    Ok(())
}

pub fn run(config: &Config) -> anyhow::Result<()> {
    let store = RecordStore::open(config.csv_path());
    let stats = store.stats()?;
    let topics = store.topics()?;
    let tags = store.tags()?;

    println!("Total papers: {}", stats.total);
    match stats.date_range {
        Some((earliest, latest)) => println!("Date range:   {earliest} to {latest}"),
        None => println!("Date range:   -"),
    }
    if !topics.is_empty() {
        display::print_counts("Topics", &topics);
    }
    if !tags.is_empty() {
        display::print_counts("Top tags", &tags[..tags.len().min(TOP_TAGS)]);
    }
    Ok(())
}
