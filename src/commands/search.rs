use crate::{
    cli::{ListArgs, SearchArgs},
    config::Config,
    date,
    display,
    record::PaperRecord,
    store::{DateRange, RecordStore, SearchFilter},
};

pub fn run(config: &Config, args: SearchArgs) -> anyhow::Result<()> {
    // Validate before touching the store.
    let dates = DateRange::parse(args.date_from.as_deref(), args.date_to.as_deref())?;

    let mut criteria = Vec::new();
    if let Some(q) = &args.query {
        criteria.push(format!("query='{q}'"));
    }
    if let Some(t) = &args.tag {
        criteria.push(format!("tag='{t}'"));
    }
    if let Some(a) = &args.author {
        criteria.push(format!("author='{a}'"));
    }
    if let Some(t) = &args.topic {
        criteria.push(format!("topic='{t}'"));
    }
    if !dates.is_open() {
        criteria.push(format!(
            "date={} to {}",
            args.date_from.as_deref().unwrap_or("*"),
            args.date_to.as_deref().unwrap_or("*")
        ));
    }
    if args.recent {
        criteria.push("sort=recent".to_string());
    }

    let filter = SearchFilter {
        query: args.query,
        tag: args.tag,
        author: args.author,
        topic: args.topic,
        dates,
    };
    let mut results = RecordStore::open(config.csv_path()).search(&filter)?;
    if args.recent {
        sort_recent(&mut results);
    }

    let criteria = if criteria.is_empty() {
        "all".to_string()
    } else {
        criteria.join(", ")
    };
    let title = format!("Search Results ({} found, {criteria})", results.len());
    if truncate(&mut results, args.limit) {
        display::info(format!(
            "Showing top {} results (use --limit 0 for all)",
            args.limit
        ));
    }
    output(&title, &results, args.json)
}

pub fn list(config: &Config, args: ListArgs) -> anyhow::Result<()> {
    let store = RecordStore::open(config.csv_path());
    let (mut papers, title) = match args.topic.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(topic) => {
            let filter = SearchFilter {
                topic: Some(topic.to_string()),
                ..Default::default()
            };
            let papers = store.search(&filter)?;
            let title = format!("Papers in '{topic}' ({} total)", papers.len());
            (papers, title)
        }
        None => {
            let papers = store.load_all()?;
            let title = format!("All Papers ({} total)", papers.len());
            (papers, title)
        }
    };
    if args.recent {
        sort_recent(&mut papers);
    }
    if truncate(&mut papers, args.limit) {
        display::info(format!("Showing {} papers (use --limit 0 for all)", args.limit));
    }
    output(&title, &papers, args.json)
}

/// Newest first; undated records keep their store order after all dated ones.
fn sort_recent(records: &mut [PaperRecord]) {
    records.sort_by(|a, b| date::newest_first(date::date_key(&a.date), date::date_key(&b.date)));
}

/// Keep at most `limit` records (`0` keeps all). Returns whether anything was dropped.
fn truncate(records: &mut Vec<PaperRecord>, limit: usize) -> bool {
    if limit > 0 && records.len() > limit {
        records.truncate(limit);
        true
    } else {
        false
    }
}

fn output(title: &str, records: &[PaperRecord], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else if records.is_empty() {
        display::warning("No papers found");
    } else {
        display::print_records(title, records);
    }
    Ok(())
}
