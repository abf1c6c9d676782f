use tracing::{debug, info};

use crate::{
    cli::AddArgs,
    commands::sync,
    config::Config,
    date, display,
    error::ValidationError,
    fetch::{Fetcher, ManualEntry},
    resolver::Fingerprint,
    store::RecordStore,
};

fn nonblank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn describe(fingerprint: &Fingerprint) -> &'static str {
    if fingerprint.arxiv.is_some() {
        "arXiv"
    } else if fingerprint.doi.is_some() {
        "DOI"
    } else {
        "web link"
    }
}

pub fn run(config: &Config, args: AddArgs) -> anyhow::Result<()> {
    let reference = args.reference.trim().to_string();
    if reference.is_empty() {
        return Err(ValidationError::EmptyReference.into());
    }
    let topic = nonblank(args.topic.as_deref())
        .or_else(|| nonblank(config.default_topic.as_deref()))
        .ok_or(ValidationError::EmptyTopic)?
        .to_string();

    let store = RecordStore::open(config.csv_path());
    if !args.allow_duplicate && store.exists(&reference)? {
        display::warning("This paper already exists in the library (use --allow-duplicate to add anyway)");
        return Ok(());
    }

    display::info(format!("Detected source: {}", describe(&Fingerprint::of(&reference))));
    let fetcher = ManualEntry {
        title: args.title,
        authors: args.authors,
        source: args.source,
        date: args.date,
        doi: args.doi,
        journal_ref: args.journal_ref,
        subjects: args.subjects,
    };
    let mut paper = fetcher.fetch(&reference)?;

    if !args.allow_duplicate {
        for candidate in [&paper.doi, &paper.link] {
            if !candidate.is_empty() && store.exists(candidate)? {
                debug!(%candidate, "duplicate matched by fetched metadata");
                display::warning(
                    "This paper already exists in the library (matched by fetched metadata)",
                );
                return Ok(());
            }
        }
    }

    if !paper.date.is_empty() && !date::is_strict(&paper.date) {
        display::warning(format!(
            "Date '{}' is not in YYYY.MM format; stored as given",
            paper.date
        ));
    }

    paper.topic = topic;
    if let Some(tag) = nonblank(args.tag.as_deref())
        && paper.tag.is_empty()
    {
        paper.tag = tag.to_string();
    }
    if let Some(note) = nonblank(args.note.as_deref()) {
        paper.additional_info = note.to_string();
    }

    display::print_detail(&paper);

    if args.dry_run {
        display::warning("Dry run mode - no changes made");
        return Ok(());
    }

    store.append(&paper)?;
    info!(title = %paper.title, topic = %paper.topic, "paper added");
    display::success(format!("Paper added to {}", store.path().display()));

    if args.no_sync || !config.auto_sync {
        return Ok(());
    }
    let plan = sync::plan(config)?;
    if sync::apply(config, &plan)? {
        display::success(format!("Updated {}", config.readme_path().display()));
    }
    Ok(())
}
