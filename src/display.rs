//! Status lines on stderr and plain record listings on stdout.

use owo_colors::{OwoColorize, Stream::Stderr};

use crate::record::PaperRecord;

pub fn success(msg: impl std::fmt::Display) {
    eprintln!("{} {msg}", "✓".if_supports_color(Stderr, |t| t.green()));
}

pub fn info(msg: impl std::fmt::Display) {
    eprintln!("{} {msg}", "·".if_supports_color(Stderr, |t| t.cyan()));
}

pub fn warning(msg: impl std::fmt::Display) {
    eprintln!("{} {msg}", "!".if_supports_color(Stderr, |t| t.yellow()));
}

pub fn error(msg: impl std::fmt::Display) {
    eprintln!("{} {msg}", "✗".if_supports_color(Stderr, |t| t.red()));
}

/// One line per record: date, title, topic.
pub fn print_records(title: &str, records: &[PaperRecord]) {
    println!("{title}");
    for r in records {
        let date = if r.date.trim().is_empty() { "-" } else { r.date.trim() };
        let topic = r.topic_key().unwrap_or("-");
        println!("  {date:<8} {}  [{topic}]", r.title.trim());
        if !r.link.trim().is_empty() {
            println!("           {}", r.link.trim());
        }
    }
}

pub fn print_detail(record: &PaperRecord) {
    let rows = [
        ("Title", &record.title),
        ("Authors", &record.authors),
        ("Source", &record.source),
        ("Date", &record.date),
        ("DOI", &record.doi),
        ("Link", &record.link),
        ("Topic", &record.topic),
        ("Tag", &record.tag),
        ("Note", &record.additional_info),
    ];
    for (label, value) in rows.iter().filter(|(_, v)| !v.trim().is_empty()) {
        eprintln!("  {:<8} {}", label.if_supports_color(Stderr, |t| t.bold()), value);
    }
}

pub fn print_counts(heading: &str, counts: &[(String, usize)]) {
    println!("{heading}");
    for (name, count) in counts {
        println!("  {count:>5}  {name}");
    }
}
