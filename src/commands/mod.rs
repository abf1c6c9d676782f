use crate::{cli::Command, config::Config};

pub mod add;
pub mod preview;
pub mod search;
pub mod stats;
pub mod sync;

pub fn dispatch(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Add(args) => add::run(config, args),
        Command::Search(args) => search::run(config, args),
        Command::List(args) => search::list(config, args),
        Command::Preview { topic, diff } => preview::run(config, topic.as_deref(), diff),
        Command::Sync => sync::run(config),
        Command::Topics => stats::topics(config),
        Command::Stats => stats::run(config),
    }
}
