mod cli;

use crate::cli::Cli;
use crate::cli::Commands;
use crate::cli::Source;
use git_quarry::config::GitQuarryConfig;
use git_quarry::repo::RepoFacade;

use clap::Parser;
use colored::Colorize as _;
use std::panic;

fn run_source(source: &Source, config: &GitQuarryConfig) -> anyhow::Result<RepoFacade> {
    let mut repo = RepoFacade::with_config(&source.repository, !source.shallow, config);
    repo.clone_repo()?;
    Ok(repo)
}

fn print_ndjson<T: serde::Serialize>(records: impl Iterator<Item = T>) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    for record in records {
        serde_json::to_writer(&mut out, &record)?;
        std::io::Write::write_all(&mut out, b"\n")?;
    }
    Ok(())
}

fn dispatch(cli: &Cli, config: &GitQuarryConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Commits(source) => {
            let repo = run_source(source, config)?;
            print_ndjson(repo.commits()?)
        }
        Commands::Filemods(source) => {
            let repo = run_source(source, config)?;
            print_ndjson(repo.filemods()?)
        }
        Commands::Diffs(source) => {
            let repo = run_source(source, config)?;
            print_ndjson(repo.diffs()?)
        }
        Commands::Branches(source) => {
            let repo = run_source(source, config)?;
            print_ndjson(repo.branches()?.into_iter())
        }
        Commands::Tags(source) => {
            let repo = run_source(source, config)?;
            print_ndjson(repo.tags()?.into_iter())
        }
    }
}

fn main() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic| {
        if let Some(payload) = panic.payload().downcast_ref::<&str>() {
            eprintln!("{}", payload.red());
        } else if let Some(payload) = panic.payload().downcast_ref::<String>() {
            eprintln!("{}", payload.red());
        }
        default_hook(panic);
    }));

    git_quarry::cleanup::remove_residual_resources();

    let cli = Cli::parse();
    let level = match cli.log_level.value() {
        Ok(level) => level,
        Err(err) => {
            git_quarry::log::eprint_log(log::Level::Error, &err.to_string());
            std::process::exit(2);
        }
    };
    git_quarry::log::init(level);

    let config = match GitQuarryConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            git_quarry::log::eprint_log(log::Level::Error, &err.to_string());
            std::process::exit(2);
        }
    };

    if let Err(err) = dispatch(&cli, &config) {
        git_quarry::log::eprint_log(log::Level::Error, &format!("{err:#}"));
        std::process::exit(1);
    }
}
