//! `git ungraft` - Remove grafts whose parents are present locally.

use anyhow::{Context, Result};
use ungraft_core::{Config, UngraftEngine, UngraftReport};
use ungraft_git::Repository;

use super::UngraftArgs;
use crate::output;

/// Run the ungraft command.
pub fn run(args: &UngraftArgs) -> Result<()> {
    let repo = Repository::open(&args.git_dir)?;

    let config = Config::load_from_git_dir(repo.git_dir()).context("Failed to load config")?;
    let dry_run = args.dry_run || config.general.dry_run;
    output::set_quiet(args.quiet || args.json || config.output.quiet);

    let report = UngraftEngine::new(&repo)
        .dry_run(dry_run)
        .run()
        .context("Failed to ungraft")?;

    if args.json {
        output::essential(&report.to_json()?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &UngraftReport) {
    if report.grafted.is_empty() {
        output::info("Repository is not shallow - nothing to ungraft");
        return;
    }

    for root in &report.roots {
        output::warn(&format!("No parents found for commit {root}. Root?"));
    }

    for commit in &report.candidates {
        output::essential(&output::ungraft_line(commit.as_str(), report.dry_run));
    }

    if !report.blocked.is_empty() {
        output::info(&format!(
            "{} commit(s) remain grafted:",
            report.blocked.len()
        ));
        for blocked in &report.blocked {
            let missing: Vec<&str> = blocked
                .missing
                .iter()
                .map(|p| output::short_id(p.as_str()))
                .collect();
            output::detail(&format!(
                "  {} (missing {})",
                output::short_id(blocked.commit.as_str()),
                missing.join(", ")
            ));
        }
    }

    if !report.has_candidates() {
        output::info("No grafted commits can be ungrafted");
    } else if report.dry_run {
        output::info("Dry run - shallow file not modified");
    } else if report.remaining.is_empty() {
        output::success("Repository is no longer shallow");
    }
}
