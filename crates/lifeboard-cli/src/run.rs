//! Executes an [`Action`] against a ledger

use anyhow::Context;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use lifeboard_core::{Collected, Ledger, LedgerConfig, Outcome};
use lifeboard_partition::{LoadReport, PartitionStore};
use lifeboard_record::{Category, Focus, Idea, Opportunity, RecordKind, Task};

use crate::cli::{Action, Invocation};

/// Config file looked up inside the data directory
pub(crate) const CONFIG_FILE: &str = "lifeboard.toml";

/// Runs `$body` with `$R` bound to the record type of `$kind`
macro_rules! with_kind {
    ($kind:expr, $R:ident => $body:expr) => {
        match $kind {
            RecordKind::Task => {
                type $R = Task;
                $body
            }
            RecordKind::Focus => {
                type $R = Focus;
                $body
            }
            RecordKind::Opportunity => {
                type $R = Opportunity;
                $body
            }
            RecordKind::Idea => {
                type $R = Idea;
                $body
            }
        }
    };
}

/// Pick the config: `--config`, else `<data-dir>/lifeboard.toml`, else defaults
pub(crate) fn resolve_config(invocation: &Invocation) -> anyhow::Result<LedgerConfig> {
    let mut config = match &invocation.config {
        Some(path) => load_config(path)?,
        None => {
            let candidate = invocation.data_dir.join(CONFIG_FILE);
            if candidate.is_file() {
                load_config(&candidate)?
            } else {
                LedgerConfig::default()
            }
        }
    };
    if invocation.read_only {
        config.read_only = true;
    }
    Ok(config)
}

fn load_config(path: &Path) -> anyhow::Result<LedgerConfig> {
    LedgerConfig::load(path).with_context(|| format!("failed to load config {}", path.display()))
}

/// Run one action and print the result to `out`
pub(crate) fn execute<S, W>(
    ledger: &mut Ledger<S>,
    action: Action,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: PartitionStore,
    W: Write,
{
    match action {
        Action::List {
            kind,
            category,
            json,
        } => with_kind!(kind, R => list::<R, S, W>(ledger, category, json, out)),

        Action::Add {
            kind,
            text,
            category,
        } => {
            let outcome = match kind {
                RecordKind::Task => ledger.add_task(text, category),
                RecordKind::Focus => ledger.add_focus(text, category),
                RecordKind::Opportunity => ledger.add_opportunity(text, category),
                RecordKind::Idea => ledger.add_idea(text, category),
            };
            report(out, outcome.map(|id| format!("added {kind} {id} under {category}")))?;
            ensure_written(ledger)
        }

        Action::Promote { kind, id } => {
            let outcome = with_kind!(kind, R => ledger.promote::<R>(&id));
            report(out, outcome.map(|placement| format!("{kind} {id} is now {placement}")))?;
            ensure_written(ledger)
        }

        Action::Demote { kind, id } => {
            let outcome = with_kind!(kind, R => ledger.demote::<R>(&id));
            report(out, outcome.map(|placement| format!("{kind} {id} is now {placement}")))?;
            ensure_written(ledger)
        }

        Action::Delete { kind, id } => {
            let outcome = with_kind!(kind, R => ledger.delete::<R>(&id));
            report(out, outcome.map(|()| format!("deleted {kind} {id}")))?;
            ensure_written(ledger)
        }

        Action::Complete { id } => {
            let outcome = ledger.set_completed(&id, true);
            report(out, outcome.map(|()| format!("completed task {id}")))?;
            ensure_written(ledger)
        }

        Action::Reopen { id } => {
            let outcome = ledger.set_completed(&id, false);
            report(out, outcome.map(|()| format!("reopened task {id}")))?;
            ensure_written(ledger)
        }

        Action::Archive { search, json } => {
            let view = ledger.archive_view(search.as_deref());
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                for task in &view {
                    let when = task.completed_at.map_or_else(
                        || "unknown".to_string(),
                        |at| at.format("%Y-%m-%d %H:%M").to_string(),
                    );
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{}",
                        task.header.id,
                        when,
                        task.header.placement(),
                        task.text
                    )?;
                }
                writeln!(out, "{} archived task(s)", view.len())?;
            }
            Ok(())
        }

        Action::Restore { id } => {
            let outcome = ledger.restore(&id);
            report(out, outcome.map(|()| format!("restored task {id}")))?;
            ensure_written(ledger)
        }

        Action::Purge { id, confirmed } => {
            if !confirmed {
                anyhow::bail!("purge of task {id} is permanent; pass --yes to confirm");
            }
            let outcome = ledger.purge(&id);
            report(out, outcome.map(|()| format!("purged task {id}")))?;
            ensure_written(ledger)
        }

        Action::Calendar { id } => {
            let draft = ledger
                .calendar_draft(&id)
                .with_context(|| format!("no task with id {id}"))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&draft)?)?;
            Ok(())
        }

        Action::Sweep => {
            let outcome = ledger.sweep_retention();
            report(out, outcome.map(|swept| format!("retention sweep removed {swept} task(s)")))?;
            ensure_written(ledger)
        }

        Action::Check { json } => check(ledger, json, out),
    }
}

fn list<R, S, W>(
    ledger: &Ledger<S>,
    category: Option<Category>,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: Collected,
    S: PartitionStore,
    W: Write,
{
    let records: Vec<&R> = match category {
        Some(category) => ledger.category_view::<R>(category),
        None => ledger.records::<R>().iter().collect(),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
        return Ok(());
    }
    for record in &records {
        let marker = if record.is_live() { " " } else { "x" };
        writeln!(
            out,
            "[{marker}] {}\t{}\t{}",
            record.id(),
            record.header().placement(),
            record.search_text()
        )?;
    }
    writeln!(out, "{} {}(s)", records.len(), R::KIND)?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct CheckSummary<'a> {
    tasks: usize,
    focuses: usize,
    opportunities: usize,
    ideas: usize,
    open_tasks: usize,
    archived_tasks: usize,
    clean: bool,
    partitions_read: usize,
    missing: &'a [String],
    malformed: &'a [String],
    unreadable: &'a [String],
    skipped_records: usize,
    duplicates: usize,
}

fn check<S, W>(ledger: &Ledger<S>, json: bool, out: &mut W) -> anyhow::Result<()>
where
    S: PartitionStore,
    W: Write,
{
    let load: &LoadReport = ledger.last_load();
    let summary = CheckSummary {
        tasks: ledger.records::<Task>().len(),
        focuses: ledger.records::<Focus>().len(),
        opportunities: ledger.records::<Opportunity>().len(),
        ideas: ledger.records::<Idea>().len(),
        open_tasks: ledger.open_task_count(),
        archived_tasks: ledger.archive_view(None).len(),
        clean: load.is_clean(),
        partitions_read: load.partitions_read,
        missing: &load.missing,
        malformed: &load.malformed,
        unreadable: &load.unreadable,
        skipped_records: load.skipped_records,
        duplicates: load.duplicates,
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }
    writeln!(
        out,
        "records: {} task(s), {} focus goal(s), {} opportunit(ies), {} idea(s)",
        summary.tasks, summary.focuses, summary.opportunities, summary.ideas
    )?;
    writeln!(
        out,
        "tasks: {} open, {} in archive",
        summary.open_tasks, summary.archived_tasks
    )?;
    writeln!(
        out,
        "partitions: {} read, {} missing, {} duplicate id(s) merged",
        summary.partitions_read,
        summary.missing.len(),
        summary.duplicates
    )?;
    for key in summary.malformed {
        writeln!(out, "malformed partition (read as empty): {key}")?;
    }
    for key in summary.unreadable {
        writeln!(out, "unreadable partition (read as empty): {key}")?;
    }
    if summary.skipped_records > 0 {
        writeln!(out, "skipped {} undecodable record(s)", summary.skipped_records)?;
    }
    writeln!(out, "status: {}", if summary.clean { "clean" } else { "lossy" })?;
    Ok(())
}

fn report<W: Write>(out: &mut W, outcome: Outcome<String>) -> anyhow::Result<()> {
    match outcome {
        Outcome::Applied(message) => writeln!(out, "{message}")?,
        Outcome::Skipped(reason) => writeln!(out, "nothing changed: {reason}")?,
    }
    Ok(())
}

/// Fail the command if the last rewrite left partitions behind
fn ensure_written<S: PartitionStore>(ledger: &Ledger<S>) -> anyhow::Result<()> {
    let Some(write) = ledger.last_write() else {
        return Ok(());
    };
    if let Some((key, err)) = write.failed.first() {
        anyhow::bail!(
            "{} partition(s) not written, first was '{key}': {err}",
            write.failed.len()
        );
    }
    Ok(())
}
