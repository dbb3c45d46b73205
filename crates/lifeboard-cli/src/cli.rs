//! Argument parsing

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use lifeboard_record::{Category, RecordId, RecordKind};

/// Directory used when `--data-dir` is not given
pub(crate) const DEFAULT_DATA_DIR: &str = "lifeboard-data";

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    List {
        kind: RecordKind,
        category: Option<Category>,
        json: bool,
    },
    Add {
        kind: RecordKind,
        text: String,
        category: Category,
    },
    Promote {
        kind: RecordKind,
        id: RecordId,
    },
    Demote {
        kind: RecordKind,
        id: RecordId,
    },
    Delete {
        kind: RecordKind,
        id: RecordId,
    },
    Complete {
        id: RecordId,
    },
    Reopen {
        id: RecordId,
    },
    Archive {
        search: Option<String>,
        json: bool,
    },
    Restore {
        id: RecordId,
    },
    Purge {
        id: RecordId,
        confirmed: bool,
    },
    Calendar {
        id: RecordId,
    },
    Sweep,
    Check {
        json: bool,
    },
}

/// Global flags plus the action
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) data_dir: PathBuf,
    pub(crate) config: Option<PathBuf>,
    pub(crate) read_only: bool,
    pub(crate) verbose: bool,
    pub(crate) action: Action,
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .required(true)
        .value_parser(value_parser!(RecordKind))
        .help("Record kind: task, focus, opportunity or idea")
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Record id")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn category_arg() -> Arg {
    Arg::new("category")
        .long("category")
        .short('c')
        .value_parser(value_parser!(Category))
        .help("MAIN, PERSONAL, OCCUPATIONAL or FINANCIAL")
}

/// Build the command tree
pub(crate) fn build() -> Command {
    Command::new("lifeboard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tasks, focus goals, opportunities and ideas across life domains")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .default_value(DEFAULT_DATA_DIR)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the partition files"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Config file (default: <data-dir>/lifeboard.toml if present)"),
        )
        .arg(
            Arg::new("read-only")
                .long("read-only")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Open as a mentor: nothing is changed"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(
            Command::new("list")
                .about("List records, optionally only those shown under one tab")
                .arg(kind_arg())
                .arg(category_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("add")
                .about("Add a record under a tab (default MAIN)")
                .arg(kind_arg())
                .arg(Arg::new("text").required(true).help("Task text or record name"))
                .arg(category_arg()),
        )
        .subcommand(
            Command::new("promote")
                .about("Show a domain record under main")
                .arg(kind_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("demote")
                .about("Return a promoted record to its domain")
                .arg(kind_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a record")
                .arg(kind_arg())
                .arg(id_arg()),
        )
        .subcommand(Command::new("complete").about("Mark a task done").arg(id_arg()))
        .subcommand(Command::new("reopen").about("Mark a task open").arg(id_arg()))
        .subcommand(
            Command::new("archive")
                .about("Tasks completed inside the archive window, newest first")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .short('s')
                        .help("Case-insensitive text filter"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("restore")
                .about("Reopen an archived task")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("purge")
                .about("Permanently delete a completed task")
                .arg(id_arg())
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm the purge"),
                ),
        )
        .subcommand(
            Command::new("calendar")
                .about("Print a calendar event draft for a task")
                .arg(id_arg()),
        )
        .subcommand(Command::new("sweep").about("Apply the configured retention policy"))
        .subcommand(
            Command::new("check")
                .about("Load every partition and report what was found")
                .arg(json_arg()),
        )
}

fn required<T: Clone + Send + Sync + 'static>(args: &ArgMatches, name: &str) -> anyhow::Result<T> {
    args.get_one::<T>(name)
        .cloned()
        .with_context(|| format!("missing argument <{name}>"))
}

fn record_id(args: &ArgMatches) -> anyhow::Result<RecordId> {
    required::<String>(args, "id").map(RecordId::from)
}

/// Turn matches into an [`Invocation`]
pub(crate) fn parse(matches: &ArgMatches) -> anyhow::Result<Invocation> {
    let action = match matches.subcommand() {
        Some(("list", args)) => Action::List {
            kind: required(args, "kind")?,
            category: args.get_one::<Category>("category").copied(),
            json: args.get_flag("json"),
        },
        Some(("add", args)) => Action::Add {
            kind: required(args, "kind")?,
            text: required(args, "text")?,
            category: args
                .get_one::<Category>("category")
                .copied()
                .unwrap_or(Category::Main),
        },
        Some(("promote", args)) => Action::Promote {
            kind: required(args, "kind")?,
            id: record_id(args)?,
        },
        Some(("demote", args)) => Action::Demote {
            kind: required(args, "kind")?,
            id: record_id(args)?,
        },
        Some(("delete", args)) => Action::Delete {
            kind: required(args, "kind")?,
            id: record_id(args)?,
        },
        Some(("complete", args)) => Action::Complete { id: record_id(args)? },
        Some(("reopen", args)) => Action::Reopen { id: record_id(args)? },
        Some(("archive", args)) => Action::Archive {
            search: args.get_one::<String>("search").cloned(),
            json: args.get_flag("json"),
        },
        Some(("restore", args)) => Action::Restore { id: record_id(args)? },
        Some(("purge", args)) => Action::Purge {
            id: record_id(args)?,
            confirmed: args.get_flag("yes"),
        },
        Some(("calendar", args)) => Action::Calendar { id: record_id(args)? },
        Some(("sweep", _)) => Action::Sweep,
        Some(("check", args)) => Action::Check {
            json: args.get_flag("json"),
        },
        Some((other, _)) => anyhow::bail!("unknown command '{other}'"),
        None => anyhow::bail!("no command given"),
    };

    Ok(Invocation {
        data_dir: required(matches, "data-dir")?,
        config: matches.get_one::<PathBuf>("config").cloned(),
        read_only: matches.get_flag("read-only"),
        verbose: matches.get_flag("verbose"),
        action,
    })
}
