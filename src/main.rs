use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    ArgMatches, Command,
};
use log::Log;
use miette::IntoDiagnostic;
use skelly::{manifest::DEFAULT_PROJECT_NAME, preview::preview_as_tree, OnError};
use std::path::{Path, PathBuf};

fn project_arg() -> Arg {
    Arg::new("project")
        .help("Python package name substituted into the skeleton")
        .default_value(DEFAULT_PROJECT_NAME)
}

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("init")
                .about("Creates the skeleton's directories and empty files (default)")
                .arg(project_arg())
                .arg(
                    Arg::new("root")
                        .short('C')
                        .long("root")
                        .help("Directory the skeleton is created in")
                        .value_parser(value_parser!(PathBuf))
                        .default_value("."),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Show what would be created without touching the filesystem")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("keep-going")
                        .long("keep-going")
                        .help("Continue past failing entries and report all of them at the end")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("Lists the skeleton paths for a project")
                .arg(project_arg()),
        )
        .get_matches();

    let is_verbose = matches.get_flag("verbose");

    let logger = skelly::logging::install(is_verbose).into_diagnostic()?;

    match matches.subcommand() {
        Some(("init", args)) => handle_init(args, logger),
        Some(("list", args)) => handle_list(args),
        None => run_init(
            DEFAULT_PROJECT_NAME,
            Path::new("."),
            false,
            OnError::Abort,
            logger,
        ),
        _ => unreachable!(),
    }
}

fn handle_init(args: &ArgMatches, logger: &dyn Log) -> miette::Result<()> {
    let project = args
        .get_one::<String>("project")
        .map(String::as_str)
        .unwrap_or(DEFAULT_PROJECT_NAME);
    let root = args
        .get_one::<PathBuf>("root")
        .map(PathBuf::as_path)
        .unwrap_or_else(|| Path::new("."));
    let on_error = if args.get_flag("keep-going") {
        OnError::Continue
    } else {
        OnError::Abort
    };

    run_init(project, root, args.get_flag("dry-run"), on_error, logger)
}

fn run_init(
    project: &str,
    root: &Path,
    dry_run: bool,
    on_error: OnError,
    logger: &dyn Log,
) -> miette::Result<()> {
    if dry_run {
        let plan = skelly::dry_run(project, root)?;

        preview_as_tree(&plan, root);
    } else {
        skelly::init(project, root, on_error, logger)?;
    }

    logger.flush();

    Ok(())
}

fn handle_list(args: &ArgMatches) -> miette::Result<()> {
    let project = args
        .get_one::<String>("project")
        .map(String::as_str)
        .unwrap_or(DEFAULT_PROJECT_NAME);

    for path in skelly::list(project)? {
        println!("{}", path);
    }

    Ok(())
}
