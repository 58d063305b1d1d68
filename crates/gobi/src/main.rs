//! gobi - your new favourite gopher friend
//!
//! Creates Go command line apps, packages and web apps under `$GOPATH/src`.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Args as ClapArgs, Parser, Subcommand};
use gobi_core::{config, messages, CommandLineError, Project, ProjectKind, TemplateSource, TemplateStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter
const LOG_ENV: &str = "GOBI_LOG";

#[derive(Parser, Debug)]
#[command(name = "gobi")]
#[command(about = "Creates Go command line apps, packages and web apps ready to use")]
#[command(version, disable_help_subcommand = true)]
pub struct Args {
    /// Local directory whose templates override the embedded ones
    #[arg(long = "template-dir", global = true)]
    pub template_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tells you who you are, so where are the projects going to be created
    Whoami,
    /// Shows current version
    #[command(alias = "v")]
    Version,
    /// Shows the commands
    Help,
    /// Creates a command line app ready to use
    Cl(NameArgs),
    /// Creates a Go package with a simple test suite and example
    Pkg(NameArgs),
    /// Creates a web application ready to deploy
    Web(NameArgs),
}

#[derive(ClapArgs, Debug)]
pub struct NameArgs {
    /// One or two levels, e.g. `fmt` or `net/http`
    pub name: Option<String>,
}

/// Parse the command line, reporting mistakes the gobi way
fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let err = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
                ErrorKind::UnknownArgument
                | ErrorKind::TooManyValues
                | ErrorKind::WrongNumberOfValues => CommandLineError::WrongNumberOfArguments,
                _ => CommandLineError::WrongArgument,
            };
            tracing::debug!(error = %e, "rejected command line");
            messages::command_line_error(&err);
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn create(
    kind: ProjectKind,
    args: NameArgs,
    paths: &config::Paths,
    interactive: bool,
) -> Result<()> {
    let user = config::ensure_config(paths, interactive).await?;
    let name = args.name.ok_or(CommandLineError::NoProjectName)?;
    let project = Project::new(&name, kind, &user)?;

    let source = TemplateSource::from_override(paths.template_dir.as_deref());
    let store = TemplateStore::open(source).await?;

    project.create(&paths.src, &store).await?;
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let mut paths = config::Paths::from_env()?;
    if args.template_dir.is_some() {
        paths.template_dir = args.template_dir;
    }
    let interactive = console::user_attended();

    match args.command {
        None => {
            messages::welcome();
            config::ensure_config(&paths, interactive).await?;
        }
        Some(Command::Whoami) => {
            let user = config::ensure_config(&paths, interactive).await?;
            println!("{}", user.whoami());
        }
        Some(Command::Version) => messages::version(CLI_VERSION),
        Some(Command::Help) => messages::help(),
        Some(Command::Cl(name)) => create(ProjectKind::Cl, name, &paths, interactive).await?,
        Some(Command::Pkg(name)) => create(ProjectKind::Pkg, name, &paths, interactive).await?,
        Some(Command::Web(name)) => create(ProjectKind::Web, name, &paths, interactive).await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_tracing();
    let args = parse_args();

    let result = run(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(err) = result {
        match err.downcast_ref::<CommandLineError>() {
            Some(cle) => messages::command_line_error(cle),
            None => messages::error(&err),
        }
        std::process::exit(1);
    }
}
