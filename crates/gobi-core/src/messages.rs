//! Console messages printed by gobi

use colored::Colorize;
use std::fmt::Display;
use thiserror::Error;

/// gobi logo
const LOGO: &str = r"
              _     _
             | |   (_)
   __ _  ___ | |__  _
  / _' |/ _ \| '_ \| |
 | (_| | (_) | |_) | |
  \__, |\___/|_.__/|_|
   __/ |
  |___/
";

/// Errors caused by a wrong command line, always followed by a pointer to the help
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandLineError {
    #[error("Wrong number of arguments, try again.")]
    WrongNumberOfArguments,

    #[error("Wrong argument, try again.")]
    WrongArgument,

    #[error("You need to specify a name.")]
    NoProjectName,

    #[error("The project name is not valid.")]
    WrongProjectName,

    #[error("Oops! Looks like this project already exists.")]
    ProjectExists,
}

impl CommandLineError {
    /// The message with its color, plus the help pointer
    pub fn report(&self) -> String {
        let msg = self.to_string();
        let msg = match self {
            CommandLineError::ProjectExists => msg.yellow().bold(),
            _ => msg.red().bold(),
        };
        format!("{} {}", msg, "See `gobi help` for more info.".red())
    }
}

pub fn welcome() {
    println!(
        "{} {}{}",
        "Say hi to".blue(),
        "gobi".red().bold(),
        ", your new favourite gopher friend!".blue()
    );
    println!("{}", LOGO.blue().bold());
}

pub fn help_text() -> String {
    let cmd = |name: &str, what: &str| format!("  {} {}: {}", "-".cyan(), name.yellow().bold(), what);
    let named = |name: &str, what: &str| {
        format!(
            "  {} {}{}: {}",
            "-".cyan(),
            format!("{} <APPNAME>", name).yellow().bold(),
            "*".cyan().bold(),
            what
        )
    };

    [
        "Looks like you need some help:".blue().to_string(),
        cmd("gobi version", "Shows current version."),
        cmd(
            "gobi whoami",
            "Tells you who you are, so where are the projects going to be created.",
        ),
        named("gobi cl", "Creates a command line app ready to use."),
        named(
            "gobi pkg",
            "Creates a Go package with a simple test suite and example.",
        ),
        named("gobi web", "Creates a web application ready to deploy."),
        String::new(),
        format!(
            "  {} {} can have one or two levels and can't be empty. \
             (Examples: `regexp`, `fmt`, `net/http`, `crypto/md5`)",
            "*".cyan().bold(),
            "<APPNAME>".yellow().bold()
        ),
    ]
    .join("\n")
}

pub fn help() {
    welcome();
    println!("{}", help_text());
}

pub fn command_line_error(err: &CommandLineError) {
    eprintln!("{}", err.report());
}

/// Any other failure
pub fn error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);
}

pub fn no_config() {
    println!(
        "{} {}",
        "No configuration found!".yellow().bold(),
        "I'd like to know more about you.".blue()
    );
}

pub fn file_created(file: impl Display) {
    println!("{}", format!(" Create {} ...", file).green());
}

pub fn file_exists(file: impl Display) {
    println!("{}", format!(" File {} already exists. Skipping.", file).yellow());
}

pub fn assets_created(file: impl Display) {
    println!("{}", format!(" Create assets on {} ...", file).green());
}

pub fn creation_ready() {
    println!("{}", " Done!".green().bold());
}

pub fn version(version: &str) {
    println!("{} {}", "Version".blue(), version.blue().bold());
}
