// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Flag that is accepted by every subcommand
fn global_flag(id: &'static str, long: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(long)
        .global(true)
        .action(ArgAction::SetTrue)
        .help(help)
}

/// Optional record file argument
fn records_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .help("Record file (default: stdin)")
}

fn build_cli() -> Command {
    Command::new("pkgsentry")
        .version(env!("CARGO_PKG_VERSION"))
        .author("pkgsentry Contributors")
        .about("Explain resolver outcomes and decide trust questions for a package manager")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("Configuration file (default: $PKGSENTRY_CONFIG, then the user config dir)"),
        )
        .arg(global_flag(
            "no_gpg_checks",
            "no-gpg-checks",
            "Accept verification problems without asking where possible",
        ))
        .arg(global_flag(
            "non_interactive",
            "non-interactive",
            "Never wait for an answer; use the default of every question",
        ))
        .arg(global_flag(
            "show_alias",
            "show-alias",
            "Show repository aliases instead of names",
        ))
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .global(true)
                .help("Operate on a system installed below DIR"),
        )
        .arg(
            Arg::new("from_repos")
                .long("from-repo")
                .value_name("REPO")
                .global(true)
                .action(ArgAction::Append)
                .help("Restrict the operation to a repository (repeatable)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More output (repeat for debug output)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only errors and important warnings"),
        )
        .subcommand(
            Command::new("feedback")
                .about("Explain request outcomes read as JSON lines")
                .arg(records_arg()),
        )
        .subcommand(
            Command::new("trust")
                .about("Decide trust events read as JSON lines")
                .arg(records_arg()),
        )
        .subcommand(Command::new("kinds").about("List known feedback and trust kinds"))
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .help("Shell to generate completions for"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("pkgsentry.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page {}: {}", man_path.display(), e);
    }
}
