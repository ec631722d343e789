//! `doctor` command implementation: a cheap sanity check that runs before a
//! real comparison is attempted, so mistakes (wrong path, truncated
//! download, non-archive file) are reported as plain English rather than as
//! a `MalformedArchive` failure buried in a comparison result.

use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::cli::{Cli, Commands};

const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

pub fn run(cli: &Cli) -> Result<()> {
    let Commands::Doctor { old, new } = &cli.command else {
        unreachable!("doctor::run called with a non-Doctor command")
    };

    if !cli.quiet {
        println!("{}", "jarlint doctor".bold());
        println!("{}", "-".repeat(30).dimmed());
    }

    let old_ok = check_archive_path(old, cli.quiet);
    let new_ok = check_archive_path(new, cli.quiet);

    if !cli.quiet {
        println!();
        if old_ok && new_ok {
            println!("{} both archives look ready to compare", "OK".green().bold());
        } else {
            println!("{} fix the issues above before running `jarlint compare`", "FAIL".red().bold());
        }
    }

    if !(old_ok && new_ok) {
        std::process::exit(1);
    }
    Ok(())
}

fn check_archive_path(path: &Path, quiet: bool) -> bool {
    let label = path.display();

    if !path.exists() {
        if !quiet {
            println!("  {} {label}: does not exist", "FAIL".red());
        }
        return false;
    }

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            if !quiet {
                println!("  {} {label}: not readable ({e})", "FAIL".red());
            }
            return false;
        }
    };

    if bytes.len() < 4 || bytes[0..4] != ZIP_MAGIC {
        if !quiet {
            println!("  {} {label}: does not start with the ZIP local-file-header magic", "FAIL".red());
        }
        return false;
    }

    if !quiet {
        println!("  {} {label}: exists, readable, looks like a ZIP archive", "OK".green());
    }
    true
}
