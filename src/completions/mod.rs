//! Shell completion scripts for recipebox
//!
//! Static completions only: subcommands, flags and the value sets clap
//! knows about (output formats, shells).

use crate::cli::Cli;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

/// Write the completion script for `shell` to `buf`
pub fn generate<W: Write>(shell: Shell, buf: &mut W) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, buf);
}
