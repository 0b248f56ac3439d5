//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::Parser;
use rvd::DumpFlags;

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "rvd")]
#[command(about = "RISC-V ELF reader and disassembler (RV32I/M/C)")]
#[command(version)]
pub struct Cli {
    /// Input ELF file
    #[arg(value_name = "ELF")]
    pub input: PathBuf,

    /// Output file (omit with --inline to print to stdout)
    #[arg(value_name = "OUTPUT", required_unless_present = "inline")]
    pub output: Option<PathBuf>,

    /// Print the ELF file header
    #[arg(short = 'H', long)]
    pub file_header: bool,

    /// Print the section header table
    #[arg(short = 'S', long)]
    pub section_headers: bool,

    /// Print the symbol table
    #[arg(short = 's', long)]
    pub symtab: bool,

    /// Disassemble and print the .text section
    #[arg(short = 't', long)]
    pub text: bool,

    /// Same as -H -S -s -t
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Write the report to stdout instead of a file
    #[arg(short = 'i', long)]
    pub inline: bool,

    /// Report missing sections and undecodable words as notices
    /// instead of failing
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(long, conflicts_with = "verbose")]
    pub silent: bool,
}

impl Cli {
    /// Collapse the selection flags, with `--all` implying the rest.
    #[must_use]
    pub const fn dump_flags(&self) -> DumpFlags {
        DumpFlags {
            header: self.file_header || self.all,
            sections: self.section_headers || self.all,
            symbols: self.symtab || self.all,
            text: self.text || self.all,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_implies_every_section() {
        let cli = Cli::parse_from(["rvd", "-a", "-i", "in.elf"]);
        let flags = cli.dump_flags();
        assert!(flags.header && flags.sections && flags.symbols && flags.text);
        assert!(!flags.quiet);
    }

    #[test]
    fn test_output_required_without_inline() {
        assert!(Cli::try_parse_from(["rvd", "-H", "in.elf"]).is_err());
        assert!(Cli::try_parse_from(["rvd", "-H", "in.elf", "out.txt"]).is_ok());
        assert!(Cli::try_parse_from(["rvd", "-H", "-i", "in.elf"]).is_ok());
    }
}
