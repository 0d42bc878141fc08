//! CLI argument parsing and execution.
//!
//! This module provides the command-line interface for astview using clap's
//! derive API.
//!
//! # Example
//!
//! ```bash
//! astview --parser /opt/recog/bin/recog test.t
//! echo 'int main() { }' | astview --parser recog --json
//! ```

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use astview::AstProducer;

use crate::output::{self, OutputMode};

/// Astview - visualize external parser output as a tree
///
/// Runs an external parser against a source file and reconstructs its
/// depth-marked diagnostic output into a tree.
#[derive(Parser, Debug)]
#[command(name = "astview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source file to parse; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Path to the external parser executable
    #[arg(long, env = "ASTVIEW_PARSER")]
    pub parser: PathBuf,

    /// Seconds to wait for the parser to exit
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Output in JSON format for programmatic use
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI: load source, run the parser, render the tree.
    pub async fn execute(&self) -> Result<()> {
        let source = self.read_source().await?;

        let producer = AstProducer::new(&self.parser)
            .with_timeout(Duration::from_secs(self.timeout));
        let root = producer
            .produce_tree(&source)
            .await
            .with_context(|| format!("parsing with {}", self.parser.display()))?;

        let mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        output::print_tree(&root, mode)?;
        Ok(())
    }

    async fn read_source(&self) -> Result<String> {
        match &self.file {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display())),
            None => {
                let mut source = String::new();
                std::io::stdin()
                    .read_to_string(&mut source)
                    .context("reading stdin")?;
                Ok(source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_path_is_required() {
        let result = Cli::try_parse_from(["astview", "test.t"]);
        assert!(result.is_err());
    }

    #[test]
    fn file_is_optional() {
        let cli = Cli::try_parse_from(["astview", "--parser", "recog"]).unwrap();
        assert!(cli.file.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn timeout_defaults_to_thirty_seconds() {
        let cli = Cli::try_parse_from(["astview", "--parser", "recog"]).unwrap();
        assert_eq!(cli.timeout, 30);
    }

    #[test]
    fn json_flag_and_file_parse_together() {
        let cli =
            Cli::try_parse_from(["astview", "--parser", "recog", "--json", "test.t"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.file.as_deref(), Some(std::path::Path::new("test.t")));
    }
}
