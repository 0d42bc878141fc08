//! External parser invocation.
//!
//! One invocation writes the caller's source text to a fresh temporary
//! directory, runs the external parser against it, and awaits process exit
//! asynchronously. The parser's diagnostic stream is redirected into a result
//! file inside the same directory rather than a pipe, so there is nothing to
//! drain while waiting for the exit notification. The directory and every
//! file in it are removed when the invocation finishes, on every exit path.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::tree::{self, Node};

/// Default limit on waiting for the external parser to exit.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs an external parser and reconstructs its diagnostic output as a tree.
///
/// The parser is invoked as `<command> -o <output> <input>`, where both paths
/// live in a temporary directory owned by the invocation. Its meaningful
/// output is expected on the diagnostic stream, one depth-marked tree line
/// per output line (see [`crate::tree`]).
///
/// Invocations are independent: each owns its own temporary files and child
/// process, so concurrent calls through a shared reference never share state.
///
/// # Examples
///
/// ```no_run
/// use astview::AstProducer;
///
/// # async fn example() -> astview::Result<()> {
/// let producer = AstProducer::new("/usr/local/bin/recog");
/// let root = producer.produce_tree("int main() { }").await?;
/// println!("{}", root.content);
/// # Ok(())
/// # }
/// ```
pub struct AstProducer {
    /// Path to the external parser executable.
    command: PathBuf,
    /// Limit on waiting for process exit.
    timeout: Duration,
}

impl AstProducer {
    /// Creates a producer for the given parser executable.
    #[must_use]
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the limit on waiting for the parser to exit.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the parser against `source` and returns the reconstructed tree.
    ///
    /// Suspends exactly once, while awaiting process exit. The result is the
    /// first depth-0 node of the parsed output; when the parser wrote nothing
    /// to its diagnostic stream, that is a single node labeled
    /// [`tree::EMPTY_OUTPUT_LABEL`]. An abnormal exit status is not an error:
    /// whatever the parser managed to report is still parsed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Launch`] when the executable cannot be started,
    /// [`Error::Timeout`] when it does not exit within the configured limit
    /// (the child is killed first), [`Error::Io`] for temp-file failures, and
    /// [`Error::DepthGap`] when the output skips a nesting level.
    pub async fn produce_tree(&self, source: &str) -> Result<Node> {
        // Owned by this invocation; dropped (and deleted) on every exit path.
        let dir = TempDir::new()?;
        let input = dir.path().join("input.t");
        let output = dir.path().join("output");
        let result = dir.path().join("result");

        tokio::fs::write(&input, source).await?;

        let status = self.run_parser(&input, &output, &result).await?;
        if !status.success() {
            warn!(command = %self.command.display(), %status, "parser exited abnormally");
        }

        let diagnostics = tokio::fs::read_to_string(&result).await?;
        let roots = tree::parse(diagnostics.lines())?;
        // parse never returns an empty sequence.
        Ok(roots.into_iter().next().unwrap_or_else(|| {
            Node::leaf(tree::EMPTY_OUTPUT_LABEL)
        }))
    }

    /// Spawns the parser and awaits its exit under the configured timeout.
    async fn run_parser(
        &self,
        input: &Path,
        output: &Path,
        result: &Path,
    ) -> Result<std::process::ExitStatus> {
        // An open file handle stands in for `2> result`: the diagnostic
        // stream lands on disk with no pipe to drain before exit. The
        // handle must be a std one for Stdio.
        let result_file = tokio::fs::File::create(result).await?.into_std().await;

        debug!(
            command = %self.command.display(),
            input = %input.display(),
            "launching parser"
        );

        let mut child = Command::new(&self.command)
            .arg("-o")
            .arg(output)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(result_file))
            .spawn()
            .map_err(|source| Error::Launch {
                command: self.command.display().to_string(),
                source,
            })?;

        match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(status) => {
                let status = status?;
                debug!(%status, "parser exited");
                Ok(status)
            }
            Err(_) => {
                child.kill().await.ok();
                Err(Error::Timeout {
                    limit: self.timeout,
                })
            }
        }
    }
}
