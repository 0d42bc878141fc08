//! Error types for astview operations.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// The error type for astview operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The external parser executable could not be started.
    #[error("failed to launch parser `{command}`: {source}")]
    Launch {
        /// The command that could not be launched.
        command: String,
        /// The underlying spawn error.
        #[source]
        source: io::Error,
    },

    /// IO error occurred while preparing input or reading results.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The external parser did not exit within the configured limit.
    #[error("parser did not exit within {limit:?}")]
    Timeout {
        /// The wait limit that was exceeded.
        limit: Duration,
    },

    /// A line's depth jumped past a level no parent could own.
    #[error("line {line_number}: depth {found} is unreachable from depth {expected}")]
    DepthGap {
        /// 1-based line number within the non-blank line sequence.
        line_number: usize,
        /// The depth found on the offending line.
        found: usize,
        /// The deepest level that could have accepted a line here.
        expected: usize,
    },
}

/// A specialized Result type for astview operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_gap_display_names_line_and_depths() {
        let err = Error::DepthGap {
            line_number: 2,
            found: 2,
            expected: 0,
        };
        assert_eq!(
            err.to_string(),
            "line 2: depth 2 is unreachable from depth 0"
        );
    }

    #[test]
    fn launch_display_names_command() {
        let err = Error::Launch {
            command: "recog".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("recog"));
    }
}
