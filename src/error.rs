/// Error type for worktree queries
///
/// Every failure of the version pipeline is a `QueryError`. Nothing is
/// retried and there is no fallback version.
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{command} failed ({status}){detail}", status = exit_code(.code), detail = stderr_suffix(.stderr))]
    Failed { command: String, code: Option<i32>, stderr: String },

    #[error("{command} produced non-UTF-8 output")]
    NonUtf8Output { command: String },

    #[error("invalid commit timestamp {output:?}: {reason}")]
    InvalidTimestamp { output: String, reason: String },

    #[error("failed to create scratch index directory: {0}")]
    ScratchDir(#[source] io::Error),
}

fn exit_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {}", c),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() { String::new() } else { format!(": {}", stderr) }
}

pub type Result<T> = std::result::Result<T, QueryError>;
