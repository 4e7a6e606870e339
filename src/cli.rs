use clap::Parser;
use std::path::PathBuf;
use worktree_version::GitCli;

#[derive(Parser, Debug, Clone)]
#[command(name = "worktree-version")]
#[command(about = "Print a deterministic SemVer 2.0 version for the current git checkout")]
#[command(version)]
pub struct CliArgs {
    /// Checkout to compute the version for (default: current directory)
    #[arg(long, short = 'p', value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Git executable to run
    #[arg(long, value_name = "PROGRAM", default_value = "git")]
    pub git: PathBuf,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.path {
            if !path.is_dir() {
                return Err(format!("--path {} is not a directory", path.display()));
            }
        }

        if self.git.as_os_str().is_empty() {
            return Err("--git must not be empty".to_string());
        }

        Ok(())
    }

    /// Build the git runner for this invocation
    pub fn git_runner(&self) -> GitCli {
        GitCli::new(self.git.clone(), self.path.clone())
    }
}
