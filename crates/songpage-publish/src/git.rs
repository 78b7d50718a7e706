//! Optional git publish step: stage, commit and push a generated page.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::GitConfig;
use crate::error::{PublishError, PublishResult};

/// One step of the publish sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitStep {
    Add,
    Commit,
    Push,
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "git add",
            Self::Commit => "git commit",
            Self::Push => "git push",
        };
        f.write_str(name)
    }
}

/// Runs a git command. The error is a message suitable for the user.
pub trait GitRunner {
    fn run(&mut self, repo_dir: &Path, args: &[&str]) -> Result<(), String>;
}

/// Runs the `git` executable found on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn run(&mut self, repo_dir: &Path, args: &[&str]) -> Result<(), String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(repo_dir)
            .output()
            .map_err(|e| format!("could not run git: {e}"))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if stderr.is_empty() {
            Err(format!("git exited with {}", output.status))
        } else {
            Err(stderr.to_string())
        }
    }
}

/// Stages, commits and pushes pages in a repository directory.
#[derive(Debug)]
pub struct Publisher<R = SystemGit> {
    runner: R,
    repo_dir: PathBuf,
    git: GitConfig,
}

impl Publisher<SystemGit> {
    pub fn new(repo_dir: impl Into<PathBuf>, git: GitConfig) -> Self {
        Self::with_runner(SystemGit, repo_dir, git)
    }
}

impl<R: GitRunner> Publisher<R> {
    pub fn with_runner(runner: R, repo_dir: impl Into<PathBuf>, git: GitConfig) -> Self {
        Self {
            runner,
            repo_dir: repo_dir.into(),
            git,
        }
    }

    /// Run add, commit and push in order, stopping at the first failure.
    ///
    /// The page itself is left as is whatever happens here.
    pub fn publish(&mut self, file_name: &str, message: &str) -> PublishResult<()> {
        for (step, args) in self.steps(file_name, message) {
            log::info!("Running {} in {}", step, self.repo_dir.display());
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            self.runner
                .run(&self.repo_dir, &args)
                .map_err(|message| PublishError::Git { step, message })?;
        }
        Ok(())
    }

    /// The commands [`Publisher::publish`] runs, for showing to the user when
    /// they want to publish by hand.
    pub fn manual_commands(&self, file_name: &str, message: &str) -> Vec<String> {
        self.steps(file_name, message)
            .into_iter()
            .map(|(_, args)| {
                let args: Vec<String> = args.iter().map(|arg| shell_quote(arg)).collect();
                format!("git {}", args.join(" "))
            })
            .collect()
    }

    fn steps(&self, file_name: &str, message: &str) -> Vec<(GitStep, Vec<String>)> {
        let mut push = vec!["push".to_string()];
        if let Some(remote) = &self.git.remote {
            push.push(remote.clone());
            if let Some(branch) = &self.git.branch {
                push.push(branch.clone());
            }
        }

        vec![
            (GitStep::Add, vec!["add".to_string(), file_name.to_string()]),
            (
                GitStep::Commit,
                vec!["commit".to_string(), "-m".to_string(), message.to_string()],
            ),
            (GitStep::Push, push),
        ]
    }
}

/// Quote `arg` for a POSIX shell. Plain words are left alone; anything else
/// is single-quoted with embedded `'` written as `'\''`.
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+=,".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
