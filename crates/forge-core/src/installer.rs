//! Post-scaffold dependency installation.
//!
//! Runs composer inside the scaffolded directory: dependencies first, then
//! the project's post-install hook. Composer itself is an opaque external
//! tool; its output is streamed straight to the user's terminal.

use anyhow::{anyhow, Context};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::ScaffoldError;

/// How to invoke composer in this environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composer {
    program: String,
    prefix_args: Vec<String>,
}

impl Composer {
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args);
        cmd
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.prefix_args.iter().cloned());
        parts.extend(args.iter().map(|a| a.to_string()));
        parts.join(" ")
    }
}

/// A `composer.phar` sitting in the invocation directory wins over the
/// system-wide `composer` on PATH.
pub fn find_composer(work_dir: &Path) -> Composer {
    let phar = work_dir.join("composer.phar");
    if phar.is_file() {
        Composer {
            program: "php".to_string(),
            prefix_args: vec![phar.to_string_lossy().into_owned()],
        }
    } else {
        Composer {
            program: "composer".to_string(),
            prefix_args: Vec::new(),
        }
    }
}

/// Installs dependencies and runs the post-install hook in `project_dir`.
/// Stops at the first failing step; the scaffolded directory is kept either
/// way.
pub fn install(work_dir: &Path, project_dir: &Path) -> Result<(), ScaffoldError> {
    let composer = find_composer(work_dir);
    run_step(&composer, &["install", "--no-scripts"], project_dir)?;
    run_step(&composer, &["run-script", "post-install-cmd"], project_dir)
}

fn run_step(composer: &Composer, args: &[&str], project_dir: &Path) -> Result<(), ScaffoldError> {
    let describe = composer.describe(args);
    tracing::info!("running `{}` in {}", describe, project_dir.display());

    let status = composer
        .command()
        .args(args)
        .current_dir(project_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("failed to launch `{}`", describe))
        .map_err(ScaffoldError::Install)?;

    if !status.success() {
        return Err(ScaffoldError::Install(anyhow!(
            "`{}` exited with {}",
            describe,
            status
        )));
    }
    Ok(())
}
