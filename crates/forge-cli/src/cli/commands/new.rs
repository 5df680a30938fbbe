//! `forge new <name>` – scaffold a new application.

use anyhow::Result;
use forge_core::config::ForgeConfig;
use forge_core::error::ScaffoldError;
use forge_core::scaffold::{self, ScaffoldRequest};
use forge_core::workspace::Workspace;

pub fn run_new(cfg: &ForgeConfig, name: &str, force: bool, no_install: bool) -> Result<()> {
    let ws = Workspace::current()?;
    let req = ScaffoldRequest {
        target_dir: ws.work_dir().join(name),
        force,
        skip_install: no_install,
    };

    println!("Crafting application...");
    match scaffold::run(&ws, &req, cfg) {
        Ok(()) => {
            println!("Application ready. Build something amazing.");
            Ok(())
        }
        Err(err @ ScaffoldError::Install(_)) => {
            // The project itself is in place; only the installer failed.
            eprintln!(
                "warning: the application was scaffolded at {}, but dependency \
                 installation failed; run the installer there manually.",
                req.target_dir.display()
            );
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}
