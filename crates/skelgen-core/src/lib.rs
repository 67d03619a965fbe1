pub mod config;
pub mod error;
pub mod external;
pub mod pipeline;
pub mod project;
pub mod render;

use std::path::PathBuf;

use console::style;

use crate::config::Resources;
use crate::error::Result;
use crate::external::{Locator, Runner, Toolbox};
use crate::pipeline::{InstallReport, Installer};
use crate::project::Project;
use crate::render::Renderer;

/// Options for the `install` operation.
pub struct InstallOptions<'a> {
    pub resources: &'a Resources,
    pub renderer: &'a Renderer,
    /// Directory receiving `*-error.log` files.
    pub log_dir: PathBuf,
}

/// Resolve every external tool `project` needs.
///
/// Missing tools are recorded on the toolbox; returns true when nothing is missing.
pub fn preflight<L: Locator>(project: &Project, toolbox: &mut Toolbox<L>) -> bool {
    toolbox.resolve_all(&project.required_tools())
}

/// Main entry point: build `project` on disk.
///
/// Tools are taken from `toolbox`, so run `preflight` first. Fatal step
/// failures are returned as errors; the caller decides how to exit.
pub fn install<L: Locator, R: Runner + ?Sized>(
    project: &Project,
    toolbox: &Toolbox<L>,
    runner: &mut R,
    options: InstallOptions<'_>,
) -> Result<InstallReport> {
    let report = Installer::new(project, options.resources, options.renderer, runner)
        .with_tools(toolbox.resolved())
        .with_log_dir(options.log_dir)
        .run()?;

    println!(
        "\n{} Project generated at {}",
        style("✓").green().bold(),
        style(report.project_path.display()).cyan()
    );
    println!("{}", report.summary());

    Ok(report)
}
