pub mod copy;
pub mod step;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use console::style;

use crate::config::{Resources, LOG_PIP};
use crate::error::{Result, SkelError};
use crate::external::{run_logged, Invocation, Runner, Tool};
use crate::project::Project;
use crate::render::Renderer;

pub use copy::copy_skeleton;
pub use step::{plan, Step, StepKind, StepStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Running,
    Completed,
    Aborted,
}

#[derive(Debug, Clone)]
pub struct StepRecord {
    pub step: Step,
    pub status: StepStatus,
}

/// What an install run did.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub project_path: PathBuf,
    pub state: PipelineState,
    pub steps: Vec<StepRecord>,
    /// Messages of non-fatal step failures.
    pub warnings: Vec<String>,
}

impl InstallReport {
    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|r| r.status == status).count()
    }

    /// Step tally followed by any non-fatal failures, one per line.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "  {} of {} step(s) completed",
            self.count(StepStatus::Ok),
            self.steps.len()
        )];
        if !self.warnings.is_empty() {
            lines.push(format!(
                "  {} step(s) failed without stopping the install:",
                self.warnings.len()
            ));
            lines.extend(self.warnings.iter().map(|w| format!("    - {w}")));
        }
        lines.join("\n")
    }
}

/// Runs the install steps of one project, in order, against a `Runner`.
pub struct Installer<'a, R: Runner + ?Sized> {
    project: &'a Project,
    resources: &'a Resources,
    renderer: &'a Renderer,
    runner: &'a mut R,
    tools: BTreeMap<Tool, PathBuf>,
    log_dir: PathBuf,
    report: InstallReport,
}

impl<'a, R: Runner + ?Sized> Installer<'a, R> {
    pub fn new(
        project: &'a Project,
        resources: &'a Resources,
        renderer: &'a Renderer,
        runner: &'a mut R,
    ) -> Self {
        let steps = plan(project)
            .into_iter()
            .map(|step| StepRecord {
                step,
                status: StepStatus::Pending,
            })
            .collect();

        Self {
            project,
            resources,
            renderer,
            runner,
            tools: BTreeMap::new(),
            log_dir: PathBuf::from("."),
            report: InstallReport {
                project_path: project.project_path(),
                state: PipelineState::Running,
                steps,
                warnings: Vec::new(),
            },
        }
    }

    /// Executable paths from pre-flight resolution.
    pub fn with_tools(mut self, tools: BTreeMap<Tool, PathBuf>) -> Self {
        self.tools = tools;
        self
    }

    /// Directory receiving `*-error.log` files.
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    /// Progress so far; after a failed `run` this shows where it stopped.
    pub fn report(&self) -> &InstallReport {
        &self.report
    }

    pub fn run(&mut self) -> Result<InstallReport> {
        tracing::info!(
            project = %self.project.project_path().display(),
            kind = self.project.kind().label(),
            steps = self.report.steps.len(),
            "installing project"
        );

        for idx in 0..self.report.steps.len() {
            let step = self.report.steps[idx].step.clone();
            self.report.steps[idx].status = StepStatus::Running;

            print!("{:<36}", step.label());
            let _ = std::io::stdout().flush();

            match self.execute(&step.kind) {
                Ok(()) => {
                    self.report.steps[idx].status = StepStatus::Ok;
                    println!("{}", style("Ok").green());
                }
                Err(e) => {
                    self.report.steps[idx].status = StepStatus::Failed;
                    println!("{}", style("Failed").red());

                    if step.fatal {
                        tracing::debug!(step = %step.label(), error = %e, "aborting install");
                        self.report.state = PipelineState::Aborted;
                        return Err(e);
                    }

                    eprintln!("{} {}", style("warning:").yellow().bold(), style(&e).yellow());
                    self.report.warnings.push(e.to_string());
                }
            }
        }

        self.report.state = PipelineState::Completed;
        Ok(self.report.clone())
    }

    fn execute(&mut self, kind: &StepKind) -> Result<()> {
        let project = self.project;
        match kind {
            StepKind::CopySkeleton => {
                let skeleton = project.kind().skeleton();
                let copied = copy_skeleton(
                    skeleton,
                    &self.resources.skeleton_dir(skeleton),
                    &project.project_path(),
                )?;
                tracing::debug!(files = copied.len(), skeleton, "copied skeleton");
                Ok(())
            }
            StepKind::WriteConfig => {
                let rendered = self
                    .renderer
                    .render(project.kind().config_template(), &project.config_vars())?;
                let path = project.config_path();
                std::fs::write(&path, rendered).map_err(|e| SkelError::Io {
                    context: format!("writing {}", path.display()),
                    source: e,
                })
            }
            StepKind::GitInit => {
                let invocation = Invocation::new(self.tool(Tool::Git)?)
                    .arg("init")
                    .arg(project.project_path());
                self.run_tool(
                    Tool::Git,
                    &invocation,
                    "An error occurred during the initialization of the git repository.",
                )
            }
            StepKind::Gitignore => {
                let template = self.resources.gitignore_template();
                let dest = project.gitignore_path();
                std::fs::copy(&template, &dest)
                    .map(|_| ())
                    .map_err(|e| SkelError::Io {
                        context: format!("copying {} to {}", template.display(), dest.display()),
                        source: e,
                    })
            }
            StepKind::CreateVirtualenv => {
                let invocation =
                    Invocation::new(self.tool(Tool::Virtualenv)?).arg(project.virtualenv_path());
                self.run_tool(
                    Tool::Virtualenv,
                    &invocation,
                    "An error occurred during the creation of the virtualenv.",
                )
            }
            StepKind::InstallRequirements => {
                let invocation = Invocation::new(pip_path(&project.virtualenv_path()))
                    .arg("install")
                    .arg("-r")
                    .arg(project.requirements_path());
                let log_file = self.log_dir.join(LOG_PIP);
                run_logged(
                    &mut *self.runner,
                    &invocation,
                    &log_file,
                    "An error occurred during the installation of dependencies.",
                    false,
                )
            }
            StepKind::InstallFrontend(dep) => {
                let static_dir = project.static_dir();
                std::fs::create_dir_all(&static_dir).map_err(|e| SkelError::Io {
                    context: format!("creating {}", static_dir.display()),
                    source: e,
                })?;
                let invocation = Invocation::new(self.tool(Tool::Bower)?)
                    .arg("install")
                    .arg(dep)
                    .current_dir(static_dir);
                self.run_tool(
                    Tool::Bower,
                    &invocation,
                    &format!("An error occurred during the installation of {dep}."),
                )
            }
        }
    }

    fn tool(&self, tool: Tool) -> Result<PathBuf> {
        self.tools
            .get(&tool)
            .cloned()
            .ok_or_else(|| SkelError::ToolUnavailable {
                tool: tool.display_name().to_string(),
            })
    }

    fn run_tool(&mut self, tool: Tool, invocation: &Invocation, message: &str) -> Result<()> {
        let log_file = self.log_dir.join(tool.log_file());
        // Front-end installs share one log, so keep earlier failures.
        let append = tool == Tool::Bower;
        run_logged(&mut *self.runner, invocation, &log_file, message, append)
    }
}

/// `pip` inside a virtualenv.
pub fn pip_path(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts").join("pip.exe")
    } else {
        venv.join("bin").join("pip")
    }
}
