use crate::project::Project;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    CopySkeleton,
    WriteConfig,
    GitInit,
    Gitignore,
    CreateVirtualenv,
    InstallRequirements,
    InstallFrontend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Running,
    Ok,
    Failed,
}

/// One planned unit of work. A failed fatal step aborts the install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub fatal: bool,
}

impl Step {
    pub fn label(&self) -> String {
        match &self.kind {
            StepKind::CopySkeleton => "Copying skeleton...".into(),
            StepKind::WriteConfig => "Creating config file...".into(),
            StepKind::GitInit => "Git init...".into(),
            StepKind::Gitignore => "Generating .gitignore...".into(),
            StepKind::CreateVirtualenv => "Creating the virtualenv...".into(),
            StepKind::InstallRequirements => "Installing Python dependencies...".into(),
            StepKind::InstallFrontend(dep) => format!("Bower {dep}..."),
        }
    }
}

struct StepRule {
    applies: fn(&Project) -> bool,
    expand: fn(&Project) -> Vec<StepKind>,
    fatal: bool,
}

fn always(_: &Project) -> bool {
    true
}

fn wants_git(p: &Project) -> bool {
    p.git()
}

fn wants_virtualenv(p: &Project) -> bool {
    p.uses_virtualenv()
}

fn wants_frontend(p: &Project) -> bool {
    !p.frontend().is_empty()
}

/// Install sequence shared by every kind; each entry is gated by its predicate.
const STEPS: &[StepRule] = &[
    StepRule {
        applies: always,
        expand: |_| vec![StepKind::CopySkeleton],
        fatal: true,
    },
    StepRule {
        applies: always,
        expand: |_| vec![StepKind::WriteConfig],
        fatal: true,
    },
    StepRule {
        applies: wants_git,
        expand: |_| vec![StepKind::GitInit, StepKind::Gitignore],
        fatal: true,
    },
    StepRule {
        applies: wants_virtualenv,
        expand: |_| vec![StepKind::CreateVirtualenv, StepKind::InstallRequirements],
        fatal: true,
    },
    StepRule {
        applies: wants_frontend,
        expand: |p| {
            p.frontend()
                .iter()
                .map(|dep| StepKind::InstallFrontend(dep.clone()))
                .collect()
        },
        fatal: false,
    },
];

/// The ordered steps installing `project` runs.
pub fn plan(project: &Project) -> Vec<Step> {
    STEPS
        .iter()
        .filter(|rule| (rule.applies)(project))
        .flat_map(|rule| {
            (rule.expand)(project).into_iter().map(|kind| Step {
                kind,
                fatal: rule.fatal,
            })
        })
        .collect()
}
