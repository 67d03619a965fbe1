use std::path::{Path, PathBuf};

use console::style;
use miette::{IntoDiagnostic, Result};

use skelgen_core::config::{load_user_config, Defaults, Resources};
use skelgen_core::external::{SystemRunner, Toolbox};
use skelgen_core::pipeline::InstallReport;
use skelgen_core::project::{FlaskConfig, Project, ProjectKind, PythonConfig, SecretKey};
use skelgen_core::render::{render_brief, render_errors, Renderer};
use skelgen_core::{install, preflight, InstallOptions};

use crate::cli::{Cli, KindArg};

const EXIT_PREFLIGHT: i32 = 1;
const EXIT_INSTALL_FAILED: i32 = 2;

pub fn run(cli: Cli) -> Result<()> {
    let user = load_user_config()?.unwrap_or_default();
    let resources = Resources::locate(cli.resources.as_deref(), Some(&user));
    let cwd = std::env::current_dir().into_diagnostic()?;
    let log_dir = user.log_dir.clone().unwrap_or_else(|| cwd.clone());
    let destination = cli.output.clone().unwrap_or(cwd);

    let project = build_project(&cli, &user.defaults, destination)?;
    let renderer = Renderer::from_dir(&resources.templates_dir())?;

    let mut toolbox = Toolbox::new();
    preflight(&project, &mut toolbox);

    println!("{}", render_brief(&renderer, &project, &toolbox)?);

    if toolbox.has_errors() {
        println!("{}", render_errors(&renderer, toolbox.errors())?);
        std::process::exit(EXIT_PREFLIGHT);
    }

    if !cli.yes && !confirm() {
        println!("Aborting");
        return Ok(());
    }

    let options = InstallOptions {
        resources: &resources,
        renderer: &renderer,
        log_dir,
    };
    match install(&project, &toolbox, &mut SystemRunner, options) {
        Ok(report) => {
            print_next_steps(&project, &report);
            Ok(())
        }
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(EXIT_INSTALL_FAILED);
        }
    }
}

fn build_project(cli: &Cli, defaults: &Defaults, destination: PathBuf) -> Result<Project> {
    let kind = match (cli.kind, cli.database) {
        (Some(KindArg::Plain | KindArg::Python), true) => {
            miette::bail!("--database is only available for flask projects")
        }
        (_, true) => KindArg::Flask,
        (Some(kind), false) => kind,
        (None, false) => KindArg::Flask,
    };

    let virtualenv = cli.virtualenv || defaults.virtualenv;
    let frontend = if cli.bower.is_empty() {
        defaults.bower.clone()
    } else {
        cli.bower.clone()
    };
    let frontend: Vec<String> = frontend
        .into_iter()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect();

    if kind != KindArg::Flask && (!cli.bower.is_empty() || cli.no_debug) {
        eprintln!(
            "{} --bower and --no-debug only apply to flask projects",
            style("warning:").yellow().bold()
        );
    }

    let python = PythonConfig { virtualenv };
    let project_kind = match kind {
        KindArg::Plain => ProjectKind::Plain,
        KindArg::Python => ProjectKind::Python(python),
        KindArg::Flask => {
            let flask = FlaskConfig {
                python,
                secret_key: SecretKey::generate(),
                debug: defaults.debug && !cli.no_debug,
                frontend,
            };
            if cli.database {
                ProjectKind::FlaskDb(flask)
            } else {
                ProjectKind::Flask(flask)
            }
        }
    };

    let project = Project::new(&cli.name, destination, project_kind)?
        .with_git(cli.git || defaults.git)
        .with_description(cli.description.clone());
    Ok(project)
}

fn confirm() -> bool {
    inquire::Confirm::new("Is this correct?")
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}

fn print_next_steps(project: &Project, report: &InstallReport) {
    let path = display_relative(&report.project_path);
    println!("\n{}", style("Next steps:").bold());
    println!("  cd {path}");
    if project.uses_virtualenv() {
        println!("  source venv/bin/activate");
    }
    if project.kind().flask().is_some() {
        println!("  python run.py");
    }
}

fn display_relative(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("skelgen").chain(args.iter().copied())).unwrap()
    }

    fn build(args: &[&str]) -> Result<Project> {
        build_project(&parse(args), &Defaults::default(), PathBuf::from("/work"))
    }

    #[test]
    fn defaults_to_flask_with_debug() {
        let project = build(&["demo"]).unwrap();
        let flask = project.kind().flask().unwrap();
        assert!(matches!(project.kind(), ProjectKind::Flask(_)));
        assert!(flask.debug);
        assert!(!project.git());
        assert!(!project.uses_virtualenv());
        assert_eq!(project.project_path(), PathBuf::from("/work/demo"));
    }

    #[test]
    fn database_flag_selects_flask_db() {
        let project = build(&["demo", "-d", "-g", "-n"]).unwrap();
        assert!(matches!(project.kind(), ProjectKind::FlaskDb(_)));
        assert!(project.git());
        assert!(!project.kind().flask().unwrap().debug);
    }

    #[test]
    fn database_with_plain_kind_is_rejected() {
        assert!(build(&["demo", "-d", "--kind", "plain"]).is_err());
    }

    #[test]
    fn bower_list_is_trimmed_and_ordered() {
        let project = build(&["demo", "-b", "jquery, bootstrap,,"]).unwrap();
        assert_eq!(project.frontend(), ["jquery", "bootstrap"]);
    }

    #[test]
    fn config_defaults_apply_under_flags() {
        let defaults = Defaults {
            git: true,
            virtualenv: true,
            debug: false,
            bower: vec!["jquery".into()],
        };
        let project =
            build_project(&parse(&["demo"]), &defaults, PathBuf::from("/work")).unwrap();
        assert!(project.git());
        assert!(project.uses_virtualenv());
        assert!(!project.kind().flask().unwrap().debug);
        assert_eq!(project.frontend(), ["jquery"]);
    }

    #[test]
    fn python_kind_keeps_virtualenv_flag() {
        let project = build(&["demo", "--kind", "python", "-v"]).unwrap();
        assert!(matches!(project.kind(), ProjectKind::Python(_)));
        assert!(project.uses_virtualenv());
    }

    #[test]
    fn invalid_name_is_rejected() {
        assert!(build(&["../escape"]).is_err());
    }
}
