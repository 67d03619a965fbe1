use std::collections::BTreeMap;

use tera::Value;

use super::Renderer;
use crate::config::{TPL_BRIEF, TPL_ERRORS};
use crate::error::Result;
use crate::external::{Locator, Tool, Toolbox};
use crate::project::Project;

/// Variables describing `project` for the pre-install summary.
pub fn brief_vars<L: Locator>(project: &Project, toolbox: &Toolbox<L>) -> BTreeMap<String, Value> {
    let kind = project.kind();
    let mut vars = BTreeMap::new();
    vars.insert("appname".into(), Value::String(project.name().to_string()));
    vars.insert("kind".into(), Value::String(kind.label().to_string()));
    vars.insert(
        "path".into(),
        Value::String(project.project_path().display().to_string()),
    );
    vars.insert("git".into(), Value::Bool(project.git()));
    if let Some(description) = project.description() {
        vars.insert("description".into(), Value::String(description.to_string()));
    }

    if kind.python().is_some() {
        vars.insert("virtualenv".into(), Value::Bool(project.uses_virtualenv()));
    }

    if let Some(flask) = kind.flask() {
        vars.insert("debug".into(), Value::Bool(flask.debug));
        vars.insert(
            "secret_key".into(),
            Value::String(flask.secret_key.as_str().to_string()),
        );
        vars.insert("database".into(), Value::Bool(kind.database()));
        vars.insert(
            "bower".into(),
            Value::Array(
                flask
                    .frontend
                    .iter()
                    .map(|d| Value::String(d.clone()))
                    .collect(),
            ),
        );
    }

    for (tool, key) in [
        (Tool::Git, "git_exe"),
        (Tool::Virtualenv, "virtualenv_exe"),
        (Tool::Bower, "bower_exe"),
    ] {
        if let Some(path) = toolbox.path(tool) {
            vars.insert(key.into(), Value::String(path.display().to_string()));
        }
    }

    vars
}

pub fn render_brief<L: Locator>(
    renderer: &Renderer,
    project: &Project,
    toolbox: &Toolbox<L>,
) -> Result<String> {
    renderer.render(TPL_BRIEF, &brief_vars(project, toolbox))
}

pub fn render_errors(renderer: &Renderer, errors: &[String]) -> Result<String> {
    let vars = BTreeMap::from([(
        "errors".to_string(),
        Value::Array(errors.iter().map(|e| Value::String(e.clone())).collect()),
    )]);
    renderer.render(TPL_ERRORS, &vars)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::Resources;
    use crate::project::{FlaskConfig, ProjectKind, PythonConfig};

    struct Fixed(Option<&'static str>);

    impl Locator for Fixed {
        fn locate(&mut self, command: &str) -> Option<PathBuf> {
            self.0.map(|dir| PathBuf::from(dir).join(command))
        }
    }

    fn renderer() -> Renderer {
        Renderer::from_dir(&Resources::builtin().templates_dir())
            .unwrap()
            .with_colors(false)
    }

    #[test]
    fn brief_lists_flask_settings() {
        let kind = ProjectKind::FlaskDb(FlaskConfig {
            python: PythonConfig { virtualenv: true },
            frontend: vec!["jquery".into(), "bootstrap".into()],
            ..FlaskConfig::default()
        });
        let project = Project::new("demo", "/work", kind).unwrap().with_git(true);
        let mut toolbox = Toolbox::with_locator(Fixed(Some("/usr/bin")));
        for tool in project.required_tools() {
            toolbox.resolve(tool);
        }

        let brief = render_brief(&renderer(), &project, &toolbox).unwrap();
        assert!(brief.contains("demo"));
        assert!(brief.contains("/work/demo"));
        assert!(brief.contains("jquery"));
        assert!(brief.contains("bootstrap"));
        assert!(brief.contains("/usr/bin/virtualenv"));
        assert!(brief.contains("/usr/bin/bower"));
    }

    #[test]
    fn brief_for_plain_project_omits_python_section() {
        let project = Project::new("demo", "/work", ProjectKind::Plain).unwrap();
        let toolbox = Toolbox::with_locator(Fixed(None));
        let vars = brief_vars(&project, &toolbox);
        assert!(!vars.contains_key("virtualenv"));
        assert!(!vars.contains_key("bower"));
        render_brief(&renderer(), &project, &toolbox).unwrap();
    }

    #[test]
    fn errors_report_lists_every_error() {
        let errors = vec![
            "Virtualenv executable could not be found.".to_string(),
            "Bower executable could not be found.".to_string(),
        ];
        let out = render_errors(&renderer(), &errors).unwrap();
        for e in &errors {
            assert!(out.contains(e.as_str()));
        }
    }
}
