mod secret;

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use tera::Value;

use crate::error::{Result, SkelError};
use crate::external::Tool;

pub use secret::SecretKey;

/// Settings shared by every Python-based project.
#[derive(Debug, Clone, Default)]
pub struct PythonConfig {
    pub virtualenv: bool,
}

/// Settings of a Flask application.
#[derive(Debug, Clone)]
pub struct FlaskConfig {
    pub python: PythonConfig,
    pub secret_key: SecretKey,
    pub debug: bool,
    /// Front-end packages, installed in this order.
    pub frontend: Vec<String>,
}

impl Default for FlaskConfig {
    fn default() -> Self {
        Self {
            python: PythonConfig::default(),
            secret_key: SecretKey::generate(),
            debug: true,
            frontend: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ProjectKind {
    Plain,
    Python(PythonConfig),
    Flask(FlaskConfig),
    FlaskDb(FlaskConfig),
}

impl ProjectKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectKind::Plain => "plain",
            ProjectKind::Python(_) => "python",
            ProjectKind::Flask(_) => "flask",
            ProjectKind::FlaskDb(_) => "flask-db",
        }
    }

    /// Skeleton directory name under `skeletons/`.
    pub fn skeleton(&self) -> &'static str {
        match self {
            ProjectKind::Plain => "plain",
            ProjectKind::Python(_) => "python",
            ProjectKind::Flask(_) => "flask",
            ProjectKind::FlaskDb(_) => "flask_db",
        }
    }

    pub fn config_template(&self) -> &'static str {
        match self {
            ProjectKind::Plain => "project.toml.tera",
            ProjectKind::Python(_) => "setup.cfg.tera",
            ProjectKind::Flask(_) => "config.py.tera",
            ProjectKind::FlaskDb(_) => "config_db.py.tera",
        }
    }

    /// Configuration file name, relative to the project root.
    pub fn config_file(&self) -> &'static str {
        match self {
            ProjectKind::Plain => "project.toml",
            ProjectKind::Python(_) => "setup.cfg",
            ProjectKind::Flask(_) | ProjectKind::FlaskDb(_) => "config.py",
        }
    }

    pub fn python(&self) -> Option<&PythonConfig> {
        match self {
            ProjectKind::Plain => None,
            ProjectKind::Python(py) => Some(py),
            ProjectKind::Flask(flask) | ProjectKind::FlaskDb(flask) => Some(&flask.python),
        }
    }

    pub fn flask(&self) -> Option<&FlaskConfig> {
        match self {
            ProjectKind::Flask(flask) | ProjectKind::FlaskDb(flask) => Some(flask),
            _ => None,
        }
    }

    pub fn database(&self) -> bool {
        matches!(self, ProjectKind::FlaskDb(_))
    }
}

/// One scaffolding request.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    destination: PathBuf,
    description: Option<String>,
    git: bool,
    kind: ProjectKind,
}

impl Project {
    /// Create a project named `name` under `destination`.
    ///
    /// The name becomes the leaf directory, so it must be a single path component.
    pub fn new(name: &str, destination: impl Into<PathBuf>, kind: ProjectKind) -> Result<Self> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            destination: destination.into(),
            description: None,
            git: false,
            kind,
        })
    }

    pub fn with_git(mut self, git: bool) -> Self {
        self.git = git;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn git(&self) -> bool {
        self.git
    }

    pub fn kind(&self) -> &ProjectKind {
        &self.kind
    }

    pub fn project_path(&self) -> PathBuf {
        self.destination.join(&self.name)
    }

    pub fn config_path(&self) -> PathBuf {
        self.project_path().join(self.kind.config_file())
    }

    pub fn gitignore_path(&self) -> PathBuf {
        self.project_path().join(".gitignore")
    }

    pub fn virtualenv_path(&self) -> PathBuf {
        self.project_path().join("venv")
    }

    pub fn requirements_path(&self) -> PathBuf {
        self.project_path().join("requirements.txt")
    }

    /// Directory the front-end package tool runs in.
    pub fn static_dir(&self) -> PathBuf {
        self.project_path().join("app").join("static")
    }

    pub fn uses_virtualenv(&self) -> bool {
        self.kind.python().is_some_and(|py| py.virtualenv)
    }

    pub fn frontend(&self) -> &[String] {
        self.kind.flask().map(|f| f.frontend.as_slice()).unwrap_or(&[])
    }

    /// External tools the install pipeline will invoke for this project.
    pub fn required_tools(&self) -> Vec<Tool> {
        let mut tools = Vec::new();
        if self.git {
            tools.push(Tool::Git);
        }
        if self.uses_virtualenv() {
            tools.push(Tool::Virtualenv);
        }
        if !self.frontend().is_empty() {
            tools.push(Tool::Bower);
        }
        tools
    }

    /// Variables handed to the configuration template.
    pub fn config_vars(&self) -> BTreeMap<String, Value> {
        let mut vars = BTreeMap::new();
        vars.insert("appname".into(), Value::String(self.name.clone()));
        vars.insert(
            "description".into(),
            Value::String(self.description.clone().unwrap_or_default()),
        );

        if let Some(flask) = self.kind.flask() {
            vars.insert(
                "secret_key".into(),
                Value::String(flask.secret_key.as_str().to_string()),
            );
            vars.insert("debug".into(), Value::Bool(flask.debug));
            vars.insert("database".into(), Value::Bool(self.kind.database()));
        }

        vars
    }
}

fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| {
        Err(SkelError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.trim().is_empty() {
        return invalid("name must not be empty");
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => invalid("name must be a single directory name"),
    }
}
