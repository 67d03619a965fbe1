pub mod user;

use std::path::{Path, PathBuf};

pub use user::{load_user_config, Defaults, UserConfig};

/// Environment variable overriding the resources directory.
pub const RESOURCES_ENV: &str = "SKELGEN_RESOURCES";

pub const LOG_VIRTUALENV: &str = "virtualenv-error.log";
pub const LOG_PIP: &str = "pip-error.log";
pub const LOG_BOWER: &str = "bower-error.log";
pub const LOG_GIT: &str = "git-error.log";

pub const TPL_BRIEF: &str = "brief.tera";
pub const TPL_ERRORS: &str = "errors.tera";
pub const GITIGNORE: &str = "gitignore";

const BUILD_RESOURCES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources");

/// Location of the skeleton trees and templates a project is built from.
#[derive(Debug, Clone)]
pub struct Resources {
    root: PathBuf,
}

impl Resources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The resources shipped with the binary: a `resources/` directory next
    /// to the executable if present, else the crate's source tree as it was
    /// at build time.
    pub fn builtin() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self::builtin_near(exe_dir.as_deref())
    }

    fn builtin_near(exe_dir: Option<&Path>) -> Self {
        if let Some(root) = exe_dir
            .map(|dir| dir.join("resources"))
            .filter(|root| root.join("templates").is_dir())
        {
            return Self::new(root);
        }
        Self::new(BUILD_RESOURCES)
    }

    /// Pick the resources directory: explicit path, then `SKELGEN_RESOURCES`,
    /// then the user config, then the built-in resources.
    pub fn locate(explicit: Option<&Path>, user: Option<&UserConfig>) -> Self {
        if let Some(path) = explicit {
            return Self::new(path);
        }
        if let Some(path) = std::env::var_os(RESOURCES_ENV) {
            return Self::new(path);
        }
        if let Some(path) = user.and_then(|u| u.resources.as_ref()) {
            return Self::new(path);
        }
        Self::builtin()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn skeleton_dir(&self, skeleton: &str) -> PathBuf {
        self.root.join("skeletons").join(skeleton)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join("templates")
    }

    pub fn gitignore_template(&self) -> PathBuf {
        self.templates_dir().join(GITIGNORE)
    }
}
