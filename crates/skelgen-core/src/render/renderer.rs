use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tera::{Tera, Value};
use walkdir::WalkDir;

use super::context::build_context;
use super::filters;
use crate::error::{Result, SkelError};

const TEMPLATE_SUFFIX: &str = ".tera";

/// Renders the `*.tera` files of a templates directory by name.
pub struct Renderer {
    tera: Tera,
    dir: PathBuf,
    colors: bool,
}

impl Renderer {
    /// Load every `*.tera` file under `dir`, named by its path relative to `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(SkelError::TemplateNotFound {
                template: format!("*{TEMPLATE_SUFFIX}"),
                dir: dir.to_path_buf(),
            });
        }

        let mut tera = Tera::default();
        filters::register(&mut tera);
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if !path.to_string_lossy().ends_with(TEMPLATE_SUFFIX) {
                continue;
            }
            let Ok(rel) = path.strip_prefix(dir) else {
                continue;
            };
            let name = rel.to_string_lossy().replace('\\', "/");
            let content = std::fs::read_to_string(path).map_err(|e| SkelError::Io {
                context: format!("reading template {}", path.display()),
                source: e,
            })?;
            tera.add_raw_template(&name, &content)
                .map_err(|e| SkelError::RenderError {
                    template: name.clone(),
                    source: e,
                })?;
        }

        Ok(Self {
            tera,
            dir: dir.to_path_buf(),
            colors: console::colors_enabled(),
        })
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn has_template(&self, template: &str) -> bool {
        self.tera.get_template_names().any(|n| n == template)
    }

    pub fn render(&self, template: &str, variables: &BTreeMap<String, Value>) -> Result<String> {
        if !self.has_template(template) {
            return Err(SkelError::TemplateNotFound {
                template: template.to_string(),
                dir: self.dir.clone(),
            });
        }

        let context = build_context(variables, self.colors)?;
        self.tera
            .render(template, &context)
            .map_err(|e| SkelError::RenderError {
                template: template.to_string(),
                source: e,
            })
    }
}
