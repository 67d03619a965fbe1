#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SkelError {
    #[error("Project directory already exists: {path}")]
    #[diagnostic(help("Pick another project name or remove the existing directory"))]
    ProjectExists { path: PathBuf },

    #[error("Skeleton '{skeleton}' not found at {path}")]
    #[diagnostic(help("Check the resources directory (--resources or SKELGEN_RESOURCES)"))]
    SkeletonMissing { skeleton: String, path: PathBuf },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Template '{template}' not found in {dir}")]
    #[diagnostic(help("The resources directory must contain a templates/ subdirectory"))]
    TemplateNotFound { template: String, dir: PathBuf },

    #[error("Template rendering failed for '{template}'")]
    #[diagnostic(help("Check your Tera template syntax"))]
    RenderError {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("Variable '{name}' is reserved for presentation globals")]
    ReservedVariable { name: String },

    #[error("{message} Please consult {} file for details.", .log_file.display())]
    ExternalToolFailed { message: String, log_file: PathBuf },

    #[error("{tool} executable could not be found")]
    #[diagnostic(help("Install {tool} or make sure it is on your PATH"))]
    ToolUnavailable { tool: String },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config.toml")]
    #[diagnostic(help("Check the TOML syntax in your skelgen config.toml"))]
    ConfigParse {
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, SkelError>;
