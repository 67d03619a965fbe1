pub mod runner;
pub mod toolbox;

use crate::config::{LOG_BOWER, LOG_GIT, LOG_VIRTUALENV};

pub use runner::{run_logged, Invocation, Runner, SystemRunner};
pub use toolbox::{Locator, PathLocator, Toolbox};

/// External executables the install pipeline can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tool {
    Git,
    Virtualenv,
    Bower,
}

impl Tool {
    /// Name looked up on the search path.
    pub fn command(self) -> &'static str {
        match self {
            Tool::Git => "git",
            Tool::Virtualenv => "virtualenv",
            Tool::Bower => "bower",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Tool::Git => "Git",
            Tool::Virtualenv => "Virtualenv",
            Tool::Bower => "Bower",
        }
    }

    pub fn missing_message(self) -> String {
        format!("{} executable could not be found.", self.display_name())
    }

    pub fn log_file(self) -> &'static str {
        match self {
            Tool::Git => LOG_GIT,
            Tool::Virtualenv => LOG_VIRTUALENV,
            Tool::Bower => LOG_BOWER,
        }
    }
}
