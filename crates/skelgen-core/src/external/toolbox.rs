use std::collections::BTreeMap;
use std::path::PathBuf;

use super::Tool;

/// Finds an executable on the search path.
pub trait Locator {
    fn locate(&mut self, command: &str) -> Option<PathBuf>;
}

/// `$PATH` lookup through the `which` crate.
#[derive(Debug, Default)]
pub struct PathLocator;

impl Locator for PathLocator {
    fn locate(&mut self, command: &str) -> Option<PathBuf> {
        which::which(command).ok()
    }
}

/// Resolved tool paths and the pre-flight errors collected while resolving them.
///
/// Each tool is looked up at most once; later calls hit the cache, including
/// cached misses.
pub struct Toolbox<L = PathLocator> {
    locator: L,
    resolved: BTreeMap<Tool, Option<PathBuf>>,
    errors: Vec<String>,
}

impl Toolbox<PathLocator> {
    pub fn new() -> Self {
        Self::with_locator(PathLocator)
    }
}

impl Default for Toolbox<PathLocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Locator> Toolbox<L> {
    pub fn with_locator(locator: L) -> Self {
        Self {
            locator,
            resolved: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn resolve(&mut self, tool: Tool) -> Option<PathBuf> {
        if let Some(cached) = self.resolved.get(&tool) {
            return cached.clone();
        }

        let found = self.locator.locate(tool.command());
        match &found {
            Some(path) => {
                tracing::debug!(tool = tool.command(), path = %path.display(), "resolved tool")
            }
            None => {
                tracing::debug!(tool = tool.command(), "tool not found on PATH");
                self.errors.push(tool.missing_message());
            }
        }
        self.resolved.insert(tool, found.clone());
        found
    }

    /// Resolve every tool in `tools`; true when all of them were found.
    pub fn resolve_all(&mut self, tools: &[Tool]) -> bool {
        tools
            .iter()
            .fold(true, |ok, tool| self.resolve(*tool).is_some() && ok)
    }

    /// Paths of the tools found so far.
    pub fn resolved(&self) -> BTreeMap<Tool, PathBuf> {
        self.resolved
            .iter()
            .filter_map(|(tool, path)| path.clone().map(|p| (*tool, p)))
            .collect()
    }

    /// Cached path of an already resolved tool.
    pub fn path(&self, tool: Tool) -> Option<&PathBuf> {
        self.resolved.get(&tool).and_then(|p| p.as_ref())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}
