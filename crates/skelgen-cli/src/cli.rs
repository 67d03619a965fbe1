use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(
    name = "skelgen",
    about = "Create a skeleton application using some command line options",
    version
)]
pub struct Cli {
    /// The application name
    pub name: String,

    /// Front-end dependencies installed using bower (comma separated)
    #[arg(short, long, value_name = "DEPS", value_delimiter = ',')]
    pub bower: Vec<String>,

    /// Disable debug mode in the generated configuration
    #[arg(short = 'n', long)]
    pub no_debug: bool,

    /// Create a virtualenv and install the Python requirements
    #[arg(short, long)]
    pub virtualenv: bool,

    /// Use the database-enabled Flask skeleton
    #[arg(short, long)]
    pub database: bool,

    /// Initialize a git repository
    #[arg(short, long)]
    pub git: bool,

    /// Kind of project to create
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,

    /// Short description rendered into the configuration
    #[arg(long)]
    pub description: Option<String>,

    /// Directory the project is created in (default: current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Directory holding skeletons/ and templates/ [default: SKELGEN_RESOURCES,
    /// the config file, a resources/ directory next to the executable, then
    /// the source tree skelgen was built from]
    #[arg(long, value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Plain,
    Python,
    Flask,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from(["skelgen", "demo", "-b", "jquery,bootstrap", "-n", "-v", "-d", "-g"])
            .unwrap();
        assert_eq!(cli.name, "demo");
        assert_eq!(cli.bower, vec!["jquery", "bootstrap"]);
        assert!(cli.no_debug && cli.virtualenv && cli.database && cli.git);
        assert!(cli.kind.is_none());
    }

    #[test]
    fn name_is_required() {
        assert!(Cli::try_parse_from(["skelgen"]).is_err());
    }

    #[test]
    fn parses_kind() {
        let cli = Cli::try_parse_from(["skelgen", "demo", "--kind", "python"]).unwrap();
        assert_eq!(cli.kind, Some(KindArg::Python));
    }
}
