use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};

pub mod display;
pub mod list;
pub mod menu;
pub mod show;
pub mod ui;

pub use display::print_providers;
pub use list::run_directory;
pub use menu::run_menu;
pub use show::{run_company, run_departments, run_show};

use crate::api::HrApi;
use crate::models::Provider;
use crate::session::Session;
use crate::table::Column;

#[derive(Parser)]
#[command(name = "hrdash")]
#[command(about = "Browse sandbox HR and payroll provider data from the terminal")]
#[command(version)]
pub struct Cli {
    /// Base URL of the sandbox API [env: HRDASH_API_URL]
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds [env: HRDASH_TIMEOUT_SECS]
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log requests and stage results to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported providers
    Providers,
    /// Show a provider's company profile
    Company(ProviderArgs),
    /// Show a provider's department hierarchy
    Departments(ProviderArgs),
    /// List a provider's employee directory
    Directory(DirectoryArgs),
    /// Show full details for one employee
    Show(ShowArgs),
}

#[derive(Args)]
pub struct ProviderArgs {
    /// Provider id (gusto, bamboohr, justworks, paychex_flex, workday)
    pub provider: Provider,
}

#[derive(Args)]
pub struct DirectoryArgs {
    /// Provider id (gusto, bamboohr, justworks, paychex_flex, workday)
    pub provider: Provider,
    /// Keep rows where any field contains this text
    #[arg(short, long)]
    pub search: Option<String>,
    /// Sort by column: first, last, department, status, manager
    #[arg(long, value_parser = parse_column)]
    pub sort: Option<Column>,
    /// Reverse the sort order
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Provider id (gusto, bamboohr, justworks, paychex_flex, workday)
    pub provider: Provider,
    pub employee_id: String,
}

fn parse_column(s: &str) -> std::result::Result<Column, String> {
    Column::parse(s).ok_or_else(|| {
        format!("unknown column '{}' (expected one of: first, last, department, status, manager)", s)
    })
}

/// Turn the errors queued by a command into its exit status.
pub(crate) fn fail_on_errors<A: HrApi>(session: &Session<A>) -> Result<()> {
    if session.errors().is_empty() {
        return Ok(());
    }
    Err(anyhow!(session.errors().messages().join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_directory_args() {
        let cli = Cli::try_parse_from([
            "hrdash", "directory", "gusto", "--search", "eng", "--sort", "last", "--desc",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Directory(args)) => {
                assert_eq!(args.provider, Provider::Gusto);
                assert_eq!(args.search.as_deref(), Some("eng"));
                assert_eq!(args.sort, Some(Column::LastName));
                assert!(args.desc);
            }
            _ => panic!("expected directory command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hrdash", "show", "workday", "e1", "--api-url", "http://localhost:3000", "-v",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:3000"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Show(ref a)) if a.employee_id == "e1"));
    }

    #[test]
    fn test_rejects_unknown_provider_and_column() {
        assert!(Cli::try_parse_from(["hrdash", "company", "adp"]).is_err());
        assert!(Cli::try_parse_from(["hrdash", "directory", "gusto", "--sort", "age"]).is_err());
        assert!(Cli::try_parse_from(["hrdash", "directory", "gusto", "--desc"]).is_err());
    }

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = Cli::try_parse_from(["hrdash"]).unwrap();
        assert!(cli.command.is_none());
    }
}
