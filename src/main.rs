use anyhow::Context;
use clap::Parser;
use hrdash::api::ApiClient;
use hrdash::cli::{
    print_providers, run_company, run_departments, run_directory, run_menu, run_show, Cli,
    Commands,
};
use hrdash::config::DashConfig;
use hrdash::session::Session;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with tables on stdout
    let default_filter = if cli.verbose { "hrdash=debug,warn" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(Commands::Providers) = cli.command {
        print_providers();
        return Ok(());
    }

    let config = DashConfig::load(cli.api_url.as_deref(), cli.timeout)
        .context("Failed to load configuration")?;
    tracing::debug!(api_url = %config.api_url, timeout = ?config.timeout, "Configuration loaded");

    let client = ApiClient::new(&config).context("Failed to build HTTP client")?;
    let mut session = Session::new(client);

    match cli.command {
        None => run_menu(&mut session)?,
        Some(Commands::Providers) => print_providers(),
        Some(Commands::Company(args)) => run_company(&mut session, args.provider)?,
        Some(Commands::Departments(args)) => run_departments(&mut session, args.provider)?,
        Some(Commands::Directory(args)) => {
            run_directory(&mut session, args.provider, args.search, args.sort, args.desc)?
        }
        Some(Commands::Show(args)) => run_show(&mut session, args.provider, &args.employee_id)?,
    }

    Ok(())
}
