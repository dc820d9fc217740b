use std::io;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use vacancies_cli::{Config, UserContext, run_menu};
use vacancies_client::HhClient;
use vacancies_core::{
    EmployersConfig, HarvestService, HarvestStats, TracingReporter, load_employers_config,
};
use vacancies_db::VacancyRepository;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set default tracing subscriber")?;

    let config = Config::parse();

    let employers = match load_employers_config(config.employers.clone()).user_context()? {
        Some(employers) => employers,
        None => {
            info!("No employers configuration available, using the built-in list");
            EmployersConfig::builtin()
        }
    };
    let employer_ids = employers.employer_ids();

    info!("Connecting to database...");
    let repo = VacancyRepository::connect(&config.db_config())
        .await
        .user_context()
        .context("Failed to connect to database")?;

    let client = HhClient::new(&config.api_url).user_context()?;
    let harvest_service = HarvestService::new(client, repo);

    let stats = match harvest_service
        .run_with_progress(&employer_ids, &TracingReporter)
        .await
    {
        Ok(stats) => stats,
        Err(e) => {
            harvest_service.store().close().await;
            return Err(e).user_context().context("Harvest failed");
        }
    };
    print_harvest_summary(&stats);

    let repo = harvest_service.into_store();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = run_menu(&repo, &mut stdin.lock(), &mut stdout.lock()).await;

    repo.close().await;
    result
}

fn print_harvest_summary(stats: &HarvestStats) {
    info!("═══════════════════════════════════════════════════════");
    info!("Harvest complete");
    info!("═══════════════════════════════════════════════════════");
    info!("  Employers queried:   {}", stats.employers);
    info!("  Vacancies fetched:   {}", stats.fetched);
    info!("  Companies created:   {}", stats.companies_created);
    info!("  Vacancies stored:    {}", stats.vacancies_inserted);
    info!("═══════════════════════════════════════════════════════");
}
