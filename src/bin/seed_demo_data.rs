use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use sigea::config::Config;
use sigea::database::{self, MIGRATOR};
use sigea::services::seed_service;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sigea=info")),
        )
        .init();

    let config = Config::load();
    let pool = match database::connect(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("seed: cannot open {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = MIGRATOR.run(&pool).await {
        eprintln!("seed: migrations failed: {}", e);
        std::process::exit(1);
    }

    match seed_service::seed_demo_data(&pool).await {
        Ok(report) if report.omitido => {
            println!("seed: database already has activities, nothing to do");
        }
        Ok(report) => {
            println!(
                "seed: usuarios={}, actividades={}, inscripciones={}, pagos={}, asistencias={}, certificados={}",
                report.usuarios,
                report.actividades,
                report.inscripciones,
                report.pagos,
                report.asistencias,
                report.certificados
            );
            println!(
                "seed: demo accounts use the password {:?}",
                seed_service::DEMO_PASSWORD
            );
        }
        Err(e) => {
            eprintln!("seed failed: {:?}", e);
            std::process::exit(1);
        }
    }
}
