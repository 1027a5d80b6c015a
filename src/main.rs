use rand::rngs::StdRng;
use rand::SeedableRng;
use spark_match::config::Settings;
use spark_match::core::Matcher;
use spark_match::demo;
use spark_match::services::InMemoryStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(settings: &Settings) {
    // LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    init_logging(&settings);
    info!("Configuration loaded successfully");

    let matcher = Matcher::new(settings.scoring_weights())
        .with_default_top_k(settings.scoring.default_top_k);
    info!("Matcher initialized with weights: {:?}", matcher.weights());

    let mut rng = match settings.demo.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut store = InMemoryStore::new();
    let ids = demo::seed_users(&mut store, settings.demo.users, &mut rng)?;

    match demo::run(&mut store, &matcher, &ids, &mut rng) {
        Ok(report) => {
            let names: Vec<&str> = report
                .top_matches
                .iter()
                .map(|c| c.display_name.as_str())
                .collect();
            info!(?names, "top matches for User0");
            info!(
                matched = report.new_match.is_some(),
                conversation = ?report.conversation_id,
                payment_succeeded = report.payment_succeeded,
                notification = %report.notification_id,
                "demo finished"
            );
            Ok(())
        }
        Err(e) => {
            error!("Demo failed: {}", e);
            Err(e.into())
        }
    }
}
