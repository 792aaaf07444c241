use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use hazmat_policy::config::ServiceArgs;
use hazmat_policy::evaluate::EvaluationPipeline;
use hazmat_policy::locale::{LanguageNegotiator, SUPPORTED_LOCALES};
use hazmat_policy::location::{HttpLocationResolver, LocationClient};
use hazmat_policy::policy::{CachedPolicyStore, FsPolicyStore};
use hazmat_policy::server::{self, AppState};
use hazmat_policy::telemetry;

/// Hazardous goods policy evaluation service.
///
/// Resolves airport codes through the travel location service and returns
/// the localized hazardous goods policy when any airport lies inside the
/// configured jurisdiction.
///
/// Example:
///   TRAVEL_LOCATIONS_URI=http://locations.internal/search hazmat-policy --port 4001
#[derive(Parser)]
#[command(name = "hazmat-policy", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    service: ServiceArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = Cli::parse()
        .service
        .into_config()
        .context("invalid configuration")?;

    info!(
        version = hazmat_policy::VERSION,
        content_root = %config.content_root.display(),
        locations = %config.locations_uri,
        jurisdiction = %config.jurisdiction,
        "starting hazardous goods policy service"
    );

    let store = FsPolicyStore::new(&config.content_root);
    for locale in store.missing_locales(SUPPORTED_LOCALES) {
        warn!(%locale, path = %store.document_path(locale).display(), "policy document missing");
    }

    let client = LocationClient::new(config.locations_uri.clone(), config.locations_proxy.clone());
    let pipeline = EvaluationPipeline::new(
        LanguageNegotiator::default(),
        Arc::new(HttpLocationResolver::new(client)),
        Arc::new(CachedPolicyStore::new(store)),
        config.jurisdiction.clone(),
    );

    server::start(&config, Arc::new(AppState::new(pipeline)))
        .await
        .context("server failed")
}
