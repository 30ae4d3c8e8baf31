mod cli;

use crate::cli::CLI;
use anyhow::Context;
use clap::Parser;
use pagelink_core::{AccessPolicy, TenantId, ViewUrlBuilder};
use pagelink_gateway::{App, AppState};
use pagelink_generator::UuidPrefixGenerator;
use pagelink_service::{
    AllocatorSettings, Host, ReconcilerSettings, ServiceSettings, ShortLinkService,
};
use pagelink_storage::{InMemoryDocumentStore, InMemorySearchIndex};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::try_parse()?;
    pagelink_telemetry::init(config.log_format.into())?;

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        main_tenant = %config.main_tenant,
        default_access = %config.default_access,
        "starting gateway server"
    );

    let main_tenant = TenantId::new(&config.main_tenant)?;
    let store = Arc::new(InMemoryDocumentStore::new(main_tenant));
    let index = Arc::new(InMemorySearchIndex::new());

    if let Some(path) = &config.seed_file {
        let loaded = store
            .load_seed_file(path)
            .with_context(|| format!("failed to load seed file {}", path.display()))?;
        info!(
            documents = loaded,
            path = %path.display(),
            main_tenant = %store.main_tenant(),
            "seeded document store"
        );
    }
    index.refresh_from(&store);
    spawn_reindexer(
        store.clone(),
        index.clone(),
        Duration::from_secs(config.reindex_interval_secs.max(1)),
    );

    let urls = Arc::new(
        ViewUrlBuilder::parse(&config.public_base_url).context("invalid public base url")?,
    );
    let policy = Arc::new(AccessPolicy::new(config.default_access.capability()));
    let host = Host::from_store(store, index, policy);
    let settings = ServiceSettings {
        allocator: AllocatorSettings {
            max_attempts: config.max_attempts,
            check_index: config.check_index,
        },
        reconciler: ReconcilerSettings {
            scan_limit: config.scan_limit,
        },
    };
    let service = ShortLinkService::new(host, UuidPrefixGenerator::new(), settings);

    let app = App::router(AppState::new(Arc::new(service), urls));
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Refreshes the search index on a fixed period, standing in for the
/// host's asynchronous indexer.
fn spawn_reindexer(store: Arc<InMemoryDocumentStore>, index: Arc<InMemorySearchIndex>, period: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            index.refresh_from(&store);
        }
    });
}
