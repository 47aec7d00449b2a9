use book_finder::catalog::client::HttpCatalogClient;
use book_finder::config::Settings;
use book_finder::debounce::debouncer::DEBOUNCE_DELAY;
use book_finder::session::actor::WidgetSettings;
use book_finder::session::handlers::{router, AppState};
use book_finder::session::protocol::LONG_POLL_WAIT;
use book_finder::session::registry::SessionRegistry;
use book_finder::view::render::{RenderContext, ViewRenderer};
use book_finder::widget::pagination::PAGE_SIZE;
use std::sync::Arc;
use std::time::Duration;

const REAP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let settings = Settings::from_env()?;
    tracing::info!("Catalog search endpoint: {}", settings.search_url);

    // 1. Catalog client:
    let client = HttpCatalogClient::new(
        &settings.search_url,
        PAGE_SIZE,
        settings.request_timeout,
    )?;

    // 2. Templates:
    let renderer = ViewRenderer::new(RenderContext {
        covers_url: settings.covers_url.clone(),
        site_url: settings.site_url.clone(),
    })?;

    // 3. Session registry + idle reaper:
    let sessions = SessionRegistry::new(
        Arc::new(client),
        WidgetSettings {
            renderer: Arc::new(renderer),
            debounce_delay: DEBOUNCE_DELAY,
        },
        settings.session_idle,
    );
    sessions.clone().start_reaper(REAP_INTERVAL);

    // 4. HTTP server:
    let app = router(AppState {
        sessions,
        long_poll: LONG_POLL_WAIT,
    });

    tracing::info!("Book finder listening on http://{}", settings.bind_addr);
    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
