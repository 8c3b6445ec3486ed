use errand_router::cache::{CacheConfig, CachedDirections};
use errand_router::config::{DirectionsSource, ServerConfig};
use errand_router::directions::{DirectionsClient, DirectionsConfig, StraightLineDirections};
use errand_router::errands::ErrandRegistry;
use errand_router::optimizer::{OptimizerClient, OptimizerConfig};
use errand_router::render::MapView;
use errand_router::session::RouteController;
use errand_router::web::{AppState, ServerDirections, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("errand_router=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env()?;

    // Directions provider
    let directions = match &config.directions {
        DirectionsSource::Api { api_key, base_url } => {
            let mut directions_config = DirectionsConfig::new(api_key);
            if let Some(url) = base_url {
                directions_config = directions_config.with_base_url(url);
            }
            let client = DirectionsClient::new(directions_config)?;
            ServerDirections::Api(CachedDirections::new(client, &CacheConfig::default()))
        }
        DirectionsSource::Mock => {
            warn!("DIRECTIONS_MOCK set: serving straight-line directions");
            ServerDirections::Mock(StraightLineDirections)
        }
    };

    // Known errands
    let errands = match &config.errands_file {
        Some(path) => {
            let registry = ErrandRegistry::load_from_file(path)?;
            let count = registry.len().await;
            info!(path = %path.display(), count, "loaded errands");
            registry
        }
        None => ErrandRegistry::empty(),
    };

    let optimizer = match &config.optimizer_url {
        Some(url) => Some(OptimizerClient::new(OptimizerConfig::new(url))?),
        None => {
            info!("OPTIMIZER_URL not set: /api/route/optimize is disabled");
            None
        }
    };

    let controller = RouteController::new(directions, MapView::new(), errands, config.sequencer);
    let state = AppState::new(controller, optimizer);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Errand Router listening on http://{}", config.bind_addr);
    info!("  GET    /health              - Health check");
    info!("  GET    /                    - Itinerary page");
    info!("  GET    /api/errands         - Known errands (PUT replaces, POST adds)");
    info!("  POST   /api/route           - Start a route from ordered stops");
    info!("  POST   /api/route/optimize  - Order errands, then start a route");
    info!("  GET    /api/route           - Current route and map contents");
    info!("  DELETE /api/route           - Cancel the current route");

    axum::serve(listener, app).await?;
    Ok(())
}
