use actix_web::{web, App, HttpServer};
use claimdesk::config::{Config, LogFormat};
use claimdesk::middleware::{json_config, ErrorHandler, RequestId};
use claimdesk::modules;
use claimdesk::TotalsRenderer;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration
    let config = Config::from_env()
        .and_then(|config| config.validate().map(|_| config))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    init_tracing(&config);

    tracing::info!("Starting claimdesk totals service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let renderer = web::Data::new(TotalsRenderer::new(config.app.currency_symbol.clone()));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(renderer.clone())
            .app_data(json_config())
            .configure(modules::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!(
        "Server started at http://{} ({} workers)",
        bind_address,
        config.server.workers
    );

    server.await
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("claimdesk={},actix_web=info", config.app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
