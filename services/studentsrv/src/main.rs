//! Student records service (`studentsrv`)

use std::path::Path;

use anyhow::Context;
use axum::serve;
use clap::Parser;
use tracing::info;
#[cfg(feature = "swagger-ui")]
use utoipa::OpenApi;
#[cfg(feature = "swagger-ui")]
use utoipa_swagger_ui::SwaggerUi;

use common::service_bootstrap::{self, ServiceInfo};
use common::shutdown::wait_for_shutdown;
use common::ServiceArgs;
use studentsrv::config::{StudentsrvConfig, DEFAULT_PORT, SERVICE_NAME};
use studentsrv::{create_app_state, create_routes, run_init_script};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServiceArgs::parse();

    let service_info = ServiceInfo::new(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        "Student Records API",
        DEFAULT_PORT,
    );

    let mut config = StudentsrvConfig::load(&args)?;
    config.api.port = service_bootstrap::get_service_port(config.api.port, &service_info);

    service_bootstrap::init_logging(
        &service_info,
        &config.logging.level,
        Some(&config.logging.dir),
        !args.no_color,
    )?;
    if !args.no_color {
        service_bootstrap::print_startup_banner(&service_info);
    }

    config.validate()?;
    if args.validate {
        info!("Configuration is valid");
        return Ok(());
    }

    let state = create_app_state(config).await?;
    if let Some(script) = &args.init_script {
        run_init_script(&state.database, Path::new(script)).await?;
    }

    let addr = state.config.bind_address();
    let app = create_routes(state);

    #[cfg(feature = "swagger-ui")]
    let app = {
        info!("Swagger UI enabled at /docs");
        app.merge(SwaggerUi::new("/docs").url("/openapi.json", studentsrv::ApiDoc::openapi()))
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("API server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .context("Server error")?;

    info!("Service stopped");
    Ok(())
}
