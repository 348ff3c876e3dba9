use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use lava_rapido::build_app;
use lava_rapido::config::environment::EnvironmentConfig;
use lava_rapido::database::connect_vehicle_repository;
use lava_rapido::repositories::vehicle_repository::{InMemoryVehicleRepository, VehicleRepository};
use lava_rapido::services::clock::SystemClock;
use lava_rapido::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🧽 Lava Rápido - Sistema de Controle");
    info!("🏷️ Entorno: {}", config.environment);
    info!("================================================");

    // Almacén de registros: PostgreSQL si hay DATABASE_URL, si no en memoria
    let repository: Arc<dyn VehicleRepository> = match config.database_url.as_deref() {
        Some(url) => Arc::new(connect_vehicle_repository(url).await?),
        None => {
            warn!("⚠️ DATABASE_URL no configurada, los datos se pierden al reiniciar");
            Arc::new(InMemoryVehicleRepository::new())
        }
    };

    let state = AppState::new(config.clone(), repository, Arc::new(SystemClock));

    // Carga inicial; un fallo deja la colección vacía y queda notificado
    if let Err(e) = state.composer.lock().await.refresh().await {
        error!("❌ Error en la carga inicial: {}", e);
    }

    let app = build_app(state);

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/view - Vista de la pestaña activa");
    info!("   POST /api/navigate - Cambiar de pestaña");
    info!("   GET  /api/dashboard - Vehículos en servicio y resumen del día");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   PUT  /api/register/draft - Editar borrador de registro");
    info!("   POST /api/register - Registrar vehículo");
    info!("   POST /api/vehicles/:id/finish - Finalizar servicio");
    info!("   GET  /api/history - Historial con filtros (solo lectura)");
    info!("   POST /api/history/filter - Cambiar el filtro activo del historial");
    info!("   POST /api/refresh - Recargar desde el almacén");
    info!("   GET  /api/notifications - Notificaciones pendientes");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
