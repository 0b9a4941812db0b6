use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use vehicle_rental::config::environment::EnvironmentConfig;
use vehicle_rental::database::Store;
use vehicle_rental::routes::create_app;
use vehicle_rental::services::reconciler_service::ReconcilerService;
use vehicle_rental::state::AppState;

/// Intervalo de la corrida periódica del reconciliador
const RECONCILE_INTERVAL_SECS: u64 = 3600;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Vehicle Rental Manager - API");
    info!("===============================");

    let config = EnvironmentConfig::from_env();

    // Abrir el snapshot persistido
    let store = match Store::open(&config.data_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("❌ Error abriendo el snapshot de datos: {}", e);
            return Err(anyhow::anyhow!("Error de persistencia: {}", e));
        }
    };
    info!("✅ Snapshot cargado desde {}", config.data_path);

    // Reconciliar estados al arrancar y después en forma periódica
    let reconciler = ReconcilerService::new(store.clone());
    match reconciler.run() {
        Ok(report) => info!(
            "✅ Reconciliación inicial: {} rentals overdue, {} vehículos",
            report.overdue_flagged, report.vehicles_reconciled
        ),
        Err(e) => error!("❌ Reconciliación inicial falló: {}", e),
    }
    spawn_reconciler(store.clone());

    let state = AppState::new(store, config.clone());
    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/register - Registro (individual/corporate)");
    info!("   POST /api/auth/login - Login");
    info!("🚙 Catálogo:");
    info!("   GET  /api/vehicles - Listar con filtros (type/brand/min/max)");
    info!("   GET  /api/vehicles/:id - Detalle con calendario");
    info!("   GET  /api/vehicles/:id/calendar - Rangos reservados");
    info!("📋 Rentals:");
    info!("   POST /api/rentals - Crear booking");
    info!("   GET  /api/rentals/mine - Mis rentals");
    info!("   GET  /api/rentals/:id - Factura");
    info!("   POST /api/rentals/:id/return - Devolver vehículo");
    info!("   POST /api/rentals/:id/cancel - Cancelar antes del inicio");
    info!("🛠  Staff:");
    info!("   POST /api/staff/vehicles - Alta de vehículo");
    info!("   DELETE /api/staff/vehicles/:id - Baja de vehículo");
    info!("   GET/POST /api/staff/users - Usuarios");
    info!("   DELETE /api/staff/users/:id - Baja de usuario");
    info!("   GET  /api/staff/analytics - Dashboard");
    info!("   POST /api/staff/reconcile - Reconciliar estados");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn spawn_reconciler(store: Arc<Store>) {
    tokio::spawn(async move {
        let reconciler = ReconcilerService::new(store);
        let mut interval = tokio::time::interval(Duration::from_secs(RECONCILE_INTERVAL_SECS));
        // el primer tick es inmediato y ya reconciliamos en el arranque
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Err(e) = reconciler.run() {
                error!("reconciliación periódica falló: {}", e);
            }
        }
    });
}

async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    info!("👋 Señal de apagado recibida, cerrando");
}
