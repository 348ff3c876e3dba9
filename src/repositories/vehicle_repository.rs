use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::vehicle::{ServiceType, Vehicle};
use crate::utils::errors::{not_found_error, AppError};

/// Frontera con el almacén de registros externo.
///
/// `fetch_all` devuelve los registros del más reciente al más antiguo.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Vehicle>, AppError>;

    async fn insert(&self, vehicle: &Vehicle) -> Result<(), AppError>;

    /// Solo actualiza registros que aún no tienen salida
    async fn update_exit(&self, id: Uuid, exit_timestamp: NaiveDateTime) -> Result<(), AppError>;
}

/// Sustituto en memoria mientras no haya base de datos configurada
#[derive(Debug, Default, Clone)]
pub struct InMemoryVehicleRepository {
    vehicles: Arc<RwLock<Vec<Vehicle>>>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn fetch_all(&self) -> Result<Vec<Vehicle>, AppError> {
        Ok(self.vehicles.read().await.clone())
    }

    async fn insert(&self, vehicle: &Vehicle) -> Result<(), AppError> {
        let mut vehicles = self.vehicles.write().await;
        if vehicles.iter().any(|v| v.id == vehicle.id) {
            return Err(AppError::Conflict(format!("Vehicle with id '{}' already exists", vehicle.id)));
        }
        vehicles.insert(0, vehicle.clone());
        Ok(())
    }

    async fn update_exit(&self, id: Uuid, exit_timestamp: NaiveDateTime) -> Result<(), AppError> {
        let mut vehicles = self.vehicles.write().await;
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        if vehicle.exit_timestamp.is_some() {
            return Err(AppError::Conflict(format!("Vehicle '{}' is already finished", id)));
        }
        vehicle.exit_timestamp = Some(exit_timestamp);
        Ok(())
    }
}

// Fila de la tabla veiculos
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    placa: String,
    modelo: String,
    proprietario: String,
    contato: String,
    servico: String,
    taxa_estacionamento: Option<Decimal>,
    data_entrada: NaiveDateTime,
    data_saida: Option<NaiveDateTime>,
}

impl VehicleRow {
    fn into_vehicle(self) -> Result<Vehicle, AppError> {
        let service_type: ServiceType = self
            .servico
            .parse()
            .map_err(|e| AppError::Repository(format!("Row {} has {}", self.id, e)))?;

        Ok(Vehicle {
            id: self.id,
            plate: self.placa,
            model: self.modelo,
            owner_name: self.proprietario,
            contact: self.contato,
            service_type,
            parking_fee: self.taxa_estacionamento,
            entry_timestamp: self.data_entrada,
            exit_timestamp: self.data_saida,
        })
    }
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear la tabla si no existe
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS veiculos (
                id UUID PRIMARY KEY,
                placa TEXT NOT NULL,
                modelo TEXT NOT NULL DEFAULT '',
                proprietario TEXT NOT NULL,
                contato TEXT NOT NULL DEFAULT '',
                servico TEXT NOT NULL,
                taxa_estacionamento NUMERIC(10, 2) CHECK (taxa_estacionamento >= 0),
                data_entrada TIMESTAMP NOT NULL,
                data_saida TIMESTAMP CHECK (data_saida >= data_entrada),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn fetch_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, placa, modelo, proprietario, contato, servico,
                   taxa_estacionamento, data_entrada, data_saida
            FROM veiculos
            ORDER BY data_entrada DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Repository(format!("Error listing vehicles: {}", e)))?;

        rows.into_iter().map(VehicleRow::into_vehicle).collect()
    }

    async fn insert(&self, vehicle: &Vehicle) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO veiculos (id, placa, modelo, proprietario, contato, servico,
                                  taxa_estacionamento, data_entrada, data_saida)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.plate)
        .bind(&vehicle.model)
        .bind(&vehicle.owner_name)
        .bind(&vehicle.contact)
        .bind(vehicle.service_type.label())
        .bind(vehicle.parking_fee)
        .bind(vehicle.entry_timestamp)
        .bind(vehicle.exit_timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Repository(format!("Error creating vehicle: {}", e)))?;

        Ok(())
    }

    async fn update_exit(&self, id: Uuid, exit_timestamp: NaiveDateTime) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE veiculos SET data_saida = $2 WHERE id = $1 AND data_saida IS NULL",
        )
        .bind(id)
        .bind(exit_timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Repository(format!("Error finishing vehicle: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Vehicle in service", &id.to_string()));
        }
        Ok(())
    }
}
