// src/db/ubs_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::ubs::Ubs};

#[derive(Clone)]
pub struct UbsRepository {
    pool: PgPool,
}

impl UbsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Ubs>, AppError> {
        let ubs = sqlx::query_as::<_, Ubs>("SELECT * FROM ubs ORDER BY nome")
            .fetch_all(&self.pool)
            .await?;
        Ok(ubs)
    }

    pub async fn buscar(&self, id: i32) -> Result<Option<Ubs>, AppError> {
        let maybe = sqlx::query_as::<_, Ubs>("SELECT * FROM ubs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn existe(&self, id: i32) -> Result<bool, AppError> {
        let existe =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM ubs WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(existe)
    }
}
