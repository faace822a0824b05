// src/db/disponibilidade_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::ubs::Disponibilidade};

// Repositório da tabela disponibilidade_vacinas (uma linha por par UBS/vacina).
// Os métodos recebem um Executor para rodarem dentro da transação do serviço.
#[derive(Clone)]
pub struct DisponibilidadeRepository {
    #[allow(dead_code)]
    pool: PgPool,
}

impl DisponibilidadeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Status atual do par (UBS, vacina), se existir
    pub async fn status_atual<'e, E>(
        &self,
        executor: E,
        ubs_id: i32,
        vacina_id: i32,
    ) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM disponibilidade_vacinas WHERE id_ubs = $1 AND id_vacina = $2",
        )
        .bind(ubs_id)
        .bind(vacina_id)
        .fetch_optional(executor)
        .await?;
        Ok(status)
    }

    // Upsert sobre a chave única (id_ubs, id_vacina)
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        ubs_id: i32,
        vacina_id: i32,
        status: &str,
    ) -> Result<Disponibilidade, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, Disponibilidade>(
            r#"
            INSERT INTO disponibilidade_vacinas (id_ubs, id_vacina, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (id_ubs, id_vacina)
            DO UPDATE SET status = $3
            RETURNING *
            "#,
        )
        .bind(ubs_id)
        .bind(vacina_id)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(row)
    }
}
