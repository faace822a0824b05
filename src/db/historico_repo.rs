// src/db/historico_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::ubs::HistoricoEntrada};

// Repositório do histórico de atualizações. Só INSERT e SELECT:
// as entradas são imutáveis depois de gravadas.
#[derive(Clone)]
pub struct HistoricoRepository {
    pool: PgPool,
}

impl HistoricoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Grava a entrada de auditoria; data e hora vêm do relógio do banco,
    // o mesmo usado pelas demais escritas.
    pub async fn inserir<'e, E>(
        &self,
        executor: E,
        funcionario_id: i32,
        ubs_id: i32,
        vacina_id: i32,
        status_anterior: &str,
        status_atual: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO historico_atualizacoes (
                id_funcionario, id_ubs, id_vacina,
                status_anterior, status_atual, data, hora
            ) VALUES ($1, $2, $3, $4, $5, CURRENT_DATE, CURRENT_TIME)
            "#,
        )
        .bind(funcionario_id)
        .bind(ubs_id)
        .bind(vacina_id)
        .bind(status_anterior)
        .bind(status_atual)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Histórico de uma UBS, mais recente primeiro, já com os nomes juntados
    pub async fn listar_por_ubs(&self, ubs_id: i32) -> Result<Vec<HistoricoEntrada>, AppError> {
        let entradas = sqlx::query_as::<_, HistoricoEntrada>(
            r#"
            SELECT
                ha.id,
                f.nome AS nome_funcionario,
                v.nome AS nome_vacina,
                ha.status_anterior,
                ha.status_atual,
                ha.data,
                ha.hora
            FROM historico_atualizacoes ha
            JOIN funcionarios f ON ha.id_funcionario = f.id
            JOIN vacinas v ON ha.id_vacina = v.id
            WHERE ha.id_ubs = $1
            ORDER BY ha.data DESC, ha.hora DESC
            "#,
        )
        .bind(ubs_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entradas)
    }
}
