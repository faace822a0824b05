// src/db/vacina_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::ubs::VacinaComStatus};

#[derive(Clone)]
pub struct VacinaRepository {
    pool: PgPool,
}

impl VacinaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // LEFT JOIN com a disponibilidade da UBS: toda vacina do catálogo aparece,
    // com status nulo quando a UBS nunca registrou aquela vacina.
    pub async fn listar_com_status(&self, ubs_id: i32) -> Result<Vec<VacinaComStatus>, AppError> {
        let vacinas = sqlx::query_as::<_, VacinaComStatus>(
            r#"
            SELECT v.id, v.nome, dv.status
            FROM vacinas v
            LEFT JOIN disponibilidade_vacinas dv
                   ON v.id = dv.id_vacina AND dv.id_ubs = $1
            ORDER BY v.nome
            "#,
        )
        .bind(ubs_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(vacinas)
    }

    pub async fn existe(&self, id: i32) -> Result<bool, AppError> {
        let existe =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM vacinas WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(existe)
    }
}
