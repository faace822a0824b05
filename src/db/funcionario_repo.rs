// src/db/funcionario_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::auth::Funcionario};

#[derive(Clone)]
pub struct FuncionarioRepository {
    pool: PgPool,
}

impl FuncionarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca pelo CPF em forma canônica (só dígitos), comparando contra a
    // coluna também normalizada — o banco pode guardar CPF com pontuação.
    // Traz junto o nome da UBS do funcionário, quando houver.
    pub async fn find_by_cpf_normalizado(
        &self,
        cpf_digitos: &str,
    ) -> Result<Option<Funcionario>, AppError> {
        let maybe = sqlx::query_as::<_, Funcionario>(
            r#"
            SELECT f.id, f.nome, f.cpf, f.senha, f.primeiro_acesso, f.id_ubs,
                   ubs.nome AS nome_ubs
            FROM funcionarios f
            LEFT JOIN ubs ON f.id_ubs = ubs.id
            WHERE REGEXP_REPLACE(f.cpf, '[^0-9]', '', 'g') = $1
            "#,
        )
        .bind(cpf_digitos)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    // Busca pelo CPF exatamente como armazenado (alterar-senha e atualização
    // de status usam o CPF sem normalização, como na API original).
    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Funcionario>, AppError> {
        let maybe = sqlx::query_as::<_, Funcionario>(
            r#"
            SELECT f.id, f.nome, f.cpf, f.senha, f.primeiro_acesso, f.id_ubs,
                   ubs.nome AS nome_ubs
            FROM funcionarios f
            LEFT JOIN ubs ON f.id_ubs = ubs.id
            WHERE f.cpf = $1
            "#,
        )
        .bind(cpf)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    // Estabelece a senha definitiva: grava o hash e derruba o primeiro_acesso.
    // Não existe caminho de volta para o estado provisório.
    pub async fn estabelecer_senha(
        &self,
        cpf: &str,
        senha_hash: &str,
    ) -> Result<Option<()>, AppError> {
        let result = sqlx::query(
            "UPDATE funcionarios SET senha = $1, primeiro_acesso = FALSE WHERE cpf = $2",
        )
        .bind(senha_hash)
        .bind(cpf)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(None)
        } else {
            Ok(Some(()))
        }
    }
}
