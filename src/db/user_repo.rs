// src/db/user_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::auth::Usuario};

// O repositório de usuários, responsável por todas as interações com a tabela 'usuarios'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário por e-mail OU CPF (checagem de duplicidade no registro)
    pub async fn find_by_email_or_cpf(
        &self,
        email: &str,
        cpf: &str,
    ) -> Result<Option<Usuario>, AppError> {
        let maybe_user = sqlx::query_as::<_, Usuario>(
            "SELECT * FROM usuarios WHERE email = $1 OR cpf = $2",
        )
        .bind(email)
        .bind(cpf)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Cria um novo usuário no banco de dados.
    // A violação de chave única vira o erro de duplicidade, cobrindo a corrida
    // entre a checagem acima e o INSERT.
    pub async fn create(
        &self,
        nome: &str,
        email: &str,
        senha_hash: &str,
        cpf: &str,
        tipo_usuario: &str,
    ) -> Result<Usuario, AppError> {
        sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (nome, email, senha, cpf, tipo_usuario)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(email)
        .bind(senha_hash)
        .bind(cpf)
        .bind(tipo_usuario)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UsuarioJaExiste;
                }
            }
            e.into()
        })
    }
}
