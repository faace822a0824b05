// src/config.rs

use axum::http::HeaderValue;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        DisponibilidadeRepository, FuncionarioRepository, HistoricoRepository, UbsRepository,
        UserRepository, VacinaRepository,
    },
    services::{auth::AuthService, ubs::UbsService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub porta: u16,
    // Origens permitidas no CORS, vindas do ambiente (não são hard-coded)
    pub cors_origins: Vec<HeaderValue>,
    pub auth_service: AuthService,
    pub ubs_service: UbsService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL deve ser definida"))?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET deve ser definido"))?;
        let porta: u16 = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT inválida"))?;

        // Lista separada por vírgula, ex.: "http://localhost:3000,https://app.exemplo.br"
        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|origem| {
                origem
                    .trim()
                    .parse::<HeaderValue>()
                    .map_err(|_| anyhow::anyhow!("Origem CORS inválida: {}", origem))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let funcionario_repo = FuncionarioRepository::new(db_pool.clone());
        let ubs_repo = UbsRepository::new(db_pool.clone());
        let vacina_repo = VacinaRepository::new(db_pool.clone());
        let disponibilidade_repo = DisponibilidadeRepository::new(db_pool.clone());
        let historico_repo = HistoricoRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, funcionario_repo.clone(), jwt_secret);
        let ubs_service = UbsService::new(
            ubs_repo,
            vacina_repo,
            funcionario_repo,
            disponibilidade_repo,
            historico_repo,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            porta,
            cors_origins,
            auth_service,
            ubs_service,
        })
    }
}
