// src/main.rs

use axum::{
    http::Method,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

mod common;
mod config;
mod db;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/alterar-senha", post(handlers::auth::alterar_senha));

    // Rotas das UBS: diretório, vacinas, atualização de status e histórico
    let ubs_routes = Router::new()
        .route("/", get(handlers::ubs::listar_ubs))
        .route("/{id}", get(handlers::ubs::buscar_ubs))
        .route("/{id}/vacinas", get(handlers::ubs::listar_vacinas))
        .route(
            "/{id}/vacinas/{vacina_id}",
            put(handlers::ubs::atualizar_status),
        )
        .route("/{id}/historico", get(handlers::ubs::historico));

    // CORS configurável: origens do ambiente, com credenciais habilitadas
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(app_state.cors_origins.clone()))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true);

    let porta = app_state.porta;

    // Combina tudo no router principal
    let app = Router::new()
        .route(
            "/",
            get(|| async { Json(json!({ "message": "API funcionando!" })) }),
        )
        .nest("/auth", auth_routes)
        .nest("/api/ubs", ubs_routes)
        .layer(cors)
        .with_state(app_state);

    // Inicia o servidor
    let addr = format!("0.0.0.0:{}", porta);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!(
        "🚀 Servidor escutando em {}",
        listener
            .local_addr()
            .expect("Falha ao obter o endereço local")
    );
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
