use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Toda falha de handler passa por aqui; nada vaza como pânico para o cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Cadastro duplicado (e-mail ou CPF já em uso). A API original responde
    // 400 para este caso, então mantemos o status dela.
    #[error("Usuário já existe")]
    UsuarioJaExiste,

    // Deliberadamente genérico: não revela se foi o CPF ou a senha que falhou.
    #[error("CPF ou senha incorretos")]
    CredenciaisInvalidas,

    #[error("{0}")]
    CampoInvalido(&'static str),

    #[error("UBS não encontrada")]
    UbsNaoEncontrada,

    #[error("Vacina não encontrada")]
    VacinaNaoEncontrada,

    #[error("Funcionário não encontrado")]
    FuncionarioNaoEncontrado,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UsuarioJaExiste => StatusCode::BAD_REQUEST,
            AppError::CampoInvalido(_) => StatusCode::BAD_REQUEST,
            AppError::CredenciaisInvalidas => StatusCode::UNAUTHORIZED,
            AppError::UbsNaoEncontrada
            | AppError::VacinaNaoEncontrada
            | AppError::FuncionarioNaoEncontrado => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Erros de validação do `validator` carregam as mensagens por campo.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Um ou mais campos são inválidos.",
                "details": details,
            }));
            return (status, body).into_response();
        }

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O `tracing` registra o detalhe; o cliente recebe só o genérico.
            tracing::error!("Erro interno do servidor: {}", self);
            "Ocorreu um erro inesperado.".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadastro_duplicado_responde_400() {
        assert_eq!(
            AppError::UsuarioJaExiste.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn credenciais_invalidas_respondem_401() {
        assert_eq!(
            AppError::CredenciaisInvalidas.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn entidades_ausentes_respondem_404() {
        for err in [
            AppError::UbsNaoEncontrada,
            AppError::VacinaNaoEncontrada,
            AppError::FuncionarioNaoEncontrado,
        ] {
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn erro_de_banco_vira_500_generico() {
        let err = AppError::DatabaseError(sqlx::Error::PoolClosed);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn campo_invalido_carrega_a_mensagem_exata() {
        let err = AppError::CampoInvalido("CPF não fornecido");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "CPF não fornecido");
    }
}
