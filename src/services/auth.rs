// src/services/auth.rs

use bcrypt::hash;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::{
    common::error::AppError,
    db::{FuncionarioRepository, UserRepository},
    models::auth::{
        AlterarSenhaResponse, Claims, FuncionarioLogado, LoginResponse, RegisterResponse,
        Usuario,
    },
};

// Remove tudo que não for dígito: "123.456.789-00" -> "12345678900"
pub fn normalizar_cpf(cpf: &str) -> String {
    cpf.chars().filter(|c| c.is_ascii_digit()).collect()
}

// Validações da alteração de senha, na ordem fixa da API original:
// primeiro as checagens de presença/tamanho, só depois a existência do
// funcionário (feita pelo chamador).
pub fn validar_alteracao_senha(
    cpf: Option<&str>,
    nova_senha: Option<&str>,
) -> Result<(String, String), AppError> {
    let cpf = match cpf {
        Some(c) if !c.is_empty() => c,
        _ => return Err(AppError::CampoInvalido("CPF não fornecido")),
    };
    let nova_senha = match nova_senha {
        Some(s) if !s.is_empty() => s,
        _ => return Err(AppError::CampoInvalido("Nova senha não fornecida")),
    };
    if nova_senha.chars().count() < 6 {
        return Err(AppError::CampoInvalido(
            "A senha deve ter pelo menos 6 caracteres",
        ));
    }
    Ok((cpf.to_owned(), nova_senha.to_owned()))
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    funcionario_repo: FuncionarioRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        funcionario_repo: FuncionarioRepository,
        jwt_secret: String,
    ) -> Self {
        Self {
            user_repo,
            funcionario_repo,
            jwt_secret,
        }
    }

    pub async fn registrar(
        &self,
        nome: &str,
        email: &str,
        senha: &str,
        cpf: &str,
        tipo_usuario: &str,
    ) -> Result<RegisterResponse, AppError> {
        // Duplicidade por e-mail OU CPF, independente dos demais campos
        if self
            .user_repo
            .find_by_email_or_cpf(email, cpf)
            .await?
            .is_some()
        {
            return Err(AppError::UsuarioJaExiste);
        }

        // Hashing fora do runtime: bcrypt é caro demais para a thread async
        let senha_clone = senha.to_owned();
        let senha_hash = tokio::task::spawn_blocking(move || {
            hash(&senha_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let novo_usuario = self
            .user_repo
            .create(nome, email, &senha_hash, cpf, tipo_usuario)
            .await?;

        let token = self.criar_token(&novo_usuario)?;

        Ok(RegisterResponse {
            message: "Usuário criado com sucesso".to_string(),
            token,
            user: novo_usuario.into(),
        })
    }

    pub async fn login(&self, cpf: &str, senha: &str) -> Result<LoginResponse, AppError> {
        let cpf_digitos = normalizar_cpf(cpf);

        let funcionario = self
            .funcionario_repo
            .find_by_cpf_normalizado(&cpf_digitos)
            .await?
            .ok_or(AppError::CredenciaisInvalidas)?;

        // A credencial decide o caminho: texto plano no primeiro acesso,
        // bcrypt depois. A mensagem de erro é a mesma nos dois casos.
        let credencial = funcionario.credencial();
        let senha_clone = senha.to_owned();
        let senha_valida =
            tokio::task::spawn_blocking(move || credencial.verificar(&senha_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !senha_valida {
            return Err(AppError::CredenciaisInvalidas);
        }

        Ok(LoginResponse {
            primeiro_acesso: funcionario.primeiro_acesso,
            user: FuncionarioLogado {
                cpf: funcionario.cpf,
                nome: funcionario.nome,
                id_ubs: funcionario.id_ubs,
                nome_ubs: funcionario.nome_ubs,
            },
        })
    }

    pub async fn alterar_senha(
        &self,
        cpf: Option<&str>,
        nova_senha: Option<&str>,
    ) -> Result<AlterarSenhaResponse, AppError> {
        let (cpf, nova_senha) = validar_alteracao_senha(cpf, nova_senha)?;

        let senha_hash = tokio::task::spawn_blocking(move || {
            hash(&nova_senha, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.funcionario_repo
            .estabelecer_senha(&cpf, &senha_hash)
            .await?
            .ok_or(AppError::FuncionarioNaoEncontrado)?;

        Ok(AlterarSenhaResponse {
            message: "Senha alterada com sucesso".to_string(),
            primeiro_acesso: false,
        })
    }

    fn criar_token(&self, usuario: &Usuario) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(24);

        let claims = Claims {
            id: usuario.id,
            tipo_usuario: usuario.tipo_usuario.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Credencial;

    #[test]
    fn normalizar_cpf_remove_pontuacao() {
        assert_eq!(normalizar_cpf("123.456.789-00"), "12345678900");
        assert_eq!(normalizar_cpf("12345678900"), "12345678900");
        assert_eq!(normalizar_cpf(""), "");
        assert_eq!(normalizar_cpf("abc"), "");
    }

    #[test]
    fn credencial_provisoria_compara_texto_plano() {
        let cred = Credencial::Provisoria("senha123".to_string());
        assert!(cred.verificar("senha123").unwrap());
        assert!(!cred.verificar("outra").unwrap());
    }

    #[test]
    fn credencial_estabelecida_usa_bcrypt() {
        let hash = bcrypt::hash("senha123", 4).unwrap();
        let cred = Credencial::Estabelecida(hash.clone());
        assert!(cred.verificar("senha123").unwrap());
        assert!(!cred.verificar("outra").unwrap());

        // O hash em si nunca é aceito como senha
        assert!(!cred.verificar(&hash).unwrap());
    }

    #[test]
    fn credencial_provisoria_nao_aceita_caminho_bcrypt() {
        // Se a senha provisória por acaso for um hash, ainda é igualdade exata
        let hash = bcrypt::hash("senha123", 4).unwrap();
        let cred = Credencial::Provisoria(hash.clone());
        assert!(!cred.verificar("senha123").unwrap());
        assert!(cred.verificar(&hash).unwrap());
    }

    #[test]
    fn alteracao_exige_cpf_antes_de_tudo() {
        let err = validar_alteracao_senha(None, Some("123456")).unwrap_err();
        assert_eq!(err.to_string(), "CPF não fornecido");

        // CPF vazio conta como ausente
        let err = validar_alteracao_senha(Some(""), Some("123456")).unwrap_err();
        assert_eq!(err.to_string(), "CPF não fornecido");

        // Mesmo com a senha também inválida, o CPF é checado primeiro
        let err = validar_alteracao_senha(None, Some("abc")).unwrap_err();
        assert_eq!(err.to_string(), "CPF não fornecido");
    }

    #[test]
    fn alteracao_exige_nova_senha() {
        let err = validar_alteracao_senha(Some("12345678900"), None).unwrap_err();
        assert_eq!(err.to_string(), "Nova senha não fornecida");

        let err = validar_alteracao_senha(Some("12345678900"), Some("")).unwrap_err();
        assert_eq!(err.to_string(), "Nova senha não fornecida");
    }

    #[test]
    fn alteracao_rejeita_senha_curta_para_qualquer_cpf() {
        // A regra de tamanho vale inclusive para CPFs que não existem no banco:
        // a checagem vem antes da consulta.
        for cpf in ["12345678900", "00000000000", "cpf-inexistente"] {
            let err = validar_alteracao_senha(Some(cpf), Some("12345")).unwrap_err();
            assert_eq!(err.to_string(), "A senha deve ter pelo menos 6 caracteres");
        }
    }

    #[test]
    fn alteracao_aceita_senha_de_seis_caracteres() {
        let (cpf, senha) = validar_alteracao_senha(Some("12345678900"), Some("123456")).unwrap();
        assert_eq!(cpf, "12345678900");
        assert_eq!(senha, "123456");
    }
}
