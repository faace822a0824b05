// src/models/auth.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

// Usuário do portal, criado via /auth/register
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Usuario {
    pub id: i32,
    pub nome: String,
    pub email: String,
    pub senha: String, // hash bcrypt — nunca serializado
    pub cpf: String,
    pub tipo_usuario: String,
}

// Projeção pública do usuário (sem a senha)
#[derive(Debug, Serialize)]
pub struct UsuarioPublico {
    pub id: i32,
    pub nome: String,
    pub email: String,
    pub tipo_usuario: String,
}

impl From<Usuario> for UsuarioPublico {
    fn from(u: Usuario) -> Self {
        Self {
            id: u.id,
            nome: u.nome,
            email: u.email,
            tipo_usuario: u.tipo_usuario,
        }
    }
}

// Funcionário de uma UBS, vindo do banco com o nome da UBS já juntado
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Funcionario {
    pub id: i32,
    pub nome: String,
    pub cpf: String,
    pub senha: String,
    pub primeiro_acesso: bool,
    pub id_ubs: Option<i32>,
    pub nome_ubs: Option<String>,
}

// A credencial de um funcionário é uma variante explícita, não um booleano
// solto: ou ainda é a senha provisória (texto plano), ou já foi estabelecida
// (hash bcrypt). A transição só acontece numa direção, via alterar-senha.
#[derive(Debug, Clone)]
pub enum Credencial {
    Provisoria(String),
    Estabelecida(String),
}

impl Credencial {
    // Exatamente um caminho de verificação se aplica a cada registro:
    // igualdade em texto plano para a provisória, bcrypt para a estabelecida.
    pub fn verificar(&self, senha: &str) -> Result<bool, bcrypt::BcryptError> {
        match self {
            Credencial::Provisoria(provisoria) => Ok(provisoria == senha),
            Credencial::Estabelecida(hash) => bcrypt::verify(senha, hash),
        }
    }
}

impl Funcionario {
    pub fn credencial(&self) -> Credencial {
        if self.primeiro_acesso {
            Credencial::Provisoria(self.senha.clone())
        } else {
            Credencial::Estabelecida(self.senha.clone())
        }
    }
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPayload {
    pub nome: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    pub senha: String,
    pub cpf: String,
    pub tipo_usuario: String,
}

// Dados para login de funcionário
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub cpf: String,
    pub senha: String,
}

// Dados para alteração de senha. Os campos são opcionais de propósito:
// a ausência de cada um tem a sua própria mensagem de erro, em ordem fixa.
#[derive(Debug, Deserialize)]
pub struct AlterarSenhaPayload {
    pub cpf: Option<String>,
    pub nova_senha: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub token: String,
    pub user: UsuarioPublico,
}

#[derive(Debug, Serialize)]
pub struct FuncionarioLogado {
    pub cpf: String,
    pub nome: String,
    pub id_ubs: Option<i32>,
    pub nome_ubs: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub primeiro_acesso: bool,
    pub user: FuncionarioLogado,
}

#[derive(Debug, Serialize)]
pub struct AlterarSenhaResponse {
    pub message: String,
    pub primeiro_acesso: bool,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub tipo_usuario: String,
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}
