// src/models/ubs.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

// Linha crua da tabela ubs; o endereço e o status derivado são montados no serviço
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Ubs {
    pub id: i32,
    pub nome: String,
    pub rua: String,
    pub numero: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    pub hora_abertura: NaiveTime,
    pub hora_fechamento: NaiveTime,
}

// Forma de resposta das rotas GET /api/ubs e GET /api/ubs/{id}
#[derive(Debug, Serialize)]
pub struct UbsComStatus {
    pub id: i32,
    pub nome: String,
    pub endereco: String,
    pub hora_abertura: NaiveTime,
    pub hora_fechamento: NaiveTime,
    pub status: String,
}

// LEFT JOIN: toda vacina aparece, com status nulo quando a UBS não tem registro
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct VacinaComStatus {
    pub id: i32,
    pub nome: String,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VacinasDaUbs {
    pub ubs_id: i32,
    pub vacinas: Vec<VacinaComStatus>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Disponibilidade {
    pub id: i32,
    pub id_ubs: i32,
    pub id_vacina: i32,
    pub status: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AtualizarStatusPayload {
    #[validate(length(min = 1, message = "O campo 'status' é obrigatório."))]
    pub status: String,
    pub cpf_funcionario: String,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct HistoricoEntrada {
    pub id: i32,
    pub nome_funcionario: String,
    pub nome_vacina: String,
    pub status_anterior: String,
    pub status_atual: String,
    pub data: NaiveDate,
    pub hora: NaiveTime,
}
