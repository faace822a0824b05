// src/services/ubs.rs

use chrono::{Local, NaiveTime};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        DisponibilidadeRepository, FuncionarioRepository, HistoricoRepository, UbsRepository,
        VacinaRepository,
    },
    models::ubs::{Disponibilidade, HistoricoEntrada, Ubs, UbsComStatus, VacinasDaUbs},
};

// Sentinela para o par (UBS, vacina) que nunca teve status registrado
pub const STATUS_SEM_REGISTRO: &str = "Indisponível";

// Janela fixa de funcionamento, com os dois limites inclusivos — fiel ao
// BETWEEN '07:00:00' AND '18:00:00' da API original. Os horários próprios
// de cada UBS são retornados mas não entram nesta conta (comportamento
// herdado; ver DESIGN.md).
pub fn status_funcionamento(agora: NaiveTime) -> &'static str {
    let abertura = NaiveTime::from_hms_opt(7, 0, 0).expect("horário literal válido");
    let fechamento = NaiveTime::from_hms_opt(18, 0, 0).expect("horário literal válido");
    if agora >= abertura && agora <= fechamento {
        "aberto"
    } else {
        "fechado"
    }
}

// "Rua X, 12 - Centro - Cidade/UF - 00000-000"
pub fn formatar_endereco(ubs: &Ubs) -> String {
    format!(
        "{}, {} - {} - {}/{} - {}",
        ubs.rua, ubs.numero, ubs.bairro, ubs.cidade, ubs.estado, ubs.cep
    )
}

pub fn status_anterior_ou_padrao(atual: Option<String>) -> String {
    atual.unwrap_or_else(|| STATUS_SEM_REGISTRO.to_string())
}

fn montar_ubs(ubs: Ubs, agora: NaiveTime) -> UbsComStatus {
    UbsComStatus {
        endereco: formatar_endereco(&ubs),
        status: status_funcionamento(agora).to_string(),
        id: ubs.id,
        nome: ubs.nome,
        hora_abertura: ubs.hora_abertura,
        hora_fechamento: ubs.hora_fechamento,
    }
}

#[derive(Clone)]
pub struct UbsService {
    ubs_repo: UbsRepository,
    vacina_repo: VacinaRepository,
    funcionario_repo: FuncionarioRepository,
    disponibilidade_repo: DisponibilidadeRepository,
    historico_repo: HistoricoRepository,
    pool: PgPool,
}

impl UbsService {
    pub fn new(
        ubs_repo: UbsRepository,
        vacina_repo: VacinaRepository,
        funcionario_repo: FuncionarioRepository,
        disponibilidade_repo: DisponibilidadeRepository,
        historico_repo: HistoricoRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            ubs_repo,
            vacina_repo,
            funcionario_repo,
            disponibilidade_repo,
            historico_repo,
            pool,
        }
    }

    pub async fn listar_ubs(&self) -> Result<Vec<UbsComStatus>, AppError> {
        let agora = Local::now().time();
        let lista = self
            .ubs_repo
            .listar()
            .await?
            .into_iter()
            .map(|ubs| montar_ubs(ubs, agora))
            .collect();
        Ok(lista)
    }

    pub async fn buscar_ubs(&self, id: i32) -> Result<UbsComStatus, AppError> {
        let ubs = self
            .ubs_repo
            .buscar(id)
            .await?
            .ok_or(AppError::UbsNaoEncontrada)?;
        Ok(montar_ubs(ubs, Local::now().time()))
    }

    pub async fn listar_vacinas(&self, ubs_id: i32) -> Result<VacinasDaUbs, AppError> {
        let vacinas = self.vacina_repo.listar_com_status(ubs_id).await?;
        Ok(VacinasDaUbs { ubs_id, vacinas })
    }

    // O núcleo do sistema: registra o novo status e a entrada de auditoria
    // com o status anterior, numa única transação. Corridas entre transações
    // distintas sobre o mesmo par continuam resolvidas pelo banco (upsert na
    // chave única); não adicionamos SELECT ... FOR UPDATE.
    pub async fn atualizar_status(
        &self,
        ubs_id: i32,
        vacina_id: i32,
        novo_status: &str,
        cpf_funcionario: &str,
    ) -> Result<Disponibilidade, AppError> {
        if !self.ubs_repo.existe(ubs_id).await? {
            return Err(AppError::UbsNaoEncontrada);
        }
        if !self.vacina_repo.existe(vacina_id).await? {
            return Err(AppError::VacinaNaoEncontrada);
        }
        let funcionario = self
            .funcionario_repo
            .find_by_cpf(cpf_funcionario)
            .await?
            .ok_or(AppError::FuncionarioNaoEncontrado)?;

        // --- INÍCIO DA TRANSAÇÃO ---
        // Leitura do status anterior, upsert e auditoria precisam parecer
        // atômicos para o cliente. Se qualquer passo falhar, o drop do tx
        // desfaz tudo.
        let mut tx = self.pool.begin().await?;

        let anterior = self
            .disponibilidade_repo
            .status_atual(&mut *tx, ubs_id, vacina_id)
            .await?;
        let status_anterior = status_anterior_ou_padrao(anterior);

        let linha = self
            .disponibilidade_repo
            .upsert(&mut *tx, ubs_id, vacina_id, novo_status)
            .await?;

        self.historico_repo
            .inserir(
                &mut *tx,
                funcionario.id,
                ubs_id,
                vacina_id,
                &status_anterior,
                novo_status,
            )
            .await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(
            "Status da vacina {} na UBS {} atualizado: '{}' -> '{}'",
            vacina_id,
            ubs_id,
            status_anterior,
            novo_status
        );

        Ok(linha)
    }

    pub async fn historico(&self, ubs_id: i32) -> Result<Vec<HistoricoEntrada>, AppError> {
        if !self.ubs_repo.existe(ubs_id).await? {
            return Err(AppError::UbsNaoEncontrada);
        }
        self.historico_repo.listar_por_ubs(ubs_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hora(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn janela_aberta_inclui_os_dois_limites() {
        assert_eq!(status_funcionamento(hora(7, 0, 0)), "aberto");
        assert_eq!(status_funcionamento(hora(18, 0, 0)), "aberto");
    }

    #[test]
    fn fora_da_janela_fica_fechado() {
        assert_eq!(status_funcionamento(hora(6, 59, 59)), "fechado");
        assert_eq!(status_funcionamento(hora(18, 0, 1)), "fechado");
        assert_eq!(status_funcionamento(hora(0, 0, 0)), "fechado");
        assert_eq!(status_funcionamento(hora(23, 59, 59)), "fechado");
    }

    #[test]
    fn meio_da_janela_fica_aberto() {
        assert_eq!(status_funcionamento(hora(12, 30, 0)), "aberto");
    }

    #[test]
    fn endereco_segue_o_formato_da_api() {
        let ubs = Ubs {
            id: 1,
            nome: "UBS Central".to_string(),
            rua: "Rua das Flores".to_string(),
            numero: "123".to_string(),
            bairro: "Centro".to_string(),
            cidade: "São Paulo".to_string(),
            estado: "SP".to_string(),
            cep: "01000-000".to_string(),
            hora_abertura: hora(8, 0, 0),
            hora_fechamento: hora(17, 0, 0),
        };
        assert_eq!(
            formatar_endereco(&ubs),
            "Rua das Flores, 123 - Centro - São Paulo/SP - 01000-000"
        );
    }

    #[test]
    fn par_sem_registro_tem_anterior_indisponivel() {
        assert_eq!(status_anterior_ou_padrao(None), "Indisponível");
    }

    #[test]
    fn par_com_registro_preserva_o_anterior() {
        assert_eq!(
            status_anterior_ou_padrao(Some("Disponível".to_string())),
            "Disponível"
        );
    }
}
