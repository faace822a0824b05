pub mod user_repo;
pub use user_repo::UserRepository;
pub mod funcionario_repo;
pub use funcionario_repo::FuncionarioRepository;
pub mod ubs_repo;
pub use ubs_repo::UbsRepository;
pub mod vacina_repo;
pub use vacina_repo::VacinaRepository;
pub mod disponibilidade_repo;
pub use disponibilidade_repo::DisponibilidadeRepository;
pub mod historico_repo;
pub use historico_repo::HistoricoRepository;
