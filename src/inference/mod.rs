//! # Módulo Inference — Motor de Inferência Mamdani
//!
//! Este módulo contém o **motor de inferência** do sistema: a orquestração
//! de fuzzificação → regras → agregação → defuzzificação que transforma
//! entradas crisp em saídas crisp.
//!
//! ## Estilo Mamdani
//!
//! | Etapa | Operador |
//! |-------|----------|
//! | Implicação | `min(μ(x), força)` — recorta o consequente |
//! | Agregação | `max` ponto a ponto entre contribuições |
//! | Defuzzificação | centroide `Σ(x·μ)/Σ(μ)` |
//!
//! Veja [`Engine`] para o fluxo completo e [`defuzz::centroid`] para o
//! cálculo do centro de gravidade.

/// Sub-módulo com o motor e seu builder.
pub mod engine;

/// Sub-módulo com a defuzzificação por centroide.
pub mod defuzz;

/// Re-exports para acesso via `crate::inference::Engine`.
pub use engine::{Engine, EngineBuilder, OutputMap};
