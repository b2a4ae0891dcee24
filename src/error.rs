//! # Erros — Taxonomia Estruturada do Motor Fuzzy
//!
//! Dois momentos distintos podem falhar, e cada um tem seu próprio enum:
//!
//! | Enum | Momento | Política |
//! |------|---------|----------|
//! | [`ConfigError`] | Construção do motor | **Fatal** — o motor nunca existe pela metade |
//! | [`InferError`] | Cada chamada de `infer` | Retornado por chamada / por saída, nunca "estoura" |
//!
//! Um [`ConfigError`] aborta o `build()` — pontos de quebra fora de ordem,
//! termos duplicados, referências a variáveis/termos inexistentes, pesos
//! inválidos. Um [`InferError`] é um resultado estruturado que o chamador
//! inspeciona: entrada fora do universo, entrada faltando, ou nenhuma regra
//! disparada para uma saída. Não há retry que faça sentido — a inferência é
//! uma função pura da entrada.

use thiserror::Error;

/// Erro de configuração — detectado na **construção** do motor.
///
/// Qualquer variante aqui é fatal para o `build()`: um motor parcialmente
/// construído nunca é exposto ao chamador.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Universo degenerado: limites invertidos ou passo não positivo.
    #[error("universo inválido: lo={lo}, hi={hi}, step={step}")]
    InvalidUniverse { lo: f64, hi: f64, step: f64 },

    /// Amostras fornecidas diretamente que não são estritamente crescentes
    /// ou têm menos de 2 pontos.
    #[error("universo deve ser estritamente crescente com pelo menos 2 pontos")]
    UnsortedUniverse,

    /// Pontos de quebra de uma função de pertinência fora de ordem
    /// (ex.: triangular com `a > b`).
    #[error("pontos de quebra fora de ordem no termo '{term}' de '{variable}': {points:?}")]
    UnorderedBreakpoints {
        variable: String,
        term: String,
        points: Vec<f64>,
    },

    /// Ponto de quebra fora dos limites do universo da variável.
    #[error("ponto de quebra {point} do termo '{term}' fora do universo [{lo}, {hi}] de '{variable}'")]
    BreakpointOutOfUniverse {
        variable: String,
        term: String,
        point: f64,
        lo: f64,
        hi: f64,
    },

    /// Nome de termo repetido dentro da mesma variável.
    #[error("termo duplicado '{term}' na variável '{variable}'")]
    DuplicateTerm { variable: String, term: String },

    /// Nome de variável repetido dentro do motor (entradas e saídas
    /// compartilham o mesmo espaço de nomes).
    #[error("variável duplicada '{variable}' no motor")]
    DuplicateVariable { variable: String },

    /// Regra referencia uma variável que não foi registrada no motor.
    #[error("regra #{rule} referencia variável desconhecida '{variable}'")]
    UnknownVariable { rule: usize, variable: String },

    /// Regra referencia um termo que a variável não possui.
    #[error("regra #{rule} referencia termo desconhecido '{term}' na variável '{variable}'")]
    UnknownTerm {
        rule: usize,
        variable: String,
        term: String,
    },

    /// Regra sem nenhum consequente — não contribuiria para saída alguma.
    #[error("regra #{rule} não possui consequentes")]
    RuleWithoutConsequent { rule: usize },

    /// Peso de regra fora do intervalo [0, 1].
    #[error("peso {weight} da regra #{rule} fora de [0, 1]")]
    InvalidWeight { rule: usize, weight: f64 },
}

/// Erro de inferência — detectado durante **uma chamada** de `infer`.
///
/// Retornado como valor estruturado (nunca como pânico): ou no nível da
/// chamada (entradas inválidas) ou por saída individual (agregado vazio).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InferError {
    /// Valor crisp fora do universo da variável além da tolerância.
    /// O chamador deve revalidar e reenviar — não há clamp silencioso.
    #[error("entrada '{variable}' = {value} fora do universo [{lo}, {hi}]")]
    OutOfRange {
        variable: String,
        value: f64,
        lo: f64,
        hi: f64,
    },

    /// Variável de entrada declarada no motor sem valor na chamada.
    #[error("entrada ausente para a variável '{variable}'")]
    MissingInput { variable: String },

    /// Chamada forneceu um nome de variável que o motor não conhece.
    #[error("entrada desconhecida '{variable}'")]
    UnknownInput { variable: String },

    /// Nenhuma regra disparou para esta saída — o denominador do centroide
    /// seria ~0. Reportado por saída, sem inventar um valor padrão.
    #[error("nenhuma regra disparou para a saída '{variable}' (agregado vazio)")]
    EmptyAggregate { variable: String },
}
