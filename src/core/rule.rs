//! # Rule — Regras Fuzzy e Álgebra de Antecedentes
//!
//! Uma regra Mamdani tem a forma clássica:
//!
//! ```text
//! SE vacancy_rate É Low E user_type É VIP ENTÃO recommended_area É AreaB
//! ```
//!
//! O lado "SE" é o **antecedente** — uma árvore de expressão sobre termos
//! de variáveis de entrada. O lado "ENTÃO" são os **consequentes** — pares
//! (variável de saída, termo). A força de disparo da regra é o grau de
//! verdade do antecedente multiplicado pelo peso, grampeado em `[0, 1]`.
//!
//! ## Álgebra do Antecedente
//!
//! A árvore é um enum recursivo explícito (não sobrecarga de operadores):
//!
//! | Nó | Semântica |
//! |----|-----------|
//! | `Term(v, t)` | grau fuzzificado de `t` em `v` (0.0 se ausente) |
//! | `And(L, R)` | `min(L, R)` — produto opcional via [`AndMethod`] |
//! | `Or(L, R)` | `max(L, R)` |
//! | `Not(E)` | `1 − E` |
//!
//! ## Exemplo
//!
//! ```rust
//! use crate::core::{Antecedent, Rule};
//!
//! let regra = Rule::new(
//!     Antecedent::term("vacancy_rate", "Low")
//!         .and(Antecedent::term("user_type", "VIP")),
//! )
//! .then("recommended_area", "AreaB");
//! ```
//!
//! As regras referenciam variáveis e termos por **nome** — a resolução
//! contra o registro do motor acontece no `build()`, com [`ConfigError`]
//! para referências inexistentes (nada de acoplamento escondido via objetos
//! globais compartilhados).
//!
//! [`ConfigError`]: crate::error::ConfigError

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Operador E do antecedente — configuração do motor inteiro.
///
/// `Min` é o padrão Mamdani; `Product` é a alternativa algébrica.
/// O operador OU é sempre `max` e o NÃO é sempre `1 − s`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AndMethod {
    /// `min(a, b)` — o padrão.
    #[default]
    Min,
    /// `a × b` — E probabilístico.
    Product,
}

impl AndMethod {
    /// Combina dois graus de verdade segundo o operador escolhido.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Min => lhs.min(rhs),
            Self::Product => lhs * rhs,
        }
    }
}

/// Entradas fuzzificadas de **uma** chamada de inferência:
/// mapa variável → (termo → grau). Efêmero, nunca persistido.
#[derive(Clone, Debug, Default)]
pub struct Fuzzified(HashMap<String, HashMap<String, f64>>);

impl Fuzzified {
    /// Registra os graus de uma variável fuzzificada.
    pub fn insert(&mut self, variable: impl Into<String>, degrees: HashMap<String, f64>) {
        self.0.insert(variable.into(), degrees);
    }

    /// Grau de verdade do par (variável, termo).
    ///
    /// Pares ausentes valem 0.0 — não deveria acontecer com um motor cujo
    /// conjunto de variáveis é fechado e validado no build, mas a álgebra
    /// fica total de qualquer forma.
    pub fn degree(&self, variable: &str, term: &str) -> f64 {
        self.0
            .get(variable)
            .and_then(|terms| terms.get(term))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Árvore de expressão do antecedente de uma regra.
///
/// Imutável após a construção; pertence à sua [`Rule`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Antecedent {
    /// Referência a um termo de uma variável de entrada.
    Term { variable: String, term: String },
    /// Conjunção fuzzy dos dois lados.
    And(Box<Antecedent>, Box<Antecedent>),
    /// Disjunção fuzzy dos dois lados.
    Or(Box<Antecedent>, Box<Antecedent>),
    /// Negação fuzzy da sub-expressão.
    Not(Box<Antecedent>),
}

impl Antecedent {
    /// Folha da árvore: "variável É termo".
    pub fn term(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self::Term {
            variable: variable.into(),
            term: term.into(),
        }
    }

    /// Conjunção: `self E rhs`.
    pub fn and(self, rhs: Self) -> Self {
        Self::And(Box::new(self), Box::new(rhs))
    }

    /// Disjunção: `self OU rhs`.
    pub fn or(self, rhs: Self) -> Self {
        Self::Or(Box::new(self), Box::new(rhs))
    }

    /// Negação: `NÃO self`.
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Grau de verdade da expressão sobre as entradas fuzzificadas.
    ///
    /// Avaliação recursiva direta da árvore; sempre em `[0, 1]` dado que
    /// as folhas estão em `[0, 1]`.
    pub fn strength(&self, fuzzified: &Fuzzified, and_method: AndMethod) -> f64 {
        match self {
            Self::Term { variable, term } => fuzzified.degree(variable, term),
            Self::And(lhs, rhs) => and_method.apply(
                lhs.strength(fuzzified, and_method),
                rhs.strength(fuzzified, and_method),
            ),
            Self::Or(lhs, rhs) => lhs
                .strength(fuzzified, and_method)
                .max(rhs.strength(fuzzified, and_method)),
            Self::Not(expr) => 1.0 - expr.strength(fuzzified, and_method),
        }
    }

    /// Todos os pares (variável, termo) referenciados pela árvore.
    ///
    /// Usado pelo builder do motor para resolver as referências contra o
    /// registro de variáveis.
    pub fn referenced_terms(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        self.collect_terms(&mut out);
        out
    }

    fn collect_terms<'a>(&'a self, out: &mut Vec<(&'a str, &'a str)>) {
        match self {
            Self::Term { variable, term } => out.push((variable, term)),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                lhs.collect_terms(out);
                rhs.collect_terms(out);
            }
            Self::Not(expr) => expr.collect_terms(out),
        }
    }
}

/// Consequente de uma regra: qual termo de qual variável de saída recortar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Consequent {
    pub variable: String,
    pub term: String,
}

/// Regra fuzzy: antecedente + consequentes ordenados + peso.
///
/// Imutável depois que o conjunto de regras é construído; o conjunto
/// completo pertence ao motor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    antecedent: Antecedent,
    consequents: Vec<Consequent>,
    weight: f64,
}

impl Rule {
    /// Cria uma regra com peso padrão 1.0 e nenhum consequente ainda.
    pub fn new(antecedent: Antecedent) -> Self {
        Self {
            antecedent,
            consequents: Vec::new(),
            weight: 1.0,
        }
    }

    /// Acrescenta um consequente "ENTÃO variável É termo".
    pub fn then(mut self, variable: impl Into<String>, term: impl Into<String>) -> Self {
        self.consequents.push(Consequent {
            variable: variable.into(),
            term: term.into(),
        });
        self
    }

    /// Define o peso da regra. A faixa [0, 1] é validada no build do motor.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Antecedente da regra.
    pub fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    /// Consequentes na ordem declarada.
    pub fn consequents(&self) -> &[Consequent] {
        &self.consequents
    }

    /// Peso da regra.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Força de disparo: grau do antecedente × peso, grampeado em [0, 1].
    pub fn firing_strength(&self, fuzzified: &Fuzzified, and_method: AndMethod) -> f64 {
        (self.antecedent.strength(fuzzified, and_method) * self.weight).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entradas() -> Fuzzified {
        let mut fz = Fuzzified::default();
        fz.insert(
            "traffic",
            HashMap::from([("Low".to_string(), 0.7), ("High".to_string(), 0.2)]),
        );
        fz.insert("vacancy", HashMap::from([("Medium".to_string(), 0.4)]));
        fz
    }

    /// And = min, Or = max, Not = 1 − s, contra os graus fuzzificados.
    #[test]
    fn test_antecedent_algebra() {
        let fz = entradas();
        let low = Antecedent::term("traffic", "Low");
        let medium = Antecedent::term("vacancy", "Medium");

        assert_eq!(low.clone().and(medium.clone()).strength(&fz, AndMethod::Min), 0.4);
        assert_eq!(low.clone().or(medium.clone()).strength(&fz, AndMethod::Min), 0.7);
        assert!((low.clone().not().strength(&fz, AndMethod::Min) - 0.3).abs() < 1e-12);

        // Composição aninhada: (Low E Medium) OU (NÃO High)
        let composto = low
            .clone()
            .and(medium)
            .or(Antecedent::term("traffic", "High").not());
        assert!((composto.strength(&fz, AndMethod::Min) - 0.8).abs() < 1e-12);
    }

    /// O E por produto é uma opção do motor inteiro; min continua o padrão.
    #[test]
    fn test_product_and() {
        let fz = entradas();
        let expr = Antecedent::term("traffic", "Low").and(Antecedent::term("vacancy", "Medium"));
        assert!((expr.strength(&fz, AndMethod::Product) - 0.28).abs() < 1e-12);
        assert_eq!(AndMethod::default(), AndMethod::Min);
    }

    /// Par (variável, termo) ausente vale 0.0 — a álgebra é total.
    #[test]
    fn test_missing_pair_defaults_to_zero() {
        let fz = entradas();
        assert_eq!(Antecedent::term("weather", "Snow").strength(&fz, AndMethod::Min), 0.0);
        assert_eq!(Antecedent::term("traffic", "Medium").strength(&fz, AndMethod::Min), 0.0);
    }

    /// Força de disparo = antecedente × peso, grampeada em [0, 1].
    #[test]
    fn test_firing_strength_weight() {
        let fz = entradas();
        let regra = Rule::new(Antecedent::term("traffic", "Low"))
            .then("waiting_time", "Short")
            .with_weight(0.5);
        assert!((regra.firing_strength(&fz, AndMethod::Min) - 0.35).abs() < 1e-12);

        let peso_cheio = Rule::new(Antecedent::term("traffic", "Low")).then("waiting_time", "Short");
        assert!((peso_cheio.firing_strength(&fz, AndMethod::Min) - 0.7).abs() < 1e-12);
    }

    /// O builder do motor precisa enxergar todas as referências da árvore.
    #[test]
    fn test_referenced_terms() {
        let expr = Antecedent::term("a", "x")
            .and(Antecedent::term("b", "y").or(Antecedent::term("c", "z").not()));
        let refs = expr.referenced_terms();
        assert_eq!(refs, vec![("a", "x"), ("b", "y"), ("c", "z")]);
    }
}
