//! # LinguisticVariable — Universo de Discurso e Fuzzificação
//!
//! Uma [`LinguisticVariable`] é um domínio numérico nomeado ("vacancy_rate",
//! "waiting_time"...) particionado em termos linguísticos, cada um com sua
//! [`MembershipFunction`]. É aqui que um valor crisp vira graus de verdade.
//!
//! ## Universo de Discurso
//!
//! O [`Universe`] é a versão amostrada do domínio `[lo, hi]` — uma grade de
//! pontos estritamente crescente usada na agregação e no centroide. A grade
//! padrão reproduz o `np.arange` da formulação original (passo 1.0), mas
//! grades arbitrárias são aceitas via [`Universe::from_samples`].
//!
//! ## Fuzzificação
//!
//! `fuzzify(x)` avalia **todos** os termos da variável em `x`,
//! independentemente — termos se sobrepõem e os graus **não são
//! normalizados** entre si. Essa é uma escolha de projeto inerente a
//! sistemas Mamdani, não um bug.
//!
//! ## Validação de Domínio
//!
//! O chamador upstream deve validar os intervalos documentados, mas a
//! variável se defende sozinha: valores além de `[lo, hi]` por mais que uma
//! tolerância epsilon são rejeitados com [`InferError::OutOfRange`]; dentro
//! da tolerância, o valor é grampeado na borda (nunca extrapolado).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InferError};

use super::MembershipFunction;

/// Tolerância padrão para aceitar valores "na borda" do universo.
/// Absorve ruído de ponto flutuante de chamadores bem-comportados sem
/// abrir a porta para extrapolação de verdade.
const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Universo de discurso amostrado de uma variável.
///
/// Invariantes (garantidos na construção):
/// - pontos estritamente crescentes
/// - pelo menos 2 pontos
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Universe {
    lo: f64,
    hi: f64,
    samples: Vec<f64>,
}

impl Universe {
    /// Constrói a grade `lo, lo+step, ..., hi` (inclusiva em ambas as pontas).
    ///
    /// Equivale ao `np.arange(lo, hi + step, step)` da formulação original
    /// quando `step` divide `hi - lo` exatamente.
    ///
    /// # Erros
    ///
    /// [`ConfigError::InvalidUniverse`] se `hi <= lo` ou `step <= 0`.
    pub fn arange(lo: f64, hi: f64, step: f64) -> Result<Self, ConfigError> {
        if !(hi > lo) || !(step > 0.0) {
            return Err(ConfigError::InvalidUniverse { lo, hi, step });
        }
        let n = ((hi - lo) / step).round() as usize;
        let mut samples: Vec<f64> = (0..=n).map(|i| lo + step * i as f64).collect();
        // Garante que a última amostra é exatamente hi (np.arange acumula erro)
        if let Some(last) = samples.last_mut() {
            *last = hi;
        }
        Ok(Self { lo, hi, samples })
    }

    /// Constrói a partir de uma grade arbitrária já amostrada.
    ///
    /// # Erros
    ///
    /// [`ConfigError::UnsortedUniverse`] se houver menos de 2 pontos ou se a
    /// sequência não for estritamente crescente.
    pub fn from_samples(samples: Vec<f64>) -> Result<Self, ConfigError> {
        if samples.len() < 2 || samples.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::UnsortedUniverse);
        }
        let lo = samples[0];
        let hi = samples[samples.len() - 1];
        Ok(Self { lo, hi, samples })
    }

    /// Limite inferior do universo.
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Limite superior do universo.
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Grade de amostragem, estritamente crescente.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

/// Variável linguística: nome + universo + termos.
///
/// Duas funções no sistema — antecedente (entrada) ou consequente (saída) —
/// que diferem apenas no papel, não na estrutura. Imutável depois que o
/// motor é construído; `fuzzify` é `&self` e thread-safe.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinguisticVariable {
    name: String,
    universe: Universe,
    terms: HashMap<String, MembershipFunction>,
    tolerance: f64,
}

impl LinguisticVariable {
    /// Cria uma variável vazia sobre o universo dado.
    pub fn new(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            terms: HashMap::new(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Registra um termo linguístico, consumindo e devolvendo `self`
    /// para encadeamento na construção do motor.
    ///
    /// # Erros
    ///
    /// - [`ConfigError::DuplicateTerm`] — nome repetido na mesma variável
    /// - [`ConfigError::UnorderedBreakpoints`] — pontos fora de ordem (`a > b`)
    /// - [`ConfigError::BreakpointOutOfUniverse`] — ponto além de `[lo, hi]`
    pub fn term(
        mut self,
        name: impl Into<String>,
        mf: MembershipFunction,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if self.terms.contains_key(&name) {
            return Err(ConfigError::DuplicateTerm {
                variable: self.name.clone(),
                term: name,
            });
        }
        if !mf.is_ordered() {
            return Err(ConfigError::UnorderedBreakpoints {
                variable: self.name.clone(),
                term: name,
                points: mf.breakpoints(),
            });
        }
        // Todo ponto de quebra precisa caber no universo da variável
        for point in mf.breakpoints() {
            if point < self.universe.lo || point > self.universe.hi {
                return Err(ConfigError::BreakpointOutOfUniverse {
                    variable: self.name.clone(),
                    term: name,
                    point,
                    lo: self.universe.lo,
                    hi: self.universe.hi,
                });
            }
        }
        self.terms.insert(name, mf);
        Ok(self)
    }

    /// Nome da variável.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Universo de discurso da variável.
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Nomes dos termos, em ordem alfabética (determinística para exibição).
    pub fn terms(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.terms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Função de pertinência de um termo, se existir.
    pub fn membership(&self, term: &str) -> Option<&MembershipFunction> {
        self.terms.get(term)
    }

    /// Curva `(x, μ(x))` de um termo amostrada sobre o universo.
    ///
    /// É o suficiente para um colaborador de visualização desenhar as
    /// funções de pertinência sem reimplementar a matemática.
    pub fn curve(&self, term: &str) -> Option<Vec<(f64, f64)>> {
        let mf = self.terms.get(term)?;
        Some(
            self.universe
                .samples
                .iter()
                .map(|&x| (x, mf.degree(x)))
                .collect(),
        )
    }

    /// Fuzzifica um valor crisp: avalia cada termo em `x` e devolve o
    /// mapa termo → grau. Graus não são normalizados entre termos.
    ///
    /// Valores dentro da tolerância epsilon são grampeados na borda do
    /// universo; além dela, a chamada falha.
    ///
    /// # Erros
    ///
    /// [`InferError::OutOfRange`] se `x` estiver fora de
    /// `[lo - ε, hi + ε]`.
    pub fn fuzzify(&self, x: f64) -> Result<HashMap<String, f64>, InferError> {
        if x < self.universe.lo - self.tolerance || x > self.universe.hi + self.tolerance {
            return Err(InferError::OutOfRange {
                variable: self.name.clone(),
                value: x,
                lo: self.universe.lo,
                hi: self.universe.hi,
            });
        }
        let x = x.clamp(self.universe.lo, self.universe.hi);
        Ok(self
            .terms
            .iter()
            .map(|(name, mf)| (name.clone(), mf.degree(x)))
            .collect())
    }
}
