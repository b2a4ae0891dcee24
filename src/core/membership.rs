//! # MembershipFunction — Grau de Pertinência Fuzzy
//!
//! Implementação das **funções de pertinência** que dão forma aos conjuntos
//! fuzzy do sistema. Cada termo linguístico ("Low", "Snow", "AreaA"...) é
//! definido por uma dessas funções sobre o universo da sua variável.
//!
//! ## O que é pertinência?
//!
//! Diferente da lógica clássica (dentro/fora do conjunto), um conjunto fuzzy
//! atribui a cada valor crisp um **grau de pertinência** entre 0.0 e 1.0.
//! Uma densidade de tráfego de 35% pode ser "Low" com grau 0.25 e "Medium"
//! com grau 0.25 **ao mesmo tempo** — a sobreposição é o ponto, não um bug.
//!
//! ## Formas Suportadas
//!
//! | Forma | Parâmetros | Perfil |
//! |-------|------------|--------|
//! | **Triangular** | `a ≤ b ≤ c` | sobe de 0 em `a` até 1 em `b`, desce até 0 em `c` |
//! | **Trapezoidal** | `a ≤ b ≤ c ≤ d` | sobe `a→b`, platô em 1 de `b` a `c`, desce `c→d` |
//!
//! As fórmulas seguem `fuzz.trimf`/`fuzz.trapmf` do scikit-fuzzy:
//!
//! - rampa de subida: `(x − a) / (b − a)`
//! - rampa de descida: `(d − x) / (d − c)`
//!
//! Rampas **degeneradas** (`a == b` ou `c == d`) viram degraus — o divisor
//! zero é tratado explicitamente, nunca produz NaN.
//!
//! ## Exemplo
//!
//! ```rust
//! use crate::core::MembershipFunction;
//!
//! // "VeryShort": platô em [0, 2], descendo até 5
//! let mf = MembershipFunction::trapezoidal(0.0, 0.0, 2.0, 5.0);
//! assert_eq!(mf.degree(1.0), 1.0);   // dentro do platô
//! assert_eq!(mf.degree(3.5), 0.5);   // meio da rampa de descida
//! assert_eq!(mf.degree(10.0), 0.0);  // fora do suporte
//! ```

use serde::{Deserialize, Serialize};

/// Função de pertinência de um termo linguístico.
///
/// É **pura e total** sobre a reta real: `degree(x)` retorna um valor em
/// `[0, 1]` para qualquer `x`, inclusive fora do suporte (onde vale 0).
/// Pertence exclusivamente à sua [`LinguisticVariable`](super::LinguisticVariable)
/// e é imutável após a construção do motor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MembershipFunction {
    /// Triângulo `a ≤ b ≤ c` com pico em `b`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Trapézio `a ≤ b ≤ c ≤ d` com platô em `[b, c]`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// Cria uma função triangular com pico em `b`.
    ///
    /// A ordenação `a ≤ b ≤ c` é verificada apenas quando o termo é
    /// registrado em uma variável — ver
    /// [`LinguisticVariable::term`](super::LinguisticVariable::term).
    pub fn triangular(a: f64, b: f64, c: f64) -> Self {
        Self::Triangular { a, b, c }
    }

    /// Cria uma função trapezoidal com platô em `[b, c]`.
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::Trapezoidal { a, b, c, d }
    }

    /// Grau de pertinência de `x`, sempre em `[0, 1]`.
    ///
    /// - 0.0 fora do suporte `[a, c]` (triangular) ou `[a, d]` (trapezoidal)
    /// - 1.0 no pico / platô
    /// - rampas lineares nos trechos intermediários
    ///
    /// Rampas degeneradas (largura zero) contam como degrau: um triângulo
    /// `[1, 1, 2]` vale 1.0 exatamente em `x = 1`.
    pub fn degree(&self, x: f64) -> f64 {
        match *self {
            Self::Triangular { a, b, c } => ramp_up(x, a, b).min(ramp_down(x, b, c)),
            Self::Trapezoidal { a, b, c, d } => ramp_up(x, a, b).min(ramp_down(x, c, d)),
        }
    }

    /// Pontos de quebra na ordem declarada (`[a, b, c]` ou `[a, b, c, d]`).
    ///
    /// Usado pela variável para validar ordenação e limites do universo.
    pub fn breakpoints(&self) -> Vec<f64> {
        match *self {
            Self::Triangular { a, b, c } => vec![a, b, c],
            Self::Trapezoidal { a, b, c, d } => vec![a, b, c, d],
        }
    }

    /// Retorna `true` se os pontos de quebra estão em ordem não decrescente.
    pub fn is_ordered(&self) -> bool {
        self.breakpoints().windows(2).all(|w| w[0] <= w[1])
    }

    /// Suporte `[inicio, fim]` — fora dele a pertinência é 0.
    pub fn support(&self) -> (f64, f64) {
        match *self {
            Self::Triangular { a, c, .. } => (a, c),
            Self::Trapezoidal { a, d, .. } => (a, d),
        }
    }
}

/// Rampa de subida: 0 antes de `a`, 1 a partir de `b`, linear no meio.
///
/// Com `a == b` a rampa vira um degrau em `a` — o ramo `x >= b` cobre o
/// caso antes de qualquer divisão.
fn ramp_up(x: f64, a: f64, b: f64) -> f64 {
    if x < a {
        0.0
    } else if x >= b {
        1.0
    } else {
        // Aqui a < x < b, logo b - a > 0 — divisão segura
        (x - a) / (b - a)
    }
}

/// Rampa de descida: 1 até `c`, 0 depois de `d`, linear no meio.
fn ramp_down(x: f64, c: f64, d: f64) -> f64 {
    if x <= c {
        1.0
    } else if x > d {
        0.0
    } else {
        // Aqui c < x <= d, logo d - c > 0 — divisão segura
        (d - x) / (d - c)
    }
}
