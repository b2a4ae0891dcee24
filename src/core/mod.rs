//! # Módulo Core — Tipos Fundamentais do Domínio Fuzzy
//!
//! Este módulo agrupa os **tipos fundamentais** sobre os quais o motor de
//! inferência é construído. Tudo no sistema gira em torno destes tipos:
//!
//! - [`MembershipFunction`] — grau de pertinência (triangular/trapezoidal)
//! - [`Universe`] — universo de discurso amostrado de uma variável
//! - [`LinguisticVariable`] — domínio nomeado particionado em termos
//! - [`Antecedent`] — árvore de expressão E/OU/NÃO sobre termos
//! - [`Rule`] — antecedente + consequentes + peso
//! - [`Fuzzified`] — graus de verdade efêmeros de uma chamada
//! - [`AndMethod`] — operador E configurável do motor (min/produto)
//!
//! ## Ciclo de Vida
//!
//! Universos, variáveis e regras são construídos **uma vez** na montagem do
//! motor e ficam imutáveis pela vida dele. [`Fuzzified`] é criado e
//! descartado dentro de cada chamada de inferência — nenhum estado cruza
//! chamadas, então chamadas concorrentes sobre o mesmo motor são seguras.

/// Sub-módulo com a implementação de [`MembershipFunction`].
pub mod membership;

/// Sub-módulo com [`Universe`] e [`LinguisticVariable`].
pub mod variable;

/// Sub-módulo com [`Antecedent`], [`Rule`] e a álgebra de avaliação.
pub mod rule;

// Re-exports para conveniência — permite usar `crate::core::Rule` diretamente.
pub use membership::MembershipFunction;
pub use rule::{AndMethod, Antecedent, Consequent, Fuzzified, Rule};
pub use variable::{LinguisticVariable, Universe};
