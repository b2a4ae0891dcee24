//! # Engine — Orquestração da Inferência Mamdani
//!
//! O [`Engine`] é o coração do sistema: recebe os valores crisp de entrada e
//! devolve os valores crisp de saída, passando por fuzzificação, avaliação
//! de regras, agregação e defuzzificação.
//!
//! ## Fluxo de uma chamada `infer`
//!
//! ```text
//! entradas crisp
//!   ├── 1. Valida nomes e universos (InferError no nível da chamada)
//!   ├── 2. Fuzzifica cada entrada (variável → termo → grau)
//!   ├── 3. Avalia a força de disparo de cada regra (par_iter — independentes)
//!   ├── 4. Recorta cada consequente na força da regra (implicação min)
//!   ├── 5. Agrega por variável de saída (máximo ponto a ponto)
//!   └── 6. Centroide por saída (agregado vazio → erro por saída)
//! ```
//!
//! ## Construção vs. Chamada
//!
//! O [`EngineBuilder`] resolve todas as referências de regras contra o
//! registro de variáveis e falha com [`ConfigError`] antes que o motor
//! exista — um motor nunca fica utilizável pela metade. Depois do `build()`
//! o motor é **imutável**: configuração compartilhada, somente leitura,
//! segura para chamadas `infer` concorrentes sem nenhum lock. Todo estado
//! de uma chamada ([`Fuzzified`], contribuições recortadas, conjuntos
//! agregados) vive e morre dentro dela.
//!
//! ## Ordem das regras
//!
//! A agregação por máximo é comutativa e associativa — permutar a ordem de
//! avaliação das regras produz exatamente o mesmo conjunto combinado e o
//! mesmo valor crisp. É isso que torna o `par_iter` sobre as regras trivial.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::core::{AndMethod, Fuzzified, LinguisticVariable, Rule};
use crate::error::{ConfigError, InferError};

use super::defuzz::centroid;

/// Resultado de uma chamada de inferência: valor crisp (ou agregado vazio)
/// por variável de saída.
pub type OutputMap = HashMap<String, Result<f64, InferError>>;

/// Construtor do motor — acumula variáveis e regras e valida tudo no `build`.
#[derive(Default)]
pub struct EngineBuilder {
    inputs: HashMap<String, LinguisticVariable>,
    outputs: HashMap<String, LinguisticVariable>,
    rules: Vec<Rule>,
    and_method: AndMethod,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra uma variável de entrada (antecedente).
    ///
    /// # Erros
    ///
    /// [`ConfigError::DuplicateVariable`] se o nome já existir — entradas e
    /// saídas compartilham o mesmo espaço de nomes.
    pub fn input(mut self, variable: LinguisticVariable) -> Result<Self, ConfigError> {
        let name = variable.name().to_string();
        if self.inputs.contains_key(&name) || self.outputs.contains_key(&name) {
            return Err(ConfigError::DuplicateVariable { variable: name });
        }
        self.inputs.insert(name, variable);
        Ok(self)
    }

    /// Registra uma variável de saída (consequente).
    pub fn output(mut self, variable: LinguisticVariable) -> Result<Self, ConfigError> {
        let name = variable.name().to_string();
        if self.inputs.contains_key(&name) || self.outputs.contains_key(&name) {
            return Err(ConfigError::DuplicateVariable { variable: name });
        }
        self.outputs.insert(name, variable);
        Ok(self)
    }

    /// Acrescenta uma regra. A validação das referências fica para o `build`.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Define o operador E do motor inteiro (padrão: min).
    pub fn and_method(mut self, method: AndMethod) -> Self {
        self.and_method = method;
        self
    }

    /// Valida o conjunto completo e congela o motor.
    ///
    /// Resolve cada referência (variável, termo) das regras contra o
    /// registro: antecedentes contra as entradas, consequentes contra as
    /// saídas. Qualquer referência pendurada é fatal — o motor não nasce.
    ///
    /// # Erros
    ///
    /// - [`ConfigError::UnknownVariable`] / [`ConfigError::UnknownTerm`]
    /// - [`ConfigError::RuleWithoutConsequent`]
    /// - [`ConfigError::InvalidWeight`] (peso fora de [0, 1])
    pub fn build(self) -> Result<Engine, ConfigError> {
        for (index, rule) in self.rules.iter().enumerate() {
            // Antecedente: toda folha precisa existir entre as entradas
            for (variable, term) in rule.antecedent().referenced_terms() {
                let var = self.inputs.get(variable).ok_or_else(|| {
                    ConfigError::UnknownVariable {
                        rule: index,
                        variable: variable.to_string(),
                    }
                })?;
                if var.membership(term).is_none() {
                    return Err(ConfigError::UnknownTerm {
                        rule: index,
                        variable: variable.to_string(),
                        term: term.to_string(),
                    });
                }
            }
            // Consequentes: precisam existir entre as saídas
            if rule.consequents().is_empty() {
                return Err(ConfigError::RuleWithoutConsequent { rule: index });
            }
            for consequent in rule.consequents() {
                let var = self.outputs.get(&consequent.variable).ok_or_else(|| {
                    ConfigError::UnknownVariable {
                        rule: index,
                        variable: consequent.variable.clone(),
                    }
                })?;
                if var.membership(&consequent.term).is_none() {
                    return Err(ConfigError::UnknownTerm {
                        rule: index,
                        variable: consequent.variable.clone(),
                        term: consequent.term.clone(),
                    });
                }
            }
            if !(0.0..=1.0).contains(&rule.weight()) {
                return Err(ConfigError::InvalidWeight {
                    rule: index,
                    weight: rule.weight(),
                });
            }
        }

        tracing::debug!(
            inputs = self.inputs.len(),
            outputs = self.outputs.len(),
            rules = self.rules.len(),
            "motor fuzzy construído"
        );

        Ok(Engine {
            inputs: self.inputs,
            outputs: self.outputs,
            rules: self.rules,
            and_method: self.and_method,
        })
    }
}

/// Motor de inferência Mamdani — imutável após o build.
///
/// Configuração compartilhada de processo: variáveis, regras e operador E.
/// `infer` é `&self` e não toca estado compartilhado mutável — chamadas
/// concorrentes em threads separadas não precisam de sincronização.
#[derive(Debug)]
pub struct Engine {
    inputs: HashMap<String, LinguisticVariable>,
    outputs: HashMap<String, LinguisticVariable>,
    rules: Vec<Rule>,
    and_method: AndMethod,
}

impl Engine {
    /// Executa uma inferência completa.
    ///
    /// O `Err` externo cobre a chamada inteira (entrada desconhecida,
    /// ausente ou fora do universo). O `Ok` carrega, por variável de saída,
    /// o valor crisp ou [`InferError::EmptyAggregate`] quando nenhuma regra
    /// disparou para ela.
    pub fn infer(&self, inputs: &HashMap<String, f64>) -> Result<OutputMap, InferError> {
        // 1. Entradas desconhecidas são erro do chamador, não silêncio
        for name in inputs.keys() {
            if !self.inputs.contains_key(name) {
                return Err(InferError::UnknownInput {
                    variable: name.clone(),
                });
            }
        }

        // 2. Fuzzifica todas as variáveis declaradas — cada uma valida o
        //    próprio universo
        let mut fuzzified = Fuzzified::default();
        for (name, variable) in &self.inputs {
            let value = *inputs.get(name).ok_or_else(|| InferError::MissingInput {
                variable: name.clone(),
            })?;
            fuzzified.insert(name.as_str(), variable.fuzzify(value)?);
        }

        // 3. Força de disparo de cada regra — mapa paralelo, as regras são
        //    independentes entre si e a ordem não afeta o resultado
        let strengths: Vec<f64> = self
            .rules
            .par_iter()
            .map(|rule| rule.firing_strength(&fuzzified, self.and_method))
            .collect();

        tracing::debug!(
            fired = strengths.iter().filter(|s| **s > 0.0).count(),
            total = self.rules.len(),
            "regras avaliadas"
        );

        // 4/5. Por saída: recorta cada consequente na força da regra
        //      (implicação min) e agrega por máximo ponto a ponto
        let mut outputs = HashMap::with_capacity(self.outputs.len());
        for (name, variable) in &self.outputs {
            let xs = variable.universe().samples();
            let mut combined = vec![0.0_f64; xs.len()];

            for (rule, &strength) in self.rules.iter().zip(&strengths) {
                // Regra que não disparou não contribui — pular é só atalho,
                // o máximo com zero seria idêntico
                if strength <= 0.0 {
                    continue;
                }
                for consequent in rule.consequents() {
                    if consequent.variable != *name {
                        continue;
                    }
                    // Validado no build; um termo sumido aqui seria um bug
                    let Some(mf) = variable.membership(&consequent.term) else {
                        continue;
                    };
                    for (acc, &x) in combined.iter_mut().zip(xs) {
                        let clipped = mf.degree(x).min(strength);
                        if clipped > *acc {
                            *acc = clipped;
                        }
                    }
                }
            }

            // 6. Centroide — agregado vazio é erro por saída, não da chamada
            let crisp = centroid(xs, &combined).ok_or_else(|| InferError::EmptyAggregate {
                variable: name.clone(),
            });
            if let Ok(value) = &crisp {
                tracing::trace!(output = %name, value, "saída defuzzificada");
            }
            outputs.insert(name.clone(), crisp);
        }

        Ok(outputs)
    }

    /// Acessor somente leitura de uma variável (entrada ou saída) —
    /// suficiente para colaboradores de visualização amostrarem as curvas.
    pub fn variable(&self, name: &str) -> Option<&LinguisticVariable> {
        self.inputs.get(name).or_else(|| self.outputs.get(name))
    }

    /// Nomes de todas as variáveis (entradas e saídas), ordenados.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .inputs
            .keys()
            .chain(self.outputs.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Nomes das variáveis de entrada, ordenados.
    pub fn input_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.inputs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Nomes das variáveis de saída, ordenados.
    pub fn output_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.outputs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Conjunto de regras congelado do motor.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Antecedent, MembershipFunction, Universe};

    /// Motor mínimo: uma entrada (temp), duas saídas (fan, heater),
    /// regras só para fan — heater fica sem contribuição de propósito.
    fn motor_minimo(rules: Vec<Rule>) -> Engine {
        let temp = LinguisticVariable::new("temp", Universe::arange(0.0, 40.0, 1.0).unwrap())
            .term("Cold", MembershipFunction::trapezoidal(0.0, 0.0, 10.0, 20.0))
            .unwrap()
            .term("Hot", MembershipFunction::trapezoidal(20.0, 30.0, 40.0, 40.0))
            .unwrap();
        let fan = LinguisticVariable::new("fan", Universe::arange(0.0, 10.0, 1.0).unwrap())
            .term("Slow", MembershipFunction::triangular(0.0, 2.0, 4.0))
            .unwrap()
            .term("Fast", MembershipFunction::triangular(6.0, 8.0, 10.0))
            .unwrap();
        let heater = LinguisticVariable::new("heater", Universe::arange(0.0, 10.0, 1.0).unwrap())
            .term("On", MembershipFunction::triangular(5.0, 7.5, 10.0))
            .unwrap();

        let mut builder = EngineBuilder::new()
            .input(temp)
            .unwrap()
            .output(fan)
            .unwrap()
            .output(heater)
            .unwrap();
        for rule in rules {
            builder = builder.rule(rule);
        }
        builder.build().unwrap()
    }

    fn regras_fan() -> Vec<Rule> {
        vec![
            Rule::new(Antecedent::term("temp", "Hot")).then("fan", "Fast"),
            Rule::new(Antecedent::term("temp", "Cold")).then("fan", "Slow"),
        ]
    }

    /// Permutar a ordem das regras não muda nada — máximo é comutativo
    /// e associativo.
    #[test]
    fn test_rule_order_is_irrelevant() {
        let direto = motor_minimo(regras_fan());
        let mut invertidas = regras_fan();
        invertidas.reverse();
        let invertido = motor_minimo(invertidas);

        let entradas = HashMap::from([("temp".to_string(), 25.0)]);
        let a = direto.infer(&entradas).unwrap();
        let b = invertido.infer(&entradas).unwrap();
        assert_eq!(a["fan"], b["fan"]);
    }

    /// Saída sem nenhuma regra disparada reporta agregado vazio por saída,
    /// sem derrubar a chamada.
    #[test]
    fn test_empty_aggregate_is_per_output() {
        let motor = motor_minimo(regras_fan());
        let saidas = motor
            .infer(&HashMap::from([("temp".to_string(), 35.0)]))
            .unwrap();
        assert!(saidas["fan"].is_ok());
        assert_eq!(
            saidas["heater"],
            Err(InferError::EmptyAggregate {
                variable: "heater".to_string()
            })
        );
    }

    /// Entrada fora do universo falha a chamada inteira.
    #[test]
    fn test_out_of_range_input_fails_call() {
        let motor = motor_minimo(regras_fan());
        let err = motor
            .infer(&HashMap::from([("temp".to_string(), 80.0)]))
            .unwrap_err();
        assert!(matches!(err, InferError::OutOfRange { .. }));
    }

    /// Entrada faltando ou desconhecida também é erro de chamada.
    #[test]
    fn test_missing_and_unknown_inputs() {
        let motor = motor_minimo(regras_fan());
        assert!(matches!(
            motor.infer(&HashMap::new()).unwrap_err(),
            InferError::MissingInput { .. }
        ));
        let err = motor
            .infer(&HashMap::from([
                ("temp".to_string(), 25.0),
                ("umidade".to_string(), 0.5),
            ]))
            .unwrap_err();
        assert_eq!(
            err,
            InferError::UnknownInput {
                variable: "umidade".to_string()
            }
        );
    }

    /// Referências penduradas nas regras morrem no build, não na inferência.
    #[test]
    fn test_dangling_references_fail_build() {
        let temp = LinguisticVariable::new("temp", Universe::arange(0.0, 40.0, 1.0).unwrap())
            .term("Hot", MembershipFunction::trapezoidal(20.0, 30.0, 40.0, 40.0))
            .unwrap();
        let fan = LinguisticVariable::new("fan", Universe::arange(0.0, 10.0, 1.0).unwrap())
            .term("Fast", MembershipFunction::triangular(6.0, 8.0, 10.0))
            .unwrap();

        let termo_fantasma = EngineBuilder::new()
            .input(temp.clone())
            .unwrap()
            .output(fan.clone())
            .unwrap()
            .rule(Rule::new(Antecedent::term("temp", "Gelado")).then("fan", "Fast"))
            .build();
        assert!(matches!(
            termo_fantasma.unwrap_err(),
            ConfigError::UnknownTerm { rule: 0, .. }
        ));

        let variavel_fantasma = EngineBuilder::new()
            .input(temp.clone())
            .unwrap()
            .output(fan.clone())
            .unwrap()
            .rule(Rule::new(Antecedent::term("pressao", "Alta")).then("fan", "Fast"))
            .build();
        assert!(matches!(
            variavel_fantasma.unwrap_err(),
            ConfigError::UnknownVariable { rule: 0, .. }
        ));

        let sem_consequente = EngineBuilder::new()
            .input(temp)
            .unwrap()
            .output(fan)
            .unwrap()
            .rule(Rule::new(Antecedent::term("temp", "Hot")))
            .build();
        assert!(matches!(
            sem_consequente.unwrap_err(),
            ConfigError::RuleWithoutConsequent { rule: 0 }
        ));
    }

    /// Peso fora de [0, 1] é rejeitado no build.
    #[test]
    fn test_invalid_weight_fails_build() {
        let temp = LinguisticVariable::new("temp", Universe::arange(0.0, 40.0, 1.0).unwrap())
            .term("Hot", MembershipFunction::trapezoidal(20.0, 30.0, 40.0, 40.0))
            .unwrap();
        let fan = LinguisticVariable::new("fan", Universe::arange(0.0, 10.0, 1.0).unwrap())
            .term("Fast", MembershipFunction::triangular(6.0, 8.0, 10.0))
            .unwrap();
        let err = EngineBuilder::new()
            .input(temp)
            .unwrap()
            .output(fan)
            .unwrap()
            .rule(
                Rule::new(Antecedent::term("temp", "Hot"))
                    .then("fan", "Fast")
                    .with_weight(1.5),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWeight { rule: 0, .. }));
    }

    /// O motor é configuração imutável — chamadas concorrentes produzem o
    /// mesmo resultado sem nenhum lock.
    #[test]
    fn test_concurrent_inference_is_consistent() {
        use std::sync::Arc;

        let motor = Arc::new(motor_minimo(regras_fan()));
        let entradas = HashMap::from([("temp".to_string(), 25.0)]);
        let base = motor.infer(&entradas).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let motor = Arc::clone(&motor);
                let entradas = entradas.clone();
                std::thread::spawn(move || motor.infer(&entradas).unwrap())
            })
            .collect();
        for handle in handles {
            let saidas = handle.join().unwrap();
            assert_eq!(saidas["fan"], base["fan"]);
        }
    }
}
