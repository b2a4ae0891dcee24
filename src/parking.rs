//! # Parking — O Sistema de Orientação de Estacionamento
//!
//! Este módulo monta o motor fuzzy concreto do domínio: cinco entradas,
//! duas saídas e a base completa de 36 regras, e traduz os valores crisp
//! de saída em rótulos legíveis.
//!
//! ## Variáveis
//!
//! | Variável | Papel | Universo | Termos |
//! |----------|-------|----------|--------|
//! | `traffic_density` | entrada | 0–100 % | Low, Medium, High |
//! | `time_of_day` | entrada | 0–24 h | EarlyMorning..Night |
//! | `weather_condition` | entrada | 0–10 | Clear, LightRain, HeavyRain, Snow |
//! | `vacancy_rate` | entrada | 0–100 % | VeryLow..VeryHigh |
//! | `user_type` | entrada | 1–5 | Regular, Member, VIP, Disabled, Staff |
//! | `recommended_area` | saída | 1–5 | AreaA..AreaE |
//! | `waiting_time` | saída | 0–30 min | VeryShort..VeryLong |
//!
//! ## Política de regras
//!
//! A base mistura regras que decidem só a área, só o tempo de espera, e
//! regras de segurança (neve/chuva forte + usuário com deficiência força
//! Area A). Não existe prioridade entre regras sobrepostas além da
//! agregação por máximo do Mamdani — de propósito.
//!
//! Os rótulos de saída ("Area A", "Very Short"...) são **política de
//! apresentação** sobre faixas fixas do valor crisp, não lógica do motor.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::{Antecedent, LinguisticVariable, MembershipFunction, Rule, Universe};
use crate::error::{ConfigError, InferError};
use crate::inference::{Engine, EngineBuilder};

/// Nomes estáveis das variáveis — as regras referenciam por nome e o
/// builder resolve contra o registro do motor.
pub const TRAFFIC_DENSITY: &str = "traffic_density";
pub const TIME_OF_DAY: &str = "time_of_day";
pub const WEATHER_CONDITION: &str = "weather_condition";
pub const VACANCY_RATE: &str = "vacancy_rate";
pub const USER_TYPE: &str = "user_type";
pub const RECOMMENDED_AREA: &str = "recommended_area";
pub const WAITING_TIME: &str = "waiting_time";

/// As cinco entradas crisp de uma consulta.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ParkingInputs {
    /// Densidade de tráfego, 0–100 %.
    pub traffic_density: f64,
    /// Hora do dia, 0–24.
    pub time_of_day: f64,
    /// Severidade do clima, 0–10 (0 = céu limpo, 10 = neve).
    pub weather_condition: f64,
    /// Taxa de vagas livres, 0–100 %.
    pub vacancy_rate: f64,
    /// Classe do usuário, 1–5 (ver [`user_type_text`]).
    pub user_type: f64,
}

/// Resultado de uma consulta: valores crisp + rótulos de apresentação.
#[derive(Clone, Debug, Serialize)]
pub struct Recommendation {
    /// Centroide da área recomendada (1.0–5.0).
    pub recommended_area_value: f64,
    /// Rótulo da área pela tabela de faixas.
    pub recommended_area_text: &'static str,
    /// Centroide do tempo de espera em minutos (0.0–30.0).
    pub waiting_time_value: f64,
    /// Rótulo do tempo de espera pela tabela de faixas.
    pub waiting_time_text: &'static str,
}

/// Sistema de orientação de estacionamento — um [`Engine`] montado uma vez
/// com as variáveis e regras do domínio, imutável dali em diante.
///
/// `recommend` é `&self` puro: consultas concorrentes sobre um sistema
/// compartilhado não precisam de sincronização.
pub struct ParkingGuidanceSystem {
    engine: Engine,
}

impl ParkingGuidanceSystem {
    /// Monta o sistema completo: variáveis, funções de pertinência e as
    /// 36 regras. Qualquer inconsistência é [`ConfigError`] fatal aqui.
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = EngineBuilder::new()
            .input(traffic_density()?)?
            .input(time_of_day()?)?
            .input(weather_condition()?)?
            .input(vacancy_rate()?)?
            .input(user_type()?)?
            .output(recommended_area()?)?
            .output(waiting_time()?)?;

        for rule in rules() {
            builder = builder.rule(rule);
        }

        let engine = builder.build()?;
        tracing::info!(rules = engine.rules().len(), "sistema de estacionamento pronto");
        Ok(Self { engine })
    }

    /// Acesso somente leitura ao motor (curvas, introspecção).
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Executa uma consulta completa.
    ///
    /// # Erros
    ///
    /// [`InferError`] estruturado: entrada fora do universo documentado
    /// ou agregado vazio em alguma das saídas.
    pub fn recommend(&self, inputs: &ParkingInputs) -> Result<Recommendation, InferError> {
        let crisp_inputs = HashMap::from([
            (TRAFFIC_DENSITY.to_string(), inputs.traffic_density),
            (TIME_OF_DAY.to_string(), inputs.time_of_day),
            (WEATHER_CONDITION.to_string(), inputs.weather_condition),
            (VACANCY_RATE.to_string(), inputs.vacancy_rate),
            (USER_TYPE.to_string(), inputs.user_type),
        ]);

        let mut outputs = self.engine.infer(&crisp_inputs)?;
        let area = take_output(&mut outputs, RECOMMENDED_AREA)?;
        let waiting = take_output(&mut outputs, WAITING_TIME)?;

        tracing::debug!(area, waiting, "recomendação calculada");

        Ok(Recommendation {
            recommended_area_value: area,
            recommended_area_text: area_text(area),
            waiting_time_value: waiting,
            waiting_time_text: waiting_time_text(waiting),
        })
    }
}

fn take_output(outputs: &mut crate::inference::OutputMap, name: &str) -> Result<f64, InferError> {
    outputs
        .remove(name)
        .unwrap_or(Err(InferError::EmptyAggregate {
            variable: name.to_string(),
        }))
}

/// Rótulo da área pela tabela de faixas fixas do valor crisp.
pub fn area_text(value: f64) -> &'static str {
    if value < 1.5 {
        "Area A (Closest to entrance)"
    } else if value < 2.5 {
        "Area B"
    } else if value < 3.5 {
        "Area C"
    } else if value < 4.5 {
        "Area D"
    } else {
        "Area E (Farthest from entrance)"
    }
}

/// Rótulo do tempo de espera (minutos) pela tabela de faixas fixas.
pub fn waiting_time_text(minutes: f64) -> &'static str {
    if minutes < 3.0 {
        "Very Short (< 3 minutes)"
    } else if minutes < 9.0 {
        "Short (3-9 minutes)"
    } else if minutes < 15.0 {
        "Medium (9-15 minutes)"
    } else if minutes < 23.0 {
        "Long (15-23 minutes)"
    } else {
        "Very Long (> 23 minutes)"
    }
}

/// Descrição da classe de usuário (1–5).
pub fn user_type_text(value: f64) -> &'static str {
    match value.round() as i64 {
        1 => "Regular",
        2 => "Member",
        3 => "VIP",
        4 => "Disabled",
        5 => "Staff",
        _ => "?",
    }
}

/// Descrição da severidade do clima (0–10).
pub fn weather_text(value: f64) -> &'static str {
    match value.round() as i64 {
        0..=2 => "Clear",
        3..=5 => "Light Rain",
        6..=8 => "Heavy Rain",
        9..=10 => "Snow",
        _ => "?",
    }
}

// ── Definição das variáveis ─────────────────────────────────────────────
// Mesmos universos e pontos de quebra da formulação original do sistema
// (grades inteiras de passo 1, trimf/trapmf).

fn traffic_density() -> Result<LinguisticVariable, ConfigError> {
    LinguisticVariable::new(TRAFFIC_DENSITY, Universe::arange(0.0, 100.0, 1.0)?)
        .term("Low", MembershipFunction::trapezoidal(0.0, 0.0, 20.0, 40.0))?
        .term("Medium", MembershipFunction::triangular(30.0, 50.0, 70.0))?
        .term("High", MembershipFunction::trapezoidal(60.0, 80.0, 100.0, 100.0))
}

fn time_of_day() -> Result<LinguisticVariable, ConfigError> {
    LinguisticVariable::new(TIME_OF_DAY, Universe::arange(0.0, 24.0, 1.0)?)
        .term("EarlyMorning", MembershipFunction::trapezoidal(0.0, 0.0, 6.0, 8.0))?
        .term("Morning", MembershipFunction::triangular(7.0, 9.0, 11.0))?
        .term("Noon", MembershipFunction::triangular(10.0, 12.0, 14.0))?
        .term("Afternoon", MembershipFunction::triangular(13.0, 15.0, 18.0))?
        .term("Evening", MembershipFunction::triangular(17.0, 19.0, 22.0))?
        .term("Night", MembershipFunction::trapezoidal(21.0, 23.0, 24.0, 24.0))
}

fn weather_condition() -> Result<LinguisticVariable, ConfigError> {
    LinguisticVariable::new(WEATHER_CONDITION, Universe::arange(0.0, 10.0, 1.0)?)
        .term("Clear", MembershipFunction::trapezoidal(0.0, 0.0, 2.0, 3.0))?
        .term("LightRain", MembershipFunction::triangular(2.0, 4.0, 6.0))?
        .term("HeavyRain", MembershipFunction::triangular(5.0, 7.0, 9.0))?
        .term("Snow", MembershipFunction::trapezoidal(8.0, 9.0, 10.0, 10.0))
}

fn vacancy_rate() -> Result<LinguisticVariable, ConfigError> {
    LinguisticVariable::new(VACANCY_RATE, Universe::arange(0.0, 100.0, 1.0)?)
        .term("VeryLow", MembershipFunction::trapezoidal(0.0, 0.0, 10.0, 20.0))?
        .term("Low", MembershipFunction::triangular(15.0, 25.0, 35.0))?
        .term("Medium", MembershipFunction::triangular(30.0, 50.0, 70.0))?
        .term("High", MembershipFunction::triangular(60.0, 75.0, 90.0))?
        .term("VeryHigh", MembershipFunction::trapezoidal(85.0, 95.0, 100.0, 100.0))
}

fn user_type() -> Result<LinguisticVariable, ConfigError> {
    LinguisticVariable::new(USER_TYPE, Universe::arange(1.0, 5.0, 1.0)?)
        .term("Regular", MembershipFunction::triangular(1.0, 1.0, 2.0))?
        .term("Member", MembershipFunction::triangular(1.0, 2.0, 3.0))?
        .term("VIP", MembershipFunction::triangular(2.0, 3.0, 4.0))?
        .term("Disabled", MembershipFunction::triangular(3.0, 4.0, 5.0))?
        .term("Staff", MembershipFunction::triangular(4.0, 5.0, 5.0))
}

fn recommended_area() -> Result<LinguisticVariable, ConfigError> {
    LinguisticVariable::new(RECOMMENDED_AREA, Universe::arange(1.0, 5.0, 1.0)?)
        .term("AreaA", MembershipFunction::triangular(1.0, 1.0, 2.0))?
        .term("AreaB", MembershipFunction::triangular(1.0, 2.0, 3.0))?
        .term("AreaC", MembershipFunction::triangular(2.0, 3.0, 4.0))?
        .term("AreaD", MembershipFunction::triangular(3.0, 4.0, 5.0))?
        .term("AreaE", MembershipFunction::triangular(4.0, 5.0, 5.0))
}

fn waiting_time() -> Result<LinguisticVariable, ConfigError> {
    LinguisticVariable::new(WAITING_TIME, Universe::arange(0.0, 30.0, 1.0)?)
        .term("VeryShort", MembershipFunction::trapezoidal(0.0, 0.0, 2.0, 5.0))?
        .term("Short", MembershipFunction::triangular(3.0, 7.0, 11.0))?
        .term("Medium", MembershipFunction::triangular(9.0, 13.0, 17.0))?
        .term("Long", MembershipFunction::triangular(15.0, 20.0, 25.0))?
        .term("VeryLong", MembershipFunction::trapezoidal(23.0, 28.0, 30.0, 30.0))
}

// ── Base de regras ──────────────────────────────────────────────────────

fn vacancy(term: &str) -> Antecedent {
    Antecedent::term(VACANCY_RATE, term)
}

fn user(term: &str) -> Antecedent {
    Antecedent::term(USER_TYPE, term)
}

fn traffic(term: &str) -> Antecedent {
    Antecedent::term(TRAFFIC_DENSITY, term)
}

fn time(term: &str) -> Antecedent {
    Antecedent::term(TIME_OF_DAY, term)
}

fn weather(term: &str) -> Antecedent {
    Antecedent::term(WEATHER_CONDITION, term)
}

/// A base completa de regras do domínio, na ordem da formulação original.
/// A ordem é irrelevante para o resultado (agregação por máximo) — só
/// facilita conferir contra a lista de referência.
fn rules() -> Vec<Rule> {
    vec![
        // Regras de área recomendada
        Rule::new(vacancy("VeryHigh")).then(RECOMMENDED_AREA, "AreaA"),
        Rule::new(vacancy("High").and(user("Regular"))).then(RECOMMENDED_AREA, "AreaB"),
        Rule::new(vacancy("High").and(user("Regular").not())).then(RECOMMENDED_AREA, "AreaA"),
        Rule::new(vacancy("Medium").and(user("Regular"))).then(RECOMMENDED_AREA, "AreaC"),
        Rule::new(vacancy("Medium").and(user("Member"))).then(RECOMMENDED_AREA, "AreaB"),
        Rule::new(vacancy("Medium").and(user("VIP").or(user("Disabled")).or(user("Staff"))))
            .then(RECOMMENDED_AREA, "AreaA"),
        Rule::new(vacancy("Low").and(user("Regular"))).then(RECOMMENDED_AREA, "AreaD"),
        Rule::new(vacancy("Low").and(user("Member"))).then(RECOMMENDED_AREA, "AreaC"),
        Rule::new(vacancy("Low").and(user("VIP"))).then(RECOMMENDED_AREA, "AreaB"),
        Rule::new(vacancy("Low").and(user("Disabled").or(user("Staff"))))
            .then(RECOMMENDED_AREA, "AreaA"),
        Rule::new(vacancy("VeryLow").and(user("Regular").or(user("Member"))))
            .then(RECOMMENDED_AREA, "AreaE"),
        Rule::new(vacancy("VeryLow").and(user("VIP"))).then(RECOMMENDED_AREA, "AreaD"),
        Rule::new(vacancy("VeryLow").and(user("Disabled").or(user("Staff"))))
            .then(RECOMMENDED_AREA, "AreaC"),
        // Segurança: clima severo + usuário com deficiência força Area A
        Rule::new(weather("Snow").and(user("Disabled"))).then(RECOMMENDED_AREA, "AreaA"),
        Rule::new(weather("HeavyRain").and(user("Disabled"))).then(RECOMMENDED_AREA, "AreaA"),
        // Regras de tempo de espera
        Rule::new(traffic("Low").and(vacancy("VeryHigh"))).then(WAITING_TIME, "VeryShort"),
        Rule::new(traffic("Low").and(vacancy("High"))).then(WAITING_TIME, "VeryShort"),
        Rule::new(traffic("Low").and(vacancy("Medium"))).then(WAITING_TIME, "Short"),
        Rule::new(traffic("Low").and(vacancy("Low"))).then(WAITING_TIME, "Medium"),
        Rule::new(traffic("Low").and(vacancy("VeryLow"))).then(WAITING_TIME, "Long"),
        Rule::new(traffic("Medium").and(vacancy("VeryHigh"))).then(WAITING_TIME, "Short"),
        Rule::new(traffic("Medium").and(vacancy("High"))).then(WAITING_TIME, "Short"),
        Rule::new(traffic("Medium").and(vacancy("Medium"))).then(WAITING_TIME, "Medium"),
        Rule::new(traffic("Medium").and(vacancy("Low"))).then(WAITING_TIME, "Long"),
        Rule::new(traffic("Medium").and(vacancy("VeryLow"))).then(WAITING_TIME, "VeryLong"),
        Rule::new(traffic("High").and(vacancy("VeryHigh"))).then(WAITING_TIME, "Medium"),
        Rule::new(traffic("High").and(vacancy("High"))).then(WAITING_TIME, "Medium"),
        Rule::new(traffic("High").and(vacancy("Medium"))).then(WAITING_TIME, "Long"),
        Rule::new(traffic("High").and(vacancy("Low"))).then(WAITING_TIME, "VeryLong"),
        Rule::new(traffic("High").and(vacancy("VeryLow"))).then(WAITING_TIME, "VeryLong"),
        Rule::new(time("Morning").or(time("Afternoon")).and(traffic("High")))
            .then(WAITING_TIME, "VeryLong"),
        Rule::new(weather("HeavyRain").or(weather("Snow"))).then(WAITING_TIME, "Long"),
        Rule::new(time("Night").and(vacancy("VeryLow").not())).then(WAITING_TIME, "VeryShort"),
        // Regras baseadas no horário
        Rule::new(time("Morning").and(vacancy("High").or(vacancy("VeryHigh"))))
            .then(RECOMMENDED_AREA, "AreaA"),
        Rule::new(time("Evening").and(traffic("High"))).then(WAITING_TIME, "VeryLong"),
        Rule::new(time("Night")).then(RECOMMENDED_AREA, "AreaA"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sistema() -> ParkingGuidanceSystem {
        ParkingGuidanceSystem::new().unwrap()
    }

    /// Cenário ideal: muitas vagas, pouco tráfego, meio-dia, céu limpo.
    /// Esperado: Area A e espera Very Short.
    #[test]
    fn test_ideal_conditions() {
        let rec = sistema()
            .recommend(&ParkingInputs {
                traffic_density: 10.0,
                time_of_day: 12.0,
                weather_condition: 0.0,
                vacancy_rate: 95.0,
                user_type: 1.0,
            })
            .unwrap();
        assert!(rec.recommended_area_value < 1.5, "{}", rec.recommended_area_value);
        assert!(rec.recommended_area_text.starts_with("Area A"));
        assert!(rec.waiting_time_value < 3.0, "{}", rec.waiting_time_value);
        assert!(rec.waiting_time_text.starts_with("Very Short"));
    }

    /// Pico da manhã com tráfego alto e quase nenhuma vaga:
    /// espera Very Long.
    #[test]
    fn test_morning_rush_long_wait() {
        let rec = sistema()
            .recommend(&ParkingInputs {
                traffic_density: 90.0,
                time_of_day: 8.0,
                weather_condition: 0.0,
                vacancy_rate: 5.0,
                user_type: 1.0,
            })
            .unwrap();
        assert!(rec.waiting_time_value >= 23.0, "{}", rec.waiting_time_value);
        assert!(rec.waiting_time_text.starts_with("Very Long"));
    }

    /// Neve + usuário com deficiência: a regra de segurança domina e a
    /// área recomendada é A, independente da taxa de vagas mediana.
    #[test]
    fn test_disabled_user_snow_override() {
        let rec = sistema()
            .recommend(&ParkingInputs {
                traffic_density: 50.0,
                time_of_day: 12.0,
                weather_condition: 9.0,
                vacancy_rate: 50.0,
                user_type: 4.0,
            })
            .unwrap();
        assert!(rec.recommended_area_text.starts_with("Area A"));
    }

    /// Bordas exatas dos universos fuzzificam e inferem sem erro.
    #[test]
    fn test_domain_edges_are_valid() {
        let rec = sistema()
            .recommend(&ParkingInputs {
                traffic_density: 0.0,
                time_of_day: 24.0,
                weather_condition: 0.0,
                vacancy_rate: 0.0,
                user_type: 1.0,
            })
            .unwrap();
        // Night → AreaA e VeryLow+Regular → AreaE disparam juntas com grau 1;
        // o máximo agrega as duas e o centroide cai no meio do universo
        assert!((1.0..=5.0).contains(&rec.recommended_area_value));
        assert!((0.0..=30.0).contains(&rec.waiting_time_value));
        // Com tráfego zero e nenhuma vaga, a espera é longa
        assert!(rec.waiting_time_text.starts_with("Long"));
    }

    /// Fora do universo documentado: erro estruturado, nada de clamp.
    #[test]
    fn test_out_of_range_vacancy() {
        let err = sistema()
            .recommend(&ParkingInputs {
                traffic_density: 10.0,
                time_of_day: 12.0,
                weather_condition: 0.0,
                vacancy_rate: 150.0,
                user_type: 1.0,
            })
            .unwrap_err();
        match err {
            InferError::OutOfRange { variable, value, .. } => {
                assert_eq!(variable, VACANCY_RATE);
                assert_eq!(value, 150.0);
            }
            other => panic!("esperava OutOfRange, veio {other:?}"),
        }
    }

    /// As tabelas de faixas dos rótulos, nos limiares documentados.
    #[test]
    fn test_label_thresholds() {
        assert!(area_text(1.49).starts_with("Area A"));
        assert_eq!(area_text(1.5), "Area B");
        assert_eq!(area_text(3.0), "Area C");
        assert_eq!(area_text(4.2), "Area D");
        assert!(area_text(4.5).starts_with("Area E"));

        assert!(waiting_time_text(2.9).starts_with("Very Short"));
        assert!(waiting_time_text(3.0).starts_with("Short"));
        assert!(waiting_time_text(14.9).starts_with("Medium"));
        assert!(waiting_time_text(22.0).starts_with("Long"));
        assert!(waiting_time_text(23.0).starts_with("Very Long"));
    }

    /// As tabelas de descrição de usuário e clima.
    #[test]
    fn test_mapping_tables() {
        assert_eq!(user_type_text(1.0), "Regular");
        assert_eq!(user_type_text(4.0), "Disabled");
        assert_eq!(user_type_text(5.0), "Staff");
        assert_eq!(weather_text(0.0), "Clear");
        assert_eq!(weather_text(4.0), "Light Rain");
        assert_eq!(weather_text(7.0), "Heavy Rain");
        assert_eq!(weather_text(9.0), "Snow");
    }

    /// Colaborador de visualização: as curvas amostradas estão disponíveis
    /// para toda variável sem reimplementar a matemática.
    #[test]
    fn test_curves_are_exposed() {
        let sys = sistema();
        let var = sys.engine().variable(VACANCY_RATE).unwrap();
        assert_eq!(
            var.terms(),
            vec!["High", "Low", "Medium", "VeryHigh", "VeryLow"]
        );
        let curva = var.curve("VeryHigh").unwrap();
        assert_eq!(curva.len(), 101);
        assert_eq!(curva[95], (95.0, 1.0));
        assert_eq!(curva[0], (0.0, 0.0));
    }
}
