#![allow(dead_code)]
#![allow(rustdoc::broken_intra_doc_links, rustdoc::invalid_html_tags)]
//! # Vaga Certa — Fuzzy Parking Guidance
//!
//! **Ponto de entrada principal** do sistema de orientação de estacionamento.
//!
//! O binário monta o motor fuzzy uma única vez e expõe dois comandos:
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging
//!   ├── Constrói o ParkingGuidanceSystem (ConfigError aqui é fatal)
//!   └── Despacha o subcomando
//!       ├── recommend — as 5 entradas crisp → área + tempo de espera
//!       └── curves — despeja as curvas de pertinência em JSON
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Recomendação em texto
//! cargo run -- recommend --traffic 10 --time 12 --weather 0 --vacancy 95 --user 1
//!
//! # Saída em JSON (para integração)
//! cargo run -- recommend --traffic 10 --time 12 --weather 0 --vacancy 95 --user 1 --json
//!
//! # Curvas de pertinência de uma variável (para quem for plotar)
//! cargo run -- curves --variable vacancy_rate
//!
//! # Logs detalhados
//! RUST_LOG=debug cargo run -- recommend ...
//! ```
//!
//! A validação de faixa acontece duas vezes de propósito: o chamador
//! upstream valida contra os intervalos documentados, e o motor revalida
//! cada entrada contra o universo da variável.

// Declaração dos módulos da aplicação.
// Cada módulo corresponde a uma camada da arquitetura:

/// Módulo `core` — tipos fundamentais: MembershipFunction, LinguisticVariable, Rule.
mod core;

/// Módulo `error` — taxonomia estruturada: ConfigError (build) e InferError (chamada).
mod error;

/// Módulo `inference` — motor Mamdani: fuzzificação, regras, agregação, centroide.
mod inference;

/// Módulo `parking` — o domínio concreto: variáveis, 36 regras e rótulos.
mod parking;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::parking::{ParkingGuidanceSystem, ParkingInputs};

/// Sistema fuzzy de orientação de estacionamento.
#[derive(Parser)]
#[command(name = "fuzzy-parking", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Calcula a área recomendada e o tempo de espera estimado.
    Recommend {
        /// Densidade de tráfego (0–100 %).
        #[arg(long)]
        traffic: f64,
        /// Hora do dia (0–24).
        #[arg(long)]
        time: f64,
        /// Severidade do clima (0–10: 0-2 Clear, 3-5 Light Rain, 6-8 Heavy Rain, 9-10 Snow).
        #[arg(long)]
        weather: f64,
        /// Taxa de vagas livres (0–100 %).
        #[arg(long)]
        vacancy: f64,
        /// Classe do usuário (1 Regular, 2 Member, 3 VIP, 4 Disabled, 5 Staff).
        #[arg(long)]
        user: f64,
        /// Emite o resultado como JSON em vez de texto.
        #[arg(long)]
        json: bool,
    },
    /// Despeja as curvas de pertinência amostradas como JSON.
    Curves {
        /// Limita a uma variável específica (padrão: todas).
        #[arg(long)]
        variable: Option<String>,
    },
}

fn main() -> Result<()> {
    // Configura o sistema de logging/tracing.
    // Aceita a variável de ambiente RUST_LOG para configurar o nível.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // O sistema é montado uma vez; qualquer ConfigError aborta aqui,
    // antes de existir um motor pela metade.
    let system = ParkingGuidanceSystem::new().context("Falha ao construir o motor fuzzy")?;

    match cli.command {
        Command::Recommend {
            traffic,
            time,
            weather,
            vacancy,
            user,
            json,
        } => {
            let inputs = ParkingInputs {
                traffic_density: traffic,
                time_of_day: time,
                weather_condition: weather,
                vacancy_rate: vacancy,
                user_type: user,
            };
            let recommendation = system
                .recommend(&inputs)
                .context("Entrada rejeitada pelo motor")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&recommendation)?);
            } else {
                println!(
                    "🅿️  Área recomendada: {} (valor {:.2})",
                    recommendation.recommended_area_text, recommendation.recommended_area_value
                );
                println!(
                    "⏱️  Tempo de espera: {} (valor {:.2} min)",
                    recommendation.waiting_time_text, recommendation.waiting_time_value
                );
                println!(
                    "ℹ️  Usuário: {} · Clima: {}",
                    parking::user_type_text(user),
                    parking::weather_text(weather)
                );
            }
        }
        Command::Curves { variable } => {
            let engine = system.engine();
            let names: Vec<&str> = match &variable {
                Some(name) => {
                    let name = name.as_str();
                    // Valida antes de montar o JSON — nome errado é erro do usuário
                    if engine.variable(name).is_none() {
                        anyhow::bail!("variável desconhecida: '{name}'");
                    }
                    vec![name]
                }
                None => engine.variable_names(),
            };

            let mut dump = serde_json::Map::new();
            for name in names {
                let var = engine
                    .variable(name)
                    .context("variável sumiu do registro")?;
                let mut terms = serde_json::Map::new();
                for term in var.terms() {
                    let curve = var
                        .curve(term)
                        .context("termo sumiu da variável")?
                        .into_iter()
                        .map(|(x, mu)| serde_json::json!([x, mu]))
                        .collect::<Vec<_>>();
                    terms.insert(term.to_string(), serde_json::Value::Array(curve));
                }
                dump.insert(name.to_string(), serde_json::Value::Object(terms));
            }
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
    }

    Ok(())
}
