//! # Defuzzificação — Centroide do Conjunto Agregado
//!
//! Reduz o conjunto fuzzy combinado de uma saída a um único valor crisp
//! pelo método do **centro de gravidade** sobre a grade amostrada:
//!
//! ```text
//! centroide = Σ(xᵢ · μᵢ) / Σ(μᵢ)
//! ```
//!
//! Quando nenhuma regra disparou, a massa Σ(μᵢ) é ~0 e não existe centro de
//! gravidade — o chamador recebe `None` e decide a política (o motor reporta
//! agregado vazio por saída, em vez de dividir por zero ou inventar um
//! valor padrão).

/// Massa mínima para considerar que alguma regra disparou.
const MASS_EPSILON: f64 = 1e-9;

/// Centroide discreto do conjunto `mu` sobre as amostras `xs`.
///
/// `xs` e `mu` andam em paralelo (mesma grade do universo da saída).
/// Retorna `None` se a massa total for ~0.
pub fn centroid(xs: &[f64], mu: &[f64]) -> Option<f64> {
    debug_assert_eq!(xs.len(), mu.len());
    let mass: f64 = mu.iter().sum();
    if mass.abs() < MASS_EPSILON {
        return None;
    }
    let moment: f64 = xs.iter().zip(mu).map(|(x, m)| x * m).sum();
    Some(moment / mass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MembershipFunction;

    /// O centroide de um triângulo simétrico recortado em qualquer altura
    /// é o próprio pico — propriedade de simetria do Mamdani.
    #[test]
    fn test_symmetric_triangle_centroid_is_peak() {
        let mf = MembershipFunction::triangular(2.0, 5.0, 8.0);
        let xs: Vec<f64> = (0..=10).map(|i| i as f64).collect();
        for recorte in [1.0, 0.7, 0.4, 0.1] {
            let mu: Vec<f64> = xs.iter().map(|&x| mf.degree(x).min(recorte)).collect();
            let c = centroid(&xs, &mu).unwrap();
            assert!((c - 5.0).abs() < 1e-9, "recorte {recorte}: centroide {c}");
        }
    }

    /// Conjunto sem massa não tem centroide.
    #[test]
    fn test_empty_aggregate_has_no_centroid() {
        let xs = [0.0, 1.0, 2.0];
        assert_eq!(centroid(&xs, &[0.0, 0.0, 0.0]), None);
        assert_eq!(centroid(&xs, &[0.0, 1e-12, 0.0]), None);
    }

    /// Caso assimétrico simples, conferido à mão.
    #[test]
    fn test_asymmetric_set() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let mu = [0.0, 1.0, 0.5, 0.0];
        // (1·1 + 2·0.5) / 1.5 = 4/3
        let c = centroid(&xs, &mu).unwrap();
        assert!((c - 4.0 / 3.0).abs() < 1e-12);
    }
}
