//! Diagnostic record analysis for the review UI.
//!
//! Presentation view over the interpreter output: labels how a day's punches
//! were read and flags the gaps. Never feeds pay calculation.

use crate::models::{Shift, TimeRecord};
use crate::processing::interpreter::interpret;
use serde::Serialize;

/// Human-readable diagnosis of one record's interpretation.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Fixed interpretation label (product copy, Portuguese).
    pub interpretation: String,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_work_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch_minutes: Option<i64>,
}

/// Analyze a record against its shift.
///
/// Re-runs the interpreter on its own (same as the calculator does) so the
/// analysis stays a pure function of the stored record.
pub fn analyze(record: &TimeRecord, shift: Option<&Shift>) -> Analysis {
    let interpreted = interpret(record, shift).record;

    let mut issues = Vec::new();
    let mut suggestions = Vec::new();
    let mut interpretation = "Registro normal".to_string();

    let expected_work_minutes = shift.map(Shift::expected_work_minutes);
    let lunch_minutes = shift.map(Shift::lunch_minutes);

    match record.punch_count() {
        0 => {
            interpretation = "Sem registros (falta)".to_string();
            issues.push("Nenhum registro de ponto".to_string());
        }
        1 => {
            interpretation = "Apenas 1 registro - assumido almoço padrão".to_string();
            suggestions.push("Verificar se houve registro de saída/retorno reais".to_string());
        }
        2 => {
            if interpreted.clock_in2.is_some() && interpreted.clock_out1.is_none() {
                interpretation =
                    "Entrada + Volta do almoço (falta saída para almoço)".to_string();
                issues.push("Falta registro de saída para almoço".to_string());
                issues.push("Falta registro de saída final".to_string());
            } else if interpreted.clock_out1.is_some() && interpreted.clock_in2.is_none() {
                interpretation = "Entrada + Saída (jornada contínua)".to_string();
                if let Some(lunch) = lunch_minutes {
                    suggestions.push(format!(
                        "Intervalo de almoço padrão de {lunch} minutos pode ser descontado (se jornada > 6h)"
                    ));
                }
            } else if interpreted.clock_in2.is_some() && interpreted.clock_out2.is_none() {
                interpretation = "Entrada + Volta do almoço (falta saída final)".to_string();
                issues.push("Falta registro de saída final".to_string());
            }
        }
        count if count >= 4 => {
            interpretation = "Registro completo".to_string();
        }
        _ => {}
    }

    Analysis {
        interpretation,
        issues,
        suggestions,
        expected_work_minutes,
        lunch_minutes,
    }
}
