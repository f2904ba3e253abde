//! Сравнение проектов через внешний генератор текста
//!
//! Ответ генератора разбирается построчно: первая строка `BEST_ID:` даёт
//! кандидата, всё после строки `REASONING:` - обоснование. Формат ответа
//! не гарантирован, поэтому кандидат принимается только если он входит в
//! выборку; иначе лучший проект выбирается по суммарной прибыли.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::assistant::TextGenerator;
use crate::error::{EngineError, Result};
use crate::preprocessing::FinanceExtractor;
use crate::types::{AnalysisResult, ComparisonItem, Project};

pub const MIN_SELECTION: usize = 2;
pub const MAX_SELECTION: usize = 4;

const BEST_ID_MARKER: &str = "BEST_ID:";
const REASONING_MARKER: &str = "REASONING:";

const ANALYST_PROMPT: &str = "Ты — аналитик проектов. На основе JSON сопоставь проекты по метрикам: \
рентабельность (прибыль/выручка), риски (isProblematic, стадия), бюджетная эффективность \
(выручка/бюджет), фокус услуг, размер команды. Верни текущий лучший проект для запуска на ближайший квартал.
Верни ответ строго в формате:
BEST_ID: <id>
REASONING:
<краткое объяснение в 4-6 пунктах>
";

/// Разобранный ответ генератора до проверки кандидата
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub candidate_id: String,
    pub reasoning: String,
}

pub struct ComparisonRanker {
    generator: Arc<dyn TextGenerator>,
}

impl ComparisonRanker {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn analyze(&self, selected: &[Project]) -> Result<AnalysisResult> {
        if !(MIN_SELECTION..=MAX_SELECTION).contains(&selected.len()) {
            return Err(EngineError::InvalidSelection {
                count: selected.len(),
            });
        }

        let bundle = Self::build_bundle(selected);
        let prompt = Self::build_prompt(&bundle)?;

        tracing::debug!("Comparison prompt built for {} projects", bundle.len());

        let text = self
            .generator
            .generate_text(&prompt)
            .await
            .map_err(|e| EngineError::AnalysisFailed(e.to_string()))?;

        Ok(Self::resolve(selected, &text))
    }

    pub fn build_bundle(selected: &[Project]) -> Vec<ComparisonItem> {
        selected.iter().map(FinanceExtractor::comparison_item).collect()
    }

    pub fn build_prompt(bundle: &[ComparisonItem]) -> Result<String> {
        let payload = serde_json::to_string(bundle)
            .map_err(|e| EngineError::AnalysisFailed(format!("Failed to encode bundle: {}", e)))?;
        Ok(format!("{}\n{}", ANALYST_PROMPT, payload))
    }

    pub fn parse_response(text: &str) -> ParsedResponse {
        let lines: Vec<&str> = text.split('\n').collect();

        let candidate_id = lines
            .iter()
            .find_map(|line| line.strip_prefix(BEST_ID_MARKER))
            .map(|rest| rest.trim().to_string())
            .unwrap_or_default();

        let reasoning = match lines.iter().position(|line| line.starts_with(REASONING_MARKER)) {
            Some(idx) => lines[idx + 1..].join("\n").trim().to_string(),
            None => text.trim().to_string(),
        };

        ParsedResponse {
            candidate_id,
            reasoning,
        }
    }

    /// Проект с наибольшей суммарной прибылью; при равенстве - первый в выборке
    pub fn fallback_best(selected: &[Project]) -> Option<&Project> {
        let mut ranked: Vec<(&Project, f64)> = selected
            .iter()
            .map(|p| (p, FinanceExtractor::total_profit(p)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        ranked.first().map(|(p, _)| *p).or_else(|| selected.first())
    }

    fn resolve(selected: &[Project], text: &str) -> AnalysisResult {
        let parsed = Self::parse_response(text);
        let is_selected = selected.iter().any(|p| p.id == parsed.candidate_id);

        let best_project_id = if !parsed.candidate_id.is_empty() && is_selected {
            parsed.candidate_id
        } else {
            tracing::warn!(
                "Comparison response named {:?}, falling back to profit ranking",
                parsed.candidate_id
            );
            Self::fallback_best(selected)
                .map(|p| p.id.clone())
                .unwrap_or_default()
        };

        AnalysisResult {
            best_project_id,
            reasoning: parsed.reasoning,
        }
    }
}
