/// Инструменты, которые может вызвать ассистент в чате

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::store::ProjectStore;
use crate::types::Project;

const NOT_FOUND_MESSAGE: &str = "Проект не найден";

/// Вызов инструмента в том виде, в каком его присылает ассистент
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
struct NameArgs {
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantTool {
    ListProjects,
    OpenProject { name: String },
    ToggleFavorite { name: String },
    GoCompare,
}

impl AssistantTool {
    /// Разбор вызова; неизвестные имена отклоняются здесь же
    pub fn from_call(call: &ToolCall) -> Result<Self> {
        match call.name.as_str() {
            "listProjects" => Ok(AssistantTool::ListProjects),
            "openProject" => Ok(AssistantTool::OpenProject {
                name: Self::name_arg(call)?,
            }),
            "toggleFavorite" => Ok(AssistantTool::ToggleFavorite {
                name: Self::name_arg(call)?,
            }),
            "goCompare" => Ok(AssistantTool::GoCompare),
            other => Err(EngineError::UnknownTool(other.to_string())),
        }
    }

    fn name_arg(call: &ToolCall) -> Result<String> {
        let args: NameArgs =
            serde_json::from_value(call.args.clone()).map_err(|e| EngineError::InvalidToolArgs {
                tool: call.name.clone(),
                reason: e.to_string(),
            })?;

        if args.name.trim().is_empty() {
            return Err(EngineError::InvalidToolArgs {
                tool: call.name.clone(),
                reason: "name is required".to_string(),
            });
        }
        Ok(args.name)
    }
}

/// Переход, который клиент должен выполнить после вызова
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Navigation {
    Project(String),
    Comparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate: Option<Navigation>,
}

impl ToolResponse {
    fn not_found() -> Self {
        Self {
            ok: false,
            error: Some(NOT_FOUND_MESSAGE.to_string()),
            ..Default::default()
        }
    }
}

pub struct ToolBridge {
    store: Arc<dyn ProjectStore>,
}

impl ToolBridge {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, tool: AssistantTool) -> ToolResponse {
        tracing::info!("Assistant tool call: {:?}", tool);

        match tool {
            AssistantTool::ListProjects => {
                let projects = self.store.list_all().await;
                ToolResponse {
                    ok: true,
                    summary: Some(summarize(&projects)),
                    ..Default::default()
                }
            }
            AssistantTool::OpenProject { name } => match self.find_by_name(&name).await {
                Some(project) => ToolResponse {
                    ok: true,
                    navigate: Some(Navigation::Project(project.id.clone())),
                    id: Some(project.id),
                    ..Default::default()
                },
                None => ToolResponse::not_found(),
            },
            AssistantTool::ToggleFavorite { name } => {
                let Some(project) = self.find_by_name(&name).await else {
                    return ToolResponse::not_found();
                };
                match self.store.toggle_favorite(&project.id).await {
                    Ok(updated) => ToolResponse {
                        ok: true,
                        id: Some(updated.id),
                        ..Default::default()
                    },
                    Err(e) => ToolResponse {
                        ok: false,
                        error: Some(e.to_string()),
                        ..Default::default()
                    },
                }
            }
            AssistantTool::GoCompare => ToolResponse {
                ok: true,
                navigate: Some(Navigation::Comparison),
                ..Default::default()
            },
        }
    }

    /// Точное совпадение названия без учёта регистра; первое совпадение побеждает
    async fn find_by_name(&self, name: &str) -> Option<Project> {
        let needle = name.to_lowercase();
        self.store
            .list_all()
            .await
            .into_iter()
            .find(|p| p.name.to_lowercase() == needle)
    }
}

fn summarize(projects: &[Project]) -> String {
    projects
        .iter()
        .map(|p| {
            format!(
                "• {} — этап: {}, сегмент: {}, бюджет: {}₽",
                p.name,
                p.stage,
                p.segment,
                format_amount(p.budget)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Целое число с разделением разрядов неразрывным пробелом, как в ru-RU
fn format_amount(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
