/// Типы данных портфеля проектов

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Этап жизненного цикла проекта (в порядке прохождения)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStage {
    #[serde(rename = "Идея")]
    Idea,
    #[serde(rename = "Планирование")]
    Planning,
    #[serde(rename = "Разработка")]
    Development,
    #[serde(rename = "Тестирование")]
    Testing,
    #[serde(rename = "Внедрение")]
    Deployment,
    #[serde(rename = "Завершён")]
    Completed,
}

impl ProjectStage {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStage::Idea => "Идея",
            ProjectStage::Planning => "Планирование",
            ProjectStage::Development => "Разработка",
            ProjectStage::Testing => "Тестирование",
            ProjectStage::Deployment => "Внедрение",
            ProjectStage::Completed => "Завершён",
        }
    }

    /// Терминальный этап: проект больше не считается активным
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProjectStage::Completed)
    }
}

impl fmt::Display for ProjectStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Рыночный сегмент
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectSegment {
    B2B,
    B2C,
    B2G,
}

impl fmt::Display for ProjectSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectSegment::B2B => "B2B",
            ProjectSegment::B2C => "B2C",
            ProjectSegment::B2G => "B2G",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "Интернет")]
    Internet,
    #[serde(rename = "Телевидение")]
    Television,
    #[serde(rename = "Телефония")]
    Telephony,
    #[serde(rename = "Облачные услуги")]
    CloudServices,
    #[serde(rename = "Кибербезопасность")]
    Cybersecurity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFinance {
    pub month: String, // "2024-03"
    pub revenue: f64,
    pub costs: f64,
    pub profit: f64, // revenue - costs, поддерживается тем, кто пишет запись
}

/// Запись журнала изменений проекта (только добавление)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHistory {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub user_name: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub stage: ProjectStage,
    pub segment: ProjectSegment,
    pub services: Vec<ServiceType>,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub manager: String,
    #[serde(default)]
    pub team: Vec<String>,
    pub budget: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub monthly_finances: Vec<MonthlyFinance>,
    #[serde(default)]
    pub history: Vec<ProjectHistory>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_problematic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>, // 0-5, None = без оценки
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Поля формы создания проекта; id, даты, история и финансы назначает хранилище
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub stage: ProjectStage,
    pub segment: ProjectSegment,
    pub services: Vec<ServiceType>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub manager: String,
    #[serde(default)]
    pub team: Vec<String>,
    pub budget: f64,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_problematic: bool,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Частичное обновление: заменяются только переданные поля
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub stage: Option<ProjectStage>,
    pub segment: Option<ProjectSegment>,
    pub services: Option<Vec<ServiceType>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub manager: Option<String>,
    pub team: Option<Vec<String>>,
    pub budget: Option<f64>,
    pub spent: Option<f64>,
    pub monthly_finances: Option<Vec<MonthlyFinance>>,
    pub is_favorite: Option<bool>,
    pub is_problematic: Option<bool>,
    pub rating: Option<f64>,
}

impl Project {
    /// Слияние частичного обновления с проставлением updated_at
    pub fn apply(&mut self, update: ProjectUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(stage) = update.stage {
            self.stage = stage;
        }
        if let Some(segment) = update.segment {
            self.segment = segment;
        }
        if let Some(services) = update.services {
            self.services = services;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if update.end_date.is_some() {
            self.end_date = update.end_date;
        }
        if let Some(manager) = update.manager {
            self.manager = manager;
        }
        if let Some(team) = update.team {
            self.team = team;
        }
        if let Some(budget) = update.budget {
            self.budget = budget;
        }
        if let Some(spent) = update.spent {
            self.spent = spent;
        }
        if let Some(finances) = update.monthly_finances {
            self.monthly_finances = finances;
        }
        if let Some(is_favorite) = update.is_favorite {
            self.is_favorite = is_favorite;
        }
        if let Some(is_problematic) = update.is_problematic {
            self.is_problematic = is_problematic;
        }
        if update.rating.is_some() {
            self.rating = update.rating;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_revenue: f64,
    pub total_costs: f64,
    pub total_profit: f64,
    pub profit_margin: f64, // %, 0 при нулевой выручке
    pub problematic_projects: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCount {
    pub stage: ProjectStage,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentCount {
    pub segment: ProjectSegment,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOutput {
    pub metrics: DashboardMetrics,
    pub stages: Vec<StageCount>,
    pub segments: Vec<SegmentCount>,
}

/// Итоги по помесячным финансам одного проекта
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub revenue: f64,
    pub costs: f64,
    pub profit: f64, // сумма profit по записям, не revenue - costs
    pub margin: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub finance: FinanceSummary,
}

/// Фильтр по значению перечисления; "all" (или пустая строка) пропускает всё
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

impl<T: Serialize> Serialize for Filter<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Filter::All => serializer.serialize_str("all"),
            Filter::Only(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Filter<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() || raw == "all" {
            return Ok(Filter::All);
        }
        let value: StrDeserializer<'_, D::Error> = raw.as_str().into_deserializer();
        T::deserialize(value).map(Filter::Only)
    }
}

pub type StageFilter = Filter<ProjectStage>;
pub type SegmentFilter = Filter<ProjectSegment>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Default,
    Rating,
    Budget,
}

/// Параметры списка проектов
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectQuery {
    pub query: String,
    pub stage: StageFilter,
    pub segment: SegmentFilter,
    pub favorites_only: bool,
    pub sort: SortMode,
}

/// Сводка по проекту, отправляемая генератору текста при сравнении
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonItem {
    pub id: String,
    pub name: String,
    pub stage: ProjectStage,
    pub segment: ProjectSegment,
    pub budget: f64,
    pub spent: f64,
    pub revenue: f64,
    pub costs: f64,
    pub services: Vec<ServiceType>,
    pub team_size: usize,
    pub is_problematic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub best_project_id: String,
    pub reasoning: String,
}
