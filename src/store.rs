//! Хранилище проектов
//!
//! Состояние принадлежит вызывающей стороне и передаётся явно; глобальных
//! синглтонов нет. Запись по принципу "последняя побеждает".

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{EngineError, Result};
use crate::preprocessing::{validate_new_project, validate_update, FinanceExtractor};
use crate::types::{NewProject, Project, ProjectHistory, ProjectUpdate};

const CREATED_ACTION: &str = "Создан проект";
const DEFAULT_USER_NAME: &str = "Current User";

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn list_all(&self) -> Vec<Project>;

    async fn get_by_id(&self, id: &str) -> Option<Project>;

    /// Назначает id и даты, обнуляет spent и финансы, добавляет запись в историю
    async fn create(&self, input: NewProject) -> Result<Project>;

    async fn update(&self, id: &str, update: ProjectUpdate) -> Result<Project>;

    async fn toggle_favorite(&self, id: &str) -> Result<Project>;
}

#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    projects: RwLock<Vec<Project>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: RwLock::new(projects),
        }
    }

    /// Загрузка начального набора проектов из JSON-массива
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Seed(format!("{}: {}", path.display(), e)))?;
        let projects: Vec<Project> = serde_json::from_str(&raw)
            .map_err(|e| EngineError::Seed(format!("{}: {}", path.display(), e)))?;

        for project in &projects {
            let inconsistent = FinanceExtractor::inconsistent_entries(project);
            if !inconsistent.is_empty() {
                tracing::warn!(
                    "Project {} has {} finance entries where profit != revenue - costs",
                    project.id,
                    inconsistent.len()
                );
            }
        }

        tracing::info!("Loaded {} projects from {}", projects.len(), path.display());
        Ok(Self::with_projects(projects))
    }

    fn next_id(projects: &[Project], now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis();
        while projects.iter().any(|p| p.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn list_all(&self) -> Vec<Project> {
        self.projects.read().await.clone()
    }

    async fn get_by_id(&self, id: &str) -> Option<Project> {
        self.projects.read().await.iter().find(|p| p.id == id).cloned()
    }

    async fn create(&self, input: NewProject) -> Result<Project> {
        let input = validate_new_project(input)?;
        let now = Utc::now();

        let mut projects = self.projects.write().await;
        let id = Self::next_id(&projects, now);

        let project = Project {
            history: vec![ProjectHistory {
                id: id.clone(),
                timestamp: now,
                user_id: input.created_by.clone().unwrap_or_default(),
                user_name: DEFAULT_USER_NAME.to_string(),
                action: CREATED_ACTION.to_string(),
                field: None,
                old_value: None,
                new_value: None,
            }],
            id,
            name: input.name,
            description: input.description,
            stage: input.stage,
            segment: input.segment,
            services: input.services,
            start_date: input.start_date,
            end_date: input.end_date,
            manager: input.manager,
            team: input.team,
            budget: input.budget,
            spent: 0.0,
            monthly_finances: Vec::new(),
            is_favorite: input.is_favorite,
            is_problematic: input.is_problematic,
            rating: input.rating,
            created_at: now,
            updated_at: now,
            created_by: input.created_by,
        };

        projects.push(project.clone());
        tracing::info!("Project {} created: {}", project.id, project.name);
        Ok(project)
    }

    async fn update(&self, id: &str, update: ProjectUpdate) -> Result<Project> {
        let update = validate_update(update)?;
        let mut projects = self.projects.write().await;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::ProjectNotFound(id.to_string()))?;

        project.apply(update, Utc::now());
        Ok(project.clone())
    }

    async fn toggle_favorite(&self, id: &str) -> Result<Project> {
        let mut projects = self.projects.write().await;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::ProjectNotFound(id.to_string()))?;

        project.is_favorite = !project.is_favorite;
        project.updated_at = Utc::now();
        Ok(project.clone())
    }
}
