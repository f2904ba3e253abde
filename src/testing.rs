//! Тестовые фикстуры

use chrono::{TimeZone, Utc};

use crate::types::{
    MonthlyFinance, NewProject, Project, ProjectSegment, ProjectStage, ServiceType,
};

pub fn project(id: &str, name: &str) -> Project {
    let created = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

    Project {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("Описание проекта {}", name),
        stage: ProjectStage::Development,
        segment: ProjectSegment::B2B,
        services: vec![ServiceType::Internet],
        start_date: "2024-01-15".to_string(),
        end_date: None,
        manager: "Иванов И.И.".to_string(),
        team: vec![],
        budget: 1_000_000.0,
        spent: 0.0,
        monthly_finances: vec![],
        history: vec![],
        is_favorite: false,
        is_problematic: false,
        rating: None,
        created_at: created,
        updated_at: created,
        created_by: None,
    }
}

pub fn finance(revenue: f64, costs: f64) -> MonthlyFinance {
    MonthlyFinance {
        month: "2024-03".to_string(),
        revenue,
        costs,
        profit: revenue - costs,
    }
}

/// Проект с одной записью, дающей заданную прибыль
pub fn project_with_profit(id: &str, profit: f64) -> Project {
    let mut p = project(id, &format!("Project {}", id));
    p.monthly_finances = vec![MonthlyFinance {
        month: "2024-03".to_string(),
        revenue: profit.max(0.0),
        costs: (-profit).max(0.0),
        profit,
    }];
    p
}

pub fn new_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: "Новый проект".to_string(),
        stage: ProjectStage::Idea,
        segment: ProjectSegment::B2C,
        services: vec![ServiceType::Television],
        start_date: "2024-06-01".to_string(),
        end_date: None,
        manager: "Петров П.П.".to_string(),
        team: vec!["Анна".to_string()],
        budget: 500_000.0,
        is_favorite: false,
        is_problematic: false,
        rating: None,
        created_by: Some("user-1".to_string()),
    }
}
