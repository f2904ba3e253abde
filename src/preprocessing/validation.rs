//! Проверка данных проекта при создании и обновлении

use crate::error::{EngineError, Result};
use crate::types::{NewProject, ProjectUpdate, ServiceType};

/// Проверка и нормализация новой записи: пустые имена в команде отбрасываются
pub fn validate_new_project(mut input: NewProject) -> Result<NewProject> {
    check_name(&input.name)?;
    check_description(&input.description)?;
    check_services(&input.services)?;
    check_budget(input.budget)?;
    check_rating(input.rating)?;

    input.name = input.name.trim().to_string();
    input.description = input.description.trim().to_string();
    input.manager = input.manager.trim().to_string();
    input.team = normalize_team(input.team);

    Ok(input)
}

/// Те же правила для переданных полей частичного обновления
pub fn validate_update(mut update: ProjectUpdate) -> Result<ProjectUpdate> {
    if let Some(name) = &update.name {
        check_name(name)?;
    }
    if let Some(description) = &update.description {
        check_description(description)?;
    }
    if let Some(services) = &update.services {
        check_services(services)?;
    }
    if let Some(budget) = update.budget {
        check_budget(budget)?;
    }
    if let Some(spent) = update.spent {
        if !spent.is_finite() {
            return Err(EngineError::Validation("Некорректная сумма расходов".to_string()));
        }
    }
    check_rating(update.rating)?;

    update.name = update.name.map(|name| name.trim().to_string());
    update.description = update.description.map(|d| d.trim().to_string());
    update.manager = update.manager.map(|m| m.trim().to_string());
    update.team = update.team.map(normalize_team);

    Ok(update)
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(EngineError::Validation("Введите название проекта".to_string()));
    }
    Ok(())
}

fn check_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(EngineError::Validation("Введите описание проекта".to_string()));
    }
    Ok(())
}

fn check_services(services: &[ServiceType]) -> Result<()> {
    if services.is_empty() {
        return Err(EngineError::Validation("Выберите хотя бы одну услугу".to_string()));
    }
    Ok(())
}

/// Бюджет неотрицательный; ноль допустим
fn check_budget(budget: f64) -> Result<()> {
    if !budget.is_finite() || budget < 0.0 {
        return Err(EngineError::Validation("Введите корректный бюджет".to_string()));
    }
    Ok(())
}

fn check_rating(rating: Option<f64>) -> Result<()> {
    if let Some(rating) = rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(EngineError::Validation(format!(
                "Оценка должна быть от 0 до 5, получено {}",
                rating
            )));
        }
    }
    Ok(())
}

fn normalize_team(team: Vec<String>) -> Vec<String> {
    team.into_iter()
        .map(|member| member.trim().to_string())
        .filter(|member| !member.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::new_project;

    #[test]
    fn accepts_complete_form_and_trims_team() {
        let mut input = new_project("  Alpha ");
        input.team = vec![" Анна ".to_string(), "".to_string(), "  ".to_string(), "Олег".to_string()];

        let validated = validate_new_project(input).unwrap();
        assert_eq!(validated.name, "Alpha");
        assert_eq!(validated.team, vec!["Анна".to_string(), "Олег".to_string()]);
    }

    #[test]
    fn rejects_blank_name_and_description() {
        let err = validate_new_project(new_project("   ")).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        let mut input = new_project("Alpha");
        input.description = " ".to_string();
        assert!(matches!(validate_new_project(input), Err(EngineError::Validation(_))));
    }

    #[test]
    fn rejects_missing_services_and_bad_budget() {
        let mut input = new_project("Alpha");
        input.services.clear();
        assert!(validate_new_project(input).is_err());

        let mut input = new_project("Alpha");
        input.budget = -1.0;
        assert!(validate_new_project(input).is_err());

        let mut input = new_project("Alpha");
        input.budget = f64::NAN;
        assert!(validate_new_project(input).is_err());
    }

    #[test]
    fn rejects_rating_outside_scale() {
        let mut input = new_project("Alpha");
        input.rating = Some(7.0);
        assert!(validate_new_project(input).is_err());
    }

    #[test]
    fn zero_budget_is_allowed() {
        let mut input = new_project("Alpha");
        input.budget = 0.0;
        assert_eq!(validate_new_project(input).unwrap().budget, 0.0);
    }

    #[test]
    fn trims_description_and_manager() {
        let mut input = new_project("Alpha");
        input.description = "  Оптика  ".to_string();
        input.manager = " Петров П.П. ".to_string();

        let validated = validate_new_project(input).unwrap();
        assert_eq!(validated.description, "Оптика");
        assert_eq!(validated.manager, "Петров П.П.");
    }

    #[test]
    fn update_rejects_what_create_rejects() {
        let cases = [
            ProjectUpdate { services: Some(vec![]), ..Default::default() },
            ProjectUpdate { rating: Some(9.0), ..Default::default() },
            ProjectUpdate { name: Some("  ".to_string()), ..Default::default() },
            ProjectUpdate { budget: Some(-5.0), ..Default::default() },
            ProjectUpdate { description: Some(String::new()), ..Default::default() },
        ];

        for update in cases {
            let described = format!("{:?}", update);
            assert!(
                matches!(validate_update(update), Err(EngineError::Validation(_))),
                "accepted {}",
                described
            );
        }
    }

    #[test]
    fn update_with_valid_fields_is_normalized() {
        let update = ProjectUpdate {
            name: Some(" Beta ".to_string()),
            team: Some(vec![" Анна ".to_string(), " ".to_string()]),
            rating: Some(5.0),
            ..Default::default()
        };

        let validated = validate_update(update).unwrap();
        assert_eq!(validated.name.as_deref(), Some("Beta"));
        assert_eq!(validated.team, Some(vec!["Анна".to_string()]));
        assert_eq!(validated.rating, Some(5.0));
    }
}
