//! Финансовые признаки проектов

use crate::types::{ComparisonItem, FinanceSummary, Project};

/// Допуск при сверке profit с revenue - costs
const PROFIT_TOLERANCE: f64 = 1e-6;

pub struct FinanceExtractor;

impl FinanceExtractor {
    /// Суммирование помесячных финансов проекта
    pub fn summarize(project: &Project) -> FinanceSummary {
        let mut summary = FinanceSummary::default();

        for finance in &project.monthly_finances {
            summary.revenue += finance.revenue;
            summary.costs += finance.costs;
            summary.profit += finance.profit;
        }

        // Рентабельность считается от revenue - costs, как и на дашборде
        summary.margin = if summary.revenue > 0.0 {
            (summary.revenue - summary.costs) / summary.revenue * 100.0
        } else {
            0.0
        };

        summary
    }

    /// Суммарная прибыль по полю profit; используется резервным ранжированием
    pub fn total_profit(project: &Project) -> f64 {
        project.monthly_finances.iter().map(|f| f.profit).sum()
    }

    /// Индексы записей, где profit расходится с revenue - costs
    pub fn inconsistent_entries(project: &Project) -> Vec<usize> {
        project
            .monthly_finances
            .iter()
            .enumerate()
            .filter(|(_, f)| (f.profit - (f.revenue - f.costs)).abs() > PROFIT_TOLERANCE)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Сводка проекта для сравнения
    pub fn comparison_item(project: &Project) -> ComparisonItem {
        let summary = Self::summarize(project);

        ComparisonItem {
            id: project.id.clone(),
            name: project.name.clone(),
            stage: project.stage,
            segment: project.segment,
            budget: project.budget,
            spent: project.spent,
            revenue: summary.revenue,
            costs: summary.costs,
            services: project.services.clone(),
            team_size: project.team.len(),
            is_problematic: project.is_problematic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{finance, project};

    #[test]
    fn summarize_adds_up_monthly_entries() {
        let mut p = project("1", "Alpha");
        p.monthly_finances = vec![finance(1000.0, 400.0), finance(500.0, 700.0)];

        let summary = FinanceExtractor::summarize(&p);
        assert_eq!(summary.revenue, 1500.0);
        assert_eq!(summary.costs, 1100.0);
        assert_eq!(summary.profit, 400.0);
        assert!((summary.margin - 26.666).abs() < 0.01);
    }

    #[test]
    fn summarize_without_revenue_has_zero_margin() {
        let p = project("1", "Alpha");
        let summary = FinanceExtractor::summarize(&p);
        assert_eq!(summary, FinanceSummary::default());
    }

    #[test]
    fn inconsistent_entries_are_reported_by_index() {
        let mut p = project("1", "Alpha");
        p.monthly_finances = vec![finance(100.0, 40.0), finance(100.0, 40.0)];
        p.monthly_finances[1].profit = 90.0;

        assert_eq!(FinanceExtractor::inconsistent_entries(&p), vec![1]);
    }

    #[test]
    fn comparison_item_carries_totals_and_team_size() {
        let mut p = project("7", "Beta");
        p.team = vec!["Анна".to_string(), "Олег".to_string()];
        p.spent = 250.0;
        p.is_problematic = true;
        p.monthly_finances = vec![finance(300.0, 100.0)];

        let item = FinanceExtractor::comparison_item(&p);
        assert_eq!(item.id, "7");
        assert_eq!(item.revenue, 300.0);
        assert_eq!(item.costs, 100.0);
        assert_eq!(item.team_size, 2);
        assert_eq!(item.spent, 250.0);
        assert!(item.is_problematic);
    }
}
