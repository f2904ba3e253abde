/// Агрегированные метрики дашборда

use crate::types::{DashboardMetrics, DashboardOutput, Project, SegmentCount, StageCount};

pub struct MetricsAggregator;

impl MetricsAggregator {
    pub fn dashboard(projects: &[Project]) -> DashboardOutput {
        DashboardOutput {
            metrics: Self::compute_metrics(projects),
            stages: Self::stage_distribution(projects),
            segments: Self::segment_distribution(projects),
        }
    }

    pub fn compute_metrics(projects: &[Project]) -> DashboardMetrics {
        let completed_projects = projects.iter().filter(|p| p.stage.is_terminal()).count();
        let problematic_projects = projects.iter().filter(|p| p.is_problematic).count();

        let total_revenue: f64 = projects
            .iter()
            .map(|p| p.monthly_finances.iter().map(|m| m.revenue).sum::<f64>())
            .sum();
        let total_costs: f64 = projects
            .iter()
            .map(|p| p.monthly_finances.iter().map(|m| m.costs).sum::<f64>())
            .sum();

        // Прибыль считается от итогов, а не суммой profit по записям
        let total_profit = total_revenue - total_costs;
        let profit_margin = if total_revenue > 0.0 {
            total_profit / total_revenue * 100.0
        } else {
            0.0
        };

        DashboardMetrics {
            total_projects: projects.len(),
            active_projects: projects.len() - completed_projects,
            completed_projects,
            total_revenue,
            total_costs,
            total_profit,
            profit_margin,
            problematic_projects,
        }
    }

    /// Количество проектов по этапам в порядке первого появления
    pub fn stage_distribution(projects: &[Project]) -> Vec<StageCount> {
        let mut distribution: Vec<StageCount> = Vec::new();

        for project in projects {
            match distribution.iter_mut().find(|s| s.stage == project.stage) {
                Some(entry) => entry.count += 1,
                None => distribution.push(StageCount {
                    stage: project.stage,
                    count: 1,
                }),
            }
        }

        distribution
    }

    /// Количество проектов по сегментам в порядке первого появления
    pub fn segment_distribution(projects: &[Project]) -> Vec<SegmentCount> {
        let mut distribution: Vec<SegmentCount> = Vec::new();

        for project in projects {
            match distribution.iter_mut().find(|s| s.segment == project.segment) {
                Some(entry) => entry.count += 1,
                None => distribution.push(SegmentCount {
                    segment: project.segment,
                    count: 1,
                }),
            }
        }

        distribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{finance, project};
    use crate::types::{ProjectSegment, ProjectStage};

    #[test]
    fn empty_input_yields_zero_metrics() {
        let metrics = MetricsAggregator::compute_metrics(&[]);
        assert_eq!(metrics, DashboardMetrics::default());
        assert_eq!(metrics.profit_margin, 0.0);
    }

    #[test]
    fn totals_follow_revenue_and_costs() {
        let mut a = project("1", "Alpha");
        a.monthly_finances = vec![finance(1000.0, 400.0)];
        let mut b = project("2", "Beta");
        b.monthly_finances = vec![finance(500.0, 700.0)];

        let metrics = MetricsAggregator::compute_metrics(&[a, b]);
        assert_eq!(metrics.total_revenue, 1500.0);
        assert_eq!(metrics.total_costs, 1100.0);
        assert_eq!(metrics.total_profit, 400.0);
        assert!((metrics.profit_margin - 26.7).abs() < 0.05);
    }

    #[test]
    fn profit_ignores_inconsistent_entry_profit() {
        let mut a = project("1", "Alpha");
        a.monthly_finances = vec![finance(1000.0, 400.0)];
        a.monthly_finances[0].profit = 9999.0;

        let metrics = MetricsAggregator::compute_metrics(&[a]);
        assert_eq!(metrics.total_profit, 600.0);
    }

    #[test]
    fn counts_partition_by_terminal_stage() {
        let mut projects = vec![
            project("1", "A"),
            project("2", "B"),
            project("3", "C"),
            project("4", "D"),
        ];
        projects[1].stage = ProjectStage::Completed;
        projects[2].stage = ProjectStage::Completed;
        projects[3].is_problematic = true;

        let metrics = MetricsAggregator::compute_metrics(&projects);
        assert_eq!(metrics.total_projects, 4);
        assert_eq!(metrics.completed_projects, 2);
        assert_eq!(metrics.active_projects, 2);
        assert_eq!(
            metrics.total_projects,
            metrics.active_projects + metrics.completed_projects
        );
        assert_eq!(metrics.problematic_projects, 1);
    }

    #[test]
    fn stage_distribution_keeps_first_seen_order() {
        let mut projects = vec![project("1", "A"), project("2", "B"), project("3", "C")];
        projects[0].stage = ProjectStage::Testing;
        projects[1].stage = ProjectStage::Idea;
        projects[2].stage = ProjectStage::Testing;

        let stages = MetricsAggregator::stage_distribution(&projects);
        assert_eq!(
            stages,
            vec![
                StageCount { stage: ProjectStage::Testing, count: 2 },
                StageCount { stage: ProjectStage::Idea, count: 1 },
            ]
        );
    }

    #[test]
    fn dashboard_bundles_segments() {
        let mut projects = vec![project("1", "A"), project("2", "B")];
        projects[0].segment = ProjectSegment::B2G;

        let output = MetricsAggregator::dashboard(&projects);
        assert_eq!(output.metrics.total_projects, 2);
        assert_eq!(output.segments[0].segment, ProjectSegment::B2G);
        assert_eq!(output.segments[1].segment, ProjectSegment::B2B);
    }
}
