/// Фильтрация и сортировка списка проектов

use std::cmp::Ordering;

use crate::types::{Project, ProjectQuery, SortMode};

pub struct ProjectFilter;

impl ProjectFilter {
    /// Отфильтрованная и отсортированная копия списка; вход не изменяется
    pub fn filter_and_sort(projects: &[Project], query: &ProjectQuery) -> Vec<Project> {
        let needle = query.query.to_lowercase();

        let mut filtered: Vec<Project> = projects
            .iter()
            .filter(|p| Self::matches(p, &needle, query))
            .cloned()
            .collect();

        // sort_by стабилен: равные элементы сохраняют исходный порядок
        match query.sort {
            SortMode::Default => {}
            SortMode::Rating => filtered.sort_by(|a, b| {
                let (ra, rb) = (a.rating.unwrap_or(0.0), b.rating.unwrap_or(0.0));
                rb.partial_cmp(&ra).unwrap_or(Ordering::Equal)
            }),
            SortMode::Budget => {
                filtered.sort_by(|a, b| b.budget.partial_cmp(&a.budget).unwrap_or(Ordering::Equal))
            }
        }

        filtered
    }

    fn matches(project: &Project, needle: &str, query: &ProjectQuery) -> bool {
        let matches_search = needle.is_empty()
            || project.name.to_lowercase().contains(needle)
            || project.description.to_lowercase().contains(needle);

        matches_search
            && query.stage.matches(&project.stage)
            && query.segment.matches(&project.segment)
            && (!query.favorites_only || project.is_favorite)
    }
}
