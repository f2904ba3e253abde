/// Аналитические модули: метрики, фильтрация, сравнение

pub mod comparison;
pub mod filtering;
pub mod metrics;

pub use comparison::ComparisonRanker;
pub use filtering::ProjectFilter;
pub use metrics::MetricsAggregator;
