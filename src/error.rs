//! Ошибки движка портфеля

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Для сравнения нужно от 2 до 4 проектов
    #[error("Нужно выбрать от 2 до 4 проектов для сравнения, выбрано: {count}")]
    InvalidSelection { count: usize },

    /// Внешний генератор текста вернул ошибку; повтор не выполняется
    #[error("Анализ не удался: {0}")]
    AnalysisFailed(String),

    #[error("Проект не найден: {0}")]
    ProjectNotFound(String),

    #[error("Некорректные данные проекта: {0}")]
    Validation(String),

    #[error("Неизвестный инструмент ассистента: {0}")]
    UnknownTool(String),

    #[error("Некорректные аргументы инструмента {tool}: {reason}")]
    InvalidToolArgs { tool: String, reason: String },

    #[error("Ошибка конфигурации: {0}")]
    Config(String),

    #[error("Не удалось загрузить начальные данные: {0}")]
    Seed(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
