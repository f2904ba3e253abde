/// Интеграция с ассистентом: генерация текста и вызываемые инструменты

pub mod generator;
pub mod tools;

pub use generator::{HttpTextGenerator, TextGenerator, UnavailableGenerator};
pub use tools::{AssistantTool, Navigation, ToolBridge, ToolCall, ToolResponse};
