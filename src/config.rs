//! Конфигурация сервиса из переменных окружения

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{EngineError, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub seed_path: Option<PathBuf>,
    pub llm: Option<LlmConfig>,
}

/// Параметры OpenAI-совместимого endpoint'а chat/completions
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            seed_path: None,
            llm: None,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            timeout_secs: 60,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Сборка конфигурации из произвольного источника пар ключ-значение
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("PORTFOLIO_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .map_err(|e| EngineError::Config(format!("PORTFOLIO_BIND_ADDR={}: {}", addr, e)))?;
        }

        config.seed_path = lookup("PORTFOLIO_SEED_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        if let Some(endpoint) = lookup("PORTFOLIO_LLM_ENDPOINT").filter(|e| !e.is_empty()) {
            let mut llm = LlmConfig {
                endpoint,
                api_key: lookup("PORTFOLIO_LLM_API_KEY"),
                ..LlmConfig::default()
            };
            if let Some(model) = lookup("PORTFOLIO_LLM_MODEL") {
                llm.model = model;
            }
            if let Some(timeout) = lookup("PORTFOLIO_LLM_TIMEOUT_SECS") {
                llm.timeout_secs = timeout.parse().map_err(|e| {
                    EngineError::Config(format!("PORTFOLIO_LLM_TIMEOUT_SECS={}: {}", timeout, e))
                })?;
            }
            config.llm = Some(llm);
        }

        Ok(config)
    }
}
