//! Configuração do cadence carregada a partir de `cadence.toml`.
//!
//! A struct [`CadenceConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `CADENCE_BACKLOG` tem precedência sobre o arquivo.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::backlog::ProductBacklog;

/// Configuração de nível superior carregada de `cadence.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CadenceConfig {
    /// Caminho para o arquivo JSON do product backlog.
    #[serde(default)]
    pub backlog_path: Option<String>,

    /// Interrompe a reprodução de um script na primeira rejeição.
    #[serde(default = "default_fail_fast")]
    pub fail_fast: bool,

    /// Formato dos logs: "pretty" ou "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_fail_fast() -> bool {
    true
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            backlog_path: None,
            fail_fast: default_fail_fast(),
            log_format: default_log_format(),
        }
    }
}

impl CadenceConfig {
    /// Carrega a configuração de `cadence.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("cadence.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<CadenceConfig>(&contents)
                .with_context(|| format!("invalid config in {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_backlog_override(std::env::var("CADENCE_BACKLOG").ok());
        Ok(config)
    }

    /// Aplica o valor de `CADENCE_BACKLOG`, que tem precedência sobre o arquivo.
    /// Um valor vazio é ignorado.
    pub fn apply_backlog_override(&mut self, value: Option<String>) {
        if let Some(path) = value
            && !path.is_empty()
        {
            self.backlog_path = Some(path);
        }
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Carrega o backlog configurado, ou um backlog vazio se nenhum foi definido.
    pub fn load_backlog(&self) -> Result<ProductBacklog> {
        match &self.backlog_path {
            Some(path) => {
                let path = PathBuf::from(path);
                ProductBacklog::load(&path)
                    .with_context(|| format!("failed to load backlog from {}", path.display()))
            }
            None => Ok(ProductBacklog::new()),
        }
    }
}
