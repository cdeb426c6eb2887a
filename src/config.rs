//! Configuração do trainer carregada a partir de `trainer.toml`.
//!
//! A struct [`TrainerConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! Variáveis de ambiente (também lidas de `.env`) têm precedência sobre o arquivo.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuração de nível superior carregada de `trainer.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainerConfig {
    /// Token do bot na plataforma de chat.
    #[serde(default)]
    pub token: String,

    /// Porta do endpoint de keep-alive.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Cargo de gerente (privilégio de instrutor).
    #[serde(default = "default_manager_role")]
    pub manager_role: String,

    /// Cargo de professor (privilégio de instrutor).
    #[serde(default = "default_teacher_role")]
    pub teacher_role: String,

    /// Usuários cujas DMs falham no gateway de console.
    #[serde(default)]
    pub closed_dms: Vec<String>,
}

fn default_port() -> u16 {
    3000
}

fn default_manager_role() -> String {
    "1454876343878549630".to_string()
}

fn default_teacher_role() -> String {
    "1464013335367389318".to_string()
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            port: default_port(),
            manager_role: default_manager_role(),
            teacher_role: default_teacher_role(),
            closed_dms: Vec::new(),
        }
    }
}

impl TrainerConfig {
    /// Carrega a configuração de `trainer.toml` no diretório atual e aplica
    /// as variáveis de ambiente.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = Self::from_file(Path::new("trainer.toml"))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Lê um arquivo TOML; usa valores padrão se o arquivo não existir.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str::<TrainerConfig>(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Aplica `TRAINING_BOT_TOKEN`, `PORT`, `ROLE_MANAGER` e `ROLE_TEACHER`.
    /// Valores vazios são ignorados.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(token) = var("TRAINING_BOT_TOKEN") {
            self.token = token;
        }
        if let Some(port) = var("PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("invalid PORT value `{port}`"))?;
        }
        if let Some(role) = var("ROLE_MANAGER") {
            self.manager_role = role;
        }
        if let Some(role) = var("ROLE_TEACHER") {
            self.teacher_role = role;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn default_config_values() {
        let config = TrainerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.manager_role, "1454876343878549630");
        assert_eq!(config.teacher_role, "1464013335367389318");
        assert!(config.token.is_empty());
        assert!(config.closed_dms.is_empty());
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            token = "bot-token"
            port = 8080
        "#;
        let config: TrainerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.token, "bot-token");
        assert_eq!(config.port, 8080);
        assert_eq!(config.manager_role, "1454876343878549630");
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "teacher_role = \"42\"\nclosed_dms = [\"rookie\"]").unwrap();

        let config = TrainerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.teacher_role, "42");
        assert_eq!(config.closed_dms, vec!["rookie".to_string()]);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn from_file_missing_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TrainerConfig::from_file(&dir.path().join("trainer.toml")).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();
        assert!(TrainerConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn environment_overrides_file_values() {
        let vars = env(&[
            ("TRAINING_BOT_TOKEN", "secret"),
            ("PORT", "4000"),
            ("ROLE_MANAGER", "m1"),
            ("ROLE_TEACHER", ""),
        ]);
        let mut config = TrainerConfig::default();
        config.apply_overrides(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.token, "secret");
        assert_eq!(config.port, 4000);
        assert_eq!(config.manager_role, "m1");
        // Empty values are ignored.
        assert_eq!(config.teacher_role, "1464013335367389318");
    }

    #[test]
    fn invalid_port_is_an_error() {
        let vars = env(&[("PORT", "eighty")]);
        let mut config = TrainerConfig::default();
        let err = config.apply_overrides(|k| vars.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("invalid PORT"));
    }
}
