use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("no command grammar registered for language `{0}`")]
    UnknownLanguage(String),

    #[error("not a command declaration: `{0}`")]
    NotCommandSyntax(String),

    #[error("command declaration has no name: `{0}`")]
    MissingName(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to render markdown")]
    Render(#[from] fmt::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
