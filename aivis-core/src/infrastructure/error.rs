// aivis-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(aivis::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / INPUT PARSING ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(aivis::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Parsing Error: {0}")]
    #[diagnostic(code(aivis::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(aivis::infra::config))]
    ConfigError(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(aivis::infra::validation),
        help("Run `aivis check` to see every rejected field.")
    )]
    Validation(#[from] validator::ValidationErrors),

    #[error("Input not found at '{0}'")]
    #[diagnostic(code(aivis::infra::input_missing))]
    InputNotFound(String),

    #[error("Unsupported input file '{0}'")]
    #[diagnostic(
        code(aivis::infra::unsupported_input),
        help("Page inputs must be .json, .yaml or .yml documents.")
    )]
    UnsupportedInput(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(code(aivis::infra::template))]
    TemplateError(#[from] minijinja::Error),
}
