use std::fmt;

/// Error types shared by the webstack tools
#[derive(Debug)]
pub enum WebstackError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// YAML (de)serialization error
    Yaml(serde_yaml::Error),

    /// JSON serialization error
    Json(serde_json::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// File not found error
    FileNotFound(String),

    /// Dataset does not have the expected shape
    Parse(String),

    /// Interactive prompt error
    Prompt(dialoguer::Error),
}

impl fmt::Display for WebstackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebstackError::Io(err) => write!(f, "IO error: {err}"),
            WebstackError::Config(msg) => write!(f, "Configuration error: {msg}"),
            WebstackError::Http(err) => write!(f, "HTTP error: {err}"),
            WebstackError::Yaml(err) => write!(f, "YAML error: {err}"),
            WebstackError::Json(err) => write!(f, "JSON error: {err}"),
            WebstackError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            WebstackError::FileNotFound(path) => write!(f, "File not found: {path}"),
            WebstackError::Parse(msg) => write!(f, "Parse error: {msg}"),
            WebstackError::Prompt(err) => write!(f, "Prompt error: {err}"),
        }
    }
}

impl std::error::Error for WebstackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WebstackError::Io(err) => Some(err),
            WebstackError::Http(err) => Some(err),
            WebstackError::Yaml(err) => Some(err),
            WebstackError::Json(err) => Some(err),
            WebstackError::TomlParsing(err) => Some(err),
            WebstackError::Prompt(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WebstackError {
    fn from(err: std::io::Error) -> Self {
        WebstackError::Io(err)
    }
}

impl From<reqwest::Error> for WebstackError {
    fn from(err: reqwest::Error) -> Self {
        WebstackError::Http(err)
    }
}

impl From<serde_yaml::Error> for WebstackError {
    fn from(err: serde_yaml::Error) -> Self {
        WebstackError::Yaml(err)
    }
}

impl From<serde_json::Error> for WebstackError {
    fn from(err: serde_json::Error) -> Self {
        WebstackError::Json(err)
    }
}

impl From<toml::de::Error> for WebstackError {
    fn from(err: toml::de::Error) -> Self {
        WebstackError::TomlParsing(err)
    }
}

impl From<dialoguer::Error> for WebstackError {
    fn from(err: dialoguer::Error) -> Self {
        WebstackError::Prompt(err)
    }
}

/// Type alias for Results using WebstackError
pub type Result<T> = std::result::Result<T, WebstackError>;
