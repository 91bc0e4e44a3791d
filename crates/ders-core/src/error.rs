use ders_types::ModuleId;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Module {0} not found")]
    NotFound(ModuleId),

    #[error("Module {0} is defined more than once")]
    DuplicateModule(ModuleId),

    #[error("Invalid module number: {0:?}")]
    InvalidModuleId(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
