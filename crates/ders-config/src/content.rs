use serde::{Deserialize, Serialize};

fn default_embedded() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ContentConfig {
    /// Load the catalogue compiled into the binary. When false the store
    /// starts empty and holds only what `additional_paths` provide.
    #[serde(default = "default_embedded")]
    pub embedded: bool,
    /// Extra catalogue files or directories, merged over the embedded one in order
    #[serde(default)]
    pub additional_paths: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            embedded: default_embedded(),
            additional_paths: vec![],
        }
    }
}
