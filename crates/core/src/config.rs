//! Generation options.

use serde::Deserialize;

use crate::ir::HttpMethod;

/// Knobs for one generation run. The default assembles everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateOptions {
    /// Name for the root declaration instead of the one derived from `info.title`.
    pub root_name: Option<String>,
    /// Methods to assemble; `None` means all of them.
    pub methods: Option<Vec<HttpMethod>>,
}

impl GenerateOptions {
    /// Whether operations under `method` should be assembled.
    pub fn includes(&self, method: HttpMethod) -> bool {
        self.methods
            .as_ref()
            .is_none_or(|methods| methods.contains(&method))
    }
}
