use routinec_common::types::ServerFlavor;

#[derive(Debug, Clone, Default)]
pub struct CompilerConfig {
    /// Selects the set of data types accepted for parameters and return values.
    pub flavor: ServerFlavor,
}

impl CompilerConfig {
    pub fn new(flavor: ServerFlavor) -> Self {
        Self { flavor }
    }
}
