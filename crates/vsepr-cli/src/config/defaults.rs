pub struct DefaultsConfig {
    pub include_hydrogens: bool,
    pub smiles_column: String,
    pub target_column: String,
    pub drop_duplicates: bool,
    pub align: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            include_hydrogens: false,
            smiles_column: "smiles".to_string(),
            target_column: "target".to_string(),
            drop_duplicates: true,
            align: true,
        }
    }
}
