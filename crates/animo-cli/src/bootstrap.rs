use animo_config::AnimoConfig;

/// Load layered configuration after reading `.env`, searched upward from the
/// crate manifest directory, then from the current directory.
pub fn load_config() -> anyhow::Result<AnimoConfig> {
    AnimoConfig::load_with_dotenv().map_err(anyhow::Error::from)
}
