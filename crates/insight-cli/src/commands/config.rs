use super::utils::to_anyhow;
use anyhow::Result;
use insight_infrastructure::ConfigService;
use insight_infrastructure::paths::InsightPaths;

pub fn path() -> Result<()> {
    let paths = InsightPaths::default();
    let config = paths.config_file().map_err(|e| anyhow::anyhow!("{}", e))?;
    let history = paths.history_file().map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("config:  {}", config.display());
    println!("history: {}", history.display());
    Ok(())
}

pub fn show() -> Result<()> {
    let mut config = ConfigService::new()
        .and_then(|service| service.load())
        .map_err(to_anyhow)?;
    if config.service.api_key.is_some() {
        config.service.api_key = Some("********".to_string());
    }

    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
