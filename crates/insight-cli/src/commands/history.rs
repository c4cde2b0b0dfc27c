use super::utils::{build_usecase, print_record, to_anyhow};
use anyhow::Result;
use colored::Colorize;

pub async fn list() -> Result<()> {
    let usecase = build_usecase()?;
    let entries = usecase.load_history().await.map_err(to_anyhow)?;

    if entries.is_empty() {
        println!("No saved research yet.");
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{}  {}  {}",
            entry.id.cyan(),
            entry.created_at.dimmed(),
            entry.title.bold()
        );
        println!("    {}", entry.company_names().join(", "));
    }

    Ok(())
}

pub async fn show(id: &str) -> Result<()> {
    let usecase = build_usecase()?;
    usecase.load_history().await.map_err(to_anyhow)?;
    let records = usecase.select_history_entry(id).await.map_err(to_anyhow)?;

    for (index, record) in records.iter().enumerate() {
        print_record(index, record);
    }

    Ok(())
}

pub async fn delete(id: &str) -> Result<()> {
    let usecase = build_usecase()?;
    usecase.load_history().await.map_err(to_anyhow)?;
    usecase.delete_history_entry(id).await.map_err(to_anyhow)?;

    println!("🗑️  Deleted {}", id.cyan());
    Ok(())
}
