use super::utils::{build_usecase, print_record, read_document, to_anyhow};
use anyhow::Result;
use colored::Colorize;
use insight_core::research::RawInputSet;
use std::path::PathBuf;

pub struct SubmitArgs {
    pub documents: Vec<PathBuf>,
    pub links: Vec<String>,
    pub products: Vec<String>,
    pub save: bool,
    pub title: Option<String>,
}

pub async fn run(args: SubmitArgs) -> Result<()> {
    let documents = args
        .documents
        .iter()
        .map(|path| read_document(path))
        .collect::<Result<Vec<_>>>()?;

    let input = RawInputSet {
        documents,
        blog_links: args.links,
        product_lines: args.products,
    };

    let usecase = build_usecase()?;

    println!("🔎 Submitting research for analysis...");
    let outcome = usecase.submit(&input).await.map_err(to_anyhow)?;

    if outcome.degraded {
        println!(
            "{}",
            "The service replied, but its analysis could not be read.".yellow()
        );
    }
    println!();
    for (index, record) in outcome.records.iter().enumerate() {
        print_record(index, record);
    }

    if args.save {
        let saved = usecase.save_results(args.title).await.map_err(to_anyhow)?;
        if saved.created {
            println!("\n✅ Saved to history as {}", saved.id.cyan());
        } else {
            println!("\n✅ Updated existing history entry {}", saved.id.cyan());
        }
    }

    Ok(())
}
