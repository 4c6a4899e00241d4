//! Search command - nearest chunks for a free-text query

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use colored::Colorize;

use super::{ensure_store, truncate_display, Workspace};

const SNIPPET_WIDTH: usize = 100;

pub fn run(workspace: &Workspace, query: Option<String>, limit: Option<usize>, json: bool) -> Result<()> {
    let limit = limit.unwrap_or(workspace.config.default_limit);

    let engine = workspace.engine();
    ensure_store(engine.store(), json)?;

    let query = match query {
        Some(q) => q,
        None => prompt_query()?,
    };
    if query.trim().is_empty() {
        bail!("Query is empty");
    }

    let results = engine.search(&query, limit).context("Search failed")?;

    if json {
        let json_results: Vec<_> = results
            .iter()
            .map(|r| {
                serde_json::json!({
                    "chunk_id": r.chunk_id,
                    "file": r.file.display().to_string(),
                    "line_idx": r.line_idx,
                    "chunk_text": r.chunk_text,
                    "distance": r.distance,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{} No results found for: {}", "→".dimmed(), query.cyan());
        return Ok(());
    }

    println!(
        "{} {} results for: {}",
        "→".dimmed(),
        results.len(),
        query.cyan()
    );
    println!();

    for (i, result) in results.iter().enumerate() {
        println!(
            "{}. [{}] {}:{}",
            (i + 1).to_string().bold(),
            format!("{:.3}", result.distance).dimmed(),
            workspace.display_path(&result.file).to_string().cyan(),
            result.line_idx + 1
        );
        println!("   {}", truncate_display(&result.chunk_text, SNIPPET_WIDTH).dimmed());
        println!();
    }

    Ok(())
}

fn prompt_query() -> Result<String> {
    print!("{} ", "Query:".bold());
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read query from stdin")?;
    Ok(line.trim().to_string())
}
