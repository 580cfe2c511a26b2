//! `tasklink links` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::links::LinkFile;

/// Execute the `links` command.
///
/// Prints a table of links, or the stored record as JSON with `json`.
///
/// # Errors
///
/// Returns an error string if the store cannot be serialized.
pub fn run(ctx: &ServiceContext, config: &Config, json: bool) -> Result<(), String> {
    let store = LinkFile::new(ctx, &config.links_file).load();

    if json {
        let out = store.to_json().map_err(|e| format!("Failed to serialize links: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    if store.is_empty() {
        println!("No links found.");
        return Ok(());
    }

    let rows: Vec<(String, &str, String, &str)> = store
        .links()
        .iter()
        .map(|link| {
            (
                format!("A-{}", link.a_id),
                link.b_id.as_str(),
                link.linked_at.format("%Y-%m-%d %H:%M").to_string(),
                if link.auto_linked { "auto" } else { "manual" },
            )
        })
        .collect();

    let a_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(8).max(8);
    let b_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(5).max(5);
    let at_width = rows.iter().map(|r| r.2.len()).max().unwrap_or(9).max(9);

    println!("{:<a_width$}  {:<b_width$}  {:<at_width$}  SOURCE", "PLANNING", "BEADS", "LINKED AT");
    println!("{:-<a_width$}  {:-<b_width$}  {:-<at_width$}  ------", "", "", "");
    for (a, b, at, source) in &rows {
        println!("{a:<a_width$}  {b:<b_width$}  {at:<at_width$}  {source}");
    }

    println!("\n{} link(s) total.", rows.len());
    Ok(())
}
