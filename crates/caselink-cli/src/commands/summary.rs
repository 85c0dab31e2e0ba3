//! Summary command implementation.

use crate::backend::Backend;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use caselink_query::LinkQueryEngine;

/// Execute the summary command.
pub async fn execute_summary(
    backend: &Backend,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let engine = LinkQueryEngine::new(config.query);
    let summaries = backend.summarize(&engine).await?;
    println!("{}", formatter.format_summary(&summaries)?);
    Ok(())
}
