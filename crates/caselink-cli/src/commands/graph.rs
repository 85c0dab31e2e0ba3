//! Graph command implementation.

use crate::backend::Backend;
use crate::cli::GraphArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use caselink_query::GraphAssembler;

/// Execute the graph command.
///
/// Nothing is printed unless the whole neighborhood was assembled.
pub async fn execute_graph(
    args: &GraphArgs,
    backend: &Backend,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let assembler = GraphAssembler::new(config.graph);
    let view = backend
        .neighborhood(&assembler, args.kind.into(), args.id, args.depth)
        .await?;
    println!("{}", formatter.format_neighborhood(&view)?);
    Ok(())
}
