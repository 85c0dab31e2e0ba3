//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::error::Result;
use crate::output::Formatter;
use caselink_domain::resolve;

/// Execute the resolve command.
pub fn execute_resolve(args: &ResolveArgs, formatter: &Formatter) -> Result<()> {
    let presentation = resolve(&args.kind, args.role.as_deref(), args.color.as_deref());
    println!("{}", formatter.format_presentation(&args.kind, &presentation)?);
    Ok(())
}
