//! Links command implementation.

use crate::backend::Backend;
use crate::cli::LinksArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use caselink_domain::Link;
use caselink_query::{LinkFilter, LinkQueryEngine, Page};

/// Execute the links command.
///
/// Returns the page shown so the REPL can step to its neighbors.
pub async fn execute_links(
    args: &LinksArgs,
    backend: &Backend,
    config: &Config,
    formatter: &Formatter,
) -> Result<Page<Link>> {
    let filter = filter_from(args);
    let page_size = args.page_size.unwrap_or(config.query.default_page_size);
    let engine = LinkQueryEngine::new(config.query);

    let page = backend.list_links(&engine, &filter, args.page, page_size).await?;
    println!("{}", formatter.format_links(&page)?);
    Ok(page)
}

/// Build the raw filter from command arguments.
pub fn filter_from(args: &LinksArgs) -> LinkFilter {
    LinkFilter {
        link_type: args.link_type.clone(),
        min_strength: args.min_strength,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_args() {
        let args = LinksArgs {
            link_type: Some("EVIDENCE".to_string()),
            min_strength: Some(0.5),
            ..Default::default()
        };
        let query = filter_from(&args).validate().unwrap();
        assert_eq!(query.link_type, Some(caselink_domain::LinkType::Evidence));
    }
}
