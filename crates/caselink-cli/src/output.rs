//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use caselink_domain::{Link, LinkStrength, LinkTypeSummary, Presentation, StrengthTier};
use caselink_query::{Neighborhood, Page};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format one page of links.
    pub fn format_links(&self, page: &Page<Link>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let links: Vec<serde_json::Value> = page
                    .items
                    .iter()
                    .map(|l| {
                        serde_json::json!({
                            "id": l.id.value(),
                            "case1": l.pair.first().value(),
                            "case2": l.pair.second().value(),
                            "link_type": l.link_type.as_str(),
                            "link_strength": l.strength.value(),
                            "tier": l.tier().as_str(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "items": links,
                    "total_count": page.total_count,
                    "total_pages": page.total_pages,
                    "page": page.page,
                    "page_size": page.page_size,
                }))?)
            }
            OutputFormat::Quiet => Ok(page
                .items
                .iter()
                .map(|l| l.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let footer = format!(
                    "Page {} of {} ({} link(s))",
                    page.page, page.total_pages, page.total_count
                );
                if page.items.is_empty() {
                    return Ok(format!("{}\n{}", self.colorize("No links found.", "yellow"), footer));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Case 1", "Case 2", "Type", "Strength", "Tier"]);
                for link in &page.items {
                    builder.push_record([
                        link.id.to_string(),
                        link.pair.first().to_string(),
                        link.pair.second().to_string(),
                        link.link_type.to_string(),
                        self.strength(link.strength),
                        link.tier().as_str().to_string(),
                    ]);
                }
                Ok(format!("{}\n{}", self.table(builder), footer))
            }
        }
    }

    /// Format a per-type summary.
    pub fn format_summary(&self, summaries: &[LinkTypeSummary]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = summaries
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "link_type": s.link_type.as_str(),
                            "count": s.count,
                            "avg_strength": s.avg_strength,
                            "tiers": {
                                "severe": s.tiers.severe,
                                "medium": s.tiers.medium,
                                "normal": s.tiers.normal,
                            },
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            OutputFormat::Quiet => Ok(summaries
                .iter()
                .map(|s| format!("{} {}", s.link_type, s.count))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if summaries.is_empty() {
                    return Ok(self.colorize("No links found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Type", "Count", "Avg strength", "Severe", "Medium", "Normal"]);
                for s in summaries {
                    // Remote summaries carry no tier breakdown
                    let tiered = s.tiers.total() == s.count;
                    let tier_cell = |n: usize| if tiered { n.to_string() } else { "-".to_string() };
                    builder.push_record([
                        s.link_type.to_string(),
                        s.count.to_string(),
                        format!("{:.3}", s.avg_strength),
                        tier_cell(s.tiers.severe),
                        tier_cell(s.tiers.medium),
                        tier_cell(s.tiers.normal),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format an assembled neighborhood.
    pub fn format_neighborhood(&self, view: &Neighborhood) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let nodes: Vec<serde_json::Value> = view
                    .nodes
                    .iter()
                    .map(|n| {
                        let presentation = n.presentation();
                        serde_json::json!({
                            "id": n.id.to_string(),
                            "kind": n.kind().as_str(),
                            "label": n.label(),
                            "role": n.role().map(|r| r.as_str()),
                            "icon": presentation.icon.as_str(),
                            "color": presentation.color,
                        })
                    })
                    .collect();
                let edges: Vec<serde_json::Value> = view
                    .edges
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "source": e.source.to_string(),
                            "target": e.target.to_string(),
                            "kind": e.kind.as_str(),
                            "strength": e.strength.map(|s| s.value()),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "focal": view.focal.to_string(),
                    "truncated": view.truncated,
                    "nodes": nodes,
                    "edges": edges,
                }))?)
            }
            OutputFormat::Quiet => Ok(view
                .nodes
                .iter()
                .map(|n| n.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut nodes = Builder::default();
                nodes.push_record(["Node", "Kind", "Label", "Icon", "Color"]);
                for node in &view.nodes {
                    let presentation = node.presentation();
                    let id = if node.id == view.focal {
                        format!("{} *", node.id)
                    } else {
                        node.id.to_string()
                    };
                    nodes.push_record([
                        id,
                        node.kind().to_string(),
                        node.label(),
                        presentation.icon.to_string(),
                        presentation.color,
                    ]);
                }

                let mut output = self.table(nodes);
                if !view.edges.is_empty() {
                    let mut edges = Builder::default();
                    edges.push_record(["Source", "Target", "Kind", "Strength"]);
                    for edge in &view.edges {
                        edges.push_record([
                            edge.source.to_string(),
                            edge.target.to_string(),
                            edge.kind.to_string(),
                            edge.strength.map(|s| self.strength(s)).unwrap_or_default(),
                        ]);
                    }
                    output.push('\n');
                    output.push_str(&self.table(edges));
                }

                output.push('\n');
                output.push_str(&view.summary());
                if view.truncated {
                    output.push('\n');
                    output.push_str(&self.warning("Node limit reached; raise [graph] max_nodes to see more"));
                }
                Ok(output)
            }
        }
    }

    /// Format a resolved presentation token.
    pub fn format_presentation(&self, kind: &str, presentation: &Presentation) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "kind": kind,
                "icon": presentation.icon.as_str(),
                "color": presentation.color,
            }))?),
            OutputFormat::Quiet => Ok(presentation.icon.to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Kind", "Icon", "Color"]);
                builder.push_record([kind.to_string(), presentation.icon.to_string(), presentation.color.clone()]);
                Ok(self.table(builder))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Render a strength, colored by tier.
    fn strength(&self, strength: LinkStrength) -> String {
        let text = strength.to_string();
        match StrengthTier::classify(strength) {
            StrengthTier::Severe => self.colorize(&text, "red"),
            StrengthTier::Medium => self.colorize(&text, "yellow"),
            StrengthTier::Normal => text,
        }
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
