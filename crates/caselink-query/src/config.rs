//! Configuration for link queries and graph assembly
//!
//! Both sections deserialize from TOML with every field optional; missing
//! fields take the documented defaults.

use serde::{Deserialize, Serialize};

/// Pagination limits for link listings
///
/// # Examples
///
/// ```
/// use caselink_query::QueryConfig;
///
/// let config = QueryConfig::default();
/// assert_eq!(config.default_page_size, 20);
/// assert_eq!(config.max_page_size, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Page size used when the caller does not pick one
    pub default_page_size: usize,

    /// Largest page size a caller may request
    pub max_page_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 500,
        }
    }
}

impl QueryConfig {
    /// Check that the limits are usable
    ///
    /// # Errors
    /// Returns error if a size is zero or the default exceeds the maximum
    pub fn validate(&self) -> Result<(), String> {
        if self.max_page_size == 0 {
            return Err("max_page_size must be at least 1".to_string());
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(format!(
                "default_page_size must be between 1 and {} (got {})",
                self.max_page_size, self.default_page_size
            ));
        }
        Ok(())
    }
}

/// Bounds for neighborhood assembly
///
/// # Examples
///
/// ```
/// use caselink_query::GraphConfig;
///
/// // Default: depth up to 3, clusters past 25 artifacts, 500 nodes
/// let config = GraphConfig::default();
///
/// // Strict: small views for constrained displays
/// let config = GraphConfig::strict();
///
/// // Exploratory: deep views for investigation sessions
/// let config = GraphConfig::exploratory();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Deepest expansion a caller may request
    pub max_depth: usize,

    /// Artifacts of one kind a case may show before they collapse into a cluster
    pub cluster_threshold: usize,

    /// Node ceiling; reaching it stops expansion and marks the view truncated
    pub max_nodes: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            cluster_threshold: 25,
            max_nodes: 500,
        }
    }
}

impl GraphConfig {
    /// Small views: depth 2, clusters past 10 artifacts, 200 nodes
    pub fn strict() -> Self {
        Self {
            max_depth: 2,
            cluster_threshold: 10,
            max_nodes: 200,
        }
    }

    /// Deep views: depth 5, clusters past 50 artifacts, 2000 nodes
    pub fn exploratory() -> Self {
        Self {
            max_depth: 5,
            cluster_threshold: 50,
            max_nodes: 2000,
        }
    }

    /// Check that the bounds are usable
    ///
    /// # Errors
    /// Returns error if the depth or node ceiling is zero
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("max_depth must be at least 1".to_string());
        }
        if self.max_nodes == 0 {
            return Err("max_nodes must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GraphConfig::default();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.cluster_threshold, 25);
        assert_eq!(config.max_nodes, 500);
        assert!(config.validate().is_ok());
        assert!(QueryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_bracket_default() {
        let default = GraphConfig::default();
        let strict = GraphConfig::strict();
        let exploratory = GraphConfig::exploratory();

        assert!(strict.max_depth < default.max_depth);
        assert!(strict.max_nodes < default.max_nodes);
        assert!(exploratory.max_depth > default.max_depth);
        assert!(exploratory.cluster_threshold > default.cluster_threshold);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let graph: GraphConfig = toml::from_str("max_depth = 4").unwrap();
        assert_eq!(graph.max_depth, 4);
        assert_eq!(graph.max_nodes, 500);

        let query: QueryConfig = toml::from_str("").unwrap();
        assert_eq!(query, QueryConfig::default());
    }

    #[test]
    fn test_invalid_limits() {
        let query = QueryConfig {
            default_page_size: 50,
            max_page_size: 10,
        };
        assert!(query.validate().is_err());

        let graph = GraphConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(graph.validate().is_err());
    }
}
