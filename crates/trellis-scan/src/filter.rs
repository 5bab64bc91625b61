//! Exclusion filters applied while the graph is being discovered
//!
//! A matching filter removes its candidate before it reaches the graph, so
//! excluded subtrees are never scanned at all.

use crate::error::ScanError;

/// Prefix token marking a negated filter term.
pub const NEGATION: &str = "NOT ";

/// A single substring term, optionally negated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub pattern: String,
    pub negated: bool,
}

impl Filter {
    pub fn parse(term: &str) -> Self {
        match term.strip_prefix(NEGATION) {
            Some(rest) => Filter {
                pattern: rest.to_string(),
                negated: true,
            },
            None => Filter {
                pattern: term.to_string(),
                negated: false,
            },
        }
    }

    /// Whether this exclusion term removes the given normalized path.
    pub fn excludes(&self, path: &str) -> bool {
        let contains = path.contains(&self.pattern);
        if self.negated { !contains } else { contains }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "{NEGATION}{}", self.pattern)
        } else {
            write!(f, "{}", self.pattern)
        }
    }
}

/// An edge exclusion; removes an edge when both sides match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeFilter {
    pub from: Filter,
    pub to: Filter,
}

impl EdgeFilter {
    pub fn excludes(&self, from: &str, to: &str) -> bool {
        self.from.excludes(from) && self.to.excludes(to)
    }
}

impl std::fmt::Display for EdgeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=>{}", self.from, self.to)
    }
}

/// Compiled node and edge filters for one scan.
#[derive(Debug, Clone, Default)]
pub struct ScanFilters {
    pub node_filters: Vec<Filter>,
    pub edge_filters: Vec<EdgeFilter>,
}

impl ScanFilters {
    /// Parse user-supplied terms. A missing `=>` separator is fatal.
    pub fn parse(node_terms: &[String], edge_terms: &[String]) -> Result<Self, ScanError> {
        let node_filters = node_terms.iter().map(|t| Filter::parse(t)).collect();
        let mut edge_filters = Vec::with_capacity(edge_terms.len());
        for term in edge_terms {
            let Some((from, to)) = term.split_once("=>") else {
                return Err(ScanError::MalformedEdgeFilter(term.clone()));
            };
            edge_filters.push(EdgeFilter {
                from: Filter::parse(from),
                to: Filter::parse(to),
            });
        }
        Ok(ScanFilters {
            node_filters,
            edge_filters,
        })
    }

    /// Whether any node term excludes this path.
    pub fn excludes_node(&self, path: &str) -> bool {
        self.node_filters.iter().any(|f| f.excludes(path))
    }

    /// The first edge term excluding this pair, if any.
    pub fn excluding_edge_filter(&self, from: &str, to: &str) -> Option<&EdgeFilter> {
        self.edge_filters.iter().find(|f| f.excludes(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_term_excludes_by_substring() {
        let f = Filter::parse("secret");
        assert!(f.excludes("src/secret/b.ts"));
        assert!(!f.excludes("src/open/b.ts"));
    }

    #[test]
    fn negated_term_excludes_non_matches() {
        let f = Filter::parse("NOT core");
        assert!(f.negated);
        assert!(!f.excludes("core/a.ts"));
        assert!(f.excludes("util/b.ts"));
    }

    #[test]
    fn edge_filter_needs_both_sides() {
        let filters =
            ScanFilters::parse(&[], &["mid=>leaf".to_string()]).unwrap();
        assert!(filters.excluding_edge_filter("src/mid.ts", "leafs/leaf.ts").is_some());
        assert!(filters.excluding_edge_filter("src/mid.ts", "other.ts").is_none());
        assert!(filters.excluding_edge_filter("start.ts", "leafs/leaf.ts").is_none());
    }

    #[test]
    fn missing_separator_is_fatal() {
        let err = ScanFilters::parse(&[], &["mid-leaf".to_string()]).unwrap_err();
        assert!(matches!(err, ScanError::MalformedEdgeFilter(_)));
    }
}
