//! Page route matching.

use regex::Regex;

/// Paths rendered as pages: exact paths plus regular expressions.
#[derive(Debug, Clone, Default)]
pub struct Routes {
    exact: Vec<String>,
    patterns: Vec<Regex>,
}

impl Routes {
    /// Compile the route table. Patterns are anchored to the whole path.
    pub fn new(exact: &[String], patterns: &[String]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(&format!("^(?:{})$", p)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            exact: exact.to_vec(),
            patterns,
        })
    }

    /// Returns true if `path` is an app route.
    pub fn routed(&self, path: &str) -> bool {
        self.exact.iter().any(|p| p == path) || self.patterns.iter().any(|re| re.is_match(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routed() {
        let routes = Routes::new(
            &["/".to_string(), "/about".to_string()],
            &["/docs/[a-z-]+".to_string()],
        )
        .unwrap();

        assert!(routes.routed("/"));
        assert!(routes.routed("/about"));
        assert!(routes.routed("/docs/getting-started"));
        assert!(!routes.routed("/docs/getting-started/extra"));
        assert!(!routes.routed("/missing"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Routes::new(&[], &["(".to_string()]).is_err());
    }
}
