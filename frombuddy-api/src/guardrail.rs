//! Guardrail filter
//!
//! Screens a query for personal identifier terms before any model call is made.
//! Matching is a case-insensitive substring test, not tokenized: a query that
//! contains a term anywhere is blocked, false positives included.

/// Identifier terms that are always blocked
pub const BLOCKED_TERMS: &[&str] = &[
    "aadhaar number",
    "pan number",
    "passport number",
    "voter id",
];

/// Refusal returned to the caller when a query is blocked
pub const REFUSAL_MESSAGE: &str =
    "GUARDRAIL ALERT: Request refused. Please do not share personal identity numbers.";

/// Result of screening one query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Blocked { reason: &'static str },
}

impl Verdict {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Verdict::Blocked { .. })
    }
}

/// Immutable set of blocked terms, built once at startup
#[derive(Debug, Clone)]
pub struct Guardrail {
    terms: Vec<String>,
}

impl Default for Guardrail {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl Guardrail {
    /// Build the filter from the built-in terms plus `extra_terms`
    ///
    /// Terms are lower-cased; blank terms are dropped since they would match
    /// every query.
    pub fn new(extra_terms: &[String]) -> Self {
        let mut terms: Vec<String> = BLOCKED_TERMS
            .iter()
            .map(|t| t.to_string())
            .chain(
                extra_terms
                    .iter()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty()),
            )
            .collect();
        terms.sort();
        terms.dedup();

        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Screen `query`
    pub fn check(&self, query: &str) -> Verdict {
        let lowered = query.to_lowercase();
        if self.terms.iter().any(|term| lowered.contains(term.as_str())) {
            Verdict::Blocked {
                reason: REFUSAL_MESSAGE,
            }
        } else {
            Verdict::Allowed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_every_builtin_term_in_any_case() {
        let guardrail = Guardrail::default();
        for term in BLOCKED_TERMS {
            let variants = [
                term.to_string(),
                term.to_uppercase(),
                format!("please check my {} for me", term),
                term.chars()
                    .enumerate()
                    .map(|(i, c)| if i % 2 == 0 { c.to_ascii_uppercase() } else { c })
                    .collect::<String>(),
            ];
            for query in variants {
                assert!(guardrail.check(&query).is_blocked(), "should block: {}", query);
            }
        }
    }

    #[test]
    fn test_blocked_query_scenario() {
        let guardrail = Guardrail::default();
        assert_eq!(
            guardrail.check("what is my aadhaar number"),
            Verdict::Blocked {
                reason: REFUSAL_MESSAGE
            }
        );
    }

    #[test]
    fn test_allows_procedure_queries() {
        let guardrail = Guardrail::default();
        assert_eq!(guardrail.check("How to apply for Passport"), Verdict::Allowed);
        assert_eq!(guardrail.check("How do I link PAN with Aadhaar?"), Verdict::Allowed);
        assert_eq!(guardrail.check("voter registration"), Verdict::Allowed);
    }

    #[test]
    fn test_empty_query_is_allowed() {
        assert_eq!(Guardrail::default().check(""), Verdict::Allowed);
    }

    #[test]
    fn test_substring_match_includes_false_positives() {
        // "japan number plate" contains "pan number"
        assert!(Guardrail::default().check("Japan number plate rules").is_blocked());
    }

    #[test]
    fn test_repeated_checks_are_identical() {
        let guardrail = Guardrail::default();
        let first = guardrail.check("Voter ID lookup");
        let second = guardrail.check("Voter ID lookup");
        assert!(first.is_blocked());
        assert_eq!(first, second);
    }

    #[test]
    fn test_extra_terms() {
        let guardrail = Guardrail::new(&["  Bank Account Number ".to_string(), "   ".to_string()]);
        assert!(guardrail.check("share my bank account number").is_blocked());
        assert_eq!(guardrail.terms().len(), BLOCKED_TERMS.len() + 1);
        assert_eq!(guardrail.check("open a bank account"), Verdict::Allowed);
    }
}
