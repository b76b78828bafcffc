//! Default query operator (`q.op`).

use crate::builder::ParameterBuilder;
use crate::error::QueryError;
use solr_search_config::TypoScriptConfiguration;
use solr_search_domain::{FacetOperator, QueryParameters};

const PARAMETER: &str = "q.op";

/// `q.op`, either `AND` or `OR`; disabled removes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Operator {
    operator: Option<FacetOperator>,
}

impl Operator {
    /// Parse an operator literal. Only `AND` and `OR` are accepted.
    pub fn new(literal: &str) -> Result<Self, QueryError> {
        let operator = match literal.trim() {
            "AND" => FacetOperator::And,
            "OR" => FacetOperator::Or,
            other => {
                return Err(QueryError::InvalidOperator {
                    value: other.to_owned(),
                });
            },
        };
        Ok(Self {
            operator: Some(operator),
        })
    }

    /// `q.op=AND`
    #[must_use]
    pub const fn and() -> Self {
        Self {
            operator: Some(FacetOperator::And),
        }
    }

    /// `q.op=OR`
    #[must_use]
    pub const fn or() -> Self {
        Self {
            operator: Some(FacetOperator::Or),
        }
    }

    /// No operator; `q.op` is removed.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { operator: None }
    }

    /// Read `search.query.operator` (optional).
    pub fn from_configuration(configuration: &TypoScriptConfiguration) -> Result<Self, QueryError> {
        configuration
            .non_empty_string_by_path("search.query.operator")
            .map_or_else(|| Ok(Self::disabled()), |literal| Self::new(&literal))
    }

    /// Returns true when `q.op` is set.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.operator.is_some()
    }
}

impl ParameterBuilder for Operator {
    fn name(&self) -> &'static str {
        "operator"
    }

    fn build(&self, parameters: &mut QueryParameters) {
        match self.operator {
            Some(operator) => {
                parameters.set(PARAMETER, operator.as_str());
            },
            None => {
                parameters.remove(PARAMETER);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn accepts_only_and_or() -> Result<(), Box<dyn Error>> {
        assert_eq!(Operator::new("AND")?, Operator::and());
        assert_eq!(Operator::new(" OR ")?, Operator::or());
        assert_eq!(
            Operator::new("XOR"),
            Err(QueryError::InvalidOperator {
                value: "XOR".to_owned()
            })
        );
        assert!(Operator::new("and").is_err());
        Ok(())
    }

    #[test]
    fn disabled_operator_removes_parameter() {
        let mut parameters = QueryParameters::new();
        Operator::or().build(&mut parameters);
        assert_eq!(parameters.get_str("q.op"), Some("OR"));

        Operator::disabled().build(&mut parameters);
        assert!(!parameters.contains("q.op"));
    }
}
