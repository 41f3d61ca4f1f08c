//! Expression Constraint Language (ECL) builder.
//!
//! A small structured representation of the ECL subset needed to select
//! product generalizations: ancestor operators, dotted attribute navigation,
//! disjunction and attribute refinements with cardinality. Rendering through
//! [`Display`](std::fmt::Display) produces compact ECL text; URL encoding is
//! left to the transport.
//!
//! # Examples
//!
//! ```
//! use snomed_types::ecl::{Attribute, EclExpression};
//!
//! let expr = EclExpression::concept("322236009")
//!     .ancestors()
//!     .refine(vec![Attribute::any(1142139005), Attribute::absent(732943007)]);
//!
//! assert_eq!(expr.to_string(), ">322236009:1142139005=*,[0..0]732943007=*");
//! ```

use std::fmt;

use crate::SctId;

/// Cardinality constraint on an attribute in a refinement, rendered as `[min..max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cardinality {
    /// Minimum occurrences (inclusive).
    pub min: u32,
    /// Maximum occurrences (inclusive). None means unbounded (*).
    pub max: Option<u32>,
}

impl Cardinality {
    /// Creates a new cardinality with explicit min and max.
    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// The attribute must not occur at all (`[0..0]`).
    pub const fn absent() -> Self {
        Self {
            min: 0,
            max: Some(0),
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}..{}]", self.min, max),
            None => write!(f, "[{}..*]", self.min),
        }
    }
}

/// Value side of an attribute constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Any value (`*`).
    Any,
    /// Values matching a nested expression.
    Expression(Box<EclExpression>),
}

/// A single `[cardinality]type=value` constraint inside a refinement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Optional cardinality prefix.
    pub cardinality: Option<Cardinality>,
    /// Attribute type concept.
    pub type_id: SctId,
    /// Constrained value.
    pub value: AttributeValue,
}

impl Attribute {
    /// `type=*`: the attribute is present with any value.
    pub fn any(type_id: SctId) -> Self {
        Self {
            cardinality: None,
            type_id,
            value: AttributeValue::Any,
        }
    }

    /// `[0..0]type=*`: the attribute is absent.
    pub fn absent(type_id: SctId) -> Self {
        Self {
            cardinality: Some(Cardinality::absent()),
            type_id,
            value: AttributeValue::Any,
        }
    }

    /// `type=expression`: the attribute value must match `expression`.
    pub fn matching(type_id: SctId, expression: EclExpression) -> Self {
        Self {
            cardinality: None,
            type_id,
            value: AttributeValue::Expression(Box::new(expression)),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(cardinality) = &self.cardinality {
            write!(f, "{cardinality}")?;
        }
        write!(f, "{}=", self.type_id)?;
        match &self.value {
            AttributeValue::Any => f.write_str("*"),
            AttributeValue::Expression(expr) => write!(f, "{expr}"),
        }
    }
}

/// A constraint expression.
///
/// Parenthesization is explicit through [`EclExpression::Nested`]; rendering
/// never inserts brackets on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EclExpression {
    /// A single concept reference.
    Concept(String),
    /// Strict ancestors of the inner expression (`>`).
    AncestorsOf(Box<EclExpression>),
    /// Attribute values reached from the inner expression (`expr.type`).
    Dot(Box<EclExpression>, SctId),
    /// Union of the operands (`a OR b`).
    Or(Vec<EclExpression>),
    /// Focus constrained by comma-joined attributes (`focus:a,b`).
    Refined {
        /// Concepts being constrained.
        focus: Box<EclExpression>,
        /// Attribute constraints, all of which must hold.
        refinement: Vec<Attribute>,
    },
    /// Parenthesized sub-expression.
    Nested(Box<EclExpression>),
}

impl EclExpression {
    /// A concept reference.
    pub fn concept(id: impl fmt::Display) -> Self {
        Self::Concept(id.to_string())
    }

    /// Strict ancestors of `self`.
    pub fn ancestors(self) -> Self {
        Self::AncestorsOf(Box::new(self))
    }

    /// Follows `attribute` from `self`.
    pub fn dot(self, attribute: SctId) -> Self {
        Self::Dot(Box::new(self), attribute)
    }

    /// Wraps `self` in parentheses.
    pub fn nested(self) -> Self {
        Self::Nested(Box::new(self))
    }

    /// Constrains `self` with the given attributes.
    pub fn refine(self, refinement: Vec<Attribute>) -> Self {
        Self::Refined {
            focus: Box::new(self),
            refinement,
        }
    }

    /// Union of the given expressions.
    pub fn any_of(operands: Vec<EclExpression>) -> Self {
        Self::Or(operands)
    }
}

impl fmt::Display for EclExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concept(id) => f.write_str(id),
            Self::AncestorsOf(inner) => write!(f, ">{inner}"),
            Self::Dot(inner, attribute) => write!(f, "{inner}.{attribute}"),
            Self::Or(operands) => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" OR ")?;
                    }
                    write!(f, "{operand}")?;
                }
                Ok(())
            }
            Self::Refined { focus, refinement } => {
                write!(f, "{focus}:")?;
                for (i, attribute) in refinement.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{attribute}")?;
                }
                Ok(())
            }
            Self::Nested(inner) => write!(f, "({inner})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_display() {
        assert_eq!(Cardinality::absent().to_string(), "[0..0]");
        assert_eq!(Cardinality::new(1, None).to_string(), "[1..*]");
        assert_eq!(Cardinality::new(1, Some(3)).to_string(), "[1..3]");
    }

    #[test]
    fn test_dot_chain_with_nesting() {
        let expr = EclExpression::concept("10")
            .dot(762949000)
            .nested()
            .dot(738774007)
            .nested();
        assert_eq!(expr.to_string(), "((10.762949000).738774007)");
    }

    #[test]
    fn test_or_and_nested_refinement_value() {
        let substances = EclExpression::any_of(vec![
            EclExpression::concept("1").nested(),
            EclExpression::concept("2").nested(),
        ])
        .nested()
        .refine(vec![Attribute::absent(738774007)])
        .nested();

        let expr = EclExpression::concept("5")
            .ancestors()
            .refine(vec![Attribute::matching(127489000, substances)]);

        assert_eq!(
            expr.to_string(),
            ">5:127489000=(((1) OR (2)):[0..0]738774007=*)"
        );
    }

    #[test]
    fn test_refinement_order_is_preserved() {
        let expr = EclExpression::concept("5").refine(vec![
            Attribute::absent(3),
            Attribute::any(1),
            Attribute::any(2),
        ]);
        assert_eq!(expr.to_string(), "5:[0..0]3=*,1=*,2=*");
    }
}
