#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Binary arithmetic operators allowed in score expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

/// A parsed score expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An integer literal
    Int(i64),
    /// A literal with a fractional part
    Decimal(f64),
    /// The item's maximum score
    Max,
    /// Unary minus
    Neg(Box<Expr>),
    /// A binary operation
    Binary(Box<Expr>, BinOp, Box<Expr>),
}

impl Expr {
    /// Shorthand for building a [`Expr::Binary`] node.
    fn binary(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        Expr::Binary(Box::new(lhs), op, Box::new(rhs))
    }
}

peg::parser! {
    /// grammar for the `%expr` form of score entry
    pub grammar parser() for str {
        /// matches any number of blanks
        rule _() = quiet!{[' ' | '\t']*}

        /// matches a run of digits
        rule digits() = ['0'..='9']+

        /// matches a literal with a decimal point, eg. `0.75` or `.5`
        rule decimal() -> Expr
            = n:$(['0'..='9']* "." digits()) {? n.parse().map(Expr::Decimal).or(Err("decimal")) }

        /// matches an integer literal
        rule integer() -> Expr
            = n:$(digits()) {? n.parse().map(Expr::Int).or(Err("integer that fits in 64 bits")) }

        /// matches the `max` identifier, but not a longer identifier starting with it
        rule max() -> Expr
            = "max" !['a'..='z' | 'A'..='Z' | '0'..='9' | '_'] { Expr::Max }

        /// operators by increasing binding strength
        rule arithmetic() -> Expr = precedence!{
            x:(@) _ "+" _ y:@ { Expr::binary(x, BinOp::Add, y) }
            x:(@) _ "-" _ y:@ { Expr::binary(x, BinOp::Sub, y) }
            --
            x:(@) _ "*" _ y:@ { Expr::binary(x, BinOp::Mul, y) }
            x:(@) _ "/" _ y:@ { Expr::binary(x, BinOp::Div, y) }
            --
            "-" _ x:@ { Expr::Neg(Box::new(x)) }
            "+" _ x:@ { x }
            --
            n:decimal() { n }
            n:integer() { n }
            m:max() { m }
            "(" _ e:arithmetic() _ ")" { e }
        }

        /// parses a complete score expression
        pub rule expression() -> Expr
            = _ e:arithmetic() _ { e }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplication_binds_tighter_than_subtraction() {
        let parsed = parser::expression("max - 2 * 3").unwrap();
        assert_eq!(
            parsed,
            Expr::binary(
                Expr::Max,
                BinOp::Sub,
                Expr::binary(Expr::Int(2), BinOp::Mul, Expr::Int(3))
            )
        );
    }

    #[test]
    fn parses_decimals_and_parentheses() {
        let parsed = parser::expression("(max + 1) * .5").unwrap();
        assert_eq!(
            parsed,
            Expr::binary(
                Expr::binary(Expr::Max, BinOp::Add, Expr::Int(1)),
                BinOp::Mul,
                Expr::Decimal(0.5)
            )
        );
    }

    #[test]
    fn rejects_anything_but_arithmetic() {
        for input in ["", "maximum", "__import__('os')", "max +", "2 ** 3", "len(max)"] {
            assert!(parser::expression(input).is_err(), "accepted `{input}`");
        }
    }
}
