// AST (Abstract Syntax Tree) definitions for integer expressions

use std::fmt;
use std::mem;

/// Source position of a token or node
///
/// Both fields are 1-indexed. A newline advances `line` and resets `column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expression tree produced by the parser
///
/// Each `Binary` node owns its operands outright, so the tree can neither
/// share subtrees nor contain cycles.
///
/// Left-associative chains build left-deep trees as deep as the chain is
/// long, so rendering and dropping walk the tree with an explicit stack
/// instead of recursing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal {
        value: i64,
        position: Position,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        position: Position, // leftmost operand's position
    },
}

impl Expr {
    pub fn literal(value: i64, position: Position) -> Self {
        Expr::Literal { value, position }
    }

    /// Fold `left op right` into a new node positioned at `left`.
    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        let position = left.position();
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
            position,
        }
    }

    /// Get the source position of this node
    pub fn position(&self) -> Position {
        match self {
            Expr::Literal { position, .. } => *position,
            Expr::Binary { position, .. } => *position,
        }
    }
}

/// Fully parenthesized rendering: `(left op right)` for binary nodes, bare
/// digits for literals.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Render<'a> {
            Node(&'a Expr),
            Op(BinaryOp),
            Close,
        }

        let mut work = vec![Render::Node(self)];
        while let Some(item) = work.pop() {
            match item {
                Render::Node(Expr::Literal { value, .. }) => write!(f, "{}", value)?,
                Render::Node(Expr::Binary {
                    left, op, right, ..
                }) => {
                    f.write_str("(")?;
                    work.push(Render::Close);
                    work.push(Render::Node(right));
                    work.push(Render::Op(*op));
                    work.push(Render::Node(left));
                }
                Render::Op(op) => write!(f, " {} ", op)?,
                Render::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_binary_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_binary_children(&mut node, &mut pending);
        }
    }
}

/// Move any `Binary` children of `expr` onto `pending`, leaving leaves behind,
/// so that dropping `expr` itself never recurses.
fn detach_binary_children(expr: &mut Expr, pending: &mut Vec<Expr>) {
    if let Expr::Binary { left, right, .. } = expr {
        for child in [left, right] {
            if matches!(**child, Expr::Binary { .. }) {
                let leaf = Expr::literal(0, child.position());
                pending.push(mem::replace(&mut **child, leaf));
            }
        }
    }
}
