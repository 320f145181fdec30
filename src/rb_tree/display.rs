use core::fmt;

use super::{Color, NIL, RbTree};

/// Multi-line dump: a header line, then one line per node in pre-order,
/// indented two spaces per level, e.g. `  [R] 5 x2`. Nil children of a node
/// that has at least one real child are printed as `[B] nil`.
impl<T: fmt::Display> fmt::Display for RbTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RbTree [root=")?;
        if self.root == NIL {
            write!(f, "nil")?;
        } else {
            write!(f, "{}", self.node_at(self.root).key)?;
        }
        writeln!(
            f,
            ", size={}, number_of_nodes={}]",
            self.size, self.number_of_nodes
        )?;

        if self.root != NIL {
            self.fmt_subtree(f, self.root, 0)?;
        }
        Ok(())
    }
}

impl<T: fmt::Display> RbTree<T> {
    fn fmt_subtree(&self, f: &mut fmt::Formatter<'_>, idx: usize, offset: usize) -> fmt::Result {
        if idx == NIL {
            return writeln!(f, "{:width$}[B] nil", "", width = offset);
        }

        let node = self.node_at(idx);
        let tag = match node.color {
            Color::Red => "R",
            Color::Black => "B",
        };
        writeln!(
            f,
            "{:width$}[{}] {} x{}",
            "",
            tag,
            node.key,
            node.count,
            width = offset
        )?;

        if node.left != NIL || node.right != NIL {
            self.fmt_subtree(f, node.left, offset + 2)?;
            self.fmt_subtree(f, node.right, offset + 2)?;
        }
        Ok(())
    }
}
