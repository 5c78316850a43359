/// Selection-restriction compiler.
///
/// Turns a restriction tree into a taxonomy `Filter`, and decides without
/// querying whether a tree forces membership in a named category.

use crate::core::query::Filter;
use crate::schema::selrestr::{CategoryTable, SelRestr};

/// Compile a restriction tree into a filter over lexical entries.
///
/// Names missing from `table` compile to no constraint, and unconstrained
/// children are dropped from groups. A group left with no constrained
/// children is itself unconstrained.
pub fn compile_filter(restr: &SelRestr, table: &CategoryTable) -> Filter {
    match restr {
        SelRestr::Empty => Filter::All,
        SelRestr::Singleton { name, positive } => {
            let Some(anchors) = table.anchors(name) else {
                return Filter::All;
            };
            let membership = anchors
                .iter()
                .map(|anchor| Filter::InCategory(*anchor))
                .reduce(Filter::or)
                .unwrap_or(Filter::All);
            if membership.is_unconstrained() || *positive {
                membership
            } else {
                membership.negate()
            }
        }
        SelRestr::Group { or_logic, children } => {
            let compiled: Vec<Filter> = children
                .iter()
                .map(|child| compile_filter(child, table))
                .filter(|f| !f.is_unconstrained())
                .collect();
            match compiled.len() {
                0 => Filter::All,
                1 => compiled.into_iter().next().unwrap_or(Filter::All),
                _ if *or_logic => Filter::Or(compiled),
                _ => Filter::And(compiled),
            }
        }
    }
}

/// Whether every entry admitted by `restr` must belong to `name`.
///
/// A group forces a category only when every one of its children does,
/// whether it is a conjunction or a disjunction. Empty groups and negated
/// singletons never force anything.
pub fn requires_category(name: &str, restr: &SelRestr) -> bool {
    match restr {
        SelRestr::Empty => false,
        SelRestr::Singleton {
            name: category,
            positive,
        } => *positive && category == name,
        SelRestr::Group { children, .. } => {
            !children.is_empty() && children.iter().all(|c| requires_category(name, c))
        }
    }
}
