//! Structural validation of a statement tree before rendering.

use crate::ast::select::Select;
use crate::error::RenderError;
use crate::visit::{Segment, SegmentRef, Visitor};

/// Checks the tree for empty names and empty lists. The first violation is
/// reported with the path from the root, e.g. `Select > Where > Equals >
/// Column`.
pub(crate) fn validate(select: &Select) -> Result<(), RenderError> {
    let mut validator = Validator::default();
    select.walk(&mut validator);
    match validator.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

#[derive(Default)]
struct Validator {
    path: Vec<&'static str>,
    error: Option<RenderError>,
}

impl Validator {
    fn check(&mut self, segment: SegmentRef<'_>) {
        let message = match segment {
            SegmentRef::Select(select) if select.select_list.expressions.is_empty() => {
                Some("empty select list")
            }
            SegmentRef::Table(table) if table.name.is_empty() => Some("empty table name"),
            SegmentRef::Table(table) if matches!(table.alias.as_deref(), Some("")) => {
                Some("empty table alias")
            }
            SegmentRef::Column(column) if column.name.is_empty() => Some("empty column name"),
            SegmentRef::Column(column) if matches!(column.alias.as_deref(), Some("")) => {
                Some("empty column alias")
            }
            SegmentRef::Function(function) if function.name.is_empty() => {
                Some("empty function name")
            }
            SegmentRef::BindMarker(marker) if matches!(marker.name.as_deref(), Some("")) => {
                Some("empty bind marker name")
            }
            SegmentRef::Just(just) if just.sql.is_empty() => Some("empty expression fragment"),
            SegmentRef::In(in_condition) if in_condition.rights.is_empty() => {
                Some("empty IN list")
            }
            SegmentRef::Constant(constant) if constant.sql.is_empty() => {
                Some("empty condition fragment")
            }
            _ => None,
        };
        if let Some(message) = message {
            self.fail(message);
        }
    }

    fn fail(&mut self, message: &str) {
        if self.error.is_none() {
            self.error = Some(RenderError::InvalidArgument {
                path: self.path.join(" > "),
                message: message.to_string(),
            });
        }
    }
}

impl Visitor for Validator {
    fn enter(&mut self, segment: SegmentRef<'_>) {
        self.path.push(segment.kind());
        if self.error.is_none() {
            self.check(segment);
        }
    }

    fn leave(&mut self, _segment: SegmentRef<'_>) {
        self.path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expr::{Expression, Table};
    use crate::build::select::SelectBuilder;

    fn invalid_argument(select: &Select) -> (String, String) {
        match validate(select) {
            Err(RenderError::InvalidArgument { path, message }) => (path, message),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_select_list() {
        let select = Select::default();
        let (path, message) = invalid_argument(&select);
        assert_eq!(path, "Select");
        assert_eq!(message, "empty select list");
    }

    #[test]
    fn reports_the_path_from_the_root() {
        let table = Table::new("employee");
        let select = SelectBuilder::new()
            .select(vec![table.column("a").into()])
            .from(table.clone())
            .where_clause(table.column("").eq(Expression::just("1")))
            .build();

        let (path, message) = invalid_argument(&select);
        assert_eq!(path, "Select > Where > Equals > Column");
        assert_eq!(message, "empty column name");
    }

    #[test]
    fn rejects_empty_in_list() {
        let table = Table::new("employee");
        let select = SelectBuilder::new()
            .select(vec![table.column("a").into()])
            .from(table.clone())
            .where_clause(table.column("a").in_list(vec![]))
            .build();

        let (_, message) = invalid_argument(&select);
        assert_eq!(message, "empty IN list");
    }

    #[test]
    fn validates_inside_subselects() {
        let table = Table::new("employee");
        let inner = SelectBuilder::new()
            .select(vec![Table::new("").column("a").into()])
            .build();
        let select = SelectBuilder::new()
            .select(vec![table.column("a").into()])
            .from(table.clone())
            .where_clause(
                table
                    .column("a")
                    .in_list(vec![Expression::subselect(inner)]),
            )
            .build();

        let (path, message) = invalid_argument(&select);
        assert_eq!(message, "empty table name");
        assert!(path.starts_with("Select > Where > In > Subselect > Select"));
    }

    #[test]
    fn accepts_a_well_formed_statement() {
        let table = Table::new("employee");
        let select = SelectBuilder::new()
            .select(vec![table.column("a").into()])
            .from(table)
            .build();
        assert!(validate(&select).is_ok());
    }
}
