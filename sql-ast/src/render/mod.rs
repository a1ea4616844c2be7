//! Rendering a `Select` statement into SQL text.
//!
//! The engine is a stack of part visitors driven by the depth-first walk.
//! The statement visitor pushes one sub-visitor per clause; each sub-visitor
//! accumulates its fragment by observing the `enter`/`leave` events of its
//! subtree and hands the fragment back to whoever pushed it when it pops.

mod clauses;
mod condition;
mod expr;
mod select;
mod stack;
mod subtree;

use crate::ast::select::Select;
use crate::error::RenderError;
use crate::validate::validate;
use crate::visit::Segment;

/// Renders a SELECT statement into its SQL text.
///
/// The output is a pure function of the tree: equal trees render to
/// byte-identical SQL. Malformed trees are rejected up front with
/// [`RenderError::InvalidArgument`].
pub fn render(select: &Select) -> Result<String, RenderError> {
    validate(select)?;
    let mut stack = stack::RenderStack::new(select::select_statement());
    select.walk(&mut stack);
    stack.finish()
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::ast::common::{JoinKind, OrderDir};
    use crate::ast::condition::Condition;
    use crate::ast::expr::{Expression, Table};
    use crate::ast::select::Select;
    use crate::build::select::SelectBuilder;
    use crate::table;

    fn employee() -> Table {
        table("employee")
    }

    fn sql(select: &Select) -> String {
        render(select).unwrap()
    }

    #[test]
    fn renders_projection_with_derived_from() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("id").into()])
            .build();

        assert_eq!(sql(&select), "SELECT employee.id FROM employee");
    }

    #[test]
    fn renders_explicit_from_with_alias() {
        let e = employee().as_("e");
        let select = SelectBuilder::new()
            .select(vec![e.column("id").into()])
            .from(e.clone())
            .build();

        assert_eq!(sql(&select), "SELECT e.id FROM employee AS e");
    }

    #[test]
    fn renders_multiple_projection_expressions() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("id").into(), t.column("name").into()])
            .from(t.clone())
            .build();

        assert_eq!(sql(&select), "SELECT employee.id, employee.name FROM employee");
    }

    #[test]
    fn renders_multiple_from_tables() {
        let t = employee();
        let d = table("dept");
        let select = SelectBuilder::new()
            .select(vec![t.column("id").into(), d.column("name").into()])
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.id, dept.name FROM employee, dept"
        );
    }

    #[test]
    fn renders_distinct_and_order_by() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("name").into()])
            .from(t.clone())
            .distinct()
            .order_by(t.column("name"), Some(OrderDir::Desc))
            .build();

        assert_eq!(
            sql(&select),
            "SELECT DISTINCT employee.name FROM employee ORDER BY name DESC"
        );
    }

    #[test]
    fn renders_multiple_order_by_fields() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("name").into()])
            .from(t.clone())
            .order_by(t.column("name"), Some(OrderDir::Asc))
            .order_by(t.column("id"), None)
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.name FROM employee ORDER BY name ASC, id"
        );
    }

    #[test]
    fn renders_where_with_and() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("a").into()])
            .from(t.clone())
            .where_clause(
                t.column("a")
                    .eq(Expression::named_bind_marker("n"))
                    .and(t.column("b").is_null()),
            )
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.a FROM employee WHERE employee.a = :n AND employee.b IS NULL"
        );
    }

    #[test]
    fn parenthesizes_or_conditions() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("a").into()])
            .from(t.clone())
            .where_clause(
                t.column("a")
                    .eq(Expression::named_bind_marker("x"))
                    .or(t.column("b").eq(Expression::named_bind_marker("y"))),
            )
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.a FROM employee WHERE (employee.a = :x OR employee.b = :y)"
        );
    }

    #[test]
    fn renders_join_subselect_in_limit_and_offset() {
        let t = employee();
        let u = table("dept").as_("u");
        let v = table("v");
        let inner = SelectBuilder::new()
            .select(vec![v.column("a").into()])
            .from(v.clone())
            .build();
        let select = SelectBuilder::new()
            .select(vec![t.column("a").into()])
            .from(t.clone())
            .join(JoinKind::Join, u.clone(), t.column("id").eq(u.column("tid")))
            .where_clause(t.column("a").in_list(vec![Expression::subselect(inner)]))
            .limit(10)
            .offset(5)
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.a FROM employee JOIN dept AS u ON employee.id = u.tid \
             WHERE employee.a IN (SELECT v.a FROM v) LIMIT 10 OFFSET 5"
        );
    }

    #[test]
    fn renders_join_kinds() {
        let t = employee();
        let u = table("dept").as_("u");
        let select = SelectBuilder::new()
            .select(vec![t.column("a").into()])
            .from(t.clone())
            .join(
                JoinKind::LeftOuter,
                u.clone(),
                t.column("id").eq(u.column("tid")),
            )
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.a FROM employee LEFT OUTER JOIN dept AS u ON employee.id = u.tid"
        );
    }

    #[test]
    fn renders_multiple_joins_in_order() {
        let t = employee();
        let u = table("dept").as_("u");
        let w = table("site").as_("w");
        let select = SelectBuilder::new()
            .select(vec![t.column("a").into()])
            .from(t.clone())
            .join(JoinKind::Join, u.clone(), t.column("d").eq(u.column("id")))
            .join(JoinKind::Join, w.clone(), u.column("s").eq(w.column("id")))
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.a FROM employee JOIN dept AS u ON employee.d = u.id \
             JOIN site AS w ON u.s = w.id"
        );
    }

    #[test]
    fn alias_applies_in_projection_and_reference_elsewhere() {
        let t = employee();
        let aliased = t.column("name").as_("n");
        let select = SelectBuilder::new()
            .select(vec![aliased.clone().into()])
            .from(t.clone())
            .order_by(aliased, None)
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.name AS n FROM employee ORDER BY n"
        );
    }

    #[test]
    fn conditions_use_the_column_reference_name() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("name").as_("n").into()])
            .from(t.clone())
            .where_clause(t.column("name").as_("n").is_null())
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.name AS n FROM employee WHERE employee.n IS NULL"
        );
    }

    #[test]
    fn renders_is_not_null() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("a").into()])
            .from(t.clone())
            .where_clause(t.column("b").is_not_null())
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.a FROM employee WHERE employee.b IS NOT NULL"
        );
    }

    #[test]
    fn renders_constant_conditions() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("a").into()])
            .from(t.clone())
            .where_clause(Condition::just("1 = 1"))
            .build();

        assert_eq!(sql(&select), "SELECT employee.a FROM employee WHERE 1 = 1");
    }

    #[test]
    fn renders_condition_groups() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("a").into()])
            .from(t.clone())
            .where_clause(Condition::group(
                t.column("a").eq(Expression::bind_marker()),
            ))
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.a FROM employee WHERE (employee.a = ?)"
        );
    }

    #[test]
    fn renders_nested_and_chains_flat() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("a").into()])
            .from(t.clone())
            .where_clause(
                t.column("a")
                    .eq(Expression::just("1"))
                    .and(t.column("b").eq(Expression::just("2")))
                    .and(t.column("c").eq(Expression::just("3"))),
            )
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.a FROM employee \
             WHERE employee.a = 1 AND employee.b = 2 AND employee.c = 3"
        );
    }

    #[test]
    fn renders_in_with_a_grouped_list() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("a").into()])
            .from(t.clone())
            .where_clause(
                t.column("a")
                    .in_list(vec![Expression::just("1"), Expression::just("2")]),
            )
            .build();

        assert_eq!(
            sql(&select),
            "SELECT employee.a FROM employee WHERE employee.a IN (1, 2)"
        );
    }

    #[test]
    fn renders_functions_in_the_select_list() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![
                Expression::function(
                    "COALESCE",
                    vec![t.column("a").into(), t.column("b").into()],
                ),
                t.column("c").into(),
            ])
            .from(t.clone())
            .build();

        assert_eq!(
            sql(&select),
            "SELECT COALESCE(employee.a, employee.b), employee.c FROM employee"
        );
    }

    #[test]
    fn renders_subselects_in_the_projection() {
        let t = employee();
        let v = table("v");
        let inner = SelectBuilder::new()
            .select(vec![v.column("a").into()])
            .from(v.clone())
            .build();
        let select = SelectBuilder::new()
            .select(vec![Expression::subselect(inner), t.column("b").into()])
            .from(t.clone())
            .build();

        assert_eq!(
            sql(&select),
            "SELECT (SELECT v.a FROM v), employee.b FROM employee"
        );
    }

    #[test]
    fn renders_raw_fragments_and_markers_in_the_projection() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![
                Expression::just("1"),
                Expression::named_bind_marker("n"),
            ])
            .from(t.clone())
            .build();

        assert_eq!(sql(&select), "SELECT 1, :n FROM employee");
    }

    // A function has no rendering in expression position; its operand comes
    // out empty and the renderer logs a diagnostic instead of failing.
    #[test]
    fn function_in_condition_position_renders_an_empty_operand() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("a").into()])
            .from(t.clone())
            .where_clause(
                Expression::function("LENGTH", vec![t.column("a").into()])
                    .eq(Expression::just("5")),
            )
            .build();

        assert_eq!(sql(&select), "SELECT employee.a FROM employee WHERE  = 5");
    }

    #[test]
    fn absent_clauses_leave_no_keywords_behind() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("id").into()])
            .from(t.clone())
            .build();
        let rendered = sql(&select);

        for keyword in [" WHERE ", " JOIN ", " ORDER BY ", " LIMIT ", " OFFSET ", "DISTINCT"] {
            assert!(!rendered.contains(keyword), "unexpected {keyword:?}");
        }
    }

    #[test]
    fn renders_without_any_from_clause() {
        let select = SelectBuilder::new()
            .select(vec![Expression::just("1")])
            .build();
        assert_eq!(sql(&select), "SELECT 1");
    }

    #[test]
    fn rendering_is_deterministic() {
        let t = employee();
        let select = SelectBuilder::new()
            .select(vec![t.column("a").into()])
            .from(t.clone())
            .where_clause(t.column("b").is_null())
            .order_by(t.column("a"), Some(OrderDir::Asc))
            .limit(3)
            .build();

        assert_eq!(sql(&select), sql(&select));
        assert_eq!(sql(&select), sql(&select.clone()));
    }

    #[test]
    fn output_never_contains_consecutive_spaces() {
        let t = employee();
        let u = table("dept").as_("u");
        let samples = vec![
            SelectBuilder::new()
                .select(vec![t.column("id").into()])
                .build(),
            SelectBuilder::new()
                .select(vec![t.column("a").into()])
                .from(t.clone())
                .distinct()
                .join(JoinKind::Join, u.clone(), t.column("d").eq(u.column("id")))
                .where_clause(t.column("a").is_null())
                .order_by(t.column("a"), Some(OrderDir::Desc))
                .limit(1)
                .offset(2)
                .build(),
        ];

        for select in &samples {
            let rendered = sql(select);
            assert!(!rendered.contains("  "), "double space in {rendered:?}");
        }
    }
}
