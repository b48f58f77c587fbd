//! This module is an integration test that exercises the full constraint
//! pipeline on a small hand-constructed path.
#![cfg(test)]

use path_constraint_core::{
    constraint::{manager::ConstraintManager, ConstraintSet},
    expr::word::Word,
};

mod common;

#[test]
fn learns_facts_across_constraints() -> anyhow::Result<()> {
    let common::Universe { mut ctx, a, b } = common::new_universe();

    // Build `a == 3` and `a + 2 == b` as the interpreter would when
    // resolving two conditionals.
    let three = common::constant(&mut ctx, 3);
    let two = common::constant(&mut ctx, 2);
    let a_is_three = ctx.eq(a, three);
    let a_plus_two = ctx.add(a, two);
    let sum_is_b = ctx.eq(a_plus_two, b);

    let mut constraints = ConstraintSet::new();
    let mut manager = ConstraintManager::new(&mut ctx, &mut constraints);
    manager.add_constraint(a_is_three);
    manager.add_constraint(sum_is_b);

    // Both facts are retained, and the second was rewritten down using the
    // first before being stored.
    assert_eq!(constraints.len(), 2);
    assert_eq!(constraints.iter().count(), 2);

    // Background knowledge now pins down both symbols.
    let a_value = ConstraintManager::simplify_expr(&mut ctx, &constraints, a);
    assert_eq!(ctx.as_constant(a_value), Some(Word::from(3u8)));
    let b_value = ConstraintManager::simplify_expr(&mut ctx, &constraints, b);
    assert_eq!(ctx.as_constant(b_value), Some(Word::from(5u8)));

    Ok(())
}

#[test]
fn forked_child_starts_from_a_copy_of_the_parent_formula() -> anyhow::Result<()> {
    let common::Universe { mut ctx, a, b } = common::new_universe();

    let three = common::constant(&mut ctx, 3);
    let a_is_three = ctx.eq(three, a);

    let mut parent = ConstraintSet::new();
    let mut manager = ConstraintManager::new(&mut ctx, &mut parent);
    manager.add_constraint(a_is_three);

    // The child's initial set is a bulk copy of the parent's, and the two
    // then evolve independently.
    let mut child = ConstraintSet::from(parent.iter().collect::<Vec<_>>());
    assert_eq!(child, parent);

    let a_lt_b = ctx.lt(a, b);
    let mut manager = ConstraintManager::new(&mut ctx, &mut child);
    manager.add_constraint(a_lt_b);

    assert_eq!(parent.len(), 1);
    assert_eq!(child.len(), 2);
    assert_ne!(child, parent);

    Ok(())
}

#[test]
fn renders_the_formula_one_line_per_constraint() -> anyhow::Result<()> {
    let common::Universe { mut ctx, a, b } = common::new_universe();

    let three = common::constant(&mut ctx, 3);
    let two = common::constant(&mut ctx, 2);
    let a_is_three = ctx.eq(a, three);
    let a_plus_two = ctx.add(a, two);
    let sum_is_b = ctx.eq(a_plus_two, b);

    let mut constraints = ConstraintSet::new();
    let mut manager = ConstraintManager::new(&mut ctx, &mut constraints);
    manager.add_constraint(a_is_three);
    manager.add_constraint(sum_is_b);

    let rendered = constraints.render(&ctx);
    assert_eq!(rendered, vec!["(eq 3 a)".to_string(), "(eq 5 b)".to_string()]);
    assert!(rendered.iter().all(|line| !line.contains('\n')));

    Ok(())
}
