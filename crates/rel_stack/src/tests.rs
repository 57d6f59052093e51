use super::*;

/// Minimal stand-in for an operator tree: each level wraps the next.
enum Nested {
    Leaf(i64),
    Not(Box<Nested>),
}

fn build(depth: usize) -> Nested {
    let mut node = Nested::Leaf(1);
    for _ in 0..depth {
        node = Nested::Not(Box::new(node));
    }
    node
}

fn walk(node: &Nested) -> i64 {
    ensure_sufficient_stack(|| match node {
        Nested::Leaf(n) => *n,
        Nested::Not(inner) => -walk(inner),
    })
}

#[test]
fn test_shallow_walk() {
    assert_eq!(walk(&build(3)), -1);
    assert_eq!(walk(&build(4)), 1);
}

#[test]
fn test_deep_walk() {
    // Would overflow a default 8MB stack without growth.
    let tree = build(100_000);
    assert_eq!(walk(&tree), 1);
    // Drop iteratively; the derived drop glue would recurse just as deep.
    let mut node = tree;
    while let Nested::Not(inner) = node {
        node = *inner;
    }
}

#[test]
fn test_returns_closure_result() {
    let result = ensure_sufficient_stack(|| 42);
    assert_eq!(result, 42);
}

#[test]
fn test_works_with_result_type() {
    let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(123));
    assert_eq!(result, Ok(123));
}
