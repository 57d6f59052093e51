//! Evaluator tests, one module per node family.

mod compare_tests;
mod expression_tests;
mod helpers;
