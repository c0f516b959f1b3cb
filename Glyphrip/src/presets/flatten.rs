//! Constructor flattening
//!
//! Rewrites constructor chains into their literal arguments without
//! executing anything:
//!
//! 1. `inner(a).method(b)` becomes `inner(a, b)`, repeated until the call
//!    target is no longer a method of a call.
//! 2. Bottom-up, `name(x)` becomes `x` and `name(x, y, ...)` becomes the
//!    tuple `(x, y, ...)`.
//!
//! So `ColorProfile(['#a', '#b']).with_weights([2, 3])` flattens to
//! `(['#a', '#b'], [2, 3])`. Every rewrite removes one call node, so the
//! rewrite always terminates.

use super::ast::Expr;

/// Flatten every call in `expr`.
///
/// Recursion follows the tree; parsed trees are capped at
/// [`MAX_NESTING`](super::parser::MAX_NESTING) levels.
pub fn flatten(expr: Expr) -> Expr {
    match expr {
        Expr::Call { func, args } => flatten_call(*func, args),
        Expr::List(items) => Expr::List(items.into_iter().map(flatten).collect()),
        Expr::Tuple(items) => Expr::Tuple(items.into_iter().map(flatten).collect()),
        Expr::Attribute { value, attr } => Expr::Attribute {
            value: Box::new(flatten(*value)),
            attr,
        },
        literal => literal,
    }
}

fn flatten_call(func: Expr, args: Vec<Expr>) -> Expr {
    let (func, args) = splice(func, args);

    let func = flatten(func);
    let mut args: Vec<Expr> = args.into_iter().map(flatten).collect();

    if !matches!(func, Expr::Name(_)) || args.is_empty() {
        return Expr::call(func, args);
    }
    if args.len() == 1 {
        args.remove(0)
    } else {
        Expr::Tuple(args)
    }
}

/// Append the outer arguments of `inner(..).method(outer..)` to the inner
/// call, until the target is no longer a method of a call.
fn splice(mut func: Expr, mut args: Vec<Expr>) -> (Expr, Vec<Expr>) {
    loop {
        match func {
            Expr::Attribute { value, attr } => match *value {
                Expr::Call {
                    func: inner_func,
                    args: mut inner_args,
                } => {
                    inner_args.append(&mut args);
                    func = *inner_func;
                    args = inner_args;
                }
                value => {
                    return (
                        Expr::Attribute {
                            value: Box::new(value),
                            attr,
                        },
                        args,
                    );
                }
            },
            other => return (other, args),
        }
    }
}
