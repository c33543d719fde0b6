//! Error kinds and position attribution.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use stanza_ir::{
    Entity, EntityType, FunctionType, FunctionValue, Name, Overload, Position, SharedInterner,
};

use super::{call, html_err, quoted_name};

#[test]
fn calling_a_non_function_reports_its_type() {
    let interner = SharedInterner::new();
    let doc = Entity::call(Entity::int(5), vec![Entity::text("x")]);
    assert_eq!(html_err(&interner, &doc), "trying to call int");
}

#[test]
fn positions_are_attached_when_known() {
    let interner = SharedInterner::new();
    let doc = Entity::call_at(
        Entity::int(5),
        vec![Entity::text("x")],
        Position::new(2, 3),
    );
    assert_eq!(
        html_err(&interner, &doc),
        "trying to call int (line 2, column 3)"
    );
}

#[test]
fn unbound_names_are_reported() {
    let interner = SharedInterner::new();
    let doc = Entity::name(interner.intern("missing"));
    assert_eq!(html_err(&interner, &doc), "name missing not found");
}

#[test]
fn positionless_expansions_surface_at_the_call_site() {
    // The extension returns a positionless call that fails; the error is
    // attributed to the outer call, the nearest node with a position.
    let interner = SharedInterner::new();
    let broken = interner.intern("broken");
    let value = Entity::function(FunctionValue::new(vec![Overload::new(
        FunctionType::variadic(vec![], EntityType::Any, EntityType::Any),
        Rc::new(|_, _| Ok(Entity::call(Entity::int(1), vec![]))),
    )]));

    let doc = Entity::call_at(Entity::name(broken), vec![], Position::new(3, 7));
    let err = crate::render_document(&doc, [(broken, value)], &interner).unwrap_err();
    assert_eq!(err.message, "trying to call int (line 3, column 7)");
}

#[test]
fn the_innermost_positioned_call_wins() {
    let interner = SharedInterner::new();
    let inner = Entity::call_at(
        Entity::name(interner.intern("nope")),
        vec![],
        Position::new(1, 2),
    );
    let doc = Entity::call_at(
        Entity::name(interner.intern("bf")),
        vec![inner],
        Position::new(9, 9),
    );
    assert_eq!(
        html_err(&interner, &doc),
        "name nope not found (line 1, column 2)"
    );
}

#[test]
fn unrenderable_results_are_reported() {
    let interner = SharedInterner::new();
    let doc = Entity::quoted(Entity::int(1));
    assert_eq!(html_err(&interner, &doc), "cannot render &[int]");

    let doc = Entity::name(interner.intern("bf"));
    assert_eq!(
        html_err(&interner, &doc),
        "cannot render (λ ...inline . inline)"
    );
}

#[test]
fn natives_can_reject_type_matched_arguments() {
    let interner = SharedInterner::new();

    let doc = call(
        &interner,
        "foreach",
        vec![
            quoted_name(&interner, "x"),
            Entity::quoted(Entity::text("not a sequence")),
            Entity::quoted(Entity::name(interner.intern("x"))),
        ],
    );
    assert_eq!(
        html_err(&interner, &doc),
        "foreach expects &nil or a quoted sequence"
    );

    let h9 = call(&interner, "h", vec![Entity::int(9)]);
    let doc = Entity::call(h9, vec![Entity::text("x")]);
    assert_eq!(
        html_err(&interner, &doc),
        "heading level must be between 1 and 6, got 9"
    );
}

#[test]
fn scopes_unwind_when_a_body_fails() {
    // A failing inner body must not leave its binding behind for the
    // rest of the outer body.
    let interner = SharedInterner::new();
    let x = interner.intern("x");

    let failing_inner = call(
        &interner,
        "let",
        vec![
            quoted_name(&interner, "x"),
            Entity::text("inner"),
            Entity::quoted(Entity::name(interner.intern("missing"))),
        ],
    );
    let registry = crate::Registry::builtins(&interner);
    let mut evaluator = crate::Evaluator::new(&registry, &interner);

    assert!(evaluator.eval(&failing_inner).is_err());

    // The same evaluator sees no leftover binding.
    let err = evaluator.eval(&Entity::name(x)).unwrap_err();
    assert_eq!(format!("{err}"), "name x not found");
}

#[test]
fn engine_error_drops_propagation_state() {
    let interner = SharedInterner::new();
    let doc = Entity::call_at(
        Entity::name(interner.intern("absent")),
        vec![],
        Position::new(4, 1),
    );
    let err = crate::render_document(
        &doc,
        std::iter::empty::<(Name, Entity)>(),
        &interner,
    )
    .unwrap_err();
    assert_eq!(err.message, "name absent not found (line 4, column 1)");
    assert_eq!(err.to_string(), err.message);
}
