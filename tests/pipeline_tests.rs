//! End-to-end tests of the compiler pipeline.
//!
//! Programs are built with `AstBuilder` in place of the parser and run through
//! `spl::compile`.

use bumpalo::Bump;
use spl::ast::{AstBuilder, BinaryOp, GlobalDecl};
use spl::{
    Compilation, CompileOptions, Entry, ErrorCode, Identifier, OutgoingArea, Phase, Result, Span,
    SplError, compile,
};

fn s() -> Span {
    Span::new(1, 1)
}

fn run<'ast>(b: &AstBuilder<'ast>, decls: &[GlobalDecl<'ast>]) -> Result<Compilation> {
    let _ = env_logger::builder().is_test(true).try_init();
    compile(&b.program(decls, s()), CompileOptions::default())
}

/// Instructions of the whole program as `mnemonic operands` strings.
fn instructions(compilation: &Compilation) -> Vec<String> {
    compilation
        .assembly()
        .expect("code generation ran")
        .instructions()
        .map(|ins| ins.to_string().trim_start().replacen('\t', " ", 1))
        .collect()
}

fn variable_offset(compilation: &Compilation, proc: &str, name: &str) -> i32 {
    let scope = compilation.procedure(proc).unwrap().local_table.unwrap();
    compilation
        .context()
        .scopes
        .lookup_local(scope, Identifier::new(name))
        .and_then(Entry::as_variable)
        .and_then(|var| var.offset)
        .unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn declared_array_type_store() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    // type vec = array [5] of int;
    // proc main() { var v: vec; v[0] := 3; }
    let vars = [b.var("v", b.named_type("vec", s()), s())];
    let target = b.index(b.named_var("v", s()), b.int(0, s()), s());
    let body = [b.assign(target, b.int(3, s()), s())];
    let decls = [
        b.type_decl("vec", b.array_type(5, b.named_type("int", s()), s()), s()),
        b.procedure("main", &[], &vars, &body, s()),
    ];
    let compilation = run(&b, &decls).unwrap();

    let Some(Entry::Type(vec)) = compilation
        .context()
        .scopes
        .lookup(spl::ScopeId::GLOBAL, Identifier::new("vec"))
    else {
        panic!("vec should be a type");
    };
    let types = &compilation.context().types;
    assert_eq!(types.as_array(vec.ty), Some((spl::TypeId::INT, 5)));
    assert_eq!(variable_offset(&compilation, "main", "v"), -20);

    let code = instructions(&compilation);
    let check = code.iter().position(|ins| ins.starts_with("bgeu")).unwrap();
    assert_eq!(
        code[check - 2..=check],
        ["add $9,$0,0", "add $10,$0,5", "bgeu $9,$10,_indexError"]
    );
    let store = code.iter().position(|ins| ins == "stw $9,$8,0").unwrap();
    assert!(check < store);
}

#[test]
fn call_with_computed_argument() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    // proc main() { printi(1 + 2); }
    let sum = b.binary(BinaryOp::Add, b.int(1, s()), b.int(2, s()), s());
    let body = [b.call("printi", &[sum], s())];
    let decls = [b.procedure("main", &[], &[], &body, s())];
    let compilation = run(&b, &decls).unwrap();

    assert_eq!(
        compilation.context().annotations.expr_type(sum.id()),
        Some(spl::TypeId::INT)
    );
    let code = instructions(&compilation);
    let call = code.iter().position(|ins| ins == "jal printi").unwrap();
    assert_eq!(
        code[call - 4..call],
        ["add $8,$0,1", "add $9,$0,2", "add $8,$8,$9", "stw $8,$29,0"]
    );
}

#[test]
fn reference_parameter_increment() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    // proc f(ref x: int) { x := x + 1; }
    // proc main() { var y: int; f(y); }
    let params = [b.param("x", b.named_type("int", s()), true, s())];
    let inc = b.binary(BinaryOp::Add, b.load("x", s()), b.int(1, s()), s());
    let vars = [b.var("y", b.named_type("int", s()), s())];
    let f_body = [b.assign(b.named_var("x", s()), inc, s())];
    let main_body = [b.call("f", &[b.load("y", s())], s())];
    let decls = [
        b.procedure("f", &params, &[], &f_body, s()),
        b.procedure("main", &[], &vars, &main_body, s()),
    ];
    let compilation = run(&b, &decls).unwrap();

    let f = compilation.procedure("f").unwrap();
    assert_eq!(f.argument_area_size, Some(4));
    assert_eq!(f.outgoing_area, Some(OutgoingArea::NoCalls));
    let main = compilation.procedure("main").unwrap();
    assert_eq!(main.outgoing_area, Some(OutgoingArea::Bytes(4)));
}

#[test]
fn duplicate_procedure() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    let decls = [
        b.procedure("p", &[], &[], &[], Span::new(1, 1)),
        b.procedure("p", &[], &[], &[], Span::new(2, 1)),
        b.procedure("main", &[], &[], &[], Span::new(3, 1)),
    ];
    let err = run(&b, &decls).unwrap_err();

    assert_eq!(
        err,
        SplError::RedeclarationAsProcedure {
            name: Identifier::new("p"),
            span: Span::new(2, 1)
        }
    );
    assert_eq!(err.exit_code(), 105);
    let message = "line 2, column 1: redeclaration of 'p' as procedure";
    assert_eq!(err.to_string(), message);
}

#[test]
fn integer_if_condition() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    // proc main() { if (1) ; }
    let (cond, then_part) = (b.int(1, Span::new(1, 19)), b.empty(Span::new(1, 22)));
    let stmt = b.if_stmt(cond, then_part, None, Span::new(1, 15));
    let err = run(&b, &[b.procedure("main", &[], &[], &[stmt], s())]).unwrap_err();

    assert_eq!(err.code(), ErrorCode::IfConditionMustBeBoolean);
    assert_eq!(err.span(), Span::new(1, 15));
}

#[test]
fn entry_point_errors() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    let err = run(&b, &[b.procedure("start", &[], &[], &[], s())]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MainIsMissing);

    let err = run(&b, &[b.type_decl("main", b.named_type("int", s()), s())]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MainIsNotAProcedure);
    assert_eq!(err.exit_code(), 126);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn separately_written_arrays_do_not_match() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    // proc main() { var a: array [2] of int; var c: array [2] of int; a[0] := c[0]; a := c; }
    let vars = [
        b.var("a", b.array_type(2, b.named_type("int", s()), s()), s()),
        b.var("c", b.array_type(2, b.named_type("int", s()), s()), s()),
    ];
    let elementwise = b.assign(
        b.index(b.named_var("a", s()), b.int(0, s()), s()),
        b.var_expr(b.index(b.named_var("c", s()), b.int(0, s()), s()), s()),
        s(),
    );
    let compilation = run(&b, &[b.procedure("main", &[], &vars, &[elementwise], s())]);
    assert!(compilation.is_ok());

    // Assigning whole arrays fails before the type comparison is reached.
    let whole = b.assign(b.named_var("a", s()), b.load("c", s()), s());
    let err = run(&b, &[b.procedure("main", &[], &vars, &[whole], s())]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::AssignmentRequiresIntegers);
}

#[test]
fn array_argument_identity() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    // type row = array [4] of int;
    // proc sum(ref r: row) {}
    // proc main() { var x: row; var y: array [4] of int; sum(x); sum(y); }
    let params = [b.param("r", b.named_type("row", s()), true, s())];
    let vars = [
        b.var("x", b.named_type("row", s()), s()),
        b.var("y", b.array_type(4, b.named_type("int", s()), s()), s()),
    ];
    let ok_call = b.call("sum", &[b.load("x", s())], s());
    let bad_call = b.call("sum", &[b.load("y", Span::new(9, 7))], s());
    let decls = [
        b.type_decl("row", b.array_type(4, b.named_type("int", s()), s()), s()),
        b.procedure("sum", &params, &[], &[], s()),
        b.procedure("main", &[], &vars, &[ok_call, bad_call], s()),
    ];
    let err = run(&b, &decls).unwrap_err();

    assert_eq!(
        err,
        SplError::ArgumentTypeMismatch {
            procedure: Identifier::new("sum"),
            argument: 1,
            span: Span::new(9, 7)
        }
    );
}

#[test]
fn locals_are_private_to_their_procedure() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    let p_vars = [b.var("t", b.named_type("int", s()), s())];
    let p_body = [b.assign(b.named_var("t", s()), b.int(1, s()), s())];
    let outside = b.named_var("t", Span::new(5, 3));
    let main_body = [b.assign(outside, b.int(2, s()), s())];
    let decls = [
        b.procedure("p", &[], &p_vars, &p_body, s()),
        b.procedure("main", &[], &[], &main_body, s()),
    ];
    let err = run(&b, &decls).unwrap_err();

    assert_eq!(
        err,
        SplError::UndefinedVariable {
            name: Identifier::new("t"),
            span: Span::new(5, 3)
        }
    );
}

#[test]
fn frame_layout_is_deterministic() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    // proc p(a: int, ref big: array [100] of int, c: int) {
    //   var x: int; var y: array [3] of int; var z: int;
    // }
    let big = b.array_type(100, b.named_type("int", s()), s());
    let params = [
        b.param("a", b.named_type("int", s()), false, s()),
        b.param("big", big, true, s()),
        b.param("c", b.named_type("int", s()), false, s()),
    ];
    let vars = [
        b.var("x", b.named_type("int", s()), s()),
        b.var("y", b.array_type(3, b.named_type("int", s()), s()), s()),
        b.var("z", b.named_type("int", s()), s()),
    ];
    let decls = [
        b.procedure("p", &params, &vars, &[], s()),
        b.procedure("main", &[], &[], &[], s()),
    ];
    let compilation = run(&b, &decls).unwrap();

    let params: Vec<_> = ["a", "big", "c"]
        .iter()
        .map(|name| variable_offset(&compilation, "p", name))
        .collect();
    assert_eq!(params, [0, 4, 8]);

    let locals: Vec<_> = ["x", "y", "z"]
        .iter()
        .map(|name| variable_offset(&compilation, "p", name))
        .collect();
    assert_eq!(locals, [-4, -16, -20]);

    let p = compilation.procedure("p").unwrap();
    assert_eq!(p.argument_area_size, Some(12));
    assert_eq!(p.local_var_area_size, Some(20));
}

#[test]
fn leaf_procedures_skip_return_address() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    let decls = [
        b.procedure("leaf", &[], &[], &[], s()),
        b.procedure("main", &[], &[], &[b.call("leaf", &[], s())], s()),
    ];
    let compilation = run(&b, &decls).unwrap();
    let code = instructions(&compilation);

    // leaf: 3 prologue + 3 epilogue instructions, no $31 traffic
    assert_eq!(
        code[..6],
        [
            "sub $29,$29,4",
            "stw $25,$29,0",
            "add $25,$29,4",
            "ldw $25,$29,0",
            "add $29,$29,4",
            "jr $31"
        ]
    );
    assert_eq!(
        code[6..10],
        [
            "sub $29,$29,8",
            "stw $25,$29,4",
            "add $25,$29,8",
            "stw $31,$25,-8"
        ]
    );
}

#[test]
fn every_element_access_is_bounds_checked() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    // proc main() { var a: array [8] of int; var i: int; a[i] := a[i + 1] * a[2]; }
    let vars = [
        b.var("a", b.array_type(8, b.named_type("int", s()), s()), s()),
        b.var("i", b.named_type("int", s()), s()),
    ];
    let next = b.binary(BinaryOp::Add, b.load("i", s()), b.int(1, s()), s());
    let rhs = b.binary(
        BinaryOp::Mul,
        b.var_expr(b.index(b.named_var("a", s()), next, s()), s()),
        b.var_expr(b.index(b.named_var("a", s()), b.int(2, s()), s()), s()),
        s(),
    );
    let target = b.index(b.named_var("a", s()), b.load("i", s()), s());
    let stmt = b.assign(target, rhs, s());
    let compilation = run(&b, &[b.procedure("main", &[], &vars, &[stmt], s())]).unwrap();

    let code = instructions(&compilation);
    let checks = code.iter().filter(|ins| ins.starts_with("bgeu")).count();
    let scales = code
        .iter()
        .filter(|ins| ins.starts_with("mul") && ins.ends_with(",4"))
        .count();
    assert_eq!(checks, 3);
    assert_eq!(scales, 3);
}

#[test]
fn builtin_argument_slots() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    let args: Vec<_> = (0..5).map(|v| b.int(v, s())).collect();
    let body = [b.call("drawLine", &args, s())];
    let decls = [b.procedure("main", &[], &[], &body, s())];
    let compilation = run(&b, &decls).unwrap();

    let stores: Vec<_> = instructions(&compilation)
        .into_iter()
        .filter(|ins| ins.starts_with("stw $8,$29,"))
        .collect();
    assert_eq!(
        stores,
        [
            "stw $8,$29,0",
            "stw $8,$29,4",
            "stw $8,$29,8",
            "stw $8,$29,12",
            "stw $8,$29,16"
        ]
    );
    assert_eq!(
        compilation.procedure("main").unwrap().outgoing_area,
        Some(OutgoingArea::Bytes(20))
    );
}

#[test]
fn oversized_arrays_are_errors() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    // proc main() { var v: array [1 << 30] of int; }
    let huge = b.array_type(1 << 30, b.named_type("int", s()), Span::new(1, 22));
    let vars = [b.var("v", huge, s())];
    let err = run(&b, &[b.procedure("main", &[], &vars, &[], s())]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::TypeTooLarge);
    assert_eq!(err.span(), Span::new(1, 22));
    assert_eq!(err.exit_code(), 128);

    // proc main() { var v: array [0x2000_0000] of int; }
    let huge = b.array_type(0x2000_0000, b.named_type("int", s()), s());
    let vars = [b.var("v", huge, Span::new(1, 19))];
    let err = run(&b, &[b.procedure("main", &[], &vars, &[], s())]).unwrap_err();
    assert_eq!(
        err,
        SplError::FrameTooLarge {
            procedure: Identifier::new("main"),
            span: Span::new(1, 19)
        }
    );
    assert_eq!(err.exit_code(), 129);
}

// =============================================================================
// Phase selection
// =============================================================================

#[test]
fn stop_after_tables() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    // The body is ill-typed, but checking never runs.
    let stmt = b.if_stmt(b.int(1, s()), b.empty(s()), None, s());
    let program = b.program(&[b.procedure("main", &[], &[], &[stmt], s())], s());
    let compilation = compile(&program, CompileOptions::stop_after(Phase::Tables)).unwrap();

    assert_eq!(compilation.completed(), Phase::Tables);
    assert!(compilation.assembly().is_none());
    assert!(compilation.procedure("main").unwrap().local_table.is_some());
    let tables = spl::format_tables(compilation.context(), &program);
    assert!(tables.contains("level 1\n"));
}

#[test]
fn stop_after_vars() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    let vars = [b.var("x", b.named_type("int", s()), s())];
    let program = b.program(&[b.procedure("main", &[], &vars, &[], s())], s());
    let compilation = compile(&program, CompileOptions::stop_after(Phase::Vars)).unwrap();

    assert_eq!(compilation.completed(), Phase::Vars);
    assert!(compilation.assembly().is_none());
    let report = spl::format_allocation(compilation.context(), &program);
    assert!(report.contains("var 'x': fp - 4\n"));
    assert!(report.contains("size of outgoing area = -1\n"));
}

#[test]
fn full_pipeline_renders_assembly() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    let program = b.program(&[b.procedure("main", &[], &[], &[], s())], s());
    let compilation = compile(&program, CompileOptions::default()).unwrap();

    assert_eq!(compilation.completed(), Phase::Codegen);
    let text = compilation.assembly().unwrap().to_string();
    assert!(text.contains("\t.code\n\t.align 4\n"));
    assert!(text.ends_with(
        "\t.export main\nmain:\n\tsub\t$29,$29,4\n\tstw\t$25,$29,0\n\tadd\t$25,$29,4\n\
         \tldw\t$25,$29,0\n\tadd\t$29,$29,4\n\tjr\t$31\n"
    ));
}
