use gouml_parser::{
    ast::{Decl, GenKind, InterfaceElem, Spec, TypeExpr},
    error::ErrorCode,
    parse,
};
use proptest::prelude::*;

#[test]
fn test_realistic_file() {
    let source = r#"// Package shop implements a tiny store.
package shop

import (
    "context"
    "errors"
)

var ErrEmpty = errors.New("cart is empty")

// Cart holds items.
type Cart struct {
    sync.Mutex
    items []Item
    Owner *Customer `json:"owner,omitempty"`
}

type Checkout interface {
    Pay(ctx context.Context, amount int64) (Receipt, error)
}

func (c *Cart) Pay(ctx context.Context, amount int64) (Receipt, error) {
    if len(c.items) == 0 {
        return Receipt{}, ErrEmpty
    }
    return Receipt{Total: amount}, nil
}

func (c *Cart) add(it Item) { c.items = append(c.items, it) }
"#;

    let file = parse(source).expect("Failed to parse");

    assert_eq!(file.package, "shop");
    assert_eq!(file.gen_decls(GenKind::Import).count(), 1);
    assert_eq!(file.gen_decls(GenKind::Var).count(), 1);
    assert_eq!(file.gen_decls(GenKind::Type).count(), 2);
    assert_eq!(file.func_decls().count(), 2);

    let cart = file
        .gen_decls(GenKind::Type)
        .flat_map(|d| d.specs.iter())
        .find_map(|spec| match spec {
            Spec::Type(t) if t.name == "Cart" => Some(t),
            _ => None,
        })
        .expect("Cart declared");
    match &cart.ty {
        TypeExpr::Struct(fields) => {
            assert!(fields[0].is_embedded());
            assert_eq!(fields[0].ty.to_string(), "sync.Mutex");
            assert_eq!(fields[2].ty.to_string(), "*Customer");
        }
        other => panic!("Expected struct, got {other}"),
    }

    let methods: Vec<String> = file
        .func_decls()
        .map(|f| format!("{}{}", f.name, f.signature))
        .collect();
    assert_eq!(
        methods,
        vec![
            "Pay(ctx context.Context, amount int64) (Receipt, error)",
            "add(it Item)",
        ]
    );
}

#[test]
fn test_interface_method_matches_func_signature_text() {
    let source = r#"package p

type Speaker interface {
    Speak(times int) string
}

func (d Dog) Speak(n int) string { return "" }
"#;
    let file = parse(source).expect("Failed to parse");

    let interface_sig = match &file.decls[0] {
        Decl::Gen(decl) => match &decl.specs[0] {
            Spec::Type(spec) => match &spec.ty {
                TypeExpr::Interface(elems) => match &elems[0] {
                    InterfaceElem::Method { signature, .. } => signature.clone(),
                    other => panic!("Expected method, got {other}"),
                },
                other => panic!("Expected interface, got {other}"),
            },
            other => panic!("Expected type spec, got {other:?}"),
        },
        other => panic!("Expected general declaration, got {other:?}"),
    };
    let method_sig = &file.func_decls().next().expect("method").signature;

    let types = |sig: &gouml_parser::ast::Signature| -> Vec<String> {
        sig.params.iter().map(|p| p.ty.to_string()).collect()
    };
    assert_eq!(types(&interface_sig), types(method_sig));
}

#[test]
fn test_diagnostics_carry_spans_and_codes() {
    let source = "package p\n\nfunc broken( {\n";

    let err = parse(source).expect_err("Should fail");
    let diag = &err.diagnostics()[0];

    assert!(diag.to_string().starts_with("error"));
    assert!(matches!(
        diag.code(),
        Some(ErrorCode::E100 | ErrorCode::E101)
    ));
    assert!(diag.primary_span().is_some());
    assert!(diag.help().is_some());
}

#[test]
fn test_error_display_counts_extra_diagnostics() {
    let err = parse("package p\n# $ @\n").expect_err("Should fail");

    assert_eq!(err.diagnostics().len(), 3);
    assert_eq!(err.to_string(), "error[E002]: unexpected character (+2 more)");
}

fn go_ident() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,8}".prop_filter("not a keyword", |s| {
        !matches!(
            s.as_str(),
            "package" | "import" | "type" | "func" | "var" | "const" | "struct" | "interface"
                | "map" | "chan"
        )
    })
}

proptest! {
    #[test]
    fn struct_field_count_matches(
        name in go_ident(),
        fields in prop::collection::vec((go_ident(), go_ident()), 0..8),
    ) {
        let body: String = fields
            .iter()
            .map(|(field, ty)| format!("    {field} {ty}\n"))
            .collect();
        let source = format!("package gen\n\ntype {name} struct {{\n{body}}}\n");

        let file = parse(&source).expect("generated source parses");
        let spec = match &file.decls[0] {
            Decl::Gen(decl) => match &decl.specs[0] {
                Spec::Type(spec) => spec.clone(),
                other => panic!("Expected type spec, got {other:?}"),
            },
            other => panic!("Expected general declaration, got {other:?}"),
        };

        prop_assert_eq!(&spec.name, &name);
        match spec.ty {
            TypeExpr::Struct(decls) => {
                prop_assert_eq!(decls.len(), fields.len());
                for (decl, (field, ty)) in decls.iter().zip(&fields) {
                    prop_assert_eq!(&decl.names, &vec![field.clone()]);
                    prop_assert_eq!(decl.ty.to_string(), ty.clone());
                }
            }
            other => panic!("Expected struct, got {other}"),
        }
    }
}
