use super::*;
use crate::{ExprArena, Name, SourceMap, Span, TypeTag};
use pretty_assertions::assert_eq;

#[test]
fn lists_round_trip_through_ranges() {
    let mut arena = ExprArena::new(SourceMap::default());
    let a = arena.alloc_expr(Expr::new(ExprKind::Int(1), Span::new(0, 1)));
    let b = arena.alloc_expr(Expr::new(ExprKind::Int(2), Span::new(2, 3)));
    let empty = arena.alloc_expr_list(Vec::new());
    let range = arena.alloc_expr_list([a, b]);
    assert!(empty.is_empty());
    assert_eq!(range.len(), 2);
    assert_eq!(arena.expr_list(range), &[a, b]);
    assert_eq!(arena.expr(b).kind, ExprKind::Int(2));
}

#[test]
fn literal_and_place_classification() {
    assert!(ExprKind::Int(5).is_literal());
    assert!(ExprKind::Str(Name::EMPTY).is_literal());
    assert!(!ExprKind::Ident(Name::EMPTY).is_literal());
    assert!(ExprKind::Ident(Name::EMPTY).is_place());
    assert!(!ExprKind::File.is_place());
}

#[test]
fn operator_groups_are_disjoint() {
    let ops = [
        BinaryOp::Add,
        BinaryOp::Lt,
        BinaryOp::And,
        BinaryOp::Shl,
        BinaryOp::NotEq,
    ];
    for op in ops {
        let groups = [
            op.is_arithmetic(),
            op.is_comparison(),
            op.is_logical(),
            op.is_bitwise(),
        ];
        assert_eq!(groups.iter().filter(|&&g| g).count(), 1, "{op:?}");
    }
}

#[test]
fn type_tag_letters_round_trip() {
    for tag in TypeTag::ALL {
        assert_eq!(TypeTag::from_letter(tag.letter()), Some(tag));
        assert_eq!(
            TypeTag::from_letter(tag.letter().to_ascii_uppercase()),
            Some(tag)
        );
        assert_eq!(TypeTag::from_keyword(tag.name()), Some(tag));
    }
}
