use super::*;
use pretty_assertions::assert_eq;

#[test]
fn lines_are_one_based() {
    let map = SourceMap::new(Name::EMPTY, "a = 1;\nb = 2;\n\nc = 3;");
    assert_eq!(map.line_of(0), 1);
    assert_eq!(map.line_of(5), 1);
    assert_eq!(map.line_of(6), 1);
    assert_eq!(map.line_of(7), 2);
    assert_eq!(map.line_of(14), 3);
    assert_eq!(map.line_of(15), 4);
    assert_eq!(map.line_count(), 4);
}

#[test]
fn empty_source_has_one_line() {
    let map = SourceMap::new(Name::EMPTY, "");
    assert_eq!(map.line(Span::new(0, 0)), 1);
}
