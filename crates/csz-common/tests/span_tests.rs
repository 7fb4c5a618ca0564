use super::*;

#[test]
fn at_measures_from_start() {
    let span = Span::at(10, 6);
    assert_eq!(span, Span::new(10, 16));
    assert_eq!(span.len(), 6);
}

#[test]
fn at_clamps_instead_of_overflowing() {
    let span = Span::at(u32::MAX - 2, 10);
    assert_eq!(span.end, u32::MAX);
    assert_eq!(span.len(), 2);
    assert!(!span.is_empty());
}

#[test]
fn cover_spans_both_ends() {
    let joined = Span::new(4, 8).cover(Span::new(2, 5));
    assert_eq!(joined, Span::new(2, 8));
    assert!(joined.contains(Span::new(3, 7)));
}
