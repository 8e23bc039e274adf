use crate::Span;

#[test]
fn conversions() {
    let span = Span::new(3, 9);
    let pair: (u32, u32) = span.into();
    assert_eq!(pair, (3, 9));
    let range: std::ops::Range<usize> = span.into();
    assert_eq!(range, 3..9);
    assert_eq!(Span::from(3u32..9u32), span);
}

#[test]
fn empty() {
    assert!(Span::default().is_empty());
    assert!(!Span::new(0, 1).is_empty());
}
