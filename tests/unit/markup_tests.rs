/*!
 * Tests for markup protection
 */

use sdhclean::sdh::markup::{self, protect, restore, SpanKind, PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};

/// Protecting then restoring is the identity
#[test]
fn test_protect_restore_withMarkupLines_shouldRoundTrip() {
    let lines = [
        "",
        "Plain dialogue",
        r"{\an8}<i>Hello</i>\NWorld",
        r##"<font color="#ffff00">JOHN:</font> Hi {\i1}there{\i0}"##,
        "<br/>line<br>break<BR />",
        r"Unclosed <i tag and { brace",
        r"Back\nslash and \N break",
        "Stray \u{FDD0}3\u{FDD1} token",
    ];

    for line in lines {
        let protected = protect(line);
        assert_eq!(protected.restore(), line, "round trip failed for {:?}", line);
        assert_eq!(restore(&protected.text, &protected.spans), line);
    }
}

/// Protected text carries no markup characters of protected spans
#[test]
fn test_protect_withTagsAndOverrides_shouldHideMarkupFromRules() {
    let protected = protect(r"{\an8}<i>[MUSIC]</i>");

    assert_eq!(protected.spans.len(), 3);
    assert!(!protected.text.contains('<'));
    assert!(!protected.text.contains('{'));
    assert!(protected.text.contains("[MUSIC]"));
    assert_eq!(protected.visible_text(), "[MUSIC]");
}

/// Span kinds are recorded in order of appearance
#[test]
fn test_protect_withEveryKind_shouldClassifySpans() {
    let protected = protect(r"<b>A</b>{\pos(10,10)}\NB");
    let kinds: Vec<SpanKind> = protected.spans.iter().map(|span| span.kind).collect();

    assert_eq!(kinds, vec![SpanKind::Tag, SpanKind::Tag, SpanKind::Override, SpanKind::Break]);
    assert!(protected.has_kind(SpanKind::Override));
    assert!(!protected.has_kind(SpanKind::Reserved));
}

/// Placeholders survive whitespace collapsing
#[test]
fn test_placeholder_withWhitespaceCollapse_shouldStayIntact() {
    let protected = protect("<i>  Hello   world  </i>");
    let collapsed = protected.text.split_whitespace().collect::<Vec<_>>().join(" ");

    assert_eq!(restore(&collapsed, &protected.spans), "<i> Hello world </i>");
}

/// Placeholder tokens use the reserved delimiters
#[test]
fn test_placeholder_withIndex_shouldUseReservedDelimiters() {
    let token = markup::placeholder(12);
    assert!(token.starts_with(PLACEHOLDER_OPEN));
    assert!(token.ends_with(PLACEHOLDER_CLOSE));
    assert_eq!(markup::strip_placeholders(&format!("a{}b", token)), "ab");
}

/// Raw-line visible text drops every protected span
#[test]
fn test_visible_text_withRawLine_shouldDropMarkup() {
    assert_eq!(markup::visible_text(r"{\an8}<i>HEY</i>\NYOU"), "HEYYOU");
    assert_eq!(markup::visible_text("no markup"), "no markup");
}
