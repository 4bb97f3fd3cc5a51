use super::*;

// ===== Script and style removal =====

#[test]
fn script_tags_and_contents_are_removed() {
    let dirty = "<p>before</p><script>alert('x');</script><p>after</p>";
    assert_eq!(clean(dirty), "<p>before</p><p>after</p>");
}

#[test]
fn script_matching_is_case_insensitive() {
    let dirty = "<SCRIPT>var a = 1;</SCRIPT>ok";
    assert_eq!(clean(dirty), "ok");
}

#[test]
fn unterminated_script_swallows_the_rest() {
    let dirty = "<p>kept</p><script>var a = 1;";
    assert_eq!(clean(dirty), "<p>kept</p>");
}

#[test]
fn style_contents_are_discarded() {
    let dirty = "<style>body { background: red; }</style><p>hi</p>";
    assert_eq!(clean(dirty), "<p>hi</p>");
}

// ===== Attribute filtering =====

#[test]
fn event_handlers_are_stripped_from_images() {
    let dirty = r#"<img src="cat.png" onerror="alert(1)">"#;
    assert_eq!(clean(dirty), r#"<img src="cat.png">"#);
}

#[test]
fn event_handler_names_match_case_insensitively() {
    let dirty = r#"<IMG SRC="cat.png" ONERROR="alert(1)">"#;
    assert_eq!(clean(dirty), r#"<img src="cat.png">"#);
}

#[test]
fn onclick_is_dropped_but_the_element_survives() {
    let dirty = r#"<div onclick="boom()" class="note">hi</div>"#;
    assert_eq!(clean(dirty), r#"<div class="note">hi</div>"#);
}

#[test]
fn single_quoted_values_are_requoted() {
    let dirty = "<span class='tag'>x</span>";
    assert_eq!(clean(dirty), r#"<span class="tag">x</span>"#);
}

#[test]
fn quoted_angle_bracket_does_not_end_the_tag() {
    let dirty = r#"<a title="a > b" href="/doc">link</a>"#;
    assert_eq!(clean(dirty), r#"<a title="a > b" href="/doc">link</a>"#);
}

// ===== URL scheme checks =====

#[test]
fn javascript_href_is_removed_but_the_link_is_kept() {
    let dirty = r#"<a href="javascript:alert(1)">click</a>"#;
    assert_eq!(clean(dirty), "<a>click</a>");
}

#[test]
fn javascript_scheme_detection_ignores_case_and_whitespace() {
    let dirty = "<a href=\"  JaVaScRiPt\t:alert(1)\">x</a>";
    assert_eq!(clean(dirty), "<a>x</a>");
}

#[test]
fn entity_encoded_javascript_scheme_is_caught() {
    let dirty = r#"<a href="java&#115;cript:alert(1)">x</a>"#;
    assert_eq!(clean(dirty), "<a>x</a>");
    let dirty = r#"<a href="javascript&colon;alert(1)">x</a>"#;
    assert_eq!(clean(dirty), "<a>x</a>");
}

#[test]
fn ordinary_urls_pass_through() {
    let dirty = r#"<a href="https://example.com/doc" target="_blank" rel="noopener">doc</a>"#;
    assert_eq!(clean(dirty), dirty);
    let dirty = r#"<img src="/files/chart.png" alt="chart">"#;
    assert_eq!(clean(dirty), dirty);
}

// ===== Unknown markup =====

#[test]
fn unknown_tags_are_unwrapped_around_their_children() {
    let dirty = "<section><p>body</p></section>";
    assert_eq!(clean(dirty), "<p>body</p>");
}

#[test]
fn iframes_are_dropped() {
    let dirty = r#"<iframe src="https://example.com"></iframe>after"#;
    assert_eq!(clean(dirty), "after");
}

#[test]
fn comments_and_doctypes_are_dropped() {
    assert_eq!(clean("a<!-- hidden -->b"), "ab");
    assert_eq!(clean("<!DOCTYPE html><p>x</p>"), "<p>x</p>");
}

#[test]
fn stray_brackets_become_text() {
    assert_eq!(clean("1 < 2"), "1 &lt; 2");
    assert_eq!(clean("truncated <p"), "truncated &lt;p");
}

// ===== Editor output =====

#[test]
fn editor_structure_is_preserved() {
    let html = "<h2>Notes</h2><p><strong>bold</strong> and <em>italic</em></p>\
                <ul><li>one</li><li>two</li></ul>\
                <pre><code class=\"language-rust\">let x = 1;</code></pre>";
    assert_eq!(clean(html), html);
}

#[test]
fn task_list_markup_is_preserved() {
    let html = r#"<ul data-type="taskList"><li data-checked="true"><label><input type="checkbox" checked></label><div><p>done</p></div></li></ul>"#;
    assert_eq!(clean(html), html);
}

#[test]
fn tables_are_preserved() {
    let html = "<table><thead><tr><th>k</th></tr></thead><tbody><tr><td>v</td></tr></tbody></table>";
    assert_eq!(clean(html), html);
}

#[test]
fn text_entities_are_left_alone() {
    assert_eq!(clean("fish &amp; chips"), "fish &amp; chips");
}

#[test]
fn empty_input_is_empty() {
    assert_eq!(clean(""), "");
}
