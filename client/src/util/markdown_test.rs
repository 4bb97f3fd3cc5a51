use super::*;

#[test]
fn renders_basic_formatting() {
    let out = render("**bold** and *italic*");
    assert!(out.contains("<strong>bold</strong>"));
    assert!(out.contains("<em>italic</em>"));
}

#[test]
fn renders_tables() {
    let out = render("| a | b |\n|---|---|\n| 1 | 2 |");
    assert!(out.contains("<table>"));
    assert!(out.contains("<td>1</td>"));
}

#[test]
fn renders_task_lists() {
    let out = render("- [x] done\n- [ ] open");
    assert!(out.contains("checkbox"));
    assert!(out.contains("checked"));
}

#[test]
fn drops_raw_html_blocks() {
    let out = render("before\n\n<script>alert(1)</script>\n\nafter");
    assert!(!out.contains("<script>"));
    assert!(out.contains("before"));
    assert!(out.contains("after"));
}

#[test]
fn drops_inline_html() {
    let out = render("text with <img src=x onerror=alert(1)> inline");
    assert!(!out.contains("onerror"));
    assert!(out.contains("inline"));
}

#[test]
fn escapes_angle_bracket_text() {
    let out = render("compare `a < b`");
    assert!(out.contains("&lt;"));
}
