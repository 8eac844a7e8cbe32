//! HTML report invariant tests.
//!
//! These tests validate the generated HTML structure without requiring a browser:
//! - Required top-level sections present
//! - Entry and peek attribute surface matches the view state
//! - Unrendered entries keep their placeholder height
//! - User-controlled text is escaped
//! - Output is self-contained (no external http/https resources)

use regex::Regex;
use std::sync::Arc;
use sv_common::test_utils::{five_test_fixture, InputBuilder};
use sv_common::{ReportInput, TestIndex};
use sv_report::config::{ReportConfig, ReportTheme};
use sv_report::generator::ReportGenerator;
use sv_view::{IntersectionChange, ViewConfig, ViewState};

fn view(input: &ReportInput) -> ViewState {
    ViewState::new(Arc::new(input.clone()), ViewConfig::default()).unwrap()
}

fn generate(input: &ReportInput, state: &ViewState) -> String {
    ReportGenerator::default_config()
        .generate(input, state)
        .unwrap()
}

fn entry_tags(html: &str) -> Vec<String> {
    let re = Regex::new(r#"<li class="test_entry"[^>]*>"#).unwrap();
    re.find_iter(html).map(|m| m.as_str().to_string()).collect()
}

fn peek_tags(html: &str) -> Vec<String> {
    let re = Regex::new(r#"<span class="material-icons peek_icon [^"]*"[^>]*>"#).unwrap();
    re.find_iter(html).map(|m| m.as_str().to_string()).collect()
}

// ============================================================================
// HTML Structure Tests
// ============================================================================

mod structure {
    use super::*;

    #[test]
    fn test_html_doctype_present() {
        let input = five_test_fixture();
        let html = generate(&input, &view(&input));
        assert!(
            html.starts_with("<!DOCTYPE html>"),
            "HTML must start with DOCTYPE declaration"
        );
    }

    #[test]
    fn test_html_has_required_meta_tags() {
        let input = five_test_fixture();
        let html = generate(&input, &view(&input));

        assert!(html.contains(r#"charset="UTF-8""#), "HTML must specify UTF-8 charset");
        assert!(html.contains(r#"name="viewport""#), "HTML must have viewport meta tag");
        assert!(html.contains(r#"name="generator""#), "HTML must have generator meta tag");
        assert!(
            html.contains(r#"name="robots" content="noindex, nofollow""#),
            "HTML must have noindex robots meta tag"
        );
        assert!(
            html.contains(r#"<link rel="icon" href="data:image/svg+xml;base64,"#),
            "favicon must be inline"
        );
    }

    #[test]
    fn test_required_sections_present() {
        let input = five_test_fixture();
        let html = generate(&input, &view(&input));
        for id in [
            "status_bar",
            "test_directory_breadcrumbs",
            "test_result_stats",
            "explorer",
            "entries",
            "entries_peek_icons_view",
            "details",
            "report-data",
        ] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing #{id}");
        }
    }

    #[test]
    fn test_status_bar_reflects_run() {
        let input = five_test_fixture();
        let html = generate(&input, &view(&input));
        assert!(html.contains(r#"<div id="status_bar_status_message" class="status_bar_error">Error</div>"#));
        assert!(html.contains("Complete at Tue, Sep 15, 2020 12:26:40 <b> in 0.5 sec</b>"));
        assert!(html.contains(r#"<div id="test_result_stats_errors">2</div>"#));

        let ok = InputBuilder::new().test("a", true).build();
        let html = generate(&ok, &view(&ok));
        assert!(html.contains(">Success</div>"));
    }

    #[test]
    fn test_breadcrumbs_use_separator() {
        let input = five_test_fixture();
        let html = generate(&input, &view(&input));
        assert!(html.contains(
            r#"<div class="breadcrumb_component">/</div><div class="breadcrumb_component">〉</div><div class="breadcrumb_component">work</div>"#
        ));
    }

    #[test]
    fn test_additional_info_absent_vs_empty() {
        let input = five_test_fixture();
        let html = generate(&input, &view(&input));
        assert!(!html.contains(r#"id="additional_info""#));

        let input = InputBuilder::new()
            .test("a", true)
            .additional_info(vec![])
            .build();
        let html = generate(&input, &view(&input));
        assert!(html.contains(r#"<pre id="additional_info"></pre>"#));
    }

    #[test]
    fn test_theme_class_applied() {
        let input = five_test_fixture();
        let generator = ReportGenerator::new(ReportConfig::new().with_theme(ReportTheme::Dark));
        let html = generator.generate(&input, &view(&input)).unwrap();
        assert!(html.contains(r#"<html lang="en" class="dark">"#));
        assert!(html.contains("data-color-mode"));
    }
}

// ============================================================================
// Attribute Surface Tests
// ============================================================================

mod attributes {
    use super::*;

    #[test]
    fn test_one_entry_and_one_peek_per_test() {
        let input = five_test_fixture();
        let html = generate(&input, &view(&input));
        let entries = entry_tags(&html);
        let peeks = peek_tags(&html);
        assert_eq!(entries.len(), 5);
        assert_eq!(peeks.len(), 5);
        for (i, (entry, peek)) in entries.iter().zip(&peeks).enumerate() {
            assert!(entry.contains(&format!(r#"te-index="{i}""#)));
            assert!(peek.contains(&format!(r#"data-idx="{i}""#)));
        }
    }

    #[test]
    fn test_status_and_visibility_attributes() {
        let input = five_test_fixture();
        let mut state = view(&input);
        state.set_filter("fail", false, true);
        let html = generate(&input, &state);

        let entries = entry_tags(&html);
        let visible: Vec<&String> = entries.iter().filter(|t| t.contains(" te-visible")).collect();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|t| t.contains(r#"te-status="0""#)));

        let peeks = peek_tags(&html);
        assert_eq!(peeks.iter().filter(|t| t.contains(" data-vis")).count(), 2);
        assert!(html.contains("Query processed, found 2 (passed: 0, errors: 2)"));
    }

    #[test]
    fn test_selection_mirrored_on_peek() {
        let input = five_test_fixture();
        let mut state = view(&input);
        state.select(TestIndex(3)).unwrap();
        let html = generate(&input, &state);

        let selected: Vec<String> = entry_tags(&html)
            .into_iter()
            .filter(|t| t.contains("te-user-selected"))
            .collect();
        assert_eq!(selected.len(), 1);
        assert!(selected[0].contains(r#"te-index="3""#));
        let peeks: Vec<String> = peek_tags(&html)
            .into_iter()
            .filter(|t| t.contains("data-slt"))
            .collect();
        assert_eq!(peeks.len(), 1);
        assert!(peeks[0].contains(r#"data-idx="3""#));
        assert!(html.contains(r#"<section id="details" data-idx="3">"#));
    }

    #[test]
    fn test_unrendered_entries_are_empty_placeholders() {
        let input = five_test_fixture();
        let mut state = view(&input);
        state
            .on_viewport_intersection(&[IntersectionChange::entered(TestIndex(1))])
            .unwrap();
        let html = generate(&input, &state);

        let re = Regex::new(r#"<li class="test_entry"([^>]*) style="height:(\d+)px">(.*?)</li>"#).unwrap();
        let mut rendered = 0;
        for caps in re.captures_iter(&html) {
            assert_eq!(&caps[2], "22");
            let in_view = caps[1].contains("te-in-view");
            assert_eq!(!caps[3].is_empty(), in_view);
            if in_view {
                rendered += 1;
                assert!(caps[3].contains("check_circle_outline"));
                assert!(caps[3].contains("star_border"));
            }
        }
        assert_eq!(rendered, 1);
        assert_eq!(
            peek_tags(&html).iter().filter(|t| t.contains("data-ivw")).count(),
            1
        );
    }

    #[test]
    fn test_viewport_margin_reaches_the_host() {
        let input = five_test_fixture();
        let html = generate(&input, &view(&input));
        assert!(html.contains(r#"<ul id="entries" data-viewport-margin="1%">"#));

        let config = ViewConfig::default().with_viewport_margin_pct(5.5);
        let state = ViewState::new(Arc::new(input.clone()), config).unwrap();
        let html = generate(&input, &state);
        assert!(html.contains(r#"data-viewport-margin="5.5%""#));
        assert!(html.contains(r#""viewport_margin_pct":5.5"#));
    }

    #[test]
    fn test_rejected_query_flags_search_bar() {
        let input = five_test_fixture();
        let mut state = view(&input);
        state.set_filter("(unterminated", true, true);
        let html = generate(&input, &state);
        assert!(html.contains(r#"value="(unterminated" class="search_bar_error""#));
        assert!(html.contains(r#"id="show_success" type="checkbox" checked disabled"#));
    }
}

// ============================================================================
// Safety Tests
// ============================================================================

mod safety {
    use super::*;

    #[test]
    fn test_test_ids_are_escaped() {
        let input = InputBuilder::new()
            .test("<script>alert(1)</script>", false)
            .build();
        let mut state = view(&input);
        state
            .on_viewport_intersection(&[IntersectionChange::entered(TestIndex(0))])
            .unwrap();
        state.select(TestIndex(0)).unwrap();
        let html = generate(&input, &state);
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_no_external_resources() {
        let input = five_test_fixture();
        let html = generate(&input, &view(&input));
        let re = Regex::new(r#"(?:src|href)="https?://"#).unwrap();
        assert!(!re.is_match(&html), "report must be self-contained");
    }
}
