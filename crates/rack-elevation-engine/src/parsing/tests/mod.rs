//! Behavioural tests for block parsing with default and substituted strategies.

use crate::{
    color::ColorClassifier,
    links::{LinkError, LinkResolver, ResolvedLink},
    models::RackConfig,
    parsing::{LineError, ParseOutcome, RackParser, SyntaxError, parse},
};

struct FixedColor;

impl ColorClassifier for FixedColor {
    fn color_for(&self, _model: &str) -> String {
        "#123456".to_string()
    }
}

struct FailingLinks;

impl LinkResolver for FailingLinks {
    fn resolve(&self, raw: &str) -> Result<Option<ResolvedLink>, LinkError> {
        Err(LinkError::Unresolvable {
            target: raw.to_string(),
            reason: "host offline".to_string(),
        })
    }
}

struct EchoLinks;

impl LinkResolver for EchoLinks {
    fn resolve(&self, raw: &str) -> Result<Option<ResolvedLink>, LinkError> {
        Ok(Some(ResolvedLink {
            url: format!("test://{raw}"),
            title: Some("T".to_string()),
        }))
    }
}

fn only_item(body: &str, options: &str) -> crate::models::EquipmentItem {
    let parsed = parse(body, options);
    let items: Vec<_> = parsed.items().cloned().collect();
    assert_eq!(items.len(), 1, "expected exactly one item in {:?}", parsed.outcomes);
    items.into_iter().next().unwrap()
}

#[test]
fn cisco_line_with_name_and_comment() {
    let item = only_item(r#"1 1 "Cisco 4948" rtpserver1 this is a comment"#, "");
    assert_eq!(item.model, "Cisco 4948");
    assert_eq!(item.name, "rtpserver1");
    assert_eq!(item.comment.as_deref(), Some("this is a comment"));
    assert_eq!(item.color, "#F80");
    assert_eq!(item.link, None);
    assert_eq!(item.link_title, None);
    assert_eq!(item.u_top, 1);
}

#[test]
fn explicit_color_overrides_classifier() {
    let item = only_item("10 2 NetApp #abc123 link:http://example.com primary filer", "");
    assert_eq!(item.model, "NetApp");
    assert_eq!(item.name, "");
    assert_eq!(item.color, "#abc123");
    assert_eq!(item.link.as_deref(), Some("http://example.com"));
    assert_eq!(item.comment.as_deref(), Some("primary filer"));
    assert_eq!(item.u_size, 2);
    assert_eq!(item.u_top, 11);
}

#[test]
fn non_numeric_line_is_a_syntax_error() {
    let parsed = parse("foo bar", "");
    assert_eq!(
        parsed.outcomes,
        vec![ParseOutcome::SyntaxError(SyntaxError {
            line: "foo bar".to_string(),
            reason: LineError::StartUnit,
        })]
    );
}

#[test]
fn internal_link_with_title() {
    let item = only_item("3 1 PDU link:[[Power/Feed A|Feed A]] left side", "");
    assert_eq!(item.link.as_deref(), Some("/doku.php?id=power:feed_a"));
    assert_eq!(item.link_title.as_deref(), Some("Feed A"));
    assert_eq!(item.comment.as_deref(), Some("left side"));
}

#[test]
fn top_unit_follows_rack_direction() {
    let up = only_item("3 3 Server", "");
    assert_eq!(up.u_top, 5);

    let down = only_item("5 3 Server", "descending");
    assert_eq!(down.u_top, 3);
}

#[test]
fn comments_and_blank_lines_produce_nothing() {
    let parsed = parse("# header\n\n   \n  # indented\n1 1 X\n", "");
    assert_eq!(parsed.outcomes.len(), 1);
    assert!(!parsed.no_data);
}

#[test]
fn errors_and_items_keep_input_order() {
    let parsed = parse("1 1 A\nbad line\n2 1 B\n1 1\n", "");
    let kinds: Vec<_> = parsed
        .outcomes
        .iter()
        .map(|o| match o {
            ParseOutcome::Item(item) => item.model.clone(),
            ParseOutcome::SyntaxError(err) => format!("error: {}", err.line),
        })
        .collect();
    assert_eq!(kinds, ["A", "error: bad line", "B", "error: 1 1"]);
    assert_eq!(parsed.errors().count(), 2);
}

#[test]
fn blank_body_is_no_data() {
    let parsed = parse("\n   \n\n", "name=Empty");
    assert!(parsed.no_data);
    assert!(parsed.outcomes.is_empty());
    assert_eq!(parsed.config.name, "Empty");
}

#[test]
fn crlf_line_endings() {
    let parsed = parse("1 1 A host\r\n2 1 B\r\n", "");
    let items: Vec<_> = parsed.items().collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "host");
    assert_eq!(items[1].comment, None);
}

#[test]
fn empty_quoted_model_is_white() {
    let item = only_item(r#"4 1 "" "" reserved"#, "");
    assert_eq!(item.model, "");
    assert_eq!(item.color, "#FFF");
    assert_eq!(item.comment.as_deref(), Some("reserved"));
}

#[test]
fn substituted_color_classifier() {
    let parser = RackParser::default().with_colors(FixedColor);
    let parsed = parser.parse("1 1 Cisco\n2 1 Other #fff", "");
    let colors: Vec<_> = parsed.items().map(|i| i.color.as_str()).collect();
    assert_eq!(colors, ["#123456", "#fff"]);
}

#[test]
fn failing_link_resolver_keeps_item_without_link() {
    let parser = RackParser::default().with_links(FailingLinks);
    let parsed = parser.parse("1 1 X link:[[page]] note", "");
    let item = parsed.items().next().unwrap();
    assert_eq!(item.link, None);
    assert_eq!(item.link_title, None);
    assert_eq!(item.comment.as_deref(), Some("note"));
}

#[test]
fn substituted_link_resolver_sees_raw_field() {
    let parser = RackParser::default().with_links(EchoLinks);
    let parsed = parser.parse("1 1 X link:[[a b|c]]", "");
    let item = parsed.items().next().unwrap();
    assert_eq!(item.link.as_deref(), Some("test://[[a b|c]]"));
    assert_eq!(item.link_title.as_deref(), Some("T"));
}

#[test]
fn resolver_not_called_without_link_field() {
    let parser = RackParser::default().with_links(FailingLinks);
    let parsed = parser.parse("1 1 X host comment", "");
    assert_eq!(parsed.items().count(), 1);
}

#[test]
fn parse_line_uses_given_config() {
    let config = RackConfig::from_options("descending");
    let outcome = RackParser::default().parse_line("10 4 Shelf", &config);
    match outcome {
        Some(ParseOutcome::Item(item)) => assert_eq!(item.u_top, 7),
        other => panic!("expected item, got {other:?}"),
    }
}
