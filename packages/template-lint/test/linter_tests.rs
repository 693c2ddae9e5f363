//! Linter Tests
//!
//! End to end: parser JSON or built nodes in, reporter-ready diagnostics out.

#[path = "utils/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::*;
    use angular_template_lint::expression_parser::ast::LiteralValue;
    use angular_template_lint::parse_util::ParseSourceSpan;
    use angular_template_lint::render3::r3_ast::{Element, R3Node};
    use angular_template_lint::{Linter, LinterConfig, MessageId, Position, RuleLevel, Severity};
    use pretty_assertions::assert_eq;

    /// `{{ !(value | async) }}` as the template parser emits it
    const INTERPOLATION_JSON: &str = r#"[
        {
            "type": "BoundText",
            "value": {
                "ast": {
                    "type": "Interpolation",
                    "span": {"start": 0, "end": 22},
                    "strings": ["", ""],
                    "expressions": [
                        {
                            "type": "PrefixNot",
                            "span": {"start": 3, "end": 19},
                            "expression": {
                                "type": "BindingPipe",
                                "span": {"start": 5, "end": 18},
                                "name": "async",
                                "exp": {
                                    "type": "PropertyRead",
                                    "span": {"start": 5, "end": 10},
                                    "name": "value",
                                    "receiver": {"type": "ImplicitReceiver", "span": {"start": 5, "end": 5}}
                                }
                            }
                        }
                    ]
                },
                "source": "{{ !(value | async) }}",
                "absoluteOffset": 0
            },
            "sourceSpan": {"start": {"offset": 0}, "end": {"offset": 22}}
        }
    ]"#;

    #[test]
    fn test_lint_json_reports_negation() {
        let source = "{{ !(value | async) }}";
        let linter = Linter::new(LinterConfig::default()).unwrap();
        let diagnostics = linter.lint_json(source, INTERPOLATION_JSON).unwrap();

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].loc.start, Position::new(1, 3));
        assert_eq!(diagnostics[0].loc.end, Position::new(1, 19));
        assert_eq!(
            diagnostics[0].to_string(),
            "1:3  error  Async pipes should not be negated. Use (observable | async) === (false | null | undefined) to check its value instead.  no-negated-async"
        );

        let json = serde_json::to_value(&diagnostics).unwrap();
        assert_eq!(json[0]["messageId"], "noNegatedAsync");
        assert_eq!(json[0]["range"]["start"], 3);
    }

    #[test]
    fn test_config_from_json() {
        let config: LinterConfig =
            serde_json::from_str(r#"{"rules": {"no-negated-async": "warn"}}"#).unwrap();
        assert_eq!(config.rules.get("no-negated-async"), Some(&RuleLevel::Warn));

        let diagnostics = Linter::new(config)
            .unwrap()
            .lint_json("{{ !(value | async) }}", INTERPOLATION_JSON)
            .unwrap();
        assert_eq!(diagnostics[0].severity, Severity::Warning);

        let empty: LinterConfig = serde_json::from_str("{}").unwrap();
        let linter = Linter::new(empty).unwrap();
        assert!(linter.rule_names().is_empty());
        assert_eq!(
            linter
                .lint_json("{{ !(value | async) }}", INTERPOLATION_JSON)
                .unwrap(),
            vec![]
        );
    }

    #[test]
    fn test_unknown_rule_in_config_fails() {
        let config: LinterConfig =
            serde_json::from_str(r#"{"rules": {"no-negated-await": "error"}}"#).unwrap();
        let err = Linter::new(config).err().unwrap();
        assert_eq!(err.to_string(), "unknown rule `no-negated-await`");
    }

    #[test]
    fn test_diagnostics_follow_document_order() {
        let source = concat!(
            "<div *ngIf=\"!(value | async)\"></div>\n",
            "<span>{{ (value | async) == false }}</span>",
        );
        let comparison = compare_value_async(3, "==", LiteralValue::Boolean(false), "false");
        let text = bound_text(source, "{{ (value | async) == false }}", vec![comparison]);
        let span_start = offset_of(source, "<span>");
        let span = Element::new("span", ParseSourceSpan::from_offsets(span_start, char_len(source)))
            .with_children(vec![R3Node::BoundText(text)]);
        let nodes = vec![
            ng_if_template(source, "div", negated_value_async(0)),
            R3Node::Element(span),
        ];

        let diagnostics = Linter::new(LinterConfig::default())
            .unwrap()
            .lint_nodes(source, &nodes);
        let summary: Vec<(MessageId, Position)> = diagnostics
            .iter()
            .map(|d| (d.message_id, d.loc.start))
            .collect();
        assert_eq!(
            summary,
            vec![
                (MessageId::NoNegatedAsync, Position::new(1, 12)),
                (MessageId::NoLooseEquality, Position::new(2, 9)),
            ]
        );
        assert_eq!(diagnostics[1].loc.end, Position::new(2, 24));
    }

    #[test]
    fn test_columns_count_characters() {
        let source = "<p>é {{ !(value | async) }}</p>";
        let text = bound_text(source, "{{ !(value | async) }}", vec![negated_value_async(3)]);
        let nodes = vec![element(source, "p", vec![R3Node::BoundText(text)])];

        let diagnostics = Linter::new(LinterConfig::default())
            .unwrap()
            .lint_nodes(source, &nodes);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range.start, 8);
        assert_eq!(diagnostics[0].loc.start, Position::new(1, 8));
        assert_eq!(diagnostics[0].loc.end, Position::new(1, 24));
    }

    #[test]
    fn test_overflowing_offset_degrades_to_no_diagnostic() {
        let json = INTERPOLATION_JSON.replace(
            r#""absoluteOffset": 0"#,
            &format!(r#""absoluteOffset": {}"#, usize::MAX),
        );
        let linter = Linter::new(LinterConfig::default()).unwrap();
        assert_eq!(linter.lint_json("{{ !(value | async) }}", &json).unwrap(), vec![]);
    }
}
