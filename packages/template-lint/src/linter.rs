//! Linter
//!
//! Runs the configured rules over one template: a single pre-order walk,
//! each rule called for the nodes its selectors pick out.

use std::cell::RefCell;

use crate::config::LinterConfig;
use crate::diagnostic::{Diagnostic, Severity};
use crate::error::{LintError, Result};
use crate::render3::r3_ast::R3Node;
use crate::rules::{self, Rule, RuleContext};
use crate::source_code::SourceCode;
use crate::tree::TemplateTree;
use crate::visitor::{NodeSelector, TemplateBodyVisitor};

struct ConfiguredRule {
    rule: Box<dyn Rule>,
    severity: Severity,
    selectors: Vec<NodeSelector>,
}

pub struct Linter {
    rules: Vec<ConfiguredRule>,
}

impl Linter {
    pub fn new(config: LinterConfig) -> Result<Self> {
        let mut configured = Vec::new();
        for (name, level) in &config.rules {
            let rule = rules::find(name).ok_or_else(|| LintError::UnknownRule(name.clone()))?;
            let Some(severity) = level.severity() else {
                continue;
            };
            let selectors = rule
                .selectors()
                .iter()
                .map(|selector| selector.parse::<NodeSelector>())
                .collect::<Result<Vec<_>>>()?;
            configured.push(ConfiguredRule {
                rule,
                severity,
                selectors,
            });
        }
        Ok(Linter { rules: configured })
    }

    /// Names of the rules that will run.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.rule.meta().name).collect()
    }

    /// Diagnostics come back in node pre-order, then rule order.
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = tree.len(), rules = self.rules.len()))]
    pub fn lint(&self, source: &SourceCode<'_>, tree: &TemplateTree) -> Vec<Diagnostic> {
        let diagnostics = RefCell::new(Vec::new());
        {
            let mut visitor = TemplateBodyVisitor::new();
            for configured in &self.rules {
                for selector in &configured.selectors {
                    let diagnostics = &diagnostics;
                    visitor.on(selector.clone(), move |tree, id| {
                        let mut ctx = RuleContext::new(
                            tree,
                            source,
                            configured.rule.meta(),
                            configured.severity,
                        );
                        configured.rule.check(&mut ctx, id);
                        diagnostics.borrow_mut().extend(ctx.into_diagnostics());
                    });
                }
            }
            visitor.visit(tree);
        }
        let diagnostics = diagnostics.into_inner();
        tracing::debug!(count = diagnostics.len(), "lint finished");
        diagnostics
    }

    pub fn lint_nodes(&self, text: &str, nodes: &[R3Node]) -> Vec<Diagnostic> {
        let source = SourceCode::new(text);
        let tree = TemplateTree::from_nodes(nodes);
        self.lint(&source, &tree)
    }

    /// `json` is the template AST as an array of r3 nodes.
    pub fn lint_json(&self, text: &str, json: &str) -> Result<Vec<Diagnostic>> {
        let nodes: Vec<R3Node> = serde_json::from_str(json)?;
        Ok(self.lint_nodes(text, &nodes))
    }
}
