//! CSS rule model and text output.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// One style rule, possibly wrapped in at-rules (outermost first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub at_rules: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            at_rules: Vec::new(),
            declarations: Vec::new(),
        }
    }

    pub fn within(mut self, at_rule: impl Into<String>) -> Self {
        self.at_rules.insert(0, at_rule.into());
        self
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Pretty-printing stylesheet writer.
///
/// Consecutive rules sharing the same at-rule wrappers are printed inside a
/// single block, so one component's `@media (min-width: …)` rules stay
/// together.
#[derive(Debug, Default)]
pub struct CssWriter {
    out: String,
}

impl CssWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules<'r, I>(&mut self, rules: I)
    where
        I: IntoIterator<Item = &'r Rule>,
    {
        let mut group: Vec<&Rule> = Vec::new();
        for rule in rules.into_iter().filter(|rule| !rule.is_empty()) {
            if group
                .first()
                .is_some_and(|first| first.at_rules != rule.at_rules)
            {
                self.group(&group);
                group.clear();
            }
            group.push(rule);
        }
        self.group(&group);
    }

    pub fn rule(&mut self, rule: &Rule) {
        self.rules(std::iter::once(rule));
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn group(&mut self, rules: &[&Rule]) {
        let Some(first) = rules.first() else {
            return;
        };
        let depth = first.at_rules.len();

        for (level, at_rule) in first.at_rules.iter().enumerate() {
            self.line(level, &format!("{at_rule} {{"));
        }
        for rule in rules {
            self.line(depth, &format!("{} {{", rule.selector));
            for declaration in &rule.declarations {
                self.line(
                    depth + 1,
                    &format!("{}: {};", declaration.property, declaration.value),
                );
            }
            self.line(depth, "}");
        }
        for level in (0..depth).rev() {
            self.line(level, "}");
        }
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}
