//! Built-in proactive rules.

use ew_common::{Error, Result, RuleAction};
use regex::Regex;
use serde::Serialize;

/// One disallowed idiom and what to do about it.
#[derive(Debug, Clone, Serialize)]
pub struct ProactiveRule {
    pub id: &'static str,
    #[serde(serialize_with = "serialize_regex")]
    pub pattern: Regex,
    pub description: &'static str,
    pub autofix: bool,
    pub replacement: Option<&'static str>,
    pub action: RuleAction,
}

fn serialize_regex<S: serde::Serializer>(re: &Regex, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(re.as_str())
}

impl ProactiveRule {
    /// Byte offset of the first match, if any.
    pub fn first_match(&self, content: &str) -> Option<usize> {
        self.pattern.find(content).map(|m| m.start())
    }

    /// Whether the auto-fix pass may propose an edit for this rule.
    pub fn is_fixable(&self) -> bool {
        self.autofix && self.replacement.is_some()
    }
}

struct RuleSpec {
    id: &'static str,
    pattern: &'static str,
    description: &'static str,
    autofix: bool,
    replacement: Option<&'static str>,
    action: RuleAction,
}

const BUILTIN_RULES: &[RuleSpec] = &[
    RuleSpec {
        id: "placeholder_onclick",
        pattern: r"onClick\s*=\s*\{\s*\(\)\s*=>\s*\{\s*(console\.log|alert|toast|/\*|//)",
        description: "Placeholder onClick handler detected",
        autofix: false,
        replacement: None,
        action: RuleAction::Block,
    },
    RuleSpec {
        id: "double_stringify",
        pattern: r"JSON\.stringify\(JSON\.stringify\(",
        description: "Double JSON.stringify detected",
        autofix: true,
        replacement: Some("JSON.stringify("),
        action: RuleAction::Fix,
    },
    RuleSpec {
        id: "mock_data",
        // Alternation binds loosely: any bare "sample"/"fake"/"test_data" literal also hits.
        pattern: r#"(const|let|var)\s+\w+\s*=\s*\[\s*\{\s*.*"mock"|"sample"|"fake"|"test_data""#,
        description: "Mock/fake data definition detected",
        autofix: false,
        replacement: None,
        action: RuleAction::Block,
    },
    RuleSpec {
        id: "todo_comments",
        pattern: r"//\s*TODO|/\*\s*TODO|\*\s*TODO",
        description: "TODO comment found in production code",
        autofix: false,
        replacement: None,
        action: RuleAction::Warn,
    },
    RuleSpec {
        id: "console_logs",
        pattern: r"console\.log\s*\(",
        description: "console.log statement found",
        autofix: true,
        replacement: Some("// Debug: "),
        action: RuleAction::Fix,
    },
];

/// Compile the built-in rules, skipping any id listed in `disabled`.
///
/// Unknown ids in `disabled` are rejected so a typo cannot silently keep a
/// rule running.
pub fn builtin_rules(disabled: &[String]) -> Result<Vec<ProactiveRule>> {
    if let Some(unknown) = disabled
        .iter()
        .find(|id| !BUILTIN_RULES.iter().any(|r| r.id == id.as_str()))
    {
        return Err(Error::Config(format!("unknown scanner rule: {unknown}")));
    }

    BUILTIN_RULES
        .iter()
        .filter(|spec| !disabled.iter().any(|d| d == spec.id))
        .map(|spec| {
            let pattern = Regex::new(spec.pattern).map_err(|e| Error::invalid_pattern(spec.id, e))?;
            Ok(ProactiveRule {
                id: spec.id,
                pattern,
                description: spec.description,
                autofix: spec.autofix,
                replacement: spec.replacement,
                action: spec.action,
            })
        })
        .collect()
}
