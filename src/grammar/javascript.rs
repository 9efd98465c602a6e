use regex::Regex;
use std::sync::LazyLock;

use super::{Argument, CommandGrammar, CommandSyntax, unwrap_code_span};
use crate::error::GrammarError;

static CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:new\s+)?\.?((?:[A-Za-z_$][\w$]*\.)*)([A-Za-z_$][\w$]*)\s*\(([^()]*)\)\s*;?$")
        .unwrap()
});
static IDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$]*$").unwrap());

/// Grammar for JavaScript API declarations such as
/// `vorpal.command(command, [description])` or `.parse(argv)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JavascriptGrammar;

// `a, [b, [c]]` and `...rest`; anything inside brackets is optional.
fn parse_params(list: &str) -> Option<Vec<Argument>> {
    let mut args = Vec::new();
    let mut depth = 0i32;
    if list.trim().is_empty() {
        return Some(args);
    }
    for piece in list.split(',') {
        let opens = piece.matches('[').count() as i32;
        let closes = piece.matches(']').count() as i32;
        let optional = depth > 0 || opens > 0;
        depth += opens - closes;
        if depth < 0 {
            return None;
        }
        let cleaned = piece.replace(['[', ']'], "");
        // default values make a parameter optional too
        let (cleaned, has_default) = match cleaned.split_once('=') {
            Some((name, _)) => (name.trim().to_string(), true),
            None => (cleaned.trim().to_string(), false),
        };
        let (name, variadic) = match cleaned.strip_prefix("...") {
            Some(n) => (n, true),
            None => (cleaned.as_str(), false),
        };
        if !IDENT.is_match(name) {
            return None;
        }
        args.push(Argument {
            name: name.to_string(),
            required: !(optional || has_default || variadic),
            variadic,
        });
    }
    (depth == 0).then_some(args)
}

fn scan(text: &str) -> Option<CommandSyntax> {
    let caps = CALL.captures(text.trim())?;
    let parents = caps[1]
        .split('.')
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    let mut syntax = CommandSyntax::new(&caps[2], parents);
    syntax.args = parse_params(&caps[3])?;
    Some(syntax)
}

impl CommandGrammar for JavascriptGrammar {
    fn language(&self) -> &'static str {
        "javascript"
    }

    fn is_command_syntax(&self, text: &str) -> bool {
        scan(unwrap_code_span(text).0).is_some()
    }

    fn parse_command_syntax(&self, text: &str) -> Result<CommandSyntax, GrammarError> {
        scan(unwrap_code_span(text).0).ok_or_else(|| GrammarError::NotCommandSyntax(text.to_string()))
    }

    fn stringify_command_syntax(&self, syntax: &CommandSyntax) -> Result<String, GrammarError> {
        if syntax.name.is_empty() {
            return Err(GrammarError::MissingName(format!("{syntax:?}")));
        }
        let params: Vec<String> = syntax
            .args
            .iter()
            .map(|a| match (a.variadic, a.required) {
                (true, _) => format!("...{}", a.name),
                (false, true) => a.name.clone(),
                (false, false) => format!("[{}]", a.name),
            })
            .collect();
        let mut out = String::new();
        for p in &syntax.parents {
            out.push_str(p);
            out.push('.');
        }
        out.push_str(&syntax.name);
        out.push('(');
        out.push_str(&params.join(", "));
        out.push(')');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("`vorpal.command(command, [description])`", true)]
    #[case(".parse(argv)", true)]
    #[case("new Vorpal()", true)]
    #[case("Installation", false)]
    #[case("foo('literal')", false)]
    #[case("foo(a, [b)", false)]
    fn detects_calls(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(JavascriptGrammar.is_command_syntax(text), expected, "{text:?}");
    }

    #[test]
    fn parses_receiver_chain_and_params() {
        let syntax = JavascriptGrammar
            .parse_command_syntax("`vorpal.ui.delimiter(text, [options, [cb]], ...rest)`")
            .unwrap();
        assert_eq!(syntax.name, "delimiter");
        assert_eq!(syntax.parents, vec!["vorpal", "ui"]);
        let required: Vec<bool> = syntax.args.iter().map(|a| a.required).collect();
        assert_eq!(required, vec![true, false, false, false]);
        assert!(syntax.args[3].variadic);
    }

    #[test]
    fn canonical_form() {
        let syntax = JavascriptGrammar
            .parse_command_syntax(".command( name ,[description] , opts = {})")
            .unwrap();
        assert_eq!(
            JavascriptGrammar.stringify_command_syntax(&syntax).unwrap(),
            "command(name, [description], [opts])"
        );
    }
}
