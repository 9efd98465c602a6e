use regex::Regex;
use std::sync::LazyLock;

use super::{Argument, CommandGrammar, CommandSyntax, Flag, unwrap_code_span};
use crate::error::GrammarError;

static PATH_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.:-]*$").unwrap());
static PARAM_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.:-]*$").unwrap());

/// Grammar for shell command declarations such as
/// `tool remote add <name> [url] [-f, --force]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CliGrammar;

// Whitespace split that keeps bracketed groups together, so
// `[--out <dir>]` stays one token.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut cur = String::new();
    let mut depth = 0usize;
    for ch in text.chars() {
        match ch {
            '[' | '<' => depth += 1,
            ']' | '>' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if ch.is_whitespace() && depth == 0 {
            if !cur.is_empty() {
                tokens.push(std::mem::take(&mut cur));
            }
        } else {
            cur.push(ch);
        }
    }
    if !cur.is_empty() {
        tokens.push(cur);
    }
    tokens
}

fn parse_arg(inner: &str, required: bool) -> Option<Argument> {
    let inner = inner.trim();
    let inner = inner
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(inner);
    let (name, variadic) = match inner.strip_suffix("...") {
        Some(n) => (n, true),
        None => (inner, false),
    };
    PARAM_NAME.is_match(name).then(|| Argument {
        name: name.to_string(),
        required,
        variadic,
    })
}

fn parse_flag(decl: &str) -> Option<Flag> {
    let mut flag = Flag::default();
    let decl = decl.replace('=', " ");
    let mut words = decl.split_whitespace().peekable();
    while let Some(word) = words.peek() {
        if !word.starts_with('-') {
            break;
        }
        for name in word.split([',', '|']).filter(|n| !n.is_empty()) {
            if let Some(long) = name.strip_prefix("--") {
                flag.long = Some(long.to_string());
            } else if let Some(short) = name.strip_prefix('-') {
                flag.short = Some(short.to_string());
            } else {
                return None;
            }
        }
        words.next();
    }
    if let Some(value) = words.next() {
        let value = value.trim_start_matches('<').trim_end_matches('>');
        flag.value = Some(value.to_string());
    }
    if words.next().is_some() || (flag.long.is_none() && flag.short.is_none()) {
        return None;
    }
    Some(flag)
}

enum Token {
    Word(String),
    Arg(Argument),
    Flag(Flag),
    Ellipsis,
}

fn classify(token: &str) -> Option<Token> {
    if token == "..." {
        return Some(Token::Ellipsis);
    }
    if let Some(inner) = token.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        if inner.trim_start().starts_with('-') {
            return parse_flag(inner).map(Token::Flag);
        }
        return parse_arg(inner, false).map(Token::Arg);
    }
    if token.starts_with('<') && token.ends_with('>') {
        return parse_arg(token, true).map(Token::Arg);
    }
    if token.starts_with('<') && token.ends_with(">...") {
        let mut arg = parse_arg(&token[..token.len() - 3], true)?;
        arg.variadic = true;
        return Some(Token::Arg(arg));
    }
    if token.starts_with('-') {
        return parse_flag(token.trim_end_matches(',')).map(Token::Flag);
    }
    PATH_WORD
        .is_match(token)
        .then(|| Token::Word(token.to_string()))
}

// Returns the parsed declaration and whether any argument or flag was seen.
fn scan(text: &str) -> Option<(CommandSyntax, bool)> {
    let text = text.trim().strip_prefix("$ ").unwrap_or(text.trim());
    let mut path: Vec<String> = Vec::new();
    let mut syntax = CommandSyntax::default();
    // a `-s,` token waits for the long form that follows it
    let mut pending_short: Option<Flag> = None;

    for raw in tokenize(text) {
        let comma_pair = raw.starts_with('-') && raw.ends_with(',');
        match classify(&raw)? {
            Token::Word(w) => {
                if !syntax.args.is_empty() || !syntax.flags.is_empty() || pending_short.is_some() {
                    return None;
                }
                path.push(w);
            }
            Token::Arg(arg) => {
                if pending_short.is_some() {
                    return None;
                }
                // `--out <dir>` binds the value to the flag before it
                match syntax.flags.last_mut() {
                    Some(flag) if flag.value.is_none() && syntax.args.is_empty() && arg.required => {
                        flag.value = Some(arg.name);
                    }
                    _ => syntax.args.push(arg),
                }
            }
            Token::Flag(mut flag) => {
                if let Some(short) = pending_short.take() {
                    flag.short = flag.short.or(short.short);
                }
                if comma_pair {
                    pending_short = Some(flag);
                } else {
                    syntax.flags.push(flag);
                }
            }
            Token::Ellipsis => match syntax.args.last_mut() {
                Some(arg) => arg.variadic = true,
                None => return None,
            },
        }
    }
    if let Some(short) = pending_short {
        syntax.flags.push(short);
    }

    syntax.name = path.pop()?;
    syntax.parents = path;
    let has_params = !syntax.args.is_empty() || !syntax.flags.is_empty();
    Some((syntax, has_params))
}

fn render_flag(flag: &Flag) -> String {
    let names: Vec<String> = flag
        .short
        .iter()
        .map(|s| format!("-{s}"))
        .chain(flag.long.iter().map(|l| format!("--{l}")))
        .collect();
    match &flag.value {
        Some(v) => format!("[{} <{v}>]", names.join(", ")),
        None => format!("[{}]", names.join(", ")),
    }
}

impl CommandGrammar for CliGrammar {
    fn language(&self) -> &'static str {
        "cli"
    }

    fn is_command_syntax(&self, text: &str) -> bool {
        let (inner, wrapped) = unwrap_code_span(text);
        matches!(scan(inner), Some((_, has_params)) if has_params || wrapped)
    }

    fn parse_command_syntax(&self, text: &str) -> Result<CommandSyntax, GrammarError> {
        let (inner, _) = unwrap_code_span(text);
        scan(inner)
            .map(|(syntax, _)| syntax)
            .ok_or_else(|| GrammarError::NotCommandSyntax(text.to_string()))
    }

    fn stringify_command_syntax(&self, syntax: &CommandSyntax) -> Result<String, GrammarError> {
        if syntax.name.is_empty() {
            return Err(GrammarError::MissingName(format!("{syntax:?}")));
        }
        let mut parts: Vec<String> = syntax.parents.clone();
        parts.push(syntax.name.clone());
        for arg in &syntax.args {
            let dots = if arg.variadic { "..." } else { "" };
            parts.push(if arg.required {
                format!("<{}{dots}>", arg.name)
            } else {
                format!("[{}{dots}]", arg.name)
            });
        }
        parts.extend(syntax.flags.iter().map(render_flag));
        Ok(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("`myrepo foo bar`", true)]
    #[case("tool add <name>", true)]
    #[case("$ tool run [--watch]", true)]
    #[case("`npm`", true)]
    #[case("Getting Started", false)]
    #[case("tool <name> extra", false)]
    #[case("Installation (npm)", false)]
    #[case("", false)]
    fn detects_declarations(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(CliGrammar.is_command_syntax(text), expected, "{text:?}");
    }

    #[test]
    fn parses_path_args_and_flags() {
        let syntax = CliGrammar
            .parse_command_syntax("`git remote add <name> [url] [-f, --fetch] [--tags] [--mirror <mode>]`")
            .unwrap();
        assert_eq!(syntax.name, "add");
        assert_eq!(syntax.parents, vec!["git", "remote"]);
        assert_eq!(
            syntax.args,
            vec![Argument::required("name"), Argument::optional("url")]
        );
        assert_eq!(
            syntax.flags,
            vec![
                Flag {
                    short: Some("f".into()),
                    long: Some("fetch".into()),
                    value: None
                },
                Flag {
                    short: None,
                    long: Some("tags".into()),
                    value: None
                },
                Flag {
                    short: None,
                    long: Some("mirror".into()),
                    value: Some("mode".into())
                },
            ]
        );
    }

    #[test]
    fn bare_flags_take_following_value() {
        let syntax = CliGrammar
            .parse_command_syntax("tool build -o, --out <dir> <files>...")
            .unwrap();
        assert_eq!(
            syntax.flags,
            vec![Flag {
                short: Some("o".into()),
                long: Some("out".into()),
                value: Some("dir".into())
            }]
        );
        assert_eq!(syntax.args.len(), 1);
        assert!(syntax.args[0].variadic && syntax.args[0].required);
    }

    #[test]
    fn canonical_form_normalises_spacing() {
        let syntax = CliGrammar
            .parse_command_syntax("tool   run   <file...>  [--watch]")
            .unwrap();
        assert_eq!(
            CliGrammar.stringify_command_syntax(&syntax).unwrap(),
            "tool run <file...> [--watch]"
        );
    }

    #[test]
    fn rejects_prose() {
        let err = CliGrammar.parse_command_syntax("What is this?").unwrap_err();
        assert!(matches!(err, GrammarError::NotCommandSyntax(_)));
        assert!(matches!(
            CliGrammar.stringify_command_syntax(&CommandSyntax::default()),
            Err(GrammarError::MissingName(_))
        ));
    }
}
