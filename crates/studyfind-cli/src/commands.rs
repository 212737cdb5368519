//! Parsing of shell input lines.

/// Every command word, for completion and hints.
pub const COMMANDS: &[&str] = &[
    "login", "logout", "refresh", "new", "title", "detail", "save", "cancel", "back", "delete",
    "yes", "no", "help", "quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login(String),
    Logout,
    Refresh,
    New,
    Title(String),
    Detail(String),
    Save,
    Cancel,
    Back,
    /// 1-based position in the rendered list.
    Delete(usize),
    Yes,
    No,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "login" => Self::Login(required(rest, "login <uid>")?.to_string()),
            "logout" => Self::Logout,
            "refresh" => Self::Refresh,
            "new" => Self::New,
            "title" => Self::Title(rest.to_string()),
            "detail" => Self::Detail(unescape_newlines(rest)),
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "back" => Self::Back,
            "delete" => {
                let n = required(rest, "delete <n>")?;
                match n.parse::<usize>() {
                    Ok(n) if n > 0 => Self::Delete(n),
                    _ => return Err(format!("'{n}' is not a list position")),
                }
            }
            "yes" | "y" => Self::Yes,
            "no" | "n" => Self::No,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("Unknown command '{other}'. Type 'help'.")),
        };
        Ok(command)
    }
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(arg)
    }
}

/// Turns the two-character sequence `\n` into a line break.
fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

pub fn help_text() -> &'static str {
    "\
login <uid>     sign in
logout          sign out
refresh         re-read the list
new             start a new to-do
title <text>    set the draft title
detail <text>   set the draft detail (\\n starts a new line)
save            save the draft
cancel          discard the draft
back            platform back gesture
delete <n>      delete the n-th to-do
yes / no        answer the open question
help            show this help
quit            leave"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_words() {
        assert_eq!(Command::parse("new"), Ok(Command::New));
        assert_eq!(Command::parse("  SAVE "), Ok(Command::Save));
        assert_eq!(Command::parse("y"), Ok(Command::Yes));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(Command::parse("login u1"), Ok(Command::Login("u1".to_string())));
        assert_eq!(
            Command::parse("title Read the  book"),
            Ok(Command::Title("Read the  book".to_string()))
        );
        assert_eq!(
            Command::parse(r"detail Ch.1\nCh.2"),
            Ok(Command::Detail("Ch.1\nCh.2".to_string()))
        );
        assert_eq!(Command::parse("delete 2"), Ok(Command::Delete(2)));
    }

    #[test]
    fn test_empty_title_is_allowed() {
        assert_eq!(Command::parse("title"), Ok(Command::Title(String::new())));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("login").is_err());
        assert!(Command::parse("delete 0").is_err());
        assert!(Command::parse("delete two").is_err());
        assert!(Command::parse("dance").is_err());
    }

    #[test]
    fn test_every_command_word_parses() {
        for word in COMMANDS {
            let line = match *word {
                "login" => "login u1".to_string(),
                "delete" => "delete 1".to_string(),
                other => other.to_string(),
            };
            assert!(Command::parse(&line).is_ok(), "{line}");
        }
    }
}
