//! The closed command vocabulary

/// Every keyword the terminal understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Help,
    Secrets,
    Injection,
    Xss,
    Auth,
    Deps,
    Headers,
    Tools,
    Owasp,
    About,
    Clear,
    Matrix,
    Sudo,
    Hack,
    Password,
    Coffee,
    Trivia,
}

/// What a command does when run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Open a content module in the viewer
    Display {
        module: &'static str,
        title: &'static str,
    },
    /// Print a fixed line
    Respond(&'static str),
    Clear,
    Matrix,
    Trivia,
}

/// Result of resolving one submitted line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Command(Command),
    NotFound,
}

pub const MATRIX_RESPONSE: &str = "Wake up, vibe coder...";
pub const CLEARED_RESPONSE: &str = "Terminal cleared.";
pub const TRIVIA_PREFIX: &str = "🔐 SECURITY TRIVIA: ";

pub fn not_found_message(command: &str) -> String {
    format!(
        "Command not found: {}. Type 'help' to see available commands.",
        command
    )
}

impl Command {
    pub const ALL: [Command; 17] = [
        Command::Help,
        Command::Secrets,
        Command::Injection,
        Command::Xss,
        Command::Auth,
        Command::Deps,
        Command::Headers,
        Command::Tools,
        Command::Owasp,
        Command::About,
        Command::Clear,
        Command::Matrix,
        Command::Sudo,
        Command::Hack,
        Command::Password,
        Command::Coffee,
        Command::Trivia,
    ];

    /// Exact match on an already normalized keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.keyword() == keyword)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Secrets => "secrets",
            Command::Injection => "injection",
            Command::Xss => "xss",
            Command::Auth => "auth",
            Command::Deps => "deps",
            Command::Headers => "headers",
            Command::Tools => "tools",
            Command::Owasp => "owasp",
            Command::About => "about",
            Command::Clear => "clear",
            Command::Matrix => "matrix",
            Command::Sudo => "sudo",
            Command::Hack => "hack",
            Command::Password => "password",
            Command::Coffee => "coffee",
            Command::Trivia => "trivia",
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Command::Help => Action::Display {
                module: "help-module",
                title: "Help: Available Commands",
            },
            Command::Secrets => Action::Display {
                module: "secrets-module",
                title: "Protect Your Secrets",
            },
            Command::Injection => Action::Display {
                module: "injection-module",
                title: "SQL Injections: Close The Door",
            },
            Command::Xss => Action::Display {
                module: "xss-module",
                title: "Cross-Site Scripting Defense",
            },
            Command::Auth => Action::Display {
                module: "auth-module",
                title: "Authentication Fortress",
            },
            Command::Deps => Action::Display {
                module: "deps-module",
                title: "Dependency Defense",
            },
            Command::Headers => Action::Display {
                module: "headers-module",
                title: "HTTP Headers Shield",
            },
            Command::Tools => Action::Display {
                module: "tools-module",
                title: "Security Toolkit",
            },
            Command::Owasp => Action::Display {
                module: "owasp-module",
                title: "OWASP Top 10 Breakdown",
            },
            Command::About => Action::Display {
                module: "about-module",
                title: "About This Terminal",
            },
            Command::Clear => Action::Clear,
            Command::Matrix => Action::Matrix,
            Command::Sudo => {
                Action::Respond("Nice try, hacker. But there's no sudo in the vibe zone!")
            }
            Command::Hack => Action::Respond("Ethical hacking only in this terminal, please!"),
            Command::Password => Action::Respond(
                "All your passwords should be at least as secure as: correcthorsebatterystaple",
            ),
            Command::Coffee => Action::Respond("☕ Brewing some secure code with your coffee..."),
            Command::Trivia => Action::Trivia,
        }
    }

    /// One-line summary for the shortcuts panel
    pub fn description(&self) -> &'static str {
        match self {
            Command::Help => "List available commands",
            Command::Secrets => "Protect your API keys",
            Command::Injection => "Prevent SQL injection",
            Command::Xss => "Stop cross-site scripting",
            Command::Auth => "Secure authentication",
            Command::Deps => "Audit dependencies",
            Command::Headers => "Security headers",
            Command::Tools => "Security toolkit",
            Command::Owasp => "OWASP Top 10",
            Command::About => "About this terminal",
            Command::Clear => "Clear the terminal",
            Command::Matrix => "???",
            Command::Sudo => "???",
            Command::Hack => "???",
            Command::Password => "???",
            Command::Coffee => "???",
            Command::Trivia => "Random security fact",
        }
    }

    /// Easter eggs stay out of the shortcuts panel
    pub fn is_listed(&self) -> bool {
        !matches!(
            self,
            Command::Matrix | Command::Sudo | Command::Hack | Command::Password | Command::Coffee
        )
    }

    /// Module displays and trivia leave the scrollback position alone
    pub fn follows_tail(&self) -> bool {
        !matches!(self.action(), Action::Display { .. } | Action::Trivia)
    }

    /// Module keys every catalog must provide
    pub fn required_modules() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().filter_map(|c| match c.action() {
            Action::Display { module, .. } => Some(module),
            _ => None,
        })
    }
}

/// Trim and lowercase a raw input line
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Resolve a normalized, non-empty line
pub fn resolve(normalized: &str) -> Resolution {
    match Command::from_keyword(normalized) {
        Some(command) => Resolution::Command(command),
        None => Resolution::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keywords_are_unique_and_resolvable() {
        let keywords: HashSet<_> = Command::ALL.iter().map(|c| c.keyword()).collect();
        assert_eq!(keywords.len(), Command::ALL.len());
        for command in Command::ALL {
            assert_eq!(Command::from_keyword(command.keyword()), Some(command));
        }
    }

    #[test]
    fn resolution_is_exact_match() {
        assert_eq!(resolve("xss"), Resolution::Command(Command::Xss));
        assert_eq!(resolve("xss2"), Resolution::NotFound);
        assert_eq!(resolve("hel"), Resolution::NotFound);
        assert_eq!(resolve("help me"), Resolution::NotFound);
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  HeLP \t"), "help");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn ten_commands_open_modules() {
        let modules: Vec<_> = Command::required_modules().collect();
        assert_eq!(modules.len(), 10);
        assert!(modules.contains(&"owasp-module"));
    }

    #[test]
    fn tail_following() {
        assert!(!Command::Help.follows_tail());
        assert!(!Command::Trivia.follows_tail());
        assert!(Command::Sudo.follows_tail());
        assert!(Command::Clear.follows_tail());
    }

    #[test]
    fn not_found_wording() {
        assert_eq!(
            not_found_message("rm -rf"),
            "Command not found: rm -rf. Type 'help' to see available commands."
        );
    }
}
