//! Pre-authored training modules
//!
//! Each module is a header plus body lines. Body lines carry a light
//! markup the viewer uses for styling:
//!
//! - `## ` section heading
//! - `- ` bullet
//! - `$ ` code or shell snippet
//! - `! ` warning
//! - anything else is plain text

use crate::TerminalError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named block of educational content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentModule {
    pub key: String,
    pub header: String,
    pub body: Vec<String>,
}

impl ContentModule {
    pub fn new(key: &str, header: &str, body: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            header: header.to_string(),
            body: body.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Kind of body line, derived from its prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Bullet,
    Code,
    Warning,
    Text,
}

/// Split a body line into its kind and the text to show
pub fn classify(line: &str) -> (LineKind, &str) {
    if let Some(rest) = line.strip_prefix("## ") {
        (LineKind::Heading, rest)
    } else if let Some(rest) = line.strip_prefix("- ") {
        (LineKind::Bullet, rest)
    } else if let Some(rest) = line.strip_prefix("$ ") {
        (LineKind::Code, rest)
    } else if let Some(rest) = line.strip_prefix("! ") {
        (LineKind::Warning, rest)
    } else {
        (LineKind::Text, line)
    }
}

/// All modules, looked up by key
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: HashMap<String, ContentModule>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module: ContentModule) {
        self.modules.insert(module.key.clone(), module);
    }

    pub fn remove(&mut self, key: &str) -> Option<ContentModule> {
        self.modules.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&ContentModule> {
        self.modules.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.modules.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Fail on the first required key that has no module
    pub fn validate<'a, I>(&self, required: I) -> Result<(), TerminalError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for key in required {
            if !self.contains(key) {
                return Err(TerminalError::MissingModule(key.to_string()));
            }
        }
        Ok(())
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for module in builtin_modules() {
            catalog.insert(module);
        }
        catalog
    }
}

fn builtin_modules() -> Vec<ContentModule> {
    vec![
        ContentModule::new(
            "help-module",
            "> AVAILABLE COMMANDS",
            &[
                "## Training modules",
                "- secrets    Protect your API keys and credentials",
                "- injection  Stop SQL injection at the door",
                "- xss        Defend against cross-site scripting",
                "- auth       Build an authentication fortress",
                "- deps       Keep your dependencies honest",
                "- headers    Shield your app with HTTP headers",
                "- tools      The security toolkit",
                "- owasp      The OWASP Top 10, broken down",
                "- about      About this terminal",
                "## Utilities",
                "- clear      Clear the terminal",
                "- trivia     Random security fact",
                "- help       Show this list",
                "## Keys",
                "- Up/Down    Recall previous commands",
                "- Tab        Move between input, shortcuts and quiz",
                "- Esc        Close this window",
                "Some commands are not listed. Curious minds will find them.",
            ],
        ),
        ContentModule::new(
            "secrets-module",
            "> PROTECT YOUR SECRETS",
            &[
                "Secrets in source control are secrets shared with everyone who ever clones the repo.",
                "## Do",
                "- Load API keys and passwords from environment variables",
                "- Use a secrets manager (Vault, AWS Secrets Manager, Doppler) in production",
                "- Add .env to .gitignore before the first commit",
                "- Rotate a key the moment you suspect it leaked",
                "## Don't",
                "- Hard-code credentials, even \"just for testing\"",
                "- Ship keys in frontend bundles; anyone can read them",
                "- Paste secrets into chat tools or AI prompts",
                "## Example",
                "$ let api_key = std::env::var(\"PAYMENT_API_KEY\")?;",
                "! Deleting a leaked key from git history is not enough. Rotate it.",
                "$ gitleaks detect --source .",
            ],
        ),
        ContentModule::new(
            "injection-module",
            "> SQL INJECTIONS: CLOSE THE DOOR",
            &[
                "Injection happens when user input is glued into a query and the database runs it as code.",
                "## Vulnerable",
                "$ query(\"SELECT * FROM users WHERE email = '\" + email + \"'\")",
                "! Input like ' OR '1'='1 turns that into \"return every user\".",
                "## Fixed",
                "$ query(\"SELECT * FROM users WHERE email = $1\", [email])",
                "## Rules",
                "- Always use parameterized queries or prepared statements",
                "- Let your ORM build queries; avoid raw string SQL",
                "- Validate input types and lengths at the boundary",
                "- Run the app's database user with least privilege",
                "- Never show raw database errors to users",
            ],
        ),
        ContentModule::new(
            "xss-module",
            "> CROSS-SITE SCRIPTING DEFENSE",
            &[
                "XSS lets an attacker run their JavaScript in your users' browsers.",
                "## Types",
                "- Stored: payload saved in your database and served to everyone",
                "- Reflected: payload bounced back from a URL parameter",
                "- DOM-based: payload written into the page by your own client code",
                "## Defenses",
                "- Escape output by default; use your framework's templating",
                "- Avoid innerHTML and dangerouslySetInnerHTML with user data",
                "- Sanitize rich text with a vetted library such as DOMPurify",
                "- Set a Content Security Policy",
                "$ Content-Security-Policy: default-src 'self'; script-src 'self'",
                "! Blocklisting the word <script> is not a defense.",
            ],
        ),
        ContentModule::new(
            "auth-module",
            "> AUTHENTICATION FORTRESS",
            &[
                "## Passwords",
                "- Hash with bcrypt, scrypt or Argon2 and a unique salt",
                "- Never store plaintext, never use MD5 or SHA-1 for passwords",
                "- Rate-limit login attempts and lock out brute force",
                "## Sessions",
                "- Keep session tokens in HttpOnly, Secure, SameSite cookies",
                "- Add CSRF tokens to state-changing requests",
                "- Expire sessions and rotate them after login",
                "## Extra layers",
                "- Offer multi-factor authentication",
                "- Prefer a proven auth provider over rolling your own",
                "$ Set-Cookie: session=...; HttpOnly; Secure; SameSite=Strict",
            ],
        ),
        ContentModule::new(
            "deps-module",
            "> DEPENDENCY DEFENSE",
            &[
                "Most of your code is other people's code. Treat it that way.",
                "## Habits",
                "- Audit dependencies on every build",
                "- Commit your lockfile",
                "- Remove packages you no longer use",
                "- Check a package's maintainers and downloads before adding it",
                "- Watch out for typosquatted names",
                "## Commands",
                "$ npm audit",
                "$ cargo audit",
                "$ pip-audit",
                "! Enable automated update PRs (Dependabot, Renovate) and actually merge them.",
            ],
        ),
        ContentModule::new(
            "headers-module",
            "> HTTP HEADERS SHIELD",
            &[
                "A handful of response headers close entire classes of attacks.",
                "$ Content-Security-Policy: default-src 'self'",
                "$ Strict-Transport-Security: max-age=63072000; includeSubDomains",
                "$ X-Content-Type-Options: nosniff",
                "$ X-Frame-Options: DENY",
                "$ Referrer-Policy: strict-origin-when-cross-origin",
                "$ Permissions-Policy: camera=(), microphone=()",
                "## Tips",
                "- Use helmet (Node) or your framework's equivalent",
                "- Check your site at securityheaders.com",
                "- Configure CORS with an explicit allowlist, never *",
            ],
        ),
        ContentModule::new(
            "tools-module",
            "> SECURITY TOOLKIT",
            &[
                "## Static analysis",
                "- Semgrep, CodeQL, Bandit, cargo clippy",
                "## Secret scanning",
                "- gitleaks, trufflehog, GitHub secret scanning",
                "## Dependencies",
                "- npm audit, cargo audit, Snyk, OSV-Scanner",
                "## Dynamic testing",
                "- OWASP ZAP, Burp Suite",
                "## Learning",
                "- OWASP Cheat Sheet Series",
                "- PortSwigger Web Security Academy",
                "Run them in CI so nobody has to remember to.",
            ],
        ),
        ContentModule::new(
            "owasp-module",
            "> OWASP TOP 10 BREAKDOWN",
            &[
                "- A01 Broken Access Control: check permissions on every request",
                "- A02 Cryptographic Failures: encrypt in transit and at rest",
                "- A03 Injection: parameterize queries, escape output",
                "- A04 Insecure Design: threat model before you build",
                "- A05 Security Misconfiguration: no default passwords, no debug in prod",
                "- A06 Vulnerable Components: audit and update dependencies",
                "- A07 Authentication Failures: MFA, rate limits, strong hashing",
                "- A08 Integrity Failures: verify updates and CI pipelines",
                "- A09 Logging Failures: log security events, alert on them",
                "- A10 SSRF: validate and allowlist outbound URLs",
                "$ https://owasp.org/Top10/",
            ],
        ),
        ContentModule::new(
            "about-module",
            "> ABOUT THIS TERMINAL",
            &[
                "VibeSec Terminal is a crash course in secure coding for people who ship fast.",
                "Type a module name to open it, take the quiz when you feel ready.",
                "## Quiz",
                "- Press Tab until the quiz panel is focused",
                "- Pick answers with a-d or Left/Right, submit with Enter",
                "- 80% or better passes",
                "Stay curious. Stay patched.",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_every_module() {
        let catalog = ModuleCatalog::builtin();
        assert_eq!(catalog.len(), 10);
        for key in [
            "help-module",
            "secrets-module",
            "injection-module",
            "xss-module",
            "auth-module",
            "deps-module",
            "headers-module",
            "tools-module",
            "owasp-module",
            "about-module",
        ] {
            let module = catalog.get(key).expect(key);
            assert!(!module.header.is_empty());
            assert!(!module.body.is_empty());
        }
    }

    #[test]
    fn validate_reports_missing_key() {
        let mut catalog = ModuleCatalog::builtin();
        catalog.remove("xss-module");

        let err = catalog.validate(["help-module", "xss-module"]).unwrap_err();
        assert!(matches!(err, TerminalError::MissingModule(ref key) if key == "xss-module"));
        assert!(catalog.validate(["help-module"]).is_ok());
    }

    #[test]
    fn classify_strips_markup() {
        assert_eq!(classify("## Rules"), (LineKind::Heading, "Rules"));
        assert_eq!(classify("- item"), (LineKind::Bullet, "item"));
        assert_eq!(classify("$ cargo audit"), (LineKind::Code, "cargo audit"));
        assert_eq!(classify("! careful"), (LineKind::Warning, "careful"));
        assert_eq!(classify("plain"), (LineKind::Text, "plain"));
    }
}
