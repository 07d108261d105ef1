use serde::{Deserialize, Serialize};
use tracing::warn;

/// Username of the synthetic credential injected when a service requires a
/// non-empty credential list but the operator supplied none.
pub const PLACEHOLDER_USERNAME: &str = "dummyUser";

/// A basic-auth credential owned by a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub username: String,

    /// May be empty for password-less entries.
    #[serde(default)]
    pub password: String,

    /// Whether `password` is already hashed rather than plain text.
    #[serde(default)]
    pub encrypted: bool,
}

impl Credential {
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

/// Receiver for non-fatal diagnostics produced while parsing credential lists.
///
/// Injected so the parser stays a pure function over its inputs plus one
/// observable side channel.
pub trait DiagnosticSink {
    /// Report one dropped entry. `context` identifies the owning service.
    fn report(&self, context: &str, message: &str);
}

/// Production sink: emits diagnostics through `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, context: &str, message: &str) {
        warn!(service = %context, "{message}");
    }
}

/// Parse a raw delimited credential string into an ordered credential list.
///
/// Entries are separated by newlines or commas and take the form
/// `username` or `username:password`. The split happens at the *first* colon,
/// so passwords may contain colons but usernames cannot. Malformed entries
/// (empty username or password half) and bare usernames rejected by
/// `skip_empty_password` are reported to `sink` and dropped; parsing always
/// continues with the remaining entries. An empty `raw` yields an empty list.
pub fn parse_credentials(
    context: &str,
    raw: &str,
    encrypted: bool,
    skip_empty_password: bool,
    sink: &dyn DiagnosticSink,
) -> Vec<Credential> {
    let mut collected = Vec::new();
    if raw.is_empty() {
        return collected;
    }
    for token in raw.split(['\n', ',']) {
        let token = token.trim_matches(['\n', '\t', ' ']);
        if token.is_empty() {
            continue;
        }
        match token.split_once(':') {
            Some((username, password)) => {
                let username = username.trim_matches(['\t', ' ']);
                let password = password.trim_matches(['\t', ' ']);
                if username.is_empty() || password.is_empty() {
                    sink.report(
                        context,
                        &format!("invalid credential entry {token:?}: empty username or password"),
                    );
                } else {
                    collected.push(Credential {
                        username: username.to_string(),
                        password: password.to_string(),
                        encrypted,
                    });
                }
            }
            None => {
                if skip_empty_password {
                    sink.report(
                        context,
                        &format!("credential {token:?} has no password, which is not allowed here"),
                    );
                } else {
                    collected.push(Credential {
                        username: token.to_string(),
                        password: String::new(),
                        encrypted,
                    });
                }
            }
        }
    }
    collected
}

/// Generate a placeholder credential with a random numeric password.
///
/// Used when a service needs *some* credential to keep basic auth enabled but
/// none were configured; the random password makes the account unusable.
/// The password must not be logged or persisted next to operator credentials.
pub fn placeholder_credential() -> Credential {
    Credential {
        username: PLACEHOLDER_USERNAME.to_string(),
        password: rand::random::<u64>().to_string(),
        encrypted: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Test sink that records every report.
    #[derive(Default)]
    struct RecordingSink {
        reports: RefCell<Vec<(String, String)>>,
    }

    impl DiagnosticSink for RecordingSink {
        fn report(&self, context: &str, message: &str) {
            self.reports
                .borrow_mut()
                .push((context.to_string(), message.to_string()));
        }
    }

    fn parse(raw: &str, encrypted: bool, skip: bool) -> (Vec<Credential>, RecordingSink) {
        let sink = RecordingSink::default();
        let users = parse_credentials("svc", raw, encrypted, skip, &sink);
        (users, sink)
    }

    #[test]
    fn empty_input_yields_empty_list() {
        for encrypted in [false, true] {
            for skip in [false, true] {
                let (users, sink) = parse("", encrypted, skip);
                assert!(users.is_empty());
                assert!(sink.reports.borrow().is_empty());
            }
        }
    }

    #[test]
    fn mixed_delimiters_preserve_order() {
        let (users, sink) = parse("alice:secret,bob:pw2\ncarol:pw3", false, false);
        assert_eq!(
            users,
            vec![
                Credential { username: "alice".into(), password: "secret".into(), encrypted: false },
                Credential { username: "bob".into(), password: "pw2".into(), encrypted: false },
                Credential { username: "carol".into(), password: "pw3".into(), encrypted: false },
            ]
        );
        assert!(sink.reports.borrow().is_empty());
    }

    #[test]
    fn malformed_and_passwordless_entries_are_dropped_with_reports() {
        let (users, sink) = parse("dave:,:pw,eve", false, true);
        assert!(users.is_empty());
        let reports = sink.reports.borrow();
        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|(ctx, _)| ctx == "svc"));
        assert!(reports[0].1.contains("dave:"));
        assert!(reports[1].1.contains(":pw"));
        assert!(reports[2].1.contains("eve"));
    }

    #[test]
    fn whitespace_trimmed_around_entry_and_both_halves() {
        let (users, _) = parse("  frank : pw4  ", false, false);
        assert_eq!(
            users,
            vec![Credential { username: "frank".into(), password: "pw4".into(), encrypted: false }]
        );
    }

    #[test]
    fn bare_username_accepted_when_empty_password_allowed() {
        let (users, sink) = parse("grace", true, false);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "grace");
        assert_eq!(users[0].password, "");
        assert!(users[0].encrypted);
        assert!(!users[0].has_password());
        assert!(sink.reports.borrow().is_empty());
    }

    #[test]
    fn bare_username_rejected_when_empty_password_forbidden() {
        let (users, sink) = parse("grace", false, true);
        assert!(users.is_empty());
        let reports = sink.reports.borrow();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].1.contains("no password"));
    }

    #[test]
    fn password_may_contain_colons() {
        let (users, _) = parse("heidi:pa:ss:wd", false, false);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "heidi");
        assert_eq!(users[0].password, "pa:ss:wd");
    }

    #[test]
    fn empty_tokens_between_delimiters_are_skipped_silently() {
        let (users, sink) = parse(",\n,alice:pw,\n", false, false);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "alice");
        assert!(sink.reports.borrow().is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let (users, _) = parse("ivan:a,ivan:a", false, false);
        assert_eq!(users.len(), 2);
        assert_eq!(users[0], users[1]);
    }

    #[test]
    fn encrypted_flag_propagates_to_every_entry() {
        let (users, _) = parse("alice:a,bob:b", true, false);
        assert!(users.iter().all(|u| u.encrypted));
    }

    #[test]
    fn placeholder_is_encrypted_with_nonempty_numeric_password() {
        let cred = placeholder_credential();
        assert_eq!(cred.username, PLACEHOLDER_USERNAME);
        assert!(cred.encrypted);
        assert!(cred.has_password());
        assert!(cred.password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn placeholder_passwords_differ_across_calls() {
        let a = placeholder_credential();
        let b = placeholder_credential();
        assert_ne!(a.password, b.password);
    }

    #[test]
    fn credential_serde_uses_camel_case() {
        let json = r#"{"username":"alice","password":"pw","encrypted":true}"#;
        let cred: Credential = serde_json::from_str(json).unwrap();
        assert_eq!(cred.username, "alice");
        assert!(cred.encrypted);

        let minimal: Credential = serde_json::from_str(r#"{"username":"bob"}"#).unwrap();
        assert_eq!(minimal.password, "");
        assert!(!minimal.encrypted);
    }
}
