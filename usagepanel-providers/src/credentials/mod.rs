//! Credential resolution.
//!
//! Credentials are never created here, only discovered. Each provider has an
//! ordered list of [`CredentialAttempt`]s; the first one that yields a
//! non-empty token wins. Every filesystem or parse failure along the way is
//! swallowed, so resolution itself cannot fail.

mod jwt;
mod store;

use std::fs;
use std::path::PathBuf;

use tracing::{debug, instrument};
use usagepanel_core::ProviderKind;
use usagepanel_fetch::CredentialPaths;

pub use jwt::{account_from_token, decode_payload};

use store::{non_empty, AuthStoreEntry, CodexAuthFile};

// ============================================================================
// Resolved Credential
// ============================================================================

/// A bearer token plus whatever identity could be learned without network.
///
/// Lives for one provider call. The `Debug` output never shows the token.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    /// OAuth access token.
    pub access_token: String,
    /// Account id stored next to the token (sent as a header by Codex).
    pub account_hint: Option<String>,
    /// Email decoded from the token payload, if any.
    pub token_email: Option<String>,
}

impl ResolvedCredential {
    /// Builds a credential, decoding the token for an email.
    pub fn new(access_token: impl Into<String>, account_hint: Option<String>) -> Self {
        let access_token = access_token.into();
        let token_email = account_from_token(&access_token);
        Self {
            access_token,
            account_hint,
            token_email,
        }
    }
}

impl std::fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("access_token", &"<redacted>")
            .field("account_hint", &self.account_hint)
            .field("token_email", &self.token_email)
            .finish()
    }
}

// ============================================================================
// Credential Sources
// ============================================================================

/// A store format that may hold a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Primary store entry keyed by provider slug.
    AuthStore {
        /// Key of the entry inside the store.
        slug: &'static str,
    },
    /// Legacy Codex CLI store.
    CodexAuthFile,
}

impl CredentialSource {
    /// Extracts a credential from the raw store contents.
    pub fn parse(self, bytes: &[u8]) -> Option<ResolvedCredential> {
        match self {
            Self::AuthStore { slug } => {
                let entry = AuthStoreEntry::from_store(bytes, slug)?;
                entry.note_expiry(slug);
                let token = non_empty(entry.access)?;
                Some(ResolvedCredential::new(token, non_empty(entry.account_id)))
            }
            Self::CodexAuthFile => {
                let tokens = CodexAuthFile::parse(bytes)?.tokens?;
                let token = non_empty(tokens.access_token)?;
                let mut credential = ResolvedCredential::new(token, non_empty(tokens.account_id));
                if credential.token_email.is_none() {
                    credential.token_email = tokens.id_token.as_deref().and_then(account_from_token);
                }
                Some(credential)
            }
        }
    }
}

/// One location to try, paired with the format expected there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialAttempt {
    /// Store format.
    pub source: CredentialSource,
    /// File to read. `None` when the location cannot be determined.
    pub path: Option<PathBuf>,
}

impl CredentialAttempt {
    /// Reads and parses the location. Any failure yields `None`.
    pub fn try_resolve(&self) -> Option<ResolvedCredential> {
        let Some(path) = self.path.as_ref() else {
            debug!(source = ?self.source, "No location for credential source");
            return None;
        };

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Credential store not readable");
                return None;
            }
        };

        let credential = self.source.parse(&bytes);
        debug!(
            path = %path.display(),
            found = credential.is_some(),
            "Checked credential store"
        );
        credential
    }
}

/// Ordered attempts for a provider.
pub fn attempts(kind: ProviderKind, paths: &CredentialPaths) -> Vec<CredentialAttempt> {
    match kind {
        ProviderKind::Claude => vec![CredentialAttempt {
            source: CredentialSource::AuthStore {
                slug: crate::descriptor::auth_slug(kind),
            },
            path: paths.auth_file.clone(),
        }],
        ProviderKind::Codex => vec![
            CredentialAttempt {
                source: CredentialSource::AuthStore {
                    slug: crate::descriptor::auth_slug(kind),
                },
                path: paths.auth_file.clone(),
            },
            CredentialAttempt {
                source: CredentialSource::CodexAuthFile,
                path: paths.codex_auth_file(),
            },
        ],
    }
}

/// Resolves the credential for a provider; first success wins.
#[instrument(skip(paths))]
pub fn resolve_credential(kind: ProviderKind, paths: &CredentialPaths) -> Option<ResolvedCredential> {
    let credential = attempts(kind, paths)
        .iter()
        .find_map(CredentialAttempt::try_resolve);
    if credential.is_none() {
        debug!("No credential found");
    }
    credential
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn paths_in(dir: &Path) -> CredentialPaths {
        CredentialPaths {
            auth_file: Some(dir.join("auth.json")),
            codex_home: Some(dir.join("codex")),
        }
    }

    #[test]
    fn test_missing_files_yield_nothing() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        assert!(resolve_credential(ProviderKind::Claude, &paths).is_none());
        assert!(resolve_credential(ProviderKind::Codex, &paths).is_none());
        assert!(resolve_credential(ProviderKind::Codex, &CredentialPaths::none()).is_none());
    }

    #[test]
    fn test_malformed_and_keyless_files_yield_nothing() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::create_dir_all(dir.path().join("codex")).unwrap();

        fs::write(dir.path().join("auth.json"), "{{{ not json").unwrap();
        fs::write(dir.path().join("codex/auth.json"), "").unwrap();
        assert!(resolve_credential(ProviderKind::Claude, &paths).is_none());
        assert!(resolve_credential(ProviderKind::Codex, &paths).is_none());

        fs::write(dir.path().join("auth.json"), r#"{"anthropic": {"type": "oauth"}}"#).unwrap();
        fs::write(dir.path().join("codex/auth.json"), r#"{"tokens": {"access_token": ""}}"#)
            .unwrap();
        assert!(resolve_credential(ProviderKind::Claude, &paths).is_none());
        assert!(resolve_credential(ProviderKind::Codex, &paths).is_none());
    }

    #[test]
    fn test_claude_reads_primary_store_only() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::create_dir_all(dir.path().join("codex")).unwrap();
        fs::write(dir.path().join("codex/auth.json"), r#"{"tokens": {"access_token": "legacy"}}"#)
            .unwrap();
        assert!(resolve_credential(ProviderKind::Claude, &paths).is_none());

        fs::write(
            dir.path().join("auth.json"),
            r#"{"anthropic": {"type": "oauth", "access": "sk-ant-oat01-x", "expires": 0}}"#,
        )
        .unwrap();
        let credential = resolve_credential(ProviderKind::Claude, &paths).unwrap();
        assert_eq!(credential.access_token, "sk-ant-oat01-x");
        assert_eq!(credential.token_email, None);
    }

    #[test]
    fn test_codex_prefers_primary_store() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::create_dir_all(dir.path().join("codex")).unwrap();
        fs::write(
            dir.path().join("codex/auth.json"),
            r#"{"tokens": {"access_token": "legacy", "account_id": "acct_legacy"}}"#,
        )
        .unwrap();

        let legacy = resolve_credential(ProviderKind::Codex, &paths).unwrap();
        assert_eq!(legacy.access_token, "legacy");
        assert_eq!(legacy.account_hint.as_deref(), Some("acct_legacy"));

        fs::write(
            dir.path().join("auth.json"),
            r#"{"openai-codex": {"type": "oauth", "access": "primary", "accountId": "acct_primary"}}"#,
        )
        .unwrap();
        let primary = resolve_credential(ProviderKind::Codex, &paths).unwrap();
        assert_eq!(primary.access_token, "primary");
        assert_eq!(primary.account_hint.as_deref(), Some("acct_primary"));
    }

    #[test]
    fn test_attempt_order() {
        let paths = CredentialPaths {
            auth_file: Some(PathBuf::from("/a/auth.json")),
            codex_home: Some(PathBuf::from("/c")),
        };
        let codex = attempts(ProviderKind::Codex, &paths);
        assert_eq!(codex.len(), 2);
        assert_eq!(codex[0].source, CredentialSource::AuthStore { slug: "openai-codex" });
        assert_eq!(codex[1].source, CredentialSource::CodexAuthFile);
        assert_eq!(codex[1].path, Some(PathBuf::from("/c/auth.json")));

        let claude = attempts(ProviderKind::Claude, &paths);
        assert_eq!(claude.len(), 1);
        assert_eq!(claude[0].source, CredentialSource::AuthStore { slug: "anthropic" });
    }

    #[test]
    fn test_legacy_id_token_supplies_email() {
        use base64::prelude::*;
        let payload = BASE64_URL_SAFE_NO_PAD.encode(br#"{"email":"id@example.com"}"#);
        let json = format!(r#"{{"tokens": {{"access_token": "opaque", "id_token": "h.{payload}.s"}}}}"#);

        let credential = CredentialSource::CodexAuthFile.parse(json.as_bytes()).unwrap();
        assert_eq!(credential.token_email.as_deref(), Some("id@example.com"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let credential = ResolvedCredential::new("super-secret", Some("acct".to_string()));
        let debug = format!("{credential:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
