//! Credentials and host verification for network operations.
//!
//! Every call that talks to a remote takes a [`TransportConfig`] and builds
//! its callbacks from it, so two clones with different SSH identities can run
//! side by side without any shared state.

use std::path::PathBuf;

use git2::{
    CertificateCheckStatus, Cred, CredentialType, FetchOptions, PushOptions, RemoteCallbacks,
};
use serde::{Deserialize, Serialize};

/// Libgit2 re-invokes the credential callback after every rejected attempt.
const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

/// An SSH key pair used to authenticate against remotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshIdentity {
    /// User to authenticate as; falls back to the one in the URL, then `git`.
    #[serde(default)]
    pub username: Option<String>,

    pub private_key: PathBuf,

    #[serde(default)]
    pub public_key: Option<PathBuf>,

    #[serde(default)]
    pub passphrase: Option<String>,
}

/// How network operations authenticate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Explicit key pair; takes precedence over the agent.
    pub ssh: Option<SshIdentity>,

    /// Ask the running ssh-agent for keys.
    pub use_agent: bool,

    /// Skip host key / certificate verification.
    pub accept_unknown_hosts: bool,
}

/// Which credential the callback will hand to libgit2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Username(String),
    SshKey(String),
    SshAgent(String),
    CredentialHelper,
    Default,
}

impl TransportConfig {
    pub fn with_identity(identity: SshIdentity) -> Self {
        Self {
            ssh: Some(identity),
            ..Self::default()
        }
    }

    /// Pick a credential for the types libgit2 says it accepts.
    pub fn credential_source(
        &self,
        username_from_url: Option<&str>,
        allowed: CredentialType,
    ) -> Option<CredentialSource> {
        let username = self
            .ssh
            .as_ref()
            .and_then(|identity| identity.username.as_deref())
            .or(username_from_url)
            .unwrap_or("git")
            .to_string();

        if allowed.contains(CredentialType::USERNAME) {
            return Some(CredentialSource::Username(username));
        }
        if allowed.contains(CredentialType::SSH_KEY) {
            if self.ssh.is_some() {
                return Some(CredentialSource::SshKey(username));
            }
            if self.use_agent {
                return Some(CredentialSource::SshAgent(username));
            }
        }
        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            return Some(CredentialSource::CredentialHelper);
        }
        if allowed.contains(CredentialType::DEFAULT) {
            return Some(CredentialSource::Default);
        }
        None
    }

    fn credential(
        &self,
        url: &str,
        username_from_url: Option<&str>,
        allowed: CredentialType,
    ) -> std::result::Result<Cred, git2::Error> {
        match self.credential_source(username_from_url, allowed) {
            Some(CredentialSource::Username(user)) => Cred::username(&user),
            Some(CredentialSource::SshKey(user)) => match &self.ssh {
                Some(identity) => Cred::ssh_key(
                    &user,
                    identity.public_key.as_deref(),
                    &identity.private_key,
                    identity.passphrase.as_deref(),
                ),
                None => Err(git2::Error::from_str("no ssh identity configured")),
            },
            Some(CredentialSource::SshAgent(user)) => Cred::ssh_key_from_agent(&user),
            Some(CredentialSource::CredentialHelper) => {
                let config = git2::Config::open_default()?;
                Cred::credential_helper(&config, url, username_from_url)
            }
            Some(CredentialSource::Default) => Cred::default(),
            None => Err(git2::Error::from_str(&format!(
                "no usable credentials for {url}"
            ))),
        }
    }

    /// Callbacks carrying this configuration's credentials.
    pub fn remote_callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();
        let mut attempts = 0usize;
        callbacks.credentials(move |url, username_from_url, allowed| {
            attempts += 1;
            if attempts > MAX_CREDENTIAL_ATTEMPTS {
                return Err(git2::Error::from_str(&format!(
                    "authentication to {url} failed after {MAX_CREDENTIAL_ATTEMPTS} attempts"
                )));
            }
            tracing::debug!(url, attempt = attempts, "Resolving credentials");
            self.credential(url, username_from_url, allowed)
        });

        if self.accept_unknown_hosts {
            callbacks.certificate_check(|_cert, host| {
                tracing::warn!(host, "Accepting unverified host");
                Ok(CertificateCheckStatus::CertificateOk)
            });
        }

        callbacks
    }

    pub fn fetch_options(&self) -> FetchOptions<'_> {
        let mut options = FetchOptions::new();
        options.remote_callbacks(self.remote_callbacks());
        options
    }

    pub fn push_options(&self) -> PushOptions<'_> {
        let mut options = PushOptions::new();
        options.remote_callbacks(self.remote_callbacks());
        options
    }
}
