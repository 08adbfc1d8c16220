//! SSO directory collaborator: enumerates the accounts and roles
//! reachable under a configured [sso-session] using the cached AWS CLI
//! token, delegating login itself to the AWS CLI binary.

mod token_cache;

pub use token_cache::cached_token;

use crate::aws_config::SsoSession;
use crate::error::{ProfError, Result};
use aws_sdk_sso::Client as SsoClient;
use std::process::Command;

/// One account/role pair reachable under an SSO session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRole {
    pub account_id: String,
    pub account_name: String,
    pub email_address: String,
    pub role_name: String,
}

/// Client for one SSO session's account/role directory.
pub struct SsoDirectory {
    client: SsoClient,
    session_name: String,
}

impl SsoDirectory {
    pub async fn connect(session: &SsoSession) -> Result<Self> {
        if session.region.is_empty() {
            return Err(ProfError::Config(format!(
                "sso-session '{}' has no sso_region configured",
                session.name
            )));
        }

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(session.region.clone()))
            .load()
            .await;

        Ok(SsoDirectory {
            client: SsoClient::new(&config),
            session_name: session.name.clone(),
        })
    }

    /// Enumerate every account/role pair visible to the cached token.
    ///
    /// On a missing/expired token or an unauthorized response, runs
    /// `aws sso login --sso-session <name>` once and retries the
    /// enumeration a single time before giving up.
    pub async fn account_roles(&self) -> Result<Vec<AccountRole>> {
        match self.try_account_roles().await {
            Err(ProfError::TokenExpired(_)) => {
                tracing::info!(
                    session = %self.session_name,
                    "unauthorized; attempting aws sso login"
                );
                self.run_cli_login()?;
                self.try_account_roles().await
            }
            other => other,
        }
    }

    async fn try_account_roles(&self) -> Result<Vec<AccountRole>> {
        let token = cached_token(&self.session_name)?;
        let mut pairs = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_accounts()
                .access_token(&token.access_token);
            if let Some(marker) = next_token {
                request = request.next_token(marker);
            }

            let response = request.send().await.map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_unauthorized_exception() {
                    ProfError::TokenExpired(self.session_name.clone())
                } else {
                    ProfError::AwsSdk(format!("failed to list accounts: {}", service_err))
                }
            })?;

            for account in response.account_list() {
                let account_id = account.account_id().unwrap_or("").to_string();
                let account_name = account.account_name().unwrap_or("").to_string();
                let email_address = account.email_address().unwrap_or("").to_string();

                for role_name in self
                    .list_account_roles(&token.access_token, &account_id)
                    .await?
                {
                    pairs.push(AccountRole {
                        account_id: account_id.clone(),
                        account_name: account_name.clone(),
                        email_address: email_address.clone(),
                        role_name,
                    });
                }
            }

            next_token = response.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        tracing::debug!(
            session = %self.session_name,
            pairs = pairs.len(),
            "enumerated account roles"
        );
        Ok(pairs)
    }

    async fn list_account_roles(
        &self,
        access_token: &str,
        account_id: &str,
    ) -> Result<Vec<String>> {
        let mut roles = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_account_roles()
                .access_token(access_token)
                .account_id(account_id);
            if let Some(marker) = next_token {
                request = request.next_token(marker);
            }

            let response = request.send().await.map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_unauthorized_exception() {
                    ProfError::TokenExpired(self.session_name.clone())
                } else {
                    ProfError::AwsSdk(format!(
                        "failed to list roles for account {}: {}",
                        account_id, service_err
                    ))
                }
            })?;

            for role in response.role_list() {
                if let Some(name) = role.role_name() {
                    roles.push(name.to_string());
                }
            }

            next_token = response.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        Ok(roles)
    }

    fn run_cli_login(&self) -> Result<()> {
        let status = Command::new("aws")
            .args(["sso", "login", "--sso-session", &self.session_name])
            .status()
            .map_err(|e| ProfError::Config(format!("failed to run aws sso login: {}", e)))?;

        if !status.success() {
            return Err(ProfError::TokenExpired(self.session_name.clone()));
        }
        Ok(())
    }
}
