// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use cloudfiles_core::utils::Redact;
use cloudfiles_core::{Env, Error, Result};

use crate::constants::*;

/// Config carries all the configuration for a Cloud Files account.
#[derive(Clone, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Config {
    /// `storage_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDFILES_STORAGE_URL`]
    ///
    /// Scheme and authority of the storage endpoint, for example
    /// `https://storage101.dfw1.clouddrive.com`.
    pub storage_url: Option<String>,
    /// `account` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDFILES_ACCOUNT`]
    pub account: Option<String>,
    /// `api_version` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDFILES_API_VERSION`]
    /// - [`DEFAULT_API_VERSION`] otherwise
    pub api_version: Option<String>,
    /// `auth_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDFILES_AUTH_TOKEN`]
    ///
    /// Acquiring the token is out of scope, it's sent as-is in `X-Auth-Token`.
    pub auth_token: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("storage_url", &self.storage_url)
            .field("account", &self.account)
            .field("api_version", &self.api_version)
            .field("auth_token", &Redact::from(&self.auth_token))
            .finish()
    }
}

impl Config {
    /// Fill unset fields from env.
    pub fn from_env(mut self, env: &impl Env) -> Self {
        if self.storage_url.is_none() {
            self.storage_url = env.var(CLOUDFILES_STORAGE_URL);
        }
        if self.account.is_none() {
            self.account = env.var(CLOUDFILES_ACCOUNT);
        }
        if self.api_version.is_none() {
            self.api_version = env.var(CLOUDFILES_API_VERSION);
        }
        if self.auth_token.is_none() {
            self.auth_token = env.var(CLOUDFILES_AUTH_TOKEN);
        }

        self
    }

    /// Set the storage url.
    pub fn with_storage_url(mut self, storage_url: impl Into<String>) -> Self {
        self.storage_url = Some(storage_url.into());
        self
    }

    /// Set the account.
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Set the api version.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Set the auth token.
    pub fn with_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    /// Api version, falling back to [`DEFAULT_API_VERSION`].
    pub fn api_version(&self) -> &str {
        self.api_version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_VERSION)
    }

    /// Account, or `ConfigInvalid` if it's unset or empty.
    pub fn account(&self) -> Result<&str> {
        self.account
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("account is required"))
    }

    /// Storage url, or `ConfigInvalid` if it's unset or empty.
    pub fn storage_url(&self) -> Result<&str> {
        self.storage_url
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("storage_url is required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudfiles_core::{ErrorKind, StaticEnv};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_env() {
        let env = StaticEnv::from_pairs([
            (CLOUDFILES_STORAGE_URL, "https://storage.example.com"),
            (CLOUDFILES_ACCOUNT, "MossoCloudFS_1"),
            (CLOUDFILES_AUTH_TOKEN, "AUTH_tk0123456789abcdef"),
        ]);

        let cfg = Config::default().from_env(&env);

        assert_eq!(
            cfg,
            Config {
                storage_url: Some("https://storage.example.com".to_string()),
                account: Some("MossoCloudFS_1".to_string()),
                api_version: None,
                auth_token: Some("AUTH_tk0123456789abcdef".to_string()),
            }
        );
        assert_eq!(cfg.api_version(), "v1");
    }

    #[test]
    fn test_explicit_fields_win() {
        let env = StaticEnv::from_pairs([
            (CLOUDFILES_ACCOUNT, "from-env"),
            (CLOUDFILES_API_VERSION, "v2"),
        ]);

        let cfg = Config::default().with_account("explicit").from_env(&env);

        assert_eq!(cfg.account().unwrap(), "explicit");
        assert_eq!(cfg.api_version(), "v2");
    }

    #[test]
    fn test_missing_account() {
        let cfg = Config::default().with_account("");

        let err = cfg.account().expect_err("empty account must be rejected");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(
            cfg.storage_url().expect_err("must fail").kind(),
            ErrorKind::ConfigInvalid
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let cfg = Config::default().with_auth_token("AUTH_tk0123456789abcdef");

        let s = format!("{cfg:?}");
        assert!(s.contains("AUT***def"), "{s}");
        assert!(!s.contains("0123456789"), "{s}");
    }
}
