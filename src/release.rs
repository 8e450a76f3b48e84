//! Latest release lookup through the GitHub GraphQL API
use std::collections::HashMap;

use reqwest::header::AUTHORIZATION;
use serde_json::Map;

use crate::{
    config::ReleaseCheckerConfig, errors::ReleaseCheckerError, graphql::GraphqlClient, json_path,
};

/// Path of the latest tag name inside the `data` payload
const TAG_PATH: &str = "repository.releases.nodes.0.tag.name";

/// Outcome of a release check
#[derive(Debug)]
pub enum ReleaseCheck {
    /// No token available, nothing was sent
    Disabled,

    /// The query failed
    Failed(ReleaseCheckerError),

    /// The query succeeded, the tag is empty when the response has no release
    Found(String),
}

impl ReleaseCheck {
    /// Tag reported when the check is disabled
    pub const DISABLED_SENTINEL: &'static str = "[no GITHUB_TOKEN set]";

    /// Tag and success flag, `false` means the tag must not be trusted
    pub fn to_pair(&self) -> (String, bool) {
        match self {
            ReleaseCheck::Disabled => (Self::DISABLED_SENTINEL.to_string(), false),
            ReleaseCheck::Failed(_) => (String::new(), false),
            ReleaseCheck::Found(tag) => (tag.clone(), true),
        }
    }

    /// Non-empty tag of a successful check
    pub fn tag(&self) -> Option<&str> {
        match self {
            ReleaseCheck::Found(tag) if !tag.is_empty() => Some(tag),
            _ => None,
        }
    }
}

/// Checks the latest release of one repository
#[derive(Debug, Clone)]
pub struct ReleaseChecker {
    /// Configuration of the check
    config: ReleaseCheckerConfig,

    /// Client bound to the configured endpoint
    client: GraphqlClient,

    /// Token used instead of the environment
    token: Option<String>,
}

impl ReleaseChecker {
    /// Create a checker reading its token from the configured environment variable
    /// # Errors
    /// Error if the endpoint isn't a URL
    pub fn new(config: ReleaseCheckerConfig) -> Result<Self, ReleaseCheckerError> {
        let client = GraphqlClient::new(config.endpoint_url()?);
        Ok(Self {
            config,
            client,
            token: None,
        })
    }

    /// Use `token` instead of reading the environment
    pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Token of the check, if any
    ///
    /// A variable that is set counts as present even when it isn't valid
    /// unicode, that case is an error.
    fn token(&self) -> Option<Result<String, ReleaseCheckerError>> {
        if let Some(token) = &self.token {
            return Some(Ok(token.clone()));
        }
        let value = std::env::var_os(&self.config.token_env)?;
        Some(value.into_string().map_err(|_| {
            ReleaseCheckerError::from(format!("{} is not valid unicode", self.config.token_env))
        }))
    }

    /// GraphQL document asking for the last release
    pub fn query(&self) -> String {
        format!(
            r#"query {{
  repository(name: "{}", owner: "{}") {{
    releases(last: 1) {{
      nodes {{
        tag {{
          name
        }}
      }}
    }}
  }}
}}"#,
            self.config.repository, self.config.owner
        )
    }

    /// Look up the tag of the latest release
    ///
    /// Without a token the check is [`ReleaseCheck::Disabled`] and no request
    /// is sent. A token that isn't valid unicode fails before any request.
    /// Otherwise exactly one request is made, a failure is printed and
    /// reported as [`ReleaseCheck::Failed`].
    pub async fn check_latest_release(&self) -> ReleaseCheck {
        let token = match self.token() {
            Some(Ok(token)) => token,
            Some(Err(e)) => {
                println!("Query error {e}");
                return ReleaseCheck::Failed(e);
            }
            None => {
                log::info!("{} not set, skipping release check", self.config.token_env);
                return ReleaseCheck::Disabled;
            }
        };
        let headers = HashMap::from([(
            AUTHORIZATION.as_str().to_string(),
            format!("bearer {token}"),
        )]);
        let variables = Map::new();
        match self.client.query(&self.query(), &variables, &headers).await {
            Ok(data) => {
                let tag = json_path::get(&data, TAG_PATH);
                log::debug!(
                    "Latest release of {}/{}: '{}'",
                    self.config.owner,
                    self.config.repository,
                    tag
                );
                ReleaseCheck::Found(tag)
            }
            Err(e) => {
                println!("Query error {e}");
                log::debug!("Release check against {} failed", self.client.endpoint());
                ReleaseCheck::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn config_for(server: &Server, token_env: &str) -> ReleaseCheckerConfig {
        ReleaseCheckerConfig {
            endpoint: format!("{}/graphql", server.url()),
            token_env: token_env.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn no_token_disables_the_check() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let checker = ReleaseChecker::new(config_for(
            &server,
            "RELEASE_CHECKER_TEST_UNSET_TOKEN",
        ))
        .unwrap();

        for _ in 0..3 {
            let check = checker.check_latest_release().await;
            assert!(matches!(check, ReleaseCheck::Disabled));
            assert_eq!(
                check.to_pair(),
                ("[no GITHUB_TOKEN set]".to_string(), false)
            );
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn found_latest_tag() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_header("authorization", "bearer abc123")
            .match_body(Matcher::PartialJson(json!({"variables": {}})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"data": {"repository": {"releases": {"nodes": [{"tag": {"name": "v1.4.0"}}]}}}})
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let checker = ReleaseChecker::new(config_for(&server, "GHCR_TOKEN"))
            .unwrap()
            .with_token("abc123");

        let check = checker.check_latest_release().await;
        assert_eq!(check.to_pair(), ("v1.4.0".to_string(), true));
        assert_eq!(check.tag(), Some("v1.4.0"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn reads_token_from_environment() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_header("authorization", "bearer abc123")
            .with_status(200)
            .with_body(
                json!({"data": {"repository": {"releases": {"nodes": [{"tag": {"name": "v1.4.0"}}]}}}})
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        std::env::set_var("RELEASE_CHECKER_TEST_ENV_TOKEN", "abc123");
        let checker =
            ReleaseChecker::new(config_for(&server, "RELEASE_CHECKER_TEST_ENV_TOKEN")).unwrap();

        let check = checker.check_latest_release().await;
        std::env::remove_var("RELEASE_CHECKER_TEST_ENV_TOKEN");
        assert_eq!(check.to_pair(), ("v1.4.0".to_string(), true));
        mock.assert_async().await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_unicode_token_fails_without_request() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        std::env::set_var(
            "RELEASE_CHECKER_TEST_BAD_TOKEN",
            OsStr::from_bytes(&[0x61, 0xff]),
        );
        let checker =
            ReleaseChecker::new(config_for(&server, "RELEASE_CHECKER_TEST_BAD_TOKEN")).unwrap();

        let check = checker.check_latest_release().await;
        std::env::remove_var("RELEASE_CHECKER_TEST_BAD_TOKEN");
        assert!(matches!(check, ReleaseCheck::Failed(_)));
        assert_eq!(check.to_pair(), (String::new(), false));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failed_query() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;
        let checker = ReleaseChecker::new(config_for(&server, "GHCR_TOKEN"))
            .unwrap()
            .with_token("abc123");

        let check = checker.check_latest_release().await;
        assert!(matches!(check, ReleaseCheck::Failed(_)));
        assert_eq!(check.to_pair(), (String::new(), false));
    }

    #[tokio::test]
    async fn missing_path_is_an_empty_tag() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(json!({"data": {"repository": {"releases": {"nodes": []}}}}).to_string())
            .create_async()
            .await;
        let checker = ReleaseChecker::new(config_for(&server, "GHCR_TOKEN"))
            .unwrap()
            .with_token("abc123");

        let check = checker.check_latest_release().await;
        assert_eq!(check.to_pair(), (String::new(), true));
        assert_eq!(check.tag(), None);
    }

    #[test]
    fn query_names_the_repository() {
        let checker = ReleaseChecker::new(ReleaseCheckerConfig::default()).unwrap();
        let query = checker.query();
        assert!(query.contains(r#"repository(name: "semver-generator", owner: "lukaszraczylo")"#));
        assert!(query.contains("releases(last: 1)"));
    }
}
