//! # release-checker
//!
//! Check the latest published release of a tool through the GitHub GraphQL API
//!
//! ## Usage
//!
//! ```txt
//! Usage: release-checker [OPTIONS]
//!
//! Options:
//!  -c, --config <CONFIG>          Custom configuration file path
//!  -e, --endpoint <ENDPOINT>      GraphQL endpoint
//!  -o, --owner <OWNER>            Owner of the repository
//!  -r, --repository <REPOSITORY>  Name of the repository
//!  -t, --token-env <TOKEN_ENV>    Environment variable holding the access token
//!      --show-config-path         Show the current config path
//!      --init-config              Write the configuration to the config file and exit
//!  -v, --verbose...               Verbose mode (-v, -vv, -vvv)
//!  -h, --help                     Print help
//!  -V, --version                  Print version
//! ```
//!
//! The check only runs when the token variable (`GHCR_TOKEN` by default) is set.

#![warn(clippy::all, rust_2018_idioms)]
#![deny(
    missing_docs,
    clippy::all,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![warn(clippy::multiple_crate_versions)]

pub(crate) mod cli;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod graphql;
pub mod json_path;
pub(crate) mod release;

pub use cli::{release_checker_main, ReleaseCheckerCli};
pub use config::ReleaseCheckerConfig;
pub use errors::{ReleaseCheckerError, ReleaseCheckerErrorKind};
pub use graphql::GraphqlClient;
pub use release::{ReleaseCheck, ReleaseChecker};
