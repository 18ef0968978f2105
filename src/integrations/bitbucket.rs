//! Bitbucket Cloud and Bitbucket Server file URLs.
//!
//! Converts a browser URL such as
//! `https://bitbucket.org/org/repo/src/master/app-config.yaml` into the REST
//! URL that returns the raw file, and builds the matching auth headers.

use base64::prelude::*;
use indexmap::IndexMap;
use thiserror::Error;
use url::Url;

pub const BITBUCKET_CLOUD_HOST: &str = "bitbucket.org";
pub const BITBUCKET_CLOUD_API_BASE_URL: &str = "https://api.bitbucket.org/2.0";

const FILE_PATH_TYPES: &[&str] = &["browse", "raw", "src"];

/// Connection settings for one Bitbucket host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitbucketIntegrationConfig {
    /// e.g. `bitbucket.org` or `bitbucket.example.com`
    pub host: String,
    /// REST API root, without a trailing slash.
    pub api_base_url: String,
    pub token: Option<String>,
    pub username: Option<String>,
    pub app_password: Option<String>,
}

impl BitbucketIntegrationConfig {
    /// Config with the default API root for `host` and no credentials.
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let api_base_url = if host == BITBUCKET_CLOUD_HOST {
            BITBUCKET_CLOUD_API_BASE_URL.to_string()
        } else {
            format!("https://{}/rest/api/1.0", host)
        };
        Self {
            host,
            api_base_url,
            token: None,
            username: None,
            app_password: None,
        }
    }

    pub fn is_cloud(&self) -> bool {
        self.host == BITBUCKET_CLOUD_HOST
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BitbucketUrlError {
    #[error("Incorrect URL: {url}, Error: Invalid Bitbucket URL or file path")]
    InvalidPath { url: String },

    #[error("Incorrect URL: {url}, Error: {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Parts of a Bitbucket file URL.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileLocation {
    owner: String,
    name: String,
    git_ref: Option<String>,
    path: String,
}

/// Split a browser URL into owner, repo, ref and file path.
///
/// Cloud: `/{owner}/{name}/{browse|raw|src}/{ref}/{path}`.
/// Server: `/projects/{owner}/repos/{name}/{browse|raw}/{path}?at={ref}`.
fn parse_file_location(url: &Url) -> Option<FileLocation> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

    let (owner, name, rest, git_ref) = match segments.as_slice() {
        ["projects" | "users", owner, "repos", name, kind, rest @ ..] => {
            if !FILE_PATH_TYPES.contains(kind) {
                return None;
            }
            let git_ref = url
                .query_pairs()
                .find(|(key, _)| key == "at")
                .map(|(_, value)| value.into_owned());
            (*owner, *name, rest, git_ref)
        }
        [owner, name, kind, git_ref, rest @ ..] => {
            if !FILE_PATH_TYPES.contains(kind) {
                return None;
            }
            (*owner, *name, rest, Some(git_ref.to_string()))
        }
        _ => return None,
    };

    if rest.is_empty() {
        return None;
    }
    Some(FileLocation {
        owner: owner.to_string(),
        name: name.to_string(),
        git_ref: git_ref.filter(|r| !r.is_empty()),
        path: rest.join("/"),
    })
}

/// REST URL that returns the raw contents of the file at `url`.
///
/// Bitbucket Cloud requires a ref in the URL. For Bitbucket Server the
/// `at` query is forwarded when present.
pub fn file_fetch_url(
    url: &str,
    config: &BitbucketIntegrationConfig,
) -> Result<String, BitbucketUrlError> {
    let parsed = Url::parse(url).map_err(|source| BitbucketUrlError::Parse {
        url: url.to_string(),
        source,
    })?;
    let invalid = || BitbucketUrlError::InvalidPath {
        url: url.to_string(),
    };
    let location = parse_file_location(&parsed).ok_or_else(invalid)?;

    if config.is_cloud() {
        let git_ref = location.git_ref.ok_or_else(invalid)?;
        return Ok(format!(
            "{}/repositories/{}/{}/src/{}/{}",
            config.api_base_url, location.owner, location.name, git_ref, location.path
        ));
    }

    let mut fetch_url = format!(
        "{}/projects/{}/repos/{}/raw/{}",
        config.api_base_url, location.owner, location.name, location.path
    );
    if let Some(git_ref) = location.git_ref {
        fetch_url.push_str("?at=");
        fetch_url.push_str(&git_ref);
    }
    Ok(fetch_url)
}

/// HTTP headers for authenticated requests: a bearer token if one is set,
/// otherwise basic auth when both username and app password are set.
pub fn request_headers(config: &BitbucketIntegrationConfig) -> IndexMap<&'static str, String> {
    let mut headers = IndexMap::new();
    if let Some(token) = &config.token {
        headers.insert("Authorization", format!("Bearer {}", token));
    } else if let (Some(username), Some(app_password)) = (&config.username, &config.app_password) {
        let credentials = BASE64_STANDARD.encode(format!("{}:{}", username, app_password));
        headers.insert("Authorization", format!("Basic {}", credentials));
    }
    headers
}
