//! Blocking HTTP client for the users API with a max-age response cache.
//!
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::CACHE_CONTROL;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::model::User;
use super::{DEFAULT_API_URL, DEFAULT_MAX_AGE_SECS, UserApi};
use crate::error::{FetchError, Resource};

/// Connection settings for [`HttpUserClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    /// Freshness hint; `Duration::ZERO` disables the local cache.
    pub max_age: Duration,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            max_age: Duration::from_secs(DEFAULT_MAX_AGE_SECS),
            timeout: Duration::from_secs(10),
        }
    }
}

struct Fresh<T> {
    value: T,
    fetched_at: Instant,
}

impl<T: Clone> Fresh<T> {
    fn get(&self, max_age: Duration) -> Option<T> {
        (self.fetched_at.elapsed() < max_age).then(|| self.value.clone())
    }
}

#[derive(Default)]
struct ResponseCache {
    list: Option<Fresh<Vec<User>>>,
    by_id: HashMap<u32, Fresh<User>>,
}

/// [`UserApi`] over HTTP. Each request carries `Cache-Control: max-age`, and
/// successful responses are reused locally for the same duration.
pub struct HttpUserClient {
    http: Client,
    config: ClientConfig,
    cache: Mutex<ResponseCache>,
}

impl HttpUserClient {
    /// Build a client for `config.base_url`.
    ///
    /// # Arguments
    ///
    /// * `config` - Base URL (a trailing `/` is dropped), freshness hint and
    ///   request timeout.
    ///
    /// # Returns
    ///
    /// The client, or `FetchError::Transport` if the HTTP stack cannot be
    /// initialised.
    pub fn new(mut config: ClientConfig) -> Result<Self, FetchError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            config,
            cache: Mutex::new(ResponseCache::default()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn cache_enabled(&self) -> bool {
        !self.config.max_age.is_zero()
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Returns
    ///
    /// The decoded body; `FetchError::Status` for a non-2xx reply, otherwise
    /// `FetchError::Transport` with the underlying cause.
    fn fetch<T: DeserializeOwned>(&self, path: &str, resource: Resource) -> Result<T, FetchError> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .header(CACHE_CONTROL, format!("max-age={}", self.config.max_age.as_secs()))
            .send()
            .map_err(|e| {
                error!(?e, %url, "request failed");
                FetchError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let err = FetchError::Status { resource, status: status.as_u16() };
            error!(%url, %status, "{err}");
            return Err(err);
        }

        response.json::<T>().map_err(|e| {
            error!(?e, %url, "failed to decode response body");
            FetchError::Transport(e)
        })
    }
}

impl UserApi for HttpUserClient {
    fn list_users(&self) -> Result<Vec<User>, FetchError> {
        if self.cache_enabled() {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(users) = cache.list.as_ref().and_then(|f| f.get(self.config.max_age)) {
                debug!(count = users.len(), "users served from cache");
                return Ok(users);
            }
        }

        let users: Vec<User> = self.fetch("/users", Resource::Users)?;
        if self.cache_enabled() {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache.list = Some(Fresh { value: users.clone(), fetched_at: Instant::now() });
        }
        Ok(users)
    }

    fn get_user(&self, id: u32) -> Result<User, FetchError> {
        if self.cache_enabled() {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(user) = cache.by_id.get(&id).and_then(|f| f.get(self.config.max_age)) {
                return Ok(user);
            }
        }

        let user: User = self.fetch(&format!("/users/{id}"), Resource::User(id))?;
        if self.cache_enabled() {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache.by_id.insert(id, Fresh { value: user.clone(), fetched_at: Instant::now() });
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn user_json(id: u32, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "username": name.to_lowercase(),
            "email": format!("{}@example.com", name.to_lowercase()),
            "address": {
                "street": "123 Main St",
                "suite": "Apt 4B",
                "city": "Anytown",
                "zipcode": "12345",
                "geo": { "lat": "40.7128", "lng": "-74.0060" }
            },
            "phone": "555-1234",
            "website": "example.com",
            "company": { "name": "ABC Corp", "catchPhrase": "Making the world better", "bs": "innovative solutions" }
        })
    }

    fn client_for(server: &MockServer, max_age: Duration) -> HttpUserClient {
        HttpUserClient::new(ClientConfig {
            base_url: format!("{}/", server.base_url()),
            max_age,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn list_users_sends_freshness_hint() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/users").header("cache-control", "max-age=3600");
            then.status(200).json_body(json!([user_json(1, "John"), user_json(2, "Jane")]));
        });

        let client = client_for(&server, Duration::from_secs(3600));
        let users = client.list_users().unwrap();
        assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
        m.assert();
    }

    #[test]
    fn repeated_list_within_max_age_hits_network_once() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!([user_json(1, "John")]));
        });

        let client = client_for(&server, Duration::from_secs(3600));
        client.list_users().unwrap();
        client.list_users().unwrap();
        m.assert_hits(1);
    }

    #[test]
    fn zero_max_age_disables_cache() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!([]));
        });

        let client = client_for(&server, Duration::ZERO);
        client.list_users().unwrap();
        client.list_users().unwrap();
        m.assert_hits(2);
    }

    #[test]
    fn get_user_not_found_is_status_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users/999");
            then.status(404).json_body(json!({}));
        });

        let client = client_for(&server, Duration::from_secs(3600));
        let err = client.get_user(999).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Failed to fetch user: 404");
    }

    #[test]
    fn get_user_decodes_single_record() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users/2");
            then.status(200).json_body(user_json(2, "Jane"));
        });

        let client = client_for(&server, Duration::from_secs(3600));
        assert_eq!(client.get_user(2).unwrap().name, "Jane");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let server = MockServer::start();
        let client = client_for(&server, Duration::ZERO);
        assert_eq!(client.base_url(), server.base_url());
    }
}
