//! Read-only access to the remote users API.
//!
//! `UserApi` is the seam the page shell loads through; `HttpUserClient` is the
//! production implementation over `reqwest`.
pub mod client;
pub mod model;

pub use client::{ClientConfig, HttpUserClient};
pub use model::{Address, Company, Geo, User};

use crate::error::FetchError;

/// Default API base used when nothing is configured.
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default freshness hint in seconds.
pub const DEFAULT_MAX_AGE_SECS: u64 = 3600;

pub trait UserApi {
    /// `GET {base}/users`.
    ///
    /// # Returns
    ///
    /// Every record in server order, or the `FetchError` describing why the
    /// request failed.
    fn list_users(&self) -> Result<Vec<User>, FetchError>;

    /// `GET {base}/users/{id}`. Not-found surfaces as `FetchError::Status`.
    fn get_user(&self, id: u32) -> Result<User, FetchError>;
}
