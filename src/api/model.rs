//! Wire model of the users API and the links derived from it.

use serde::{Deserialize, Serialize};

/// Complete profile record returned by the remote API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

/// Coordinates are kept as the API sends them; they are only ever echoed into links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

impl User {
    pub fn website_url(&self) -> String {
        website_url(&self.website)
    }

    pub fn map_url(&self) -> String {
        map_url(&self.address.geo.lat, &self.address.geo.lng)
    }

    pub fn mailto_url(&self) -> String {
        mailto_url(&self.email)
    }
}

impl Address {
    /// Compact form used in the table: `city, street`.
    pub fn short_line(&self) -> String {
        format!("{}, {}", self.city, self.street)
    }

    /// Two-line postal form used in the detail view.
    pub fn lines(&self) -> [String; 2] {
        [
            format!("{}, {}", self.suite, self.street),
            format!("{}, {}", self.city, self.zipcode),
        ]
    }
}

pub fn map_url(lat: &str, lng: &str) -> String {
    format!("https://www.google.com/maps?q={lat},{lng}")
}

pub fn website_url(website: &str) -> String {
    format!("https://{website}")
}

pub fn mailto_url(email: &str) -> String {
    format!("mailto:{email}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_url_embeds_coordinates_verbatim() {
        assert_eq!(
            map_url("40.7128", "-74.0060"),
            "https://www.google.com/maps?q=40.7128,-74.0060"
        );
    }

    #[test]
    fn website_url_prefixes_https() {
        assert_eq!(website_url("johndoe.com"), "https://johndoe.com");
    }

    #[test]
    fn deserializes_api_shape() {
        let raw = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.company.catch_phrase, "Multi-layered client-server neural-net");
        assert_eq!(user.address.short_line(), "Gwenborough, Kulas Light");
        assert_eq!(user.address.lines()[0], "Apt. 556, Kulas Light");
        assert_eq!(user.map_url(), "https://www.google.com/maps?q=-37.3159,81.1496");
        assert_eq!(user.mailto_url(), "mailto:Sincere@april.biz");
    }

    #[test]
    fn partial_record_is_rejected() {
        let raw = r#"{ "id": 1, "name": "No Address", "username": "x", "email": "x@y",
                       "phone": "1", "website": "x.org",
                       "company": { "name": "c", "catchPhrase": "p", "bs": "b" } }"#;
        assert!(serde_json::from_str::<User>(raw).is_err());
    }
}
