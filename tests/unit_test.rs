// Unit tests for userdeck
// These tests work with the public API only

fn sample_user(id: u32, name: &str) -> userdeck::api::User {
    use userdeck::api::{Address, Company, Geo, User};
    let handle = name.to_lowercase().replace(' ', "");
    User {
        id,
        name: name.to_string(),
        username: handle.clone(),
        email: format!("{handle}@example.com"),
        address: Address {
            street: "123 Main St".to_string(),
            suite: "Apt 4B".to_string(),
            city: "Anytown".to_string(),
            zipcode: "12345".to_string(),
            geo: Geo { lat: "40.7128".to_string(), lng: "-74.0060".to_string() },
        },
        phone: "555-1234".to_string(),
        website: format!("{handle}.com"),
        company: Company {
            name: "ABC Corp".to_string(),
            catch_phrase: "Making the world better".to_string(),
            bs: "innovative solutions".to_string(),
        },
    }
}

#[cfg(test)]
mod list_tests {
    use super::sample_user;
    use userdeck::app::list::UserList;

    #[test]
    fn test_remove_excludes_only_matching_record() {
        let users = vec![sample_user(1, "John Doe"), sample_user(2, "Jane Smith"), sample_user(3, "Bob Stone")];
        let mut list = UserList::from_snapshot(users.clone());
        list.remove(2);

        let expected: Vec<_> = users.into_iter().filter(|u| u.id != 2).collect();
        assert_eq!(list.users(), expected.as_slice());
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let users = vec![sample_user(1, "John Doe"), sample_user(2, "Jane Smith")];
        let mut list = UserList::from_snapshot(users.clone());
        list.remove(42);
        assert_eq!(list.users(), users.as_slice());

        list.remove(1);
        list.remove(1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.position(2), Some(0));
    }

    #[test]
    fn test_empty_snapshot() {
        let mut list = UserList::from_snapshot(Vec::new());
        list.remove(1);
        assert!(list.is_empty());
        assert!(list.get(0).is_none());
    }
}

#[cfg(test)]
mod link_tests {
    use super::sample_user;
    use userdeck::api::model::{map_url, website_url};

    #[test]
    fn test_map_link_literal() {
        assert_eq!(map_url("40.7128", "-74.0060"), "https://www.google.com/maps?q=40.7128,-74.0060");
    }

    #[test]
    fn test_website_link_literal() {
        assert_eq!(website_url("johndoe.com"), "https://johndoe.com");
        assert_eq!(sample_user(1, "John Doe").website_url(), "https://johndoe.com");
    }
}

#[cfg(test)]
mod page_tests {
    use super::sample_user;
    use std::cell::Cell;
    use userdeck::api::{User, UserApi};
    use userdeck::app::{EMPTY_MESSAGE, LOAD_ERROR_MESSAGE, PageState};
    use userdeck::error::{FetchError, Resource};

    struct FakeApi {
        users: Option<Vec<User>>,
        calls: Cell<usize>,
    }

    impl UserApi for FakeApi {
        fn list_users(&self) -> Result<Vec<User>, FetchError> {
            self.calls.set(self.calls.get() + 1);
            self.users
                .clone()
                .ok_or(FetchError::Status { resource: Resource::Users, status: 503 })
        }

        fn get_user(&self, id: u32) -> Result<User, FetchError> {
            Err(FetchError::Status { resource: Resource::User(id), status: 404 })
        }
    }

    #[test]
    fn test_load_fetches_exactly_once() {
        let api = FakeApi { users: Some(vec![sample_user(1, "John Doe")]), calls: Cell::new(0) };
        let page = PageState::load(&api);
        assert_eq!(api.calls.get(), 1);
        assert_eq!(page.view().map(|v| v.list.len()), Some(1));
    }

    #[test]
    fn test_failure_becomes_static_message() {
        let api = FakeApi { users: None, calls: Cell::new(0) };
        match PageState::load(&api) {
            PageState::Failed { message } => assert_eq!(message, LOAD_ERROR_MESSAGE),
            other => panic!("unexpected page: {other:?}"),
        }
    }

    #[test]
    fn test_zero_records_is_empty_state() {
        let page = PageState::from_fetch(Ok(Vec::new()));
        assert!(matches!(page, PageState::Empty));
        assert_eq!(EMPTY_MESSAGE, "No users found.");
    }
}

#[cfg(test)]
mod timer_tests {
    use std::time::{Duration, Instant};
    use userdeck::app::timer::{TimerEvent, Timers};

    #[test]
    fn test_nothing_fires_early() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        timers.schedule_after(t0, Duration::from_millis(300), TimerEvent::DeleteCommit { id: 9 });
        assert!(timers.take_due(t0 + Duration::from_millis(299)).is_empty());
        assert_eq!(timers.len(), 1);
        assert_eq!(
            timers.take_due(t0 + Duration::from_millis(300)),
            vec![TimerEvent::DeleteCommit { id: 9 }]
        );
    }
}
