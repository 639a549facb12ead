//! Session-local list of users, seeded once from the initial fetch.
use crate::api::User;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserList {
    users: Vec<User>,
}

impl UserList {
    pub fn from_snapshot(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Drop the record with `id`. Absent ids leave the list untouched.
    pub fn remove(&mut self, id: u32) {
        self.users.retain(|u| u.id != id);
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, index: usize) -> Option<&User> {
        self.users.get(index)
    }

    pub fn position(&self, id: u32) -> Option<usize> {
        self.users.iter().position(|u| u.id == id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
