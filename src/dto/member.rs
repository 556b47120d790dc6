use serde::Serialize;

/// Username/age pair.
///
/// Has a no-argument constructor plus setters so it can be filled column by
/// column, as well as a positional constructor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i32,
}

impl MemberDto {
    pub fn new(username: Option<String>, age: i32) -> Self {
        Self { username, age }
    }

    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub fn set_age(&mut self, age: i32) {
        self.age = age;
    }
}

/// Same data as [`MemberDto`] under different field names: `name` is the
/// member username and `age` is whatever expression the query aliased to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct UserDto {
    pub name: Option<String>,
    pub age: i32,
}
