//! The four semantic parts of the suitcase.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A semantic part the configurator exposes. There are exactly four.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartRole {
    Body,
    Handle,
    Zipper,
    Wheel,
}

impl PartRole {
    pub const ALL: [PartRole; 4] = [
        PartRole::Body,
        PartRole::Handle,
        PartRole::Zipper,
        PartRole::Wheel,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PartRole::Body => "body",
            PartRole::Handle => "handle",
            PartRole::Zipper => "zipper",
            PartRole::Wheel => "wheel",
        }
    }
}

impl fmt::Display for PartRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per role, addressable by [`PartRole`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerRole<T> {
    pub body: T,
    pub handle: T,
    pub zipper: T,
    pub wheel: T,
}

impl<T> PerRole<T> {
    pub fn from_fn(mut f: impl FnMut(PartRole) -> T) -> Self {
        Self {
            body: f(PartRole::Body),
            handle: f(PartRole::Handle),
            zipper: f(PartRole::Zipper),
            wheel: f(PartRole::Wheel),
        }
    }

    pub fn get(&self, role: PartRole) -> &T {
        match role {
            PartRole::Body => &self.body,
            PartRole::Handle => &self.handle,
            PartRole::Zipper => &self.zipper,
            PartRole::Wheel => &self.wheel,
        }
    }

    pub fn get_mut(&mut self, role: PartRole) -> &mut T {
        match role {
            PartRole::Body => &mut self.body,
            PartRole::Handle => &mut self.handle,
            PartRole::Zipper => &mut self.zipper,
            PartRole::Wheel => &mut self.wheel,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PartRole, &T)> {
        PartRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}
