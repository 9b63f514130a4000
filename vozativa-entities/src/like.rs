use crate::id::Id;

/// The set of users that like an item.
///
/// Each user appears at most once. Toggling twice restores the
/// previous state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LikeSet(Vec<Id>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    Added,
    Removed,
}

impl LikeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicate ids are dropped, the first occurrence wins.
    pub fn from_user_ids(user_ids: Vec<Id>) -> Self {
        let mut set = Self::new();
        for id in user_ids {
            if !set.contains(&id) {
                set.0.push(id);
            }
        }
        set
    }

    pub fn toggle(&mut self, user_id: Id) -> LikeToggle {
        match self.0.iter().position(|id| *id == user_id) {
            Some(position) => {
                self.0.remove(position);
                LikeToggle::Removed
            }
            None => {
                self.0.push(user_id);
                LikeToggle::Added
            }
        }
    }

    pub fn contains(&self, user_id: &Id) -> bool {
        self.0.iter().any(|id| id == user_id)
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Id> {
        self.0.iter()
    }
}
