//! In-place edits of loaded collections after a successful mutation.
//!
//! Mutations never re-fetch: the affected entry is updated or removed by id and
//! everything else is left as it was.

use crate::domain::{Application, Job, PostedJob};

/// A collection element addressed by its server id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Job {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Application {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for PostedJob {
    fn key(&self) -> &str {
        &self.job.id
    }
}

/// Applies `edit` to the element with id `key`. Returns whether one was found.
pub fn update_by_key<T: Keyed>(items: &mut [T], key: &str, edit: impl FnOnce(&mut T)) -> bool {
    match items.iter_mut().find(|item| item.key() == key) {
        Some(item) => {
            edit(item);
            true
        }
        None => false,
    }
}

/// Removes and returns the element with id `key`.
pub fn remove_by_key<T: Keyed>(items: &mut Vec<T>, key: &str) -> Option<T> {
    let index = items.iter().position(|item| item.key() == key)?;
    Some(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, u8);

    impl Keyed for Row {
        fn key(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn update_touches_only_the_match() {
        let mut rows = vec![Row("a", 1), Row("b", 2)];
        assert!(update_by_key(&mut rows, "b", |r| r.1 = 9));
        assert_eq!(rows[0].1, 1);
        assert_eq!(rows[1].1, 9);
        assert!(!update_by_key(&mut rows, "z", |r| r.1 = 0));
    }

    #[test]
    fn remove_keeps_order() {
        let mut rows = vec![Row("a", 1), Row("b", 2), Row("c", 3)];
        assert_eq!(remove_by_key(&mut rows, "b").map(|r| r.1), Some(2));
        assert_eq!(rows.iter().map(|r| r.0).collect::<Vec<_>>(), vec!["a", "c"]);
        assert!(remove_by_key(&mut rows, "b").is_none());
    }
}
