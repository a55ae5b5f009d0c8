use crate::domain::model::{BlogPost, Project};

pub const RELATED_LIMIT: usize = 3;

/// Similarity rule for "related item" lists.
pub trait Relatable {
    /// Same record (by its unique key).
    fn is_same(&self, other: &Self) -> bool;

    fn relates_to(&self, other: &Self) -> bool;
}

fn same_category(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

impl Relatable for BlogPost {
    fn is_same(&self, other: &Self) -> bool {
        self.slug == other.slug
    }

    fn relates_to(&self, other: &Self) -> bool {
        same_category(&self.category, &other.category)
            || other.tags.iter().any(|tag| self.tags.contains(tag))
    }
}

impl Relatable for Project {
    fn is_same(&self, other: &Self) -> bool {
        self.id == other.id
    }

    fn relates_to(&self, other: &Self) -> bool {
        same_category(&self.category, &other.category)
    }
}

/// 依原始順序取前三筆相關項目，不包含來源本身
pub fn related<'a, T, I>(source: &T, pool: I) -> Vec<&'a T>
where
    T: Relatable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    pool.into_iter()
        .filter(|candidate| !source.is_same(candidate) && source.relates_to(candidate))
        .take(RELATED_LIMIT)
        .collect()
}
