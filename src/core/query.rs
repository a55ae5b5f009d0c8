//! Read accessors over the content store.
//!
//! Every accessor answers synchronously but wraps its answer in
//! [`QueryResult`], the same `{data, loading, error}` shape a network-backed
//! source would produce, so callers never branch on where data came from.

use crate::core::pagination::{paginate, Page, PageRequest};
use crate::data::ContentStore;
use crate::domain::model::{BlogPost, Education, Experience, Profile, Project, Skill, SkillGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

pub const UNCATEGORIZED_SKILLS: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> QueryResult<T> {
    pub fn ready(data: T) -> Self {
        Self {
            data,
            loading: false,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.loading && self.error.is_none()
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SkillFilter {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlogFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl BlogFilter {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// 空字串等同未指定篩選
fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|value| !value.is_empty())
}

fn matches_category(category: &Option<String>, wanted: Option<&str>) -> bool {
    match wanted {
        Some(wanted) => category.as_deref() == Some(wanted),
        None => true,
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = Option<&'a String>>) -> Vec<&'a str> {
    values
        .flatten()
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone)]
pub struct Portfolio {
    store: Arc<ContentStore>,
}

impl Portfolio {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn profile(&self) -> QueryResult<&Profile> {
        QueryResult::ready(self.store.profile())
    }

    pub fn experiences(&self) -> QueryResult<&[Experience]> {
        QueryResult::ready(self.store.experience())
    }

    pub fn education(&self) -> QueryResult<&[Education]> {
        QueryResult::ready(self.store.education())
    }

    pub fn projects(&self, filter: &ProjectFilter) -> QueryResult<Vec<&Project>> {
        let category = active(&filter.category);
        let projects = self
            .store
            .projects()
            .iter()
            .filter(|p| matches_category(&p.category, category))
            .filter(|p| filter.featured.map_or(true, |featured| p.is_featured == featured))
            .collect();
        QueryResult::ready(projects)
    }

    /// 以字串形式比對 id；找不到時回傳 `None`，不是錯誤
    pub fn project(&self, id: &str) -> QueryResult<Option<&Project>> {
        let project = self
            .store
            .projects()
            .iter()
            .find(|p| p.id.to_string() == id);
        QueryResult::ready(project)
    }

    pub fn project_categories(&self) -> QueryResult<Vec<&str>> {
        QueryResult::ready(distinct_sorted(
            self.store.projects().iter().map(|p| p.category.as_ref()),
        ))
    }

    pub fn skills(&self, filter: &SkillFilter) -> QueryResult<Vec<&Skill>> {
        let category = active(&filter.category);
        let skills = self
            .store
            .skills()
            .iter()
            .filter(|s| matches_category(&s.category, category))
            .collect();
        QueryResult::ready(skills)
    }

    pub fn skills_grouped(&self) -> QueryResult<Vec<SkillGroup<'_>>> {
        let mut groups: Vec<SkillGroup<'_>> = Vec::new();
        for skill in self.store.skills() {
            let category = skill.category.as_deref().unwrap_or(UNCATEGORIZED_SKILLS);
            match groups.iter_mut().find(|g| g.category == category) {
                Some(group) => group.skills.push(skill),
                None => groups.push(SkillGroup {
                    category,
                    skills: vec![skill],
                }),
            }
        }
        QueryResult::ready(groups)
    }

    pub fn blogs(&self, filter: &BlogFilter) -> QueryResult<Page<&BlogPost>> {
        let category = active(&filter.category);
        let tag = active(&filter.tag);
        let posts: Vec<&BlogPost> = self
            .store
            .blog()
            .iter()
            .filter(|b| matches_category(&b.category, category))
            .filter(|b| tag.map_or(true, |tag| b.tags.iter().any(|t| t == tag)))
            .collect();
        QueryResult::ready(paginate(posts, filter.page_request()))
    }

    pub fn blog_post(&self, slug: &str) -> QueryResult<Option<&BlogPost>> {
        QueryResult::ready(self.store.blog().iter().find(|b| b.slug == slug))
    }

    pub fn featured_blogs(&self, limit: Option<usize>) -> QueryResult<Vec<&BlogPost>> {
        let featured = self
            .store
            .blog()
            .iter()
            .filter(|b| b.is_featured)
            .take(limit.unwrap_or(usize::MAX))
            .collect();
        QueryResult::ready(featured)
    }

    pub fn blog_categories(&self) -> QueryResult<Vec<&str>> {
        QueryResult::ready(distinct_sorted(
            self.store.blog().iter().map(|b| b.category.as_ref()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture;

    fn portfolio() -> Portfolio {
        Portfolio::new(Arc::new(fixture()))
    }

    #[test]
    fn test_results_are_ready_without_error() {
        let portfolio = portfolio();
        let profile = portfolio.profile();
        assert!(profile.is_success());
        assert!(!profile.loading);
        assert_eq!(profile.error, None);
        assert_eq!(profile.data.full_name, "Jane Doe");
    }

    #[test]
    fn test_project_lookup_by_id() {
        let portfolio = portfolio();
        let found = portfolio.project("3").into_data().unwrap();
        assert_eq!(found.slug, "gamma");
        assert_eq!(found, &portfolio.store().projects()[2]);

        assert!(portfolio.project("99").into_data().is_none());
        assert!(portfolio.project("gamma").into_data().is_none());
    }

    #[test]
    fn test_project_filters() {
        let portfolio = portfolio();
        let web = portfolio.projects(&ProjectFilter {
            category: Some("Web Application".to_string()),
            featured: None,
        });
        let ids: Vec<u32> = web.data.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5, 7]);

        let featured = portfolio.projects(&ProjectFilter {
            category: None,
            featured: Some(true),
        });
        let ids: Vec<u32> = featured.data.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 5]);

        let none = portfolio.projects(&ProjectFilter {
            category: Some("Mobile".to_string()),
            featured: None,
        });
        assert!(none.is_success());
        assert!(none.data.is_empty());
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let portfolio = portfolio();
        let lower = portfolio.projects(&ProjectFilter {
            category: Some("web application".to_string()),
            featured: None,
        });
        assert!(lower.data.is_empty());
    }

    #[test]
    fn test_empty_category_means_no_filter() {
        let portfolio = portfolio();
        let all = portfolio.projects(&ProjectFilter {
            category: Some(String::new()),
            featured: None,
        });
        assert_eq!(all.data.len(), 7);
    }

    #[test]
    fn test_project_categories_sorted_distinct() {
        let portfolio = portfolio();
        assert_eq!(
            portfolio.project_categories().data,
            vec!["Web Application", "Website"]
        );
    }

    #[test]
    fn test_skills_grouped_keeps_first_appearance_order() {
        let portfolio = portfolio();
        let groups = portfolio.skills_grouped().into_data();
        let categories: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, vec!["Languages", "Tools", UNCATEGORIZED_SKILLS]);
        let languages: Vec<&str> = groups[0].skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(languages, vec!["Rust", "PHP"]);
    }

    #[test]
    fn test_skill_filter() {
        let portfolio = portfolio();
        let tools = portfolio.skills(&SkillFilter {
            category: Some("Tools".to_string()),
        });
        assert_eq!(tools.data.len(), 1);
        assert_eq!(tools.data[0].name, "Docker");
    }

    #[test]
    fn test_blog_filters_and_pages() {
        let portfolio = portfolio();
        let rust = portfolio.blogs(&BlogFilter {
            category: Some("Rust".to_string()),
            ..Default::default()
        });
        assert_eq!(rust.data.meta.total, 3);

        let memory = portfolio.blogs(&BlogFilter {
            tag: Some("memory".to_string()),
            ..Default::default()
        });
        let slugs: Vec<&str> = memory.data.data.iter().map(|b| b.slug.as_str()).collect();
        assert_eq!(slugs, vec!["rust-ownership", "memory-models"]);

        let third = portfolio.blogs(&BlogFilter {
            page: Some(3),
            per_page: Some(3),
            ..Default::default()
        });
        assert_eq!(third.data.meta.last_page, 3);
        assert_eq!(third.data.data.len(), 1);
        assert_eq!(third.data.data[0].slug, "php-generics");
    }

    #[test]
    fn test_blog_lookup_and_featured() {
        let portfolio = portfolio();
        assert!(portfolio.blog_post("async-rust").data.is_some());
        assert!(portfolio.blog_post("missing").data.is_none());

        let featured = portfolio.featured_blogs(Some(2)).into_data();
        let slugs: Vec<&str> = featured.iter().map(|b| b.slug.as_str()).collect();
        assert_eq!(slugs, vec!["rust-ownership", "async-rust"]);
        assert_eq!(portfolio.featured_blogs(None).data.len(), 3);
    }

    #[test]
    fn test_blog_categories() {
        let portfolio = portfolio();
        assert_eq!(
            portfolio.blog_categories().data,
            vec!["CSS", "PHP", "Rust", "Systems"]
        );
    }
}
