//! Static content store.
//!
//! All records are parsed once at startup and never change afterwards. The
//! bundled document ships inside the binary; `content.path` in the site
//! configuration swaps in another file with the same layout.

use crate::domain::model::{BlogPost, Education, Experience, Profile, Project, Skill};
use crate::utils::error::{PortfolioError, Result};
use crate::utils::validation::{validate_date_order, validate_unique, Validate};
use serde::Deserialize;
use std::path::Path;

const BUNDLED_CONTENT: &str = include_str!("../../content/portfolio.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentStore {
    profile: Profile,
    #[serde(default)]
    experience: Vec<Experience>,
    #[serde(default)]
    education: Vec<Education>,
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    blog: Vec<BlogPost>,
}

impl ContentStore {
    /// 載入內嵌於執行檔的內容
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_CONTENT)
    }

    /// 從 TOML 檔案載入內容
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析內容並檢查不變條件
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let store: ContentStore = toml::from_str(content)?;
        store.validate()?;
        Ok(store)
    }

    /// Loads `path` when given, the bundled document otherwise.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let store = match path {
            Some(path) => {
                tracing::info!(path, "Loading portfolio content from file");
                Self::from_file(path)?
            }
            None => {
                tracing::info!("Loading bundled portfolio content");
                Self::bundled()?
            }
        };

        tracing::info!(
            projects = store.projects.len(),
            posts = store.blog.len(),
            skills = store.skills.len(),
            "Portfolio content ready"
        );
        Ok(store)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn experience(&self) -> &[Experience] {
        &self.experience
    }

    pub fn education(&self) -> &[Education] {
        &self.education
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn blog(&self) -> &[BlogPost] {
        &self.blog
    }
}

impl Validate for ContentStore {
    fn validate(&self) -> Result<()> {
        validate_unique("project id", self.projects.iter().map(|p| p.id))?;
        validate_unique("project slug", self.projects.iter().map(|p| p.slug.as_str()))?;
        validate_unique("blog post id", self.blog.iter().map(|b| b.id))?;
        validate_unique("blog post slug", self.blog.iter().map(|b| b.slug.as_str()))?;

        for exp in &self.experience {
            validate_date_order(
                &format!("experience {}", exp.id),
                Some(exp.start_date),
                exp.end_date,
            )?;
        }
        for edu in &self.education {
            validate_date_order(&format!("education {}", edu.id), edu.start_date, edu.end_date)?;
        }
        for project in &self.projects {
            validate_date_order(
                &format!("project {}", project.id),
                project.start_date,
                project.end_date,
            )?;
        }

        if let Some(skill) = self.skills.iter().find(|s| s.proficiency_level > 100) {
            return Err(PortfolioError::ValidationError {
                message: format!(
                    "skill '{}' has proficiency {} (expected 0-100)",
                    skill.name, skill.proficiency_level
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn fixture() -> ContentStore {
    ContentStore::from_toml_str(include_str!("../../tests/fixtures/content.toml"))
        .expect("fixture content is valid")
}
