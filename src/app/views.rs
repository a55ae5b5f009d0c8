//! JSON view documents, one per page of the site.

use crate::core::pagination::PageMeta;
use crate::core::query::{BlogFilter, Portfolio, ProjectFilter};
use crate::core::related::related;
use crate::core::sections::SectionId;
use crate::core::toc::{extract_toc, TocEntry};
use crate::domain::model::{BlogPost, Education, Experience, Profile, Project, SkillGroup};
use chrono::NaiveDate;
use serde::Serialize;

/// Posts per page on the blog list when the request names no page size.
pub const BLOG_PAGE_SIZE: usize = 9;

/// Featured posts shown on the home page.
pub const HOME_FEATURED_POSTS: usize = 3;

/// `Jan 5, 2025`
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `January 5, 2025`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// 專案期間：兩端皆有、只有開始、只有結束
pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{} - {}", month_year(start), month_year(end))),
        (Some(start), None) => Some(format!("{} - Present", month_year(start))),
        (None, Some(end)) => Some(format!("Until {}", month_year(end))),
        (None, None) => None,
    }
}

pub fn home_title(name: &str) -> String {
    format!("{} | Portfolio", name)
}

pub fn blog_list_title(name: &str) -> String {
    format!("Blog | {}", name)
}

pub fn blog_post_title(post: &BlogPost, name: &str) -> String {
    match post.meta_title.as_deref().filter(|t| !t.is_empty()) {
        Some(meta_title) => meta_title.to_string(),
        None => format!("{} | Blog | {}", post.title, name),
    }
}

pub fn project_list_title(name: &str) -> String {
    format!("Projects | {}", name)
}

pub fn project_detail_title(project: &Project, name: &str) -> String {
    format!("{} | Projects | {}", project.title, name)
}

/// Summary of a post as shown in lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogCard<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub excerpt: Option<&'a str>,
    pub category: Option<&'a str>,
    pub tags: &'a [String],
    pub published: Option<String>,
    pub reading_time_minutes: Option<u32>,
    pub featured_image: Option<&'a str>,
    pub is_featured: bool,
}

impl<'a> From<&'a BlogPost> for BlogCard<'a> {
    fn from(post: &'a BlogPost) -> Self {
        Self {
            slug: &post.slug,
            title: &post.title,
            excerpt: post.excerpt.as_deref(),
            category: post.category.as_deref(),
            tags: &post.tags,
            published: post.published_at.map(short_date),
            reading_time_minutes: post.reading_time_minutes,
            featured_image: post.featured_image.as_deref(),
            is_featured: post.is_featured,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HomeView<'a> {
    pub title: String,
    pub sections: [SectionId; 6],
    pub profile: &'a Profile,
    pub experience: &'a [Experience],
    pub skills: Vec<SkillGroup<'a>>,
    pub projects: Vec<&'a Project>,
    pub education: &'a [Education],
    pub featured_posts: Vec<BlogCard<'a>>,
    pub resume_available: bool,
}

pub fn home(portfolio: &Portfolio) -> HomeView<'_> {
    let profile = portfolio.profile().into_data();
    HomeView {
        title: home_title(&profile.full_name),
        sections: SectionId::ALL,
        profile,
        experience: portfolio.experiences().into_data(),
        skills: portfolio.skills_grouped().into_data(),
        projects: portfolio.projects(&ProjectFilter::default()).into_data(),
        education: portfolio.education().into_data(),
        featured_posts: portfolio
            .featured_blogs(Some(HOME_FEATURED_POSTS))
            .into_data()
            .into_iter()
            .map(BlogCard::from)
            .collect(),
        resume_available: profile.resume_link().is_some(),
    }
}

#[derive(Debug, Serialize)]
pub struct BlogListView<'a> {
    pub title: String,
    pub posts: Vec<BlogCard<'a>>,
    pub categories: Vec<&'a str>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub meta: PageMeta,
}

pub fn blog_list(portfolio: &Portfolio, filter: BlogFilter) -> BlogListView<'_> {
    let filter = BlogFilter {
        page: filter.page.or(Some(1)),
        per_page: filter.per_page.or(Some(BLOG_PAGE_SIZE)),
        ..filter
    };
    let page = portfolio.blogs(&filter).into_data();

    BlogListView {
        title: blog_list_title(&portfolio.profile().data.full_name),
        posts: page.data.into_iter().map(BlogCard::from).collect(),
        categories: portfolio.blog_categories().into_data(),
        category: filter.category,
        tag: filter.tag,
        meta: page.meta,
    }
}

#[derive(Debug, Serialize)]
pub struct BlogPostView<'a> {
    pub title: String,
    pub meta_description: Option<&'a str>,
    pub post: &'a BlogPost,
    pub published: Option<String>,
    pub toc: Vec<TocEntry>,
    pub related: Vec<BlogCard<'a>>,
}

pub fn blog_post<'a>(portfolio: &'a Portfolio, slug: &str) -> Option<BlogPostView<'a>> {
    let post = portfolio.blog_post(slug).into_data()?;
    let name = &portfolio.profile().data.full_name;

    Some(BlogPostView {
        title: blog_post_title(post, name),
        meta_description: post
            .meta_description
            .as_deref()
            .or(post.excerpt.as_deref()),
        post,
        published: post.published_at.map(long_date),
        toc: extract_toc(&post.content),
        related: related(post, portfolio.store().blog())
            .into_iter()
            .map(BlogCard::from)
            .collect(),
    })
}

#[derive(Debug, Serialize)]
pub struct ProjectListView<'a> {
    pub title: String,
    pub categories: Vec<&'a str>,
    pub category: Option<String>,
    pub count: usize,
    pub projects: Vec<&'a Project>,
}

pub fn project_list(portfolio: &Portfolio, filter: ProjectFilter) -> ProjectListView<'_> {
    let projects = portfolio.projects(&filter).into_data();
    ProjectListView {
        title: project_list_title(&portfolio.profile().data.full_name),
        categories: portfolio.project_categories().into_data(),
        category: filter.category.filter(|c| !c.is_empty()),
        count: projects.len(),
        projects,
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailView<'a> {
    pub title: String,
    pub project: &'a Project,
    pub timeline: Option<String>,
    pub related: Vec<&'a Project>,
}

pub fn project_detail<'a>(portfolio: &'a Portfolio, id: &str) -> Option<ProjectDetailView<'a>> {
    let project = portfolio.project(id).into_data()?;
    Some(ProjectDetailView {
        title: project_detail_title(project, &portfolio.profile().data.full_name),
        project,
        timeline: format_date_range(project.start_date, project.end_date),
        related: related(project, portfolio.store().projects()),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    Page,
    Post,
    Project,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotFoundView {
    pub title: String,
    pub heading: &'static str,
    pub message: &'static str,
    pub back_link: &'static str,
}

pub fn not_found(portfolio: &Portfolio, kind: NotFoundKind) -> NotFoundView {
    let (heading, message, back_link) = match kind {
        NotFoundKind::Page => (
            "Page Not Found",
            "The page you are looking for does not exist.",
            "/",
        ),
        NotFoundKind::Post => (
            "Post Not Found",
            "The blog post you're looking for doesn't exist or has been removed.",
            "/blog",
        ),
        NotFoundKind::Project => (
            "Project Not Found",
            "The project you are looking for does not exist or is no longer published.",
            "/projects",
        ),
    };

    NotFoundView {
        title: format!("{} | {}", heading, portfolio.profile().data.full_name),
        heading,
        message,
        back_link,
    }
}
