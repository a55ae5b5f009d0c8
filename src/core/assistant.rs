//! Visitor chat assistant: prompt assembly and session handling.
//!
//! The assistant knows only what the content store holds. Its system
//! instruction is rebuilt from the store whenever a session is created.

use crate::adapters::gemini::GeminiClient;
use crate::core::query::UNCATEGORIZED_SKILLS;
use crate::data::ContentStore;
use crate::domain::chat::{ChatRequest, ChatRole, ChatTurn};
use crate::domain::ports::{ChatBackend, ConfigProvider};
use crate::utils::error::{PortfolioError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Projects listed in the prompt.
pub const PROMPT_PROJECT_LIMIT: usize = 5;

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(placeholder)
}

fn join_or_na(values: &[String]) -> String {
    if values.is_empty() {
        "N/A".to_string()
    } else {
        values.join(", ")
    }
}

fn skills_section(store: &ContentStore) -> String {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for skill in store.skills() {
        let category = skill.category.as_deref().unwrap_or(UNCATEGORIZED_SKILLS);
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, names)) => names.push(skill.name.as_str()),
            None => groups.push((category, vec![skill.name.as_str()])),
        }
    }

    if groups.is_empty() {
        return "Not listed".to_string();
    }
    groups
        .iter()
        .map(|(category, names)| format!("- {}: {}", category, names.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn experience_section(store: &ContentStore) -> String {
    if store.experience().is_empty() {
        return "Check the experience section on the website".to_string();
    }
    store
        .experience()
        .iter()
        .map(|e| {
            let end = e
                .end_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "Present".to_string());
            format!(
                "• {} at {} ({} - {})\n  {}\n  Technologies: {}",
                e.position,
                e.company,
                e.start_date,
                end,
                e.description.as_deref().unwrap_or_default(),
                join_or_na(&e.technologies)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn projects_section(store: &ContentStore) -> String {
    if store.projects().is_empty() {
        return "Check the projects section on the website".to_string();
    }
    store
        .projects()
        .iter()
        .take(PROMPT_PROJECT_LIMIT)
        .map(|p| {
            format!(
                "• {} - {}\n  Tech: {}",
                p.title,
                p.description.as_deref().unwrap_or_default(),
                join_or_na(&p.technologies)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn education_section(store: &ContentStore) -> String {
    if store.education().is_empty() {
        return "Check the education section on the website".to_string();
    }
    store
        .education()
        .iter()
        .map(|e| {
            let when = e
                .end_date
                .or(e.start_date)
                .map(|d| d.to_string())
                .unwrap_or_else(|| "dates not listed".to_string());
            format!("• {}, {} ({})", e.degree, e.institution, when)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 將整份內容組成單一的系統指示文字
pub fn build_system_instruction(store: &ContentStore) -> String {
    let profile = store.profile();
    let name = &profile.full_name;
    let about = profile
        .bio
        .as_deref()
        .filter(|b| !b.is_empty())
        .or(profile.summary.as_deref())
        .unwrap_or_default();
    let years = profile
        .years_of_experience
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "You are {name}'s professional portfolio assistant. You help visitors learn about \
{name}'s work and how to connect with them.

When visitors ask how to contact {name}, provide the following PUBLIC contact details \
that are displayed on this portfolio website:

Email: {email}
Phone: {phone}
Location: {location}

Professional Links:
GitHub: {github}
LinkedIn: {linkedin}
Twitter: {twitter}

About {name}:
{about}
{years} years of experience

Technical Skills:
{skills}

Work Experience:
{experience}

Featured Projects:
{projects}

Education:
{education}

How to respond:
- Be friendly, professional, and helpful
- Keep responses concise (2-3 sentences)
- When asked for contact info, provide the email/phone/links listed above
- Focus on {name}'s skills and experience when discussing technical topics
",
        email = profile.email,
        phone = or_placeholder(&profile.phone, "Available on request"),
        location = or_placeholder(&profile.location, "Remote"),
        github = or_placeholder(&profile.github_url, "Not available"),
        linkedin = or_placeholder(&profile.linkedin_url, "Not available"),
        twitter = or_placeholder(&profile.twitter_url, "Not available"),
        skills = skills_section(store),
        experience = experience_section(store),
        projects = projects_section(store),
        education = education_section(store),
    )
}

/// A configured assistant. Conversation history is owned by the caller and
/// passed in on every call; the session itself keeps no turns.
#[derive(Clone)]
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    system_instruction: String,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("model", &self.backend.model())
            .field("system_instruction_len", &self.system_instruction.len())
            .finish()
    }
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>, store: &ContentStore) -> Self {
        Self {
            backend,
            system_instruction: build_system_instruction(store),
        }
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Sends the conversation and returns the assistant's turn. The last turn
    /// must be a non-empty visitor message.
    pub async fn reply(&self, turns: Vec<ChatTurn>) -> Result<ChatTurn> {
        match turns.last() {
            Some(last) if last.role == ChatRole::User && !last.content.trim().is_empty() => {}
            _ => {
                return Err(PortfolioError::ValidationError {
                    message: "conversation must end with a non-empty user message".to_string(),
                })
            }
        }

        let reply = self
            .backend
            .generate(ChatRequest {
                system_instruction: self.system_instruction.clone(),
                turns,
            })
            .await?;
        Ok(ChatTurn::assistant(reply.text))
    }
}

/// Builds the assistant, or `None` when chat is disabled or no client can be
/// constructed. Callers treat `None` as "chat unavailable".
pub fn create_chat_session<C: ConfigProvider>(
    config: &C,
    store: &ContentStore,
) -> Option<ChatSession> {
    if !config.chat_enabled() {
        tracing::info!("Chat assistant disabled by configuration");
        return None;
    }

    let api_key = match config.api_key().ok_or_else(|| PortfolioError::MissingConfigError {
        field: "chat.api_key".to_string(),
    }) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!(
                error = %e,
                suggestion = e.recovery_suggestion(),
                "Chat client not initialized"
            );
            return None;
        }
    };

    let client = match GeminiClient::new(
        config.chat_base_url(),
        config.chat_model(),
        api_key,
        Duration::from_secs(config.chat_timeout_seconds()),
    ) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Error creating chat client");
            return None;
        }
    };

    tracing::info!(model = config.chat_model(), "Creating chat session with system instruction");
    Some(ChatSession::new(Arc::new(client), store))
}
