use crate::domain::ports::PreferenceStore;
use crate::utils::error::{PortfolioError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preference-store key holding the theme choice.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// light -> dark -> system -> light
    pub fn next(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
            Theme::System => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn resolve(self, system: ColorScheme) -> ColorScheme {
        match self {
            Theme::Light => ColorScheme::Light,
            Theme::Dark => ColorScheme::Dark,
            Theme::System => system,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(PortfolioError::ValidationError {
                message: format!("unknown theme '{}' (expected light, dark or system)", other),
            }),
        }
    }
}

/// The scheme actually rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }
}

/// Holds the visitor's theme choice and the OS color-scheme preference, and
/// writes the choice through to a [`PreferenceStore`] on every change.
pub struct ThemeController<S: PreferenceStore> {
    store: S,
    theme: Theme,
    system: ColorScheme,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// 啟動時讀取已儲存的主題；沒有或無法辨識時跟隨系統
    pub async fn load(store: S, system: ColorScheme) -> Self {
        let theme = match store.read(THEME_KEY).await {
            Ok(Some(saved)) => saved.parse().unwrap_or_else(|e: PortfolioError| {
                tracing::warn!(error = %e, "Ignoring stored theme preference");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read theme preference, following system");
                Theme::default()
            }
        };

        tracing::debug!(%theme, ?system, "Theme preference loaded");
        Self {
            store,
            theme,
            system,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn system(&self) -> ColorScheme {
        self.system
    }

    pub fn applied(&self) -> ColorScheme {
        self.theme.resolve(self.system)
    }

    /// Persists `theme`, then makes it current.
    pub async fn set(&mut self, theme: Theme) -> Result<ColorScheme> {
        self.store.write(THEME_KEY, theme.as_str()).await?;
        tracing::info!(from = %self.theme, to = %theme, "Theme changed");
        self.theme = theme;
        Ok(self.applied())
    }

    pub async fn cycle(&mut self) -> Result<Theme> {
        let next = self.theme.next();
        self.set(next).await?;
        Ok(next)
    }

    /// Records an OS color-scheme change. Returns the newly applied scheme
    /// when the change affects rendering (theme is `system`).
    pub fn system_preference_changed(&mut self, system: ColorScheme) -> Option<ColorScheme> {
        self.system = system;
        if self.theme == Theme::System {
            Some(self.applied())
        } else {
            None
        }
    }
}
