//! Page content: who the portfolio is about.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ConfigError;
use crate::filter::Categorized;

const BUILTIN: &str = include_str!("../profile.toml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Short mark shown in the header.
    pub handle: String,
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Phrases cycled by the typewriter under the name.
    pub roles: Vec<String>,
    pub summary: String,
    pub about: AboutInfo,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    pub contact: ContactInfo,
    #[serde(default)]
    pub footer: String,
}

fn default_greeting() -> String {
    "Hello, I'm".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutInfo {
    pub headline: String,
    pub paragraphs: Vec<String>,
}

/// A headline number that counts up when the about section appears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: u32,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency, 0 to 100.
    pub percentage: u32,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub period: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub institution: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub socials: Vec<Social>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Social {
    pub name: String,
    pub url: String,
}

impl Categorized for Skill {
    fn category(&self) -> &str {
        &self.category
    }
}

impl Categorized for Project {
    fn category(&self) -> &str {
        &self.category
    }
}

impl Profile {
    /// The profile compiled into the binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        toml::from_str(BUILTIN)
            .map(Self::sanitized)
            .map_err(ConfigError::Builtin)
    }

    /// Load from `path`, or the built-in profile when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no profile file, using built-in profile");
            return Self::builtin();
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text)
            .map(Self::sanitized)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Load from the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        match crate::profile_file() {
            Some(path) => Self::load_from(&path),
            None => Self::builtin(),
        }
    }

    fn sanitized(mut self) -> Self {
        for skill in &mut self.skills {
            skill.percentage = skill.percentage.min(100);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{categories, filter_by_category};

    #[test]
    fn test_builtin_parses() {
        let profile = Profile::builtin().unwrap();
        assert!(!profile.name.is_empty());
        assert!(!profile.roles.is_empty());
        assert_eq!(profile.stats.len(), 3);
        assert!(profile.skills.iter().all(|s| s.percentage <= 100));
    }

    #[test]
    fn test_builtin_categories() {
        let profile = Profile::builtin().unwrap();
        assert!(categories(&profile.projects).contains(&"security"));
        let security = filter_by_category(&profile.projects, "security");
        assert!(!security.is_empty());
        assert!(security.iter().all(|p| p.category == "security"));
    }

    #[test]
    fn test_percentage_clamped() {
        let text = BUILTIN.replacen("percentage = 80", "percentage = 250", 1);
        let profile: Profile = toml::from_str::<Profile>(&text).unwrap().sanitized();
        assert_eq!(profile.skills[0].percentage, 100);
    }
}
