//! Static portfolio content.
//!
//! The content is built once at startup and shared read-only by every
//! session. Nothing here changes after construction.

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Tech-stack label.
    pub tech: String,
    /// Link, with or without a scheme.
    pub link: String,
}

/// A position in the work history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Experience {
    /// Job title.
    pub role: String,
    /// Employer.
    pub company: String,
    /// Human-readable period, e.g. `2024 - 2025`.
    pub period: String,
    /// One-line description.
    pub description: String,
}

/// A way to reach the portfolio owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Short label, e.g. `GitHub`.
    pub label: String,
    /// Text shown for the link.
    pub display: String,
    /// Link target.
    pub url: String,
}

/// The owner's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Owner's name.
    pub name: String,
    /// Paragraphs of the About page.
    pub about: Vec<String>,
    /// Contact entries, in display order.
    pub contacts: Vec<Contact>,
}

/// Everything a session displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    /// Owner's profile.
    pub profile: Profile,
    /// Projects, in display order.
    pub projects: Vec<Project>,
    /// Work history, most recent first.
    pub experiences: Vec<Experience>,
}

impl Project {
    fn new(name: &str, description: &str, tech: &str, link: &str) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            tech: tech.to_owned(),
            link: link.to_owned(),
        }
    }

    /// Link with `https://` prepended when it carries no scheme.
    pub fn url(&self) -> String {
        if self.link.starts_with("http://") || self.link.starts_with("https://") {
            self.link.clone()
        } else {
            format!("https://{}", self.link)
        }
    }
}

impl Experience {
    fn new(role: &str, company: &str, period: &str, description: &str) -> Self {
        Self {
            role: role.to_owned(),
            company: company.to_owned(),
            period: period.to_owned(),
            description: description.to_owned(),
        }
    }
}

impl Contact {
    fn new(label: &str, display: &str, url: &str) -> Self {
        Self { label: label.to_owned(), display: display.to_owned(), url: url.to_owned() }
    }
}

impl Content {
    /// The built-in portfolio.
    pub fn builtin() -> Self {
        let profile = Profile {
            name: "Joe".to_owned(),
            about: vec![
                "Hey, I'm Joe, a software developer interested in building entertaining or \
                 useful things."
                    .to_owned(),
                "Currently exploring React Internals and distributed systems.".to_owned(),
            ],
            contacts: vec![
                Contact::new("GitHub", "https://github.com/JoeS51", "https://github.com/JoeS51"),
                Contact::new("Email", "joesluis51@gmail.com", "mailto:joesluis51@gmail.com"),
                Contact::new(
                    "LinkedIn",
                    "https://linkedin.com/in/joesluis/",
                    "https://linkedin.com/in/joesluis/",
                ),
            ],
        };

        let projects = vec![
            Project::new(
                "SSH Portfolio",
                "This app",
                "Rust, ratatui, russh",
                "github.com/joe/ssh-portfolio",
            ),
            Project::new(
                "React From Scratch",
                "Built a toy React from scratch",
                "JavaScript",
                "github.com/joe/react-0.5",
            ),
            Project::new(
                "HTTP Server From Scratch",
                "Build a HTTP server from scratch using TCP and HTTP/1.1",
                "Rust",
                "github.com/joe/api-gateway",
            ),
        ];

        let experiences = vec![
            Experience::new(
                "Software Engineer",
                "Microsoft",
                "2025 - Present",
                "Azure SQL VM team",
            ),
            Experience::new(
                "Software Engineer Intern",
                "Jenni AI",
                "2024 - 2025",
                "Developed new product that reviews manuscripts for Jenni AI",
            ),
            Experience::new(
                "Software Engineer Intern",
                "Blue Origin",
                "Fall 2023",
                "New Glenn Rocket Software",
            ),
        ];

        Self { profile, projects, experiences }
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_adds_missing_scheme() {
        let project = Project::new("p", "d", "t", "github.com/joe/x");
        assert_eq!(project.url(), "https://github.com/joe/x");
    }

    #[test]
    fn url_keeps_existing_scheme() {
        let https = Project::new("p", "d", "t", "https://example.com");
        let http = Project::new("p", "d", "t", "http://example.com");

        assert_eq!(https.url(), "https://example.com");
        assert_eq!(http.url(), "http://example.com");
    }

    #[test]
    fn builtin_lists_are_populated() {
        let content = Content::builtin();

        assert_eq!(content.projects.len(), 3);
        assert_eq!(content.experiences.len(), 3);
        assert_eq!(content.profile.contacts.len(), 3);
        assert!(content.profile.contacts.iter().any(|c| c.url.starts_with("mailto:")));
    }
}
