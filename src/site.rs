//! Text rendering of the public portfolio page, section by section.
use std::fmt::Write;

use time::OffsetDateTime;

use crate::{
    core::store::{PortfolioSnapshot, SyncStatus},
    models::{ContactInfo, Project},
};

const QUOTE_MESSAGE: &str = "Hello,%20I%20would%20like%20a%20quote.";
const GALLERY_TECH_LIMIT: usize = 3;

/// Page sections in navigation order, as `(label, anchor)`.
pub const NAV_LINKS: [(&str, &str); 5] = [
    ("Home", "#hero"),
    ("About", "#about"),
    ("Skills", "#skills"),
    ("Portfolio", "#portfolio"),
    ("Contact", "#contact"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Frontend,
    Backend,
    Tools,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub category: SkillCategory,
}

pub const SKILLS: [Skill; 10] = [
    Skill { name: "JavaScript (ES6+)", category: SkillCategory::Frontend },
    Skill { name: "TypeScript", category: SkillCategory::Frontend },
    Skill { name: "React.js", category: SkillCategory::Frontend },
    Skill { name: "Next.js", category: SkillCategory::Frontend },
    Skill { name: "Node.js", category: SkillCategory::Backend },
    Skill { name: "Python", category: SkillCategory::Backend },
    Skill { name: "HTML5 & CSS3", category: SkillCategory::Frontend },
    Skill { name: "Tailwind CSS", category: SkillCategory::Frontend },
    Skill { name: "SQL & NoSQL", category: SkillCategory::Backend },
    Skill { name: "AI Integration", category: SkillCategory::Tools },
];

const HIGHLIGHTS: [&str; 4] = ["Web Systems", "RESTful APIs", "Dashboards", "Automation"];

/// Outbound links derived from the contact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLinks {
    pub whatsapp: String,
    pub quote: String,
    pub email: String,
}

pub fn contact_links(contact: &ContactInfo) -> ContactLinks {
    let whatsapp = format!("https://wa.me/{}", contact.whatsapp_number);
    ContactLinks {
        quote: format!("{whatsapp}?text={QUOTE_MESSAGE}"),
        whatsapp,
        email: format!("mailto:{}", contact.email),
    }
}

fn heading(out: &mut String, anchor: &str, title: &str) {
    let _ = writeln!(out, "\n{title}  [{anchor}]");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

pub fn render_nav() -> String {
    NAV_LINKS
        .iter()
        .map(|(label, anchor)| format!("{label} ({anchor})"))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn render_hero(snapshot: &PortfolioSnapshot) -> String {
    let contact = &snapshot.contact;
    let links = contact_links(contact);
    let mut out = String::new();
    heading(&mut out, "#hero", &contact.name);
    let _ = writeln!(out, "{}", contact.role);
    let _ = writeln!(out, "Systems & Web");
    let _ = writeln!(out, "Photo: {}", profile_image_summary(&snapshot.profile_image));
    let _ = writeln!(out, "Talk on WhatsApp: {}", links.whatsapp);
    let _ = writeln!(out, "See projects: #portfolio");
    out
}

pub fn render_about() -> String {
    let mut out = String::new();
    heading(&mut out, "#about", "About Me");
    let _ = writeln!(
        out,
        "I build efficient management systems and web applications, from the database to \
         the interface, with a growing focus on artificial intelligence."
    );
    let _ = writeln!(out, "{}", HIGHLIGHTS.map(|h| format!("✓ {h}")).join("  "));
    out
}

pub fn render_skills() -> String {
    let mut out = String::new();
    heading(&mut out, "#skills", "Technologies and Tools");
    for category in [SkillCategory::Frontend, SkillCategory::Backend, SkillCategory::Tools] {
        let names: Vec<&str> = SKILLS
            .iter()
            .filter(|s| s.category == category)
            .map(|s| s.name)
            .collect();
        let _ = writeln!(out, "{category:?}: {}", names.join(", "));
    }
    let _ = writeln!(
        out,
        "Need a specific technology? I pick up new stacks quickly. Get in touch: #contact"
    );
    out
}

/// Gallery card: title, category, short description and up to three technologies.
pub fn render_card(project: &Project) -> String {
    let content = &project.content;
    let mut techs: Vec<String> = content
        .technologies
        .iter()
        .take(GALLERY_TECH_LIMIT)
        .cloned()
        .collect();
    if content.technologies.len() > GALLERY_TECH_LIMIT {
        techs.push(format!("+{}", content.technologies.len() - GALLERY_TECH_LIMIT));
    }
    format!(
        "[{}] {} ({})\n  {}\n  {}\n",
        project.id,
        content.title,
        content.category,
        content.short_description,
        techs.join(" · ")
    )
}

pub fn render_portfolio(projects: &[Project]) -> String {
    let mut out = String::new();
    heading(&mut out, "#portfolio", "Featured Projects");
    if projects.is_empty() {
        let _ = writeln!(out, "No projects yet.");
    }
    for project in projects {
        out.push_str(&render_card(project));
    }
    out
}

/// Full detail view of a single project.
pub fn render_project_detail(project: &Project) -> String {
    let content = &project.content;
    let mut out = String::new();
    let _ = writeln!(out, "{}", content.title);
    let _ = writeln!(out, "{}", content.category.label().to_uppercase());
    let _ = writeln!(out, "Image: {}", project.display_image());
    let _ = writeln!(out, "\n{}\n", content.full_description);
    let _ = writeln!(out, "Technologies used:");
    for tech in &content.technologies {
        let _ = writeln!(out, "  - {tech}");
    }
    out
}

pub fn render_contact(contact: &ContactInfo) -> String {
    let links = contact_links(contact);
    let mut out = String::new();
    heading(&mut out, "#contact", "Let's get your project off the ground?");
    let _ = writeln!(out, "WhatsApp  {}", links.whatsapp);
    let _ = writeln!(out, "Email     {} ({})", contact.email, links.email);
    let _ = writeln!(out, "Location  {}", contact.location);
    let _ = writeln!(out, "Request a quote: {}", links.quote);
    out
}

pub fn render_footer(contact: &ContactInfo) -> String {
    let year = OffsetDateTime::now_utc().year();
    format!(
        "\n© {year} {}. All rights reserved.\n{}\n",
        contact.name, contact.role
    )
}

pub fn render_sync_status(sync: &SyncStatus) -> String {
    match sync {
        SyncStatus::Degraded { last_error } => format!("{}: {last_error}", sync.label()),
        _ => sync.label().to_string(),
    }
}

/// The whole page in navigation order.
pub fn render_page(snapshot: &PortfolioSnapshot) -> String {
    [
        render_nav(),
        render_hero(snapshot),
        render_about(),
        render_skills(),
        render_portfolio(&snapshot.projects),
        render_contact(&snapshot.contact),
        render_footer(&snapshot.contact),
    ]
    .join("\n")
}

/// The profile image reference, with inline uploads shortened for display.
pub fn profile_image_summary(url: &str) -> String {
    match url.split_once(";base64,") {
        Some((prefix, payload)) => format!("{prefix} ({} bytes inline)", payload.len()),
        None => url.to_string(),
    }
}
