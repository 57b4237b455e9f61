//! Compiled-in content the portfolio starts from and returns to on reset.

use crate::models::{ContactInfo, DEFAULT_PROFILE_IMAGE, Project, ProjectCategory, ProjectContent};

pub fn default_profile_image() -> String {
    DEFAULT_PROFILE_IMAGE.to_string()
}

pub fn default_contact() -> ContactInfo {
    ContactInfo {
        name: "Rafael Costa".to_string(),
        role: "Full Stack Developer & Systems Specialist".to_string(),
        whatsapp_number: "5521999999999".to_string(),
        email: "contact@example.com".to_string(),
        location: "São Paulo, SP".to_string(),
    }
}

fn project(
    id: &str,
    title: &str,
    short_description: &str,
    full_description: &str,
    technologies: &[&str],
    image_url: &str,
    category: ProjectCategory,
) -> Project {
    Project::new(
        id,
        ProjectContent {
            title: title.to_string(),
            short_description: short_description.to_string(),
            full_description: full_description.to_string(),
            technologies: technologies.iter().map(|t| t.to_string()).collect(),
            image_url: image_url.to_string(),
            category,
        },
    )
}

pub fn default_projects() -> Vec<Project> {
    vec![
        project(
            "municipal-contracts",
            "Contract Management - City Hall",
            "Government system for public contract tracking, financial dashboard and term management.",
            "Built for a municipal government to bring transparency and control to public contracts. \
             It ships a strategic management dashboard with live KPIs (financial totals, contract \
             status), interactive charts per department and a complete interface for registering \
             and following processes, amendments and deadlines. Includes access control, \
             expiration alerts and detailed reports.",
            &["React", "TypeScript", "Tailwind CSS", "Recharts", "Node.js"],
            "https://images.unsplash.com/photo-1551288049-bebda4e38f71?auto=format&fit=crop&q=80&w=1000",
            ProjectCategory::WebSystem,
        ),
        project(
            "1",
            "ERP Management System",
            "Complete business management platform with inventory and financial control.",
            "A robust ERP for small and medium companies. Modules cover real-time inventory, cash \
             flow, invoicing and management reports. The interface is tuned for productivity and \
             supports many users with different access levels.",
            &["React", "Node.js", "PostgreSQL", "Docker"],
            "https://picsum.photos/seed/project1/800/600",
            ProjectCategory::WebSystem,
        ),
        project(
            "2",
            "Public Data Dashboard",
            "Public data visualization panel for tracking resource allocation.",
            "Interactive dashboard for public transparency data. Dynamic charts present municipal \
             resource allocation with filters by period, sector and category, with a strong focus \
             on accessibility and performance over large data volumes.",
            &["Next.js", "TypeScript", "Recharts", "Python API"],
            "https://picsum.photos/seed/project2/800/600",
            ProjectCategory::Dashboard,
        ),
        project(
            "3",
            "Corporate Institutional Portal",
            "Responsive institutional website for a large logistics company.",
            "Full redesign of a logistics company's web presence: customer area with order \
             tracking, integrated blog and careers section. Optimized for SEO and Core Web Vitals.",
            &["React", "Tailwind CSS", "Headless CMS", "Framer Motion"],
            "https://picsum.photos/seed/project3/800/600",
            ProjectCategory::Institutional,
        ),
        project(
            "4",
            "AI Document Automation",
            "Automatic document triage system using NLP.",
            "Internal tool that uses natural language processing models to read, classify and \
             extract data from scanned PDF documents, cutting the administrative team's manual \
             work by 80%.",
            &["Python", "FastAPI", "React", "OpenAI API"],
            "https://picsum.photos/seed/project4/800/600",
            ProjectCategory::WebSystem,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn default_project_ids_are_unique() {
        let projects = default_projects();
        let ids: HashSet<_> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), projects.len());
    }
}
