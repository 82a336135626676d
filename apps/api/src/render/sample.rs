//! Canned example resume for the opt-in "preview with sample data" mode.
//!
//! The merge is an explicit pre-render step, per section: an empty section
//! of the real document is replaced by the sample's section, a non-empty
//! one is left alone. Personal details merge field by field. Nothing here
//! ever runs unless the caller asked for it.

use crate::models::resume::{
    Education, Experience, Language, PersonalDetails, Proficiency, Project, Reference,
    ResumeDocument, SectionId,
};
use crate::richtext::RichTextFragment;

/// Replaces each empty section of `document` with the sample's.
pub fn merge_sample(document: &ResumeDocument) -> ResumeDocument {
    let sample = sample_document();
    let mut merged = document.clone();

    let personal = &mut merged.personal;
    let fallback = |field: &mut String, sample: String| {
        if field.trim().is_empty() {
            *field = sample;
        }
    };
    fallback(&mut personal.first_name, sample.personal.first_name);
    fallback(&mut personal.last_name, sample.personal.last_name);
    fallback(&mut personal.title, sample.personal.title);
    fallback(&mut personal.email, sample.personal.email);
    fallback(&mut personal.phone, sample.personal.phone);
    fallback(&mut personal.website, sample.personal.website);

    for id in SectionId::ALL {
        if !document.section_is_empty(id) {
            continue;
        }
        match id {
            SectionId::Summary => merged.summary = sample.summary.clone(),
            SectionId::Experience => merged.experience = sample.experience.clone(),
            SectionId::Education => merged.education = sample.education.clone(),
            SectionId::Skills => merged.skills = sample.skills.clone(),
            SectionId::Projects => merged.projects = sample.projects.clone(),
            SectionId::Achievements => merged.achievements = sample.achievements.clone(),
            SectionId::Languages => merged.languages = sample.languages.clone(),
            SectionId::References => merged.references = sample.references.clone(),
        }
    }
    merged
}

/// Experience shell carrying a bullet list in both representations.
fn rich_bullets(items: &[&str]) -> Experience {
    let html: String = std::iter::once("<ul>".to_string())
        .chain(items.iter().map(|item| format!("<li>{item}</li>")))
        .chain(std::iter::once("</ul>".to_string()))
        .collect();
    let rich = RichTextFragment::sanitize(&html);
    Experience {
        responsibilities: rich.derive_plain(),
        responsibilities_rich: Some(rich),
        ..Default::default()
    }
}

/// The full example dataset shown by "preview with sample data".
pub fn sample_document() -> ResumeDocument {
    ResumeDocument {
        personal: PersonalDetails {
            first_name: "Alex".to_string(),
            last_name: "Johnson".to_string(),
            title: "Full Stack Software Developer".to_string(),
            email: "alex.johnson@email.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            website: "https://alexjohnson.dev".to_string(),
        },
        summary: "Experienced Full Stack Software Developer with 5+ years of expertise in \
                  building scalable web applications using React, Node.js, and cloud \
                  technologies. Passionate about clean code, test-driven development, and \
                  creating exceptional user experiences."
            .to_string(),
        experience: vec![
            Experience {
                title: "Senior Software Developer".to_string(),
                company: "TechCorp Solutions".to_string(),
                start_date: "Jan 2022".to_string(),
                end_date: "Present".to_string(),
                ..rich_bullets(&[
                    "Lead development of microservices architecture serving 100K+ daily active users",
                    "Implemented CI/CD pipelines reducing deployment time by 60%",
                    "Mentored 3 junior developers and conducted code reviews",
                    "Collaborated with product team to define technical requirements",
                ])
            },
            Experience {
                title: "Software Developer".to_string(),
                company: "StartupXYZ".to_string(),
                start_date: "Jun 2020".to_string(),
                end_date: "Dec 2021".to_string(),
                ..rich_bullets(&[
                    "Built responsive web applications using React and TypeScript",
                    "Developed RESTful APIs with Node.js and Express",
                    "Integrated third-party payment systems (Stripe, PayPal)",
                    "Optimized database queries improving performance by 40%",
                ])
            },
            Experience {
                title: "Junior Software Developer".to_string(),
                company: "DevStudio Inc".to_string(),
                start_date: "Aug 2019".to_string(),
                end_date: "May 2020".to_string(),
                ..rich_bullets(&[
                    "Developed frontend components using React and CSS",
                    "Participated in agile development processes",
                    "Fixed bugs and implemented feature requests",
                    "Wrote unit tests achieving 85% code coverage",
                ])
            },
        ],
        education: vec![
            Education {
                school: "University of Technology".to_string(),
                degree: "Bachelor of Science".to_string(),
                field: "Computer Science".to_string(),
                year: "2019".to_string(),
            },
            Education {
                school: "Tech Academy".to_string(),
                degree: "Certificate".to_string(),
                field: "Full Stack Web Development".to_string(),
                year: "2018".to_string(),
            },
        ],
        skills: [
            "JavaScript/TypeScript",
            "React/Next.js",
            "Node.js/Express",
            "Python/Django",
            "PostgreSQL/MongoDB",
            "AWS/Docker",
            "Git/GitHub",
            "REST APIs/GraphQL",
            "Jest/Testing",
            "Agile/Scrum",
        ]
        .map(str::to_string)
        .to_vec(),
        projects: vec![
            Project {
                name: "E-Commerce Platform".to_string(),
                description: "Full-stack e-commerce solution with React frontend, Node.js \
                              backend, and Stripe integration. Features include user \
                              authentication, product catalog, shopping cart, and order \
                              management."
                    .to_string(),
                url: Some("https://github.com/alexjohnson/ecommerce-platform".to_string()),
            },
            Project {
                name: "Task Management App".to_string(),
                description: "Real-time collaborative task management application built with \
                              React, Socket.io, and MongoDB. Includes drag-and-drop \
                              functionality, team collaboration, and progress tracking."
                    .to_string(),
                url: Some("https://github.com/alexjohnson/task-manager".to_string()),
            },
            Project {
                name: "Weather Dashboard".to_string(),
                description: "Responsive weather application using React and OpenWeather API. \
                              Features location-based forecasts, interactive maps, and weather \
                              alerts with PWA capabilities."
                    .to_string(),
                url: Some("https://github.com/alexjohnson/weather-dashboard".to_string()),
            },
        ],
        achievements: [
            "AWS Certified Solutions Architect Associate (2023)",
            "Winner of TechCorp Hackathon 2022 - Best Innovation Award",
            "Contributed to 5+ open source projects with 500+ GitHub stars",
            "Reduced application load time by 50% through optimization",
        ]
        .map(str::to_string)
        .to_vec(),
        languages: vec![
            Language {
                name: "English".to_string(),
                proficiency: Proficiency::Native,
            },
            Language {
                name: "Spanish".to_string(),
                proficiency: Proficiency::Intermediate,
            },
            Language {
                name: "French".to_string(),
                proficiency: Proficiency::Beginner,
            },
        ],
        references: vec![
            Reference {
                name: "Sarah Chen".to_string(),
                company: "TechCorp Solutions".to_string(),
                title: "Engineering Manager".to_string(),
                phone: "+1 (555) 987-6543".to_string(),
                email: "sarah.chen@techcorp.com".to_string(),
            },
            Reference {
                name: "Michael Rodriguez".to_string(),
                company: "StartupXYZ".to_string(),
                title: "CTO".to_string(),
                phone: "+1 (555) 456-7890".to_string(),
                email: "michael@startupxyz.com".to_string(),
            },
        ],
    }
}
