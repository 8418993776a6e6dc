//! Founder profile and assistant identity data.
//!
//! The founder profile is only disclosed through the gated prompt block
//! (see [`crate::compose`]) or this module's explicit accessor.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct FounderProfile {
    pub name: &'static str,
    pub title: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub location: &'static str,
    pub professional_summary: &'static str,
    pub experience: &'static [&'static str],
    pub languages_spoken: &'static [&'static str],
    pub programming_languages: &'static [&'static str],
    pub tools: &'static [&'static str],
    pub specialties: &'static [&'static str],
    pub education: &'static str,
}

const FOUNDER_PROFILE: FounderProfile = FounderProfile {
    name: "Malik Kashif",
    title: "Founder & CEO – Talko AI and SkillUp",
    email: "kashifmalikdgkhan78@gmail.com",
    phone: "+92 343-6148715",
    location: "Lahore, Pakistan",
    professional_summary: "Founder of Talko AI and SkillUp, a highly driven Software Engineering expert with a strong background in WordPress development and AI workflow automation. Over 1.5 years of hands-on experience building monetized web systems with Google AdSense, researching AI agents, and implementing prompt engineering strategies.",
    experience: &[
        "Created and monetized multiple WordPress websites using Google AdSense",
        "Developed AI blog content and technical research-based insights",
        "Explored tools like Zapier, ChatGPT, and N8N for workflow automation",
    ],
    languages_spoken: &["English (Fluent)", "Urdu (Native)", "Punjabi (Native)"],
    programming_languages: &["Python", "HTML", "CSS", "Java", "C++"],
    tools: &[
        "WordPress",
        "Zapier",
        "N8N",
        "ChatGPT",
        "SEO",
        "Google Search Console",
    ],
    specialties: &["AI Automation", "Prompt Engineering", "Workflow Design"],
    education: "BS in Software Engineering – Superior University, Lahore (7th Semester)",
};

pub fn founder_profile() -> &'static FounderProfile {
    &FOUNDER_PROFILE
}

/// Assistant identity and capability metadata as a JSON document.
pub fn about() -> Value {
    json!({
        "name": "Talko AI",
        "company": "SkillUp",
        "founder": FOUNDER_PROFILE.name,
        "description": "Advanced AI Assistant powered by SkillUp",
        "personality": "Helpful, conversational, intelligent, and naturally adaptive",
        "capabilities": [
            "Natural conversation",
            "Code assistance",
            "Creative writing",
            "Problem solving",
            "Educational support",
            "Business consulting",
        ],
        "version": "2.0",
        "features": [
            "Structured response format with emojis",
            "Natural conversation style",
            "Multi-domain expertise",
            "Cultural awareness and multilingual support",
            "Adaptive communication style",
        ],
    })
}

/// Renders the profile block appended to the prompt when a founder query is
/// detected.
pub(crate) fn founder_block() -> String {
    let p = &FOUNDER_PROFILE;
    format!(
        "\n\nFOUNDER INFORMATION (User has asked about founder details):\n\
         Name: {name}\n\
         Title: {title}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Location: {location}\n\
         Professional Summary: {summary}\n\
         Experience: {experience}\n\
         Technical Stack: Languages - {langs}, Tools - {tools}, Specialties - {specialties}\n\
         Education: {education}\n\
         Languages Spoken: {spoken}",
        name = p.name,
        title = p.title,
        email = p.email,
        phone = p.phone,
        location = p.location,
        summary = p.professional_summary,
        experience = p.experience.join(", "),
        langs = p.programming_languages.join(", "),
        tools = p.tools.join(", "),
        specialties = p.specialties.join(", "),
        education = p.education,
        spoken = p.languages_spoken.join(", "),
    )
}
