//! Keyword-matched canned replies used when the proxy call fails.
//!
//! Categories are checked in a fixed order (greeting first, then skills,
//! projects, contact), matching how the assistant has always prioritized
//! them; each category carries several variants picked at random.

use rand::Rng;

/// Fallback reply category, matched from the user's text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Greeting,
    Skills,
    Projects,
    Contact,
    Default,
}

const GREETING_OPENERS: [&str; 8] =
    ["hi", "hello", "hey", "greetings", "yo", "sup", "what's up", "whats up"];

const SKILL_KEYWORDS: [&str; 6] = ["skill", "tech", "know", "programming", "code", "develop"];

const PROJECT_KEYWORDS: [&str; 6] = ["project", "portfolio", "work", "built", "made", "create"];

const CONTACT_KEYWORDS: [&str; 9] =
    ["contact", "email", "phone", "call", "reach", "hire", "meet", "schedule", "whatsapp"];

const GREETINGS: [&str; 3] = [
    "Hey! What's up? I'm Hamza's AI assistant - nice to meet you! How can I help?",
    "Oh hey there! I'm helping Hamza out here. So what brings you to his portfolio?",
    "Hi! Good to hear from you. I'm his AI assistant - what's on your mind?",
];

const SKILLS: [&str; 2] = [
    "Oh yeah, so Hamza mostly works with Python and JavaScript - those are his main ones. \
     He also does a lot with Node.js, Next.js, and he's been really into AI stuff lately \
     like building RAG systems. What specifically are you curious about?",
    "Tech-wise? He's big on Python for AI stuff, JavaScript for web dev. He also works \
     with Docker, Kubernetes, databases like PostgreSQL and MongoDB. Basically full-stack \
     plus AI - that's his thing!",
];

const PROJECTS: [&str; 2] = [
    "So he's built a few cool things! His favorite is probably this RAG chatbot that gets \
     like 99% accuracy. He also made this bilingual e-commerce site and a La Liga football \
     stats thing. Want me to share the links?",
    "Yeah! He's got a few projects up and running. There's his AI chatbot, an \
     Arabic/English e-commerce platform, and a football stats hub for La Liga. Which one \
     sounds interesting to you?",
];

const CONTACTS: [&str; 2] = [
    "Yeah for sure! Best way to reach Hamza is WhatsApp at +90 536 429 2064 - he usually \
     replies pretty quick. Or you can email him at hamza1tot@gmail.com. What works better \
     for you?",
    "Definitely! Hit him up on WhatsApp - +90 536 429 2064. Or LinkedIn \
     (linkedin.com/in/hamzahdal). He's always looking to connect!",
];

const DEFAULTS: [&str; 3] = [
    "Hmm, I'm not sure I caught that. Could you say that again? Or if you wanna know \
     about Hamza's projects or skills, I'm happy to chat about that!",
    "Oh interesting! Tell me more about what you're looking for. I can tell you about \
     his coding, AI work, projects... whatever you need!",
    "Hey, I might have missed something there. What would you like to know? I can tell \
     you about his work, how to reach him, basically anything!",
];

/// Classify user text into a fallback category.
#[must_use]
pub fn classify(input: &str) -> Category {
    let lower = input.trim().to_lowercase();

    if GREETING_OPENERS.iter().any(|opener| lower.starts_with(opener)) {
        return Category::Greeting;
    }
    if SKILL_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        return Category::Skills;
    }
    if PROJECT_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        return Category::Projects;
    }
    if CONTACT_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        return Category::Contact;
    }
    Category::Default
}

/// Generate a canned reply for the user's text.
#[must_use]
pub fn generate(input: &str) -> String {
    let variants = variants(classify(input));
    let index = rand::rng().random_range(0..variants.len());
    variants[index].to_owned()
}

pub(crate) fn variants(category: Category) -> &'static [&'static str] {
    match category {
        Category::Greeting => &GREETINGS,
        Category::Skills => &SKILLS,
        Category::Projects => &PROJECTS,
        Category::Contact => &CONTACTS,
        Category::Default => &DEFAULTS,
    }
}

#[cfg(test)]
#[path = "fallback_test.rs"]
mod tests;
