//! Keyword-based query shaping for the health assistant. The backend
//! model is generic; steering happens entirely in the prompt.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Medical,
    MentalHealth,
    Lifestyle,
    General,
}

const MEDICAL_KEYWORDS: &[&str] = &[
    "fever", "temperature", "pain", "cough", "cold", "headache", "dizzy", "nausea", "vomit",
    "injury", "infection", "sore", "doctor", "medicine", "tablet", "capsule", "treatment",
    "symptom", "prescription", "diagnosis", "surgery", "fracture", "allergy", "sick", "ill",
    "hurt", "ache", "swollen", "bleeding", "rash", "itching", "breathing", "chest pain",
    "stomach", "diarrhea", "constipation",
];

const MENTAL_HEALTH_KEYWORDS: &[&str] = &[
    "stress", "anxiety", "depression", "worried", "panic", "overwhelmed", "sad", "lonely",
    "angry", "frustrated", "mood", "emotional", "mental health", "therapy", "counseling",
    "fear", "phobia", "trauma", "grief", "burnout", "insomnia", "sleep",
];

const LIFESTYLE_KEYWORDS: &[&str] = &[
    "diet", "nutrition", "exercise", "fitness", "weight", "healthy lifestyle", "meditation",
    "yoga", "mindfulness", "habits", "routine", "energy", "tired", "fatigue", "motivation",
    "self care", "wellness",
];

pub fn categorize(message: &str) -> Category {
    let lower = message.to_lowercase();
    if MEDICAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Category::Medical
    } else if MENTAL_HEALTH_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Category::MentalHealth
    } else if LIFESTYLE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Category::Lifestyle
    } else {
        Category::General
    }
}

pub fn build_prompt(message: &str, category: Category) -> String {
    let guidance = match category {
        Category::Medical => {
            "Focus on physical health: address the symptom mentioned, suggest practical \
             relief measures and home care, and state clearly when to see a healthcare \
             professional."
        }
        Category::MentalHealth => {
            "Focus on mental health and emotional support: address the concern mentioned, \
             offer coping strategies, breathing or relaxation techniques, and self-care \
             guidance. Be empathetic."
        }
        Category::Lifestyle => {
            "Focus on lifestyle and wellness: address the habit, diet or fitness aspect \
             mentioned and suggest sustainable, practical changes."
        }
        Category::General => {
            "Respond to the specific question raised. Be conversational and keep the \
             answer focused on what was asked."
        }
    };

    format!(
        "You are a compassionate health and wellness assistant. Respond warmly and \
         empathetically to the user's message: \"{message}\"\n\n{guidance}\n\n\
         Format the answer in Markdown with clear headings and bullet points where \
         they help."
    )
}

pub const MEDICAL_DISCLAIMER: &str = "\n\n**Disclaimer:** This is general advice only and \
not a substitute for professional medical consultation. Please visit your nearest doctor \
and follow prescribed treatment.";

/// Session title derived from the first message: first five words,
/// ellipsis when truncated.
pub fn session_title(message: &str) -> String {
    let words: Vec<&str> = message.split_whitespace().collect();
    if words.len() <= 5 {
        words.join(" ")
    } else {
        format!("{}...", words[..5].join(" "))
    }
}
