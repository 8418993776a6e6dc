//! Keyword classification of user messages.
//!
//! Detection is substring-based over fixed word lists. Short tokens ("me",
//! "or") can and do match inside English words; that looseness is part of
//! the contract, so changes to these lists are behavior changes.

/// Trigger terms for founder / company questions. Matching any of these
/// unlocks the founder profile block in the composed prompt.
pub const FOUNDER_QUERY_TERMS: &[&str] = &[
    "founder",
    "banaya",
    "malik kashif",
    "ceo",
    "owner",
    "creator",
    "skillup founder",
    "talko founder",
    "who created",
    "who made",
    "company details",
    "about founder",
    "who built",
    "developer",
    "team behind",
];

/// Transliterated Islamic greetings and expressions.
pub const ISLAMIC_GREETING_TERMS: &[&str] = &[
    "salam",
    "salaam",
    "assalam",
    "assalamu",
    "walaikum",
    "waalaikum",
    "bismillah",
    "alhamdulillah",
    "inshallah",
    "mashallah",
    "subhanallah",
    "astaghfirullah",
    "jazakallah",
    "barakallahu",
    "ameen",
    "aameen",
];

/// Roman-Urdu vocabulary, from common function words through conversational
/// and cultural terms.
pub const URDU_TERMS: &[&str] = &[
    // Common Urdu words
    "kya", "hai", "hain", "aap", "main", "mein", "ka", "ki", "ke", "ko", "se", "me", "ap", "hum",
    "tum", "wo", "ye", "yeh", "kaise", "kahan", "kab", "kyun", "kyu", "tha", "thi", "the", "ga",
    "gi", "ge", "na", "nahi", "han", "haan", "ji", "bhi", "or", "aur", "lekin", "magar", "phir",
    "ab", "abhi", "pehle", "baad", "sath", "saath", "wahan", "yahan", "idhar", "udhar", "kuch",
    "koi", "sab", "sabko",
    // Common conversational words
    "bhai", "behen", "dost", "yaar", "sahib", "sahab", "janab", "bhaijaan", "achha", "acha",
    "theek", "thik", "bilkul", "zaroor", "shayad", "lagta", "samajh", "pata", "maloom", "dekho",
    "dekh", "suno", "sun", "bolo", "bol",
    // Regional and cultural terms
    "urdu", "hindi", "pakistan", "bharat", "hindustan", "desi", "ghar", "gher", "paisa", "rupay",
    "rupee", "chai", "roti", "khana", "pani", "paani",
    // Founder and company related terms
    "malik", "kashif", "talko", "skillup", "founder", "banane", "wala",
];

/// What the classifier saw in a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub founder_query: bool,
    pub islamic_greeting: bool,
    pub roman_urdu: bool,
}

fn matches_any(lowered: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| lowered.contains(term))
}

/// Classifies a raw user message against the fixed term lists.
pub fn classify(text: &str) -> Classification {
    let lowered = text.to_lowercase();
    Classification {
        founder_query: matches_any(&lowered, FOUNDER_QUERY_TERMS),
        islamic_greeting: matches_any(&lowered, ISLAMIC_GREETING_TERMS),
        roman_urdu: matches_any(&lowered, URDU_TERMS),
    }
}

/// Roman-Urdu check on its own (used to tag stored messages).
pub fn contains_urdu(text: &str) -> bool {
    matches_any(&text.to_lowercase(), URDU_TERMS)
}
