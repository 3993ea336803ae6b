// Content Forge Templates
// Copyright (c) 2026 Xing_The_Creator | Content Forge
//
// Fixed string tables for captions, scripts and hashtags. Only Romanian and
// English have their own pools; every other code reads the English ones.

/// Language used when the caller asks for none.
pub const DEFAULT_LANGUAGE: &str = "ro";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    Romanian,
    English,
}

impl Locale {
    /// Unknown codes resolve to English.
    pub fn from_code(code: &str) -> Self {
        match code {
            "ro" => Locale::Romanian,
            _ => Locale::English,
        }
    }
}

/// The three caption variants for a language.
pub fn caption_pool(topic: &str, platform: &str, locale: Locale) -> [String; 3] {
    match locale {
        Locale::Romanian => [
            format!("🔝 Un ghid complet despre {} pe {}!", topic, platform),
            format!("📈 Cum să optimizezi {} pentru mai mult engagement", topic),
            format!("🚀 Secretul din spatele {} pe social media", topic),
        ],
        Locale::English => [
            format!("🔝 The ultimate guide to {} on {}!", topic, platform),
            format!("📈 How to optimize {} for better engagement", topic),
            format!("🚀 The secret behind successful {} on social media", topic),
        ],
    }
}

/// Hashtags every caption starts with.
pub fn base_hashtags(locale: Locale) -> [&'static str; 4] {
    match locale {
        Locale::Romanian => ["#socialmedia", "#marketing", "#digital", "#romania"],
        Locale::English => ["#socialmedia", "#marketing", "#digital", "#tips"],
    }
}

/// Short-form video script with the topic filled in.
pub fn script(topic: &str, locale: Locale) -> String {
    match locale {
        Locale::Romanian => format!(
            "Salut! Astăzi vorbim despre {topic}.\n\
             \n\
             În acest video vei învăța:\n\
             1. Importanța {topic} în marketingul digital\n\
             2. Cum să implementezi {topic} în strategia ta\n\
             3. Cele mai bune practici pentru rezultate\n\
             \n\
             Nu uita să dai like și subscribe pentru mai mult conținut!\n",
            topic = topic
        ),
        Locale::English => format!(
            "Hello! Today we're talking about {topic}.\n\
             \n\
             In this video you'll learn:\n\
             1. The importance of {topic} in digital marketing\n\
             2. How to implement {topic} in your strategy\n\
             3. Best practices for results\n\
             \n\
             Don't forget to like and subscribe for more content!\n",
            topic = topic
        ),
    }
}

const TRENDING_TOPICS: [&str; 10] = [
    "AI în marketing",
    "Social media trends",
    "Video content tips",
    "Growing followers",
    "Best time to post",
    "Content automation",
    "Digital marketing",
    "Personal branding",
    "Content strategy",
    "Social media algorithms",
];

/// Seed topics offered to users who have nothing in mind.
pub fn trending_topics() -> &'static [&'static str] {
    &TRENDING_TOPICS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_code_is_english() {
        assert_eq!(Locale::from_code("xx"), Locale::English);
        assert_eq!(Locale::from_code("en"), Locale::English);
        assert_eq!(Locale::from_code("ro"), Locale::Romanian);
        assert_eq!(Locale::from_code("RO"), Locale::English);
    }

    #[test]
    fn test_caption_substitution() {
        let pool = caption_pool("reels", "TikTok", Locale::English);
        assert_eq!(pool[0], "🔝 The ultimate guide to reels on TikTok!");
        assert!(pool.iter().all(|c| c.contains("reels")));
    }

    #[test]
    fn test_script_is_multiline() {
        let s = script("branding", Locale::Romanian);
        assert!(s.starts_with("Salut! Astăzi vorbim despre branding."));
        assert!(s.lines().count() >= 7);
        assert!(s.contains("2. Cum să implementezi branding în strategia ta"));
    }

    #[test]
    fn test_trending_topics() {
        assert_eq!(trending_topics().len(), 10);
        assert!(trending_topics().contains(&"Personal branding"));
    }
}
