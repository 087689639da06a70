use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::types::{Article, HeadlinesResponse, ResponseStatus, Source};

pub const FALLBACK_MESSAGE: &str = "Using sample data - API connection unavailable";
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400x200?text=News+Image";
/// Topic key used when top headlines (no category) fall back.
pub const ALL_NEWS: &str = "all news";

struct SampleArticle {
    title: &'static str,
    description: &'static str,
    url: &'static str,
    source: &'static str,
}

const fn sample(
    title: &'static str,
    description: &'static str,
    url: &'static str,
    source: &'static str,
) -> SampleArticle {
    SampleArticle {
        title,
        description,
        url,
        source,
    }
}

static BUSINESS: [SampleArticle; 5] = [
    sample(
        "Tech Stocks Rally as Market Shows Strong Recovery",
        "Major technology companies see significant gains in today's trading session...",
        "https://example.com/business1",
        "Financial Times",
    ),
    sample(
        "Federal Reserve Announces Interest Rate Decision",
        "The central bank maintains current rates while monitoring inflation trends...",
        "https://example.com/business2",
        "Wall Street Journal",
    ),
    sample(
        "Global Supply Chain Shows Signs of Improvement",
        "Manufacturing and logistics sectors report better efficiency metrics...",
        "https://example.com/business3",
        "Reuters",
    ),
    sample(
        "Cryptocurrency Market Experiences Volatility",
        "Digital assets show mixed performance amid regulatory developments...",
        "https://example.com/business4",
        "CoinDesk",
    ),
    sample(
        "Energy Sector Leads Market Gains",
        "Oil and gas companies benefit from improved demand forecasts...",
        "https://example.com/business5",
        "Energy Weekly",
    ),
];

static TECHNOLOGY: [SampleArticle; 5] = [
    sample(
        "AI Breakthrough in Medical Diagnosis",
        "New artificial intelligence system achieves 95% accuracy in detecting diseases...",
        "https://example.com/tech1",
        "TechCrunch",
    ),
    sample(
        "Quantum Computing Milestone Reached",
        "Researchers successfully maintain quantum state for record duration...",
        "https://example.com/tech2",
        "Nature",
    ),
    sample(
        "5G Network Expansion Accelerates",
        "Telecommunications companies roll out next-generation wireless infrastructure...",
        "https://example.com/tech3",
        "Wired",
    ),
    sample(
        "Cybersecurity Threats on the Rise",
        "Organizations face increasing challenges from sophisticated cyber attacks...",
        "https://example.com/tech4",
        "Security Weekly",
    ),
    sample(
        "Space Technology Advances",
        "Private companies make significant progress in space exploration...",
        "https://example.com/tech5",
        "Space News",
    ),
];

static SPORTS: [SampleArticle; 5] = [
    sample(
        "Championship Game Ends in Dramatic Victory",
        "Underdog team secures unexpected win in final moments of the game...",
        "https://example.com/sports1",
        "ESPN",
    ),
    sample(
        "Olympic Preparations Enter Final Phase",
        "Athletes and organizers make last-minute adjustments for upcoming games...",
        "https://example.com/sports2",
        "Olympic News",
    ),
    sample(
        "Record-Breaking Performance in Track and Field",
        "Athlete sets new world record in spectacular fashion...",
        "https://example.com/sports3",
        "Track & Field Weekly",
    ),
    sample(
        "Professional League Announces Rule Changes",
        "Governing body introduces modifications to improve game safety...",
        "https://example.com/sports4",
        "Sports Authority",
    ),
    sample(
        "Youth Sports Programs Expand Nationwide",
        "Community initiatives promote physical activity among children...",
        "https://example.com/sports5",
        "Youth Sports Today",
    ),
];

static HEALTH: [SampleArticle; 5] = [
    sample(
        "Breakthrough in Cancer Treatment Research",
        "New therapy shows promising results in clinical trials...",
        "https://example.com/health1",
        "Medical Journal",
    ),
    sample(
        "Mental Health Awareness Campaign Launched",
        "Organizations promote resources for mental wellness support...",
        "https://example.com/health2",
        "Health Today",
    ),
    sample(
        "Nutrition Guidelines Updated",
        "Health authorities revise dietary recommendations based on new research...",
        "https://example.com/health3",
        "Nutrition Weekly",
    ),
    sample(
        "Telemedicine Services Expand",
        "Remote healthcare options become more accessible to patients...",
        "https://example.com/health4",
        "Digital Health",
    ),
    sample(
        "Exercise Science Research Findings",
        "Studies reveal optimal workout strategies for different age groups...",
        "https://example.com/health5",
        "Fitness Research",
    ),
];

static ALL: [SampleArticle; 5] = [
    sample(
        "Global Climate Summit Reaches Historic Agreement",
        "World leaders commit to ambitious environmental protection measures...",
        "https://example.com/news1",
        "Global News",
    ),
    sample(
        "Scientific Discovery Opens New Research Frontiers",
        "Breakthrough findings could revolutionize multiple industries...",
        "https://example.com/news2",
        "Science Daily",
    ),
    sample(
        "Economic Indicators Show Positive Trends",
        "Key metrics suggest continued growth in major economies...",
        "https://example.com/news3",
        "Economic Times",
    ),
    sample(
        "Cultural Festival Celebrates Diversity",
        "Community event highlights traditions from around the world...",
        "https://example.com/news4",
        "Culture Weekly",
    ),
    sample(
        "Education Technology Transforms Learning",
        "Digital tools enhance student engagement and outcomes...",
        "https://example.com/news5",
        "Education Today",
    ),
];

static SAMPLE_SETS: Lazy<HashMap<&'static str, &'static [SampleArticle]>> = Lazy::new(|| {
    HashMap::from([
        ("business", &BUSINESS[..]),
        ("technology", &TECHNOLOGY[..]),
        ("sports", &SPORTS[..]),
        ("health", &HEALTH[..]),
        (ALL_NEWS, &ALL[..]),
    ])
});

/// Topics with a dedicated sample set. Anything else gets the "all news" set.
pub fn known_topics() -> impl Iterator<Item = &'static str> {
    SAMPLE_SETS.keys().copied().filter(|k| *k != ALL_NEWS)
}

fn sample_set(topic: &str) -> &'static [SampleArticle] {
    SAMPLE_SETS
        .get(topic.to_lowercase().as_str())
        .copied()
        .unwrap_or(&ALL[..])
}

pub fn sample_articles(topic: &str) -> Vec<Article> {
    let published_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    sample_set(topic)
        .iter()
        .map(|s| Article {
            title: Some(s.title.to_string()),
            description: Some(s.description.to_string()),
            url: Some(s.url.to_string()),
            url_to_image: Some(PLACEHOLDER_IMAGE_URL.to_string()),
            published_at: Some(published_at.clone()),
            source: Source {
                id: None,
                name: Some(s.source.to_string()),
            },
            author: None,
            content: None,
        })
        .collect()
}

pub fn fallback_response(topic: &str) -> HeadlinesResponse {
    let articles = sample_articles(topic);

    HeadlinesResponse {
        status: ResponseStatus::Ok,
        total_results: articles.len() as u32,
        message: Some(FALLBACK_MESSAGE.to_string()),
        articles,
    }
}
