//! Hashtag list parsing and the static fallback used when the model call
//! fails or returns nothing usable.

pub const MAX_HASHTAGS: usize = 15;

const BASE_TAGS: [&str; 10] = [
    "Technology",
    "Innovation",
    "Learning",
    "SoftwareEngineering",
    "BackendDevelopment",
    "Python",
    "Productivity",
    "TechTips",
    "CareerGrowth",
    "SoftwareDevelopment",
];

fn category_tags(category: &str) -> &'static [&'static str] {
    match category {
        "Architecture & Design" => &["SoftwareArchitecture", "SystemDesign", "APIDesign"],
        "AI & Development" => &["ArtificialIntelligence", "MachineLearning", "AIEngineering"],
        "Database Strategy" => &["Database", "PostgreSQL", "MongoDB", "DataEngineering"],
        "System Design" => &["SystemDesign", "DistributedSystems", "Scalability"],
        "DevOps & Infrastructure" => &["DevOps", "Kubernetes", "CloudComputing", "Docker"],
        "API Design" => &["API", "RESTful", "GraphQL", "Microservices"],
        "Testing Strategy" => &["Testing", "QualityAssurance", "DevOps"],
        "AI Engineering" => &["LLM", "GPT", "RAG", "AIEngineering"],
        "Backend Patterns" => &["Microservices", "Architecture", "DesignPatterns"],
        "Performance" => &["Performance", "Optimization", "Database"],
        "Security" => &["CyberSecurity", "AppSec", "OAuth", "Security"],
        "Career Development" => &["CareerGrowth", "TechCareer", "Leadership"],
        "Observability" => &["Observability", "Monitoring", "SRE", "DevOps"],
        "AI/ML Operations" => &["MLOps", "LLM", "MachineLearning"],
        "CI/CD" => &["CICD", "DevOps", "Automation", "GitLab"],
        _ => &[],
    }
}

/// Category-aware fallback set, base tags first.
pub fn fallback_for_category(category: &str) -> Vec<String> {
    BASE_TAGS
        .iter()
        .chain(category_tags(category))
        .map(|t| t.to_string())
        .collect()
}

/// Parse a model-produced comma-separated tag list: drop `#` prefixes and
/// empties, dedup case-insensitively, cap at [`MAX_HASHTAGS`].
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    let mut seen = Vec::new();
    let mut tags = Vec::new();

    for tag in raw.replace('#', "").split(',') {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        let key = tag.to_ascii_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        tags.push(tag.to_string());
        if tags.len() == MAX_HASHTAGS {
            break;
        }
    }

    tags
}
