/// Logo asset for sources the site ships an icon for.
pub fn logo_for(source: &str) -> Option<&'static str> {
    let file = match source {
        "Google Research" | "Google AI" | "Google Blog AI" => "google-color.svg",
        "Google DeepMind" => "deepmind-color.svg",
        "NVIDIA Blog" | "NVIDIA News" => "nvidia-color.svg",
        "Microsoft Research" | "Microsoft AI News" => "microsoft-color.svg",
        "Anthropic" => "claude-color.svg",
        "Meta AI" => "meta-color.svg",
        "LG AI Research" => "lg-color.svg",
        "OpenAI" => "openai.svg",
        "xAI" => "xai.svg",
        "DeepSeek" | "DeepSeek Blog" => "deepseek-color.svg",
        "Qwen" => "qwen-color.svg",
        "Amazon Science" => "amazon-color.svg",
        "IBM Research" => "ibm-color.svg",
        "Baidu Research" => "baidu-color.svg",
        _ => return None,
    };
    Some(file)
}

/// CSS class for a source: `source-` plus the lowercased name with
/// whitespace runs collapsed to `-`.
pub fn source_class(source: &str) -> String {
    let slug = source
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    format!("source-{}", slug)
}
