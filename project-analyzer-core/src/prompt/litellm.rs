use crate::config::AnalysisConfig;
use crate::contract::ProjectInfo;
use serde_json::json;

const SYSTEM_PROMPT: &str =
    "You are an expert programmer. Analyze the provided project context and assist the user with their request.";

/// Renders a JSON `{"messages": [...]}` body with a system and a user message.
pub(super) fn format_prompt(project: &ProjectInfo, config: &AnalysisConfig) -> String {
    let user_prompt = user_message(project, config);
    json!({
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": user_prompt },
        ]
    })
    .to_string()
}

fn user_message(project: &ProjectInfo, config: &AnalysisConfig) -> String {
    let mut prompt = format!("**Project:** {}\n\n", project.name);

    if let Some(language) = &project.language {
        prompt.push_str(&format!("**Language:** {language}\n"));
    }
    if let Some(description) = &project.description {
        prompt.push_str(&format!("**Description:** {description}\n\n"));
    } else if let Some(readme) = &project.readme {
        prompt.push_str(&format!("**README:** {readme}\n\n"));
    }

    prompt.push_str("**Project Structure:**\n");
    prompt.push_str(&format!("* Files: {}\n", project.file_count));
    prompt.push_str(&format!("* Directories: {}\n", project.directory_count));
    let key_dirs: Vec<&str> = project.directories.iter().take(5).map(String::as_str).collect();
    prompt.push_str(&format!("* Key Directories: {}\n", key_dirs.join(", ")));
    prompt.push_str(&format!("* Key Files: {}\n\n", project.key_files.join(", ")));

    if let Some(deps) = project.dependencies.as_ref().filter(|d| !d.is_empty()) {
        let names: Vec<&str> = deps.keys().map(String::as_str).collect();
        prompt.push_str("**Dependencies:**\n");
        prompt.push_str(&names[..names.len().min(10)].join(", "));
        if names.len() > 10 {
            prompt.push_str(&format!(", and {} more", names.len() - 10));
        }
        prompt.push_str("\n\n");
    }

    prompt.push_str("**Key File Contents:**\n\n");
    for file in project.file_analysis.iter().take(5) {
        prompt.push_str(&format!("**{}**\n", file.path));
        if config.include_structure_only {
            prompt.push_str(&format!(
                "* {} lines, {} functions, {} classes\n\n",
                file.line_count, file.function_count, file.class_count
            ));
            continue;
        }

        prompt.push_str(&format!(
            "```\n{}\n```\n\n",
            file.sample.as_deref().unwrap_or_default()
        ));
        for (label, items) in [
            ("Key Functions", &file.functions),
            ("Key Classes", &file.classes),
            ("Key Comments", &file.comments),
        ] {
            if !items.is_empty() {
                let first: Vec<&str> = items.iter().take(3).map(String::as_str).collect();
                prompt.push_str(&format!("* {label}: {}\n", first.join(", ")));
            }
        }
        prompt.push('\n');
    }

    prompt
}
