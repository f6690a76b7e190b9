use crate::config::AnalysisConfig;
use crate::contract::ProjectInfo;

pub(super) fn format_prompt(project: &ProjectInfo, config: &AnalysisConfig) -> String {
    let mut prompt = String::from(
        "Analyze the following software project and provide a summary. Focus on the project's \
         primary goal, the technologies used, and how the different files and directories \
         contribute to the overall architecture.\n\n",
    );

    prompt.push_str(&format!("**Project Name:** {}\n", project.name));
    if let Some(description) = &project.description {
        prompt.push_str(&format!("**Description:** {description}\n"));
    }
    if let Some(language) = &project.language {
        prompt.push_str(&format!("**Detected Language:** {language}\n"));
    }
    prompt.push_str(&format!(
        "**Project Size:** {} files, {} directories\n",
        project.file_count, project.directory_count
    ));

    prompt.push_str("\n**Directory Structure (Key Directories):**\n");
    for dir in project.directories.iter().take(10) {
        prompt.push_str(&format!("* `{dir}/`\n"));
    }

    prompt.push_str("\n**Key File Analysis:**\n");
    for file in &project.file_analysis {
        prompt.push_str(&format!("\n*   **File:** `{}`\n", file.path));
        prompt.push_str(&format!(
            "    *   **Details:** {} lines, {} functions, {} classes.\n",
            file.line_count, file.function_count, file.class_count
        ));
        if let (false, Some(sample)) = (config.include_structure_only, &file.sample) {
            prompt.push_str(&format!(
                "    *   **Code Snippet:**\n        ```\n{sample}\n```\n"
            ));
        }
    }

    if let Some(deps) = project.dependencies.as_ref().filter(|d| !d.is_empty()) {
        prompt.push_str("\n**Key Dependencies:**\n");
        for name in deps.keys().take(10) {
            prompt.push_str(&format!("* {name}\n"));
        }
    }

    prompt.push_str(
        "\n**Your Task:**\nBased on the information provided, please generate a concise technical \
         summary of the project. The summary should be easy for a developer to quickly understand \
         the project's purpose and structure.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ProjectInfo;
    use crate::prompt::test_support::sample_project;

    #[test]
    fn includes_headline_sections() {
        let prompt = format_prompt(&sample_project(), &AnalysisConfig::default());
        assert!(prompt.contains("**Project Name:** ExampleApp"));
        assert!(prompt.contains("**Detected Language:** JavaScript/TypeScript"));
        assert!(prompt.contains("**Project Size:** 10 files, 3 directories"));
        assert!(prompt.contains("* `src/`"));
        assert!(prompt.contains("**Details:** 20 lines, 3 functions, 1 classes."));
        assert!(prompt.contains("const app = 1;"));
        assert!(prompt.contains("**Key Dependencies:**\n* express\n"));
        assert!(prompt.contains("**Your Task:**"));
    }

    #[test]
    fn structure_only_omits_snippets() {
        let config = AnalysisConfig {
            include_structure_only: true,
            ..AnalysisConfig::default()
        };
        let prompt = format_prompt(&sample_project(), &config);
        assert!(!prompt.contains("Code Snippet"));
        assert!(!prompt.contains("const app = 1;"));
    }

    #[test]
    fn sparse_project_renders_without_optional_sections() {
        let project = ProjectInfo {
            name: "SDKv2".to_string(),
            file_count: 4,
            directory_count: 1,
            ..ProjectInfo::default()
        };
        let prompt = format_prompt(&project, &AnalysisConfig::default());
        assert!(prompt.contains("SDKv2"));
        assert!(!prompt.contains("**Description:**"));
        assert!(!prompt.contains("**Key Dependencies:**"));
    }
}
