use super::plural;
use crate::config::AnalysisConfig;
use crate::contract::ProjectInfo;

pub(super) fn format_prompt(project: &ProjectInfo, config: &AnalysisConfig) -> String {
    let structure = if config.include_structure {
        project.directories.join("\n")
    } else {
        String::new()
    };

    let mut prompt = format!(
        "You are generating a code analysis for the project \"{}\". \
         Here's the structure and contents of the project:\n\n\
         Project structure:\n{structure}\n\
         Number of {} files across {} directories\n\n\
         Code overview:\n",
        project.name, project.file_count, project.directory_count
    );

    for analysis in &project.file_analysis {
        prompt.push_str(&format!(
            "{} ({} lines):\n  - {}\n  - {}\n",
            analysis.path,
            analysis.line_count,
            plural(analysis.functions.len(), "function", "functions"),
            plural(analysis.classes.len(), "class", "classes"),
        ));
    }

    if config.include_dependencies {
        if let Some(deps) = &project.dependencies {
            prompt.push_str("\nDependencies required:\n");
            for (name, version) in deps {
                prompt.push_str(&format!("- {name}@{version}\n"));
            }
        }
    }

    prompt.push_str(
        "\nInstructions: \n\
         - Analyze the project structure and code files\n\
         - Highlight key patterns, components, and dependencies\n\
         - Provide a concise overview of how the code is organized and works\n",
    );

    prompt.trim().to_string()
}
