use crate::config::AnalysisConfig;
use crate::contract::ProjectInfo;

pub(super) fn format_prompt(project: &ProjectInfo, config: &AnalysisConfig) -> String {
    let mut prompt = String::from(
        "You are an expert code analysis assistant. Below is a summary of a software project. \
         Your task is to provide a high-level overview of the project.\n\n",
    );

    prompt.push_str(&format!("## Project: {}\n", project.name));
    if let Some(description) = &project.description {
        prompt.push_str(&format!("> {description}\n"));
    }
    let language = project
        .language
        .map(|l| l.to_string())
        .unwrap_or_else(|| "Not detected".to_string());
    prompt.push_str(&format!("* Language: {language}\n"));
    prompt.push_str(&format!(
        "* Size: {} files in {} directories\n",
        project.file_count, project.directory_count
    ));

    prompt.push_str("\n### Key Directories\n```\n");
    for dir in project.directories.iter().take(10) {
        prompt.push_str(&format!("{dir}/\n"));
    }
    prompt.push_str("```\n");

    prompt.push_str("\n### Key Files\n");
    for file in &project.file_analysis {
        prompt.push_str(&format!("\n**{}**\n", file.path));
        prompt.push_str(&format!(
            "*Stats: {} lines, {} functions, {} classes.*\n",
            file.line_count, file.function_count, file.class_count
        ));
        if let (false, Some(sample)) = (config.include_structure_only, &file.sample) {
            let file_type = file.path.rsplit('.').next().unwrap_or_default();
            prompt.push_str(&format!("\n```{file_type}\n{sample}\n```\n"));
        }
    }

    if let Some(deps) = project.dependencies.as_ref().filter(|d| !d.is_empty()) {
        prompt.push_str("\n### Key Dependencies\n```\n");
        for name in deps.keys().take(10) {
            prompt.push_str(&format!("- {name}\n"));
        }
        prompt.push_str("```\n");
    }

    prompt.push_str(
        "\n### Your Analysis\nBased on the data, provide a summary of the project including its \
         purpose, architecture, and main functionalities.",
    );
    prompt
}
