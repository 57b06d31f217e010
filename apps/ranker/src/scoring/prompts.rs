// Category prompt templates for the scoring pipeline.
// Placeholders: {job_description}, {resume_text}. Fill with `render_prompt`.

use crate::llm_client::prompts::STRUCTURED_OUTPUT_INSTRUCTION;
use crate::scoring::category::ScoreCategory;
use crate::scoring::ResponseFormat;

pub const SEMANTIC_PROMPT_TEMPLATE: &str = r#"You are an AI expert in evaluating resumes based on job descriptions.

Job Description:
"{job_description}"

Candidate's Resume:
"{resume_text}"

Task:
1. Compare keywords, skills, and responsibilities in the resume versus the job description.
2. Identify the overlap between job requirements and the resume.
3. Assign a Semantic Score (0-100) based on how well the resume aligns with the job.
4. If the score is low, explain which key skills or responsibilities are missing.

Format (return output in this structure only):
- **Score:** [numeric value]
- **Matched Keywords:** [List of relevant skills and responsibilities found]
- **Missing Keywords:** [List of important skills that were missing]
- **Explanation:** [Why this score was assigned based on keyword overlap]"#;

pub const EDUCATION_PROMPT_TEMPLATE: &str = r#"You are an AI expert in resume evaluation.

Job Description:
"{job_description}"

Candidate's Resume:
"{resume_text}"

Task:
1. Identify the candidate's highest relevant degree by focusing on the degree type and field (e.g., PhD, Master, BS, BSc).
2. Ignore additional adjectives such as "Honours", "with distinction", etc.
3. Evaluate whether the degree meets or exceeds the job's educational requirements.
4. Assign an Education Score (0-100) based solely on the degree type and field match.
5. If multiple degrees are present, pick the most relevant one.

Format (return output in this structure only):
- **Score:** [numeric value]
- **Matched Degree:** [Degree type and field found in the resume]
- **Explanation:** [Brief reason based solely on the degree type and field matching the job requirements]"#;

pub const EXPERIENCE_PROMPT_TEMPLATE: &str = r#"You are an AI trained to assess resumes for job positions.

Job Description:
"{job_description}"

Candidate's Resume:
"{resume_text}"

Task:
1. Identify the most relevant past job experience from the resume.
2. Check how closely the responsibilities match the job description.
3. Consider the total years of relevant experience (more years = better score).
4. Assign an Experience Score (0-100).
5. If experience is missing or not closely related, explain why the score is low.

Format (return output in this structure only):
- **Score:** [numeric value]
- **Matched Experience:** [Relevant job title and years]
- **Explanation:** [Why this score was assigned, considering job responsibilities and relevance]"#;

pub const CERTIFICATION_PROMPT_TEMPLATE: &str = r#"You are an AI expert in evaluating resumes with respect to certifications and specialized training.

Job Description:
"{job_description}"

Candidate's Resume:
"{resume_text}"

Task:
1. Identify any certifications or specialized training mentioned in the resume that are relevant to the job.
2. Evaluate how these certifications meet or exceed the job's requirements.
3. Assign a Certification Score (0-100) based solely on the relevance and value of the certifications.

Format (return output in this structure only):
- **Score:** [numeric value]
- **Matched Certifications:** [List of certifications found]
- **Explanation:** [Brief reason why this score was assigned based on the certifications]"#;

pub fn template_for(category: ScoreCategory) -> &'static str {
    match category {
        ScoreCategory::Semantic => SEMANTIC_PROMPT_TEMPLATE,
        ScoreCategory::Education => EDUCATION_PROMPT_TEMPLATE,
        ScoreCategory::Experience => EXPERIENCE_PROMPT_TEMPLATE,
        ScoreCategory::Certification => CERTIFICATION_PROMPT_TEMPLATE,
    }
}

/// Renders the prompt for one category. Job description and resume text are
/// embedded verbatim, even if they happen to contain placeholder text.
pub fn render_prompt(
    category: ScoreCategory,
    job_description: &str,
    resume_text: &str,
    format: ResponseFormat,
) -> String {
    let mut prompt = fill_placeholders(
        template_for(category),
        &[
            ("{job_description}", job_description),
            ("{resume_text}", resume_text),
        ],
    );
    if format == ResponseFormat::Structured {
        prompt.push_str("\n\n");
        prompt.push_str(STRUCTURED_OUTPUT_INSTRUCTION);
    }
    prompt
}

/// Single left-to-right pass over the template; substituted values are never rescanned.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
