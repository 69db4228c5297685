//! Prompt construction for the answer request.

use super::request::{AnswerStyle, QuestionRequest};

/// Persona and formatting rules sent as the system instruction.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert genealogist, specializing in helping \
users with questions about popular genealogy websites. Your tone should be warm, helpful, and \
encouraging. You must format your response in Markdown. For step-by-step answers, use numbered \
lists. For detailed answers, use paragraphs and headings.";

/// Build the user turn: context block, the literal question, and per-style instructions.
pub fn build_user_prompt(request: &QuestionRequest) -> String {
    let website = request.website().label();
    let style = request.style().label();
    let detailed = AnswerStyle::Detailed.label();
    let steps = AnswerStyle::StepByStep.label();

    format!(
        "Please answer the following genealogy question.\n\
         \n\
         **Context:**\n\
         - **Website:** {website}\n\
         - **Desired Answer Style:** {style}\n\
         \n\
         **Question:**\n\
         \"{question}\"\n\
         \n\
         **Instructions:**\n\
         - Provide a helpful and accurate answer based on the user's question and context.\n\
         - If the desired answer style is \"{detailed}\", provide a thorough, narrative-style \
         answer explaining the 'how' and 'why'. Use Markdown for formatting.\n\
         - If the desired answer style is \"{steps}\", provide a clear, concise, numbered list \
         of actions the user should take. Use Markdown's numbered list format.\n\
         - Tailor your response specifically to the functionality and features of the selected \
         website: {website}.\n",
        question = request.question(),
    )
}
